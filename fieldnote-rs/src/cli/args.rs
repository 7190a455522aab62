//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fieldnote")]
#[command(author, version, about = "A CLI for frontmatter properties in markdown note trees", long_about = None)]
pub struct Cli {
    /// Output as JSON (default)
    #[arg(long, global = true, conflicts_with_all = ["yaml", "toml"])]
    pub json: bool,

    /// Output as YAML
    #[arg(long, global = true, conflicts_with_all = ["json", "toml"])]
    pub yaml: bool,

    /// Output as TOML
    #[arg(long, global = true, conflicts_with_all = ["json", "yaml"])]
    pub toml: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.yaml {
            OutputFormat::Yaml
        } else if self.toml {
            OutputFormat::Toml
        } else {
            OutputFormat::Json
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Toml,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List documents under the given (or configured) roots
    List(ListArgs),

    /// Get a document's properties
    #[command(name = "get-properties")]
    GetProperties(GetPropertiesArgs),

    /// Add a property value to a document
    #[command(name = "add-property")]
    AddProperty(AddPropertyArgs),

    /// Remove a property value or key from a document
    #[command(name = "remove-property")]
    RemoveProperty(RemovePropertyArgs),

    /// Reorder a document's property keys
    #[command(name = "reorder-properties")]
    ReorderProperties(ReorderPropertiesArgs),

    /// Find a substring in a document's body
    #[command(name = "find-in-body")]
    FindInBody(FindInBodyArgs),

    /// Show the schema resolved for a path
    Schema(SchemaArgs),
}

// === list ===

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Root paths to scan (files or directories)
    pub roots: Vec<PathBuf>,

    /// Directory prefix to exclude (repeatable)
    #[arg(long = "exclude", value_name = "PATH")]
    pub excludes: Vec<PathBuf>,

    /// Only scan the immediate directory, not subdirectories
    #[arg(long)]
    pub no_recursive: bool,

    /// Include filesystem metadata per document
    #[arg(long)]
    pub long: bool,
}

// === get-properties ===

#[derive(Parser, Debug)]
pub struct GetPropertiesArgs {
    /// Path to the document
    pub path: PathBuf,

    /// Print only this key's value
    #[arg(long)]
    pub key: Option<String>,
}

// === add-property ===

#[derive(Parser, Debug)]
pub struct AddPropertyArgs {
    /// Path to the document
    pub path: PathBuf,

    /// Property key
    pub key: String,

    /// Value to add (omit for a valueless key)
    pub value: Option<String>,

    /// Replace the existing value instead of merging
    #[arg(long)]
    pub overwrite: bool,

    /// Seed the key as an empty list when absent
    #[arg(long, conflicts_with = "value")]
    pub empty_list: bool,
}

// === remove-property ===

#[derive(Parser, Debug)]
pub struct RemovePropertyArgs {
    /// Path to the document
    pub path: PathBuf,

    /// Property key
    pub key: String,

    /// Value to remove from a list property
    pub value: Option<String>,

    /// Remove the key entirely
    #[arg(long, conflicts_with = "value")]
    pub remove_key: bool,
}

// === reorder-properties ===

#[derive(Parser, Debug)]
pub struct ReorderPropertiesArgs {
    /// Path to the document
    pub path: PathBuf,

    /// Keys in the requested order
    #[arg(required = true)]
    pub keys: Vec<String>,

    /// Place the listed keys last instead of first
    #[arg(long)]
    pub bottom: bool,
}

// === find-in-body ===

#[derive(Parser, Debug)]
pub struct FindInBodyArgs {
    /// Path to the document
    pub path: PathBuf,

    /// Substring to search for
    pub needle: String,
}

// === schema ===

#[derive(Parser, Debug)]
pub struct SchemaArgs {
    /// Path to resolve a schema for (file or directory)
    pub path: PathBuf,
}
