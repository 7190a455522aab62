//! Error types and exit codes for Fieldnote.

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes for the CLI.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NOT_FOUND: i32 = 2;
    pub const NOT_A_DOCUMENT: i32 = 3;
    pub const INVALID_HEADER: i32 = 4;
    pub const SCHEMA_MALFORMED: i32 = 5;
}

/// Main error type for Fieldnote operations.
#[derive(Error, Debug)]
pub enum FieldnoteError {
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    #[error("Not a markdown document: {0}")]
    NotADocument(PathBuf),

    #[error("Invalid header block in {path}: {message}")]
    InvalidHeader { path: PathBuf, message: String },

    #[error("Malformed schema declaration in {path}: {message}")]
    SchemaMalformed { path: PathBuf, message: String },

    #[error("Invalid root paths: {0}")]
    InvalidRoots(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),

    #[error("{0}")]
    Other(String),
}

impl FieldnoteError {
    /// Returns the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            FieldnoteError::NotFound(_) => exit_code::NOT_FOUND,
            FieldnoteError::NotADocument(_) => exit_code::NOT_A_DOCUMENT,
            FieldnoteError::InvalidHeader { .. } => exit_code::INVALID_HEADER,
            FieldnoteError::SchemaMalformed { .. } => exit_code::SCHEMA_MALFORMED,
            _ => exit_code::GENERAL_ERROR,
        }
    }
}

/// Result type alias for Fieldnote operations.
pub type Result<T> = std::result::Result<T, FieldnoteError>;
