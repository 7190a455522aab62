//! Schema resolution: the nearest-ancestor `types.json` type table.
//!
//! Obsidian keeps a per-vault declaration of property types in
//! `.obsidian/types.json`. A document's schema is the one declared by the
//! nearest ancestor directory holding that file. The table is passthrough
//! context only; nothing here interprets or enforces the declared types.

use crate::error::{FieldnoteError, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Relative path of the schema-declaration file, probed in each ancestor.
pub const TYPES_FILE: &str = ".obsidian/types.json";

/// A declared property-type table, loaded verbatim from `types.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    /// The declaration file this table was loaded from.
    pub source: PathBuf,
    /// Property key to declared type name, kept as raw JSON.
    pub types: serde_json::Map<String, serde_json::Value>,
}

impl Schema {
    /// Load a schema from a declaration file.
    ///
    /// The file must be valid JSON with a `types` object; anything else is
    /// fatal. A corrupt schema is never silently defaulted.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;

        let value: serde_json::Value =
            serde_json::from_str(&raw).map_err(|e| FieldnoteError::SchemaMalformed {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let types = value
            .get("types")
            .and_then(|t| t.as_object())
            .cloned()
            .ok_or_else(|| FieldnoteError::SchemaMalformed {
                path: path.to_path_buf(),
                message: "missing `types` object".to_string(),
            })?;

        Ok(Self {
            source: path.to_path_buf(),
            types,
        })
    }

    /// Declared type name for a property key, when it is a plain string.
    pub fn type_of(&self, key: &str) -> Option<&str> {
        self.types.get(key).and_then(|v| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Find and load the nearest ancestor schema for `start`.
///
/// Walks upward from the containing directory of `start` (or `start` itself
/// when it names a directory), probing each level for [`TYPES_FILE`]. The
/// search stops at the filesystem root, which is not itself probed. A
/// missing declaration file is `Ok(None)`; a malformed one is fatal.
pub fn resolve(start: &Path) -> Result<Option<Schema>> {
    // Relative starts are anchored to the current directory so the walk
    // covers every real ancestor up to the filesystem root.
    let start = if start.is_absolute() {
        start.to_path_buf()
    } else {
        std::env::current_dir()?.join(start)
    };

    let root = start.ancestors().last().unwrap_or(&start);

    let mut cwd = if start.is_file() {
        start.parent().unwrap_or(root)
    } else {
        start.as_path()
    };

    while cwd != root {
        let attempt = cwd.join(TYPES_FILE);
        if attempt.exists() {
            return Schema::load(&attempt).map(Some);
        }
        match cwd.parent() {
            Some(parent) => cwd = parent,
            None => break,
        }
    }

    Ok(None)
}
