//! Document representation and operations.

use crate::error::{FieldnoteError, Result};
use crate::parser::frontmatter;
use crate::properties::{PropertyMap, PropertyValue};
use crate::schema::{self, Schema};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const DOCUMENT_EXTENSION: &str = "md";

/// One markdown document: its parsed header properties, its body, and the
/// schema resolved for its location.
///
/// Two documents are the same logical entity iff they share a path;
/// equality and hashing ignore in-memory state.
#[derive(Debug, Clone)]
pub struct Document {
    /// Where the document was loaded from. Immutable after construction;
    /// writing to another target does not rebind it.
    pub path: PathBuf,

    properties: PropertyMap,
    body: String,
    schema: Option<Arc<Schema>>,
}

impl Document {
    /// Open a document standalone, resolving its own schema.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            return Err(FieldnoteError::NotFound(path));
        }
        if !is_document(&path) {
            return Err(FieldnoteError::NotADocument(path));
        }

        let schema = schema::resolve(&path)?.map(Arc::new);
        Self::open_with_schema(path, schema)
    }

    /// Open a document with an already-resolved schema handle.
    ///
    /// This is the batch path: a `Collection` resolves once and passes the
    /// same handle to every document it constructs.
    pub fn open_with_schema(
        path: impl Into<PathBuf>,
        schema: Option<Arc<Schema>>,
    ) -> Result<Self> {
        let path = path.into();
        if !path.is_file() {
            return Err(FieldnoteError::NotFound(path));
        }
        if !is_document(&path) {
            return Err(FieldnoteError::NotADocument(path));
        }

        let text = std::fs::read_to_string(&path)?;
        Self::from_content(path, &text, schema)
    }

    /// Build a document from in-memory text without touching the filesystem.
    pub fn from_content(
        path: impl Into<PathBuf>,
        text: &str,
        schema: Option<Arc<Schema>>,
    ) -> Result<Self> {
        let path = path.into();
        let (properties, body) = frontmatter::parse_with_path(text, &path)?;
        Ok(Self {
            path,
            properties,
            body: body.to_string(),
            schema,
        })
    }

    pub fn properties(&self) -> &PropertyMap {
        &self.properties
    }

    /// Mutable access to the raw map, for operations outside the merge
    /// semantics (seeding an empty list, bulk edits).
    pub fn properties_mut(&mut self) -> &mut PropertyMap {
        &mut self.properties
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn schema(&self) -> Option<&Arc<Schema>> {
        self.schema.as_ref()
    }

    /// Check whether `key` is present, regardless of value.
    pub fn has_property(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// Check whether `key` holds (or contains) `value`.
    pub fn has_value(&self, key: &str, value: &str) -> bool {
        self.properties
            .get(key)
            .map(|v| v.contains(value))
            .unwrap_or(false)
    }

    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// Byte offsets of every non-overlapping occurrence of `needle` in the
    /// body, scanned left to right. An empty result means not found.
    pub fn find_in_body(&self, needle: &str) -> Vec<usize> {
        let mut offsets = Vec::new();
        if needle.is_empty() {
            return offsets;
        }

        let mut from = 0;
        while let Some(pos) = self.body[from..].find(needle) {
            let offset = from + pos;
            offsets.push(offset);
            from = offset + needle.len();
        }
        offsets
    }

    /// Add a property value with merge semantics. See [`PropertyMap::add`].
    pub fn add_property(&mut self, key: &str, value: Option<&str>, overwrite: bool) {
        self.properties.add(key, value, overwrite);
    }

    /// Remove a property value or the whole key. See [`PropertyMap::remove`].
    pub fn remove_property(&mut self, key: &str, value: Option<&str>, remove_key: bool) {
        self.properties.remove(key, value, remove_key);
    }

    /// Re-sort the property key order. See [`PropertyMap::reorder`].
    pub fn reorder_properties(&mut self, order: &[String], listed_first: bool) {
        self.properties.reorder(order, listed_first);
    }

    /// Produce the on-disk textual form via the codec. No side effects.
    pub fn render(&self) -> Result<String> {
        frontmatter::serialize(&self.properties, &self.body)
    }

    /// Write the document out.
    ///
    /// The destination is `target` if given, else the document's own path;
    /// `self.path` is never rebound. A document with no properties is
    /// written as its body behind a single blank line, bypassing the codec,
    /// so no vacuous header block is emitted.
    pub fn write(&self, target: Option<&Path>) -> Result<()> {
        let dest = target.unwrap_or(&self.path);

        let text = if self.properties.is_empty() {
            format!("\n{}", self.body)
        } else {
            self.render()?
        };

        if let Some(parent) = dest.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        std::fs::write(dest, text)?;
        Ok(())
    }

    /// Get the document name (filename without the extension).
    pub fn name(&self) -> &str {
        self.path.file_stem().and_then(|s| s.to_str()).unwrap_or("")
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for Document {}

impl Hash for Document {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

/// Whether a path names an in-scope document file.
pub fn is_document(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(DOCUMENT_EXTENSION)
}

/// Output representation of a document for CLI listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub path: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
}

impl DocumentInfo {
    /// Path-only entry, no filesystem probes.
    pub fn bare(path: &Path) -> Self {
        Self {
            path: path.to_string_lossy().to_string(),
            name: stem(path),
            modified: None,
            created: None,
            size_bytes: None,
        }
    }

    /// Entry with filesystem metadata.
    pub fn from_path(path: &Path) -> Result<Self> {
        let metadata = std::fs::metadata(path)?;

        let modified = metadata
            .modified()
            .ok()
            .map(|t| chrono::DateTime::<chrono::Utc>::from(t).to_rfc3339());

        let created = metadata
            .created()
            .ok()
            .map(|t| chrono::DateTime::<chrono::Utc>::from(t).to_rfc3339());

        Ok(Self {
            path: path.to_string_lossy().to_string(),
            name: stem(path),
            modified,
            created,
            size_bytes: Some(metadata.len()),
        })
    }
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_string()
}
