//! Fieldnote - a library for managing frontmatter properties in
//! Obsidian-style note trees.
//!
//! # Overview
//!
//! Fieldnote provides a programmatic interface to the structured metadata
//! ("properties") held in the YAML header block of markdown documents:
//! - Property queries and mutation with scalar/list merge semantics
//! - Hierarchical schema resolution (nearest-ancestor `types.json`)
//! - Collection scanning over root directories with exclusions
//! - Whitespace-preserving header-block parsing and serialization
//!
//! # Example
//!
//! ```no_run
//! use std::path::PathBuf;
//! use fieldnote::{Collection, Document};
//!
//! // Scan a note tree
//! let collection = Collection::scan(
//!     vec![PathBuf::from("/path/to/notes")],
//!     Vec::new(),
//!     true,
//! )
//! .unwrap();
//!
//! for doc in collection.documents() {
//!     println!("{}", doc.path.display());
//! }
//!
//! // Mutate a single document
//! let mut doc = Document::open("/path/to/notes/my-note.md").unwrap();
//! doc.add_property("tags", Some("rust"), false);
//! doc.write(None).unwrap();
//! ```

pub mod cli;
pub mod collection;
pub mod config;
pub mod document;
pub mod error;
pub mod parser;
pub mod properties;
pub mod schema;

// Re-export main types at crate root
pub use collection::Collection;
pub use config::Config;
pub use document::{Document, DocumentInfo};
pub use error::{FieldnoteError, Result};
pub use properties::{PropertyMap, PropertyValue};
pub use schema::Schema;
