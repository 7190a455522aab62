//! List command implementation.

use crate::cli::output::Output;
use crate::collection::Collection;
use crate::document::DocumentInfo;
use crate::error::Result;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub documents: Vec<DocumentInfo>,
    pub total: usize,
}

pub fn run(
    roots: Vec<PathBuf>,
    excludes: Vec<PathBuf>,
    recursive: bool,
    long: bool,
    output: &Output,
) -> Result<()> {
    let collection = Collection::scan(roots, excludes, recursive)?;

    let documents: Vec<DocumentInfo> = collection
        .documents()
        .iter()
        .map(|doc| {
            if long {
                DocumentInfo::from_path(&doc.path).unwrap_or_else(|e| {
                    output.warn(&format!("no metadata for {}: {}", doc.path.display(), e));
                    DocumentInfo::bare(&doc.path)
                })
            } else {
                DocumentInfo::bare(&doc.path)
            }
        })
        .collect();

    let response = ListResponse {
        total: documents.len(),
        documents,
    };
    output.print(&response)
}
