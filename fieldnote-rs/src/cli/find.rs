//! Body search command implementation.

use crate::cli::args::FindInBodyArgs;
use crate::cli::output::Output;
use crate::document::Document;
use crate::error::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct FindResponse {
    pub path: String,
    pub needle: String,
    pub offsets: Vec<usize>,
    pub total: usize,
}

pub fn run(args: &FindInBodyArgs, output: &Output) -> Result<()> {
    let doc = Document::open(&args.path)?;
    let offsets = doc.find_in_body(&args.needle);

    if offsets.is_empty() {
        output.info("not found");
    }

    let response = FindResponse {
        path: doc.path.to_string_lossy().to_string(),
        needle: args.needle.clone(),
        total: offsets.len(),
        offsets,
    };
    output.print(&response)
}
