//! Parsing utilities for markdown documents.

pub mod frontmatter;

pub use frontmatter::{
    HeaderSplit, extract_header, parse, parse_with_path, serialize, split_header,
};
