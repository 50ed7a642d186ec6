//! Parser module — TypeScript front end and JSDoc block parsing.

pub mod jsdoc;
pub mod typescript;

use crate::extract;
use crate::model::DocumentationRecord;
use crate::error::Result;
use regex::Regex;
use std::sync::LazyLock;

static RE_TYPESCRIPT_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.tsx?$").unwrap());

/// Whether a file name is a TypeScript source handled by the extractor.
pub fn is_typescript(name: &str) -> bool {
    RE_TYPESCRIPT_FILE.is_match(name)
}

/// Parse a TypeScript file and extract its typedef records.
pub fn extract_file(file_name: &str, content: &str) -> Result<Vec<DocumentationRecord>> {
    let file = typescript::SourceFile::parse(file_name, content)?;
    Ok(extract::extract(&file.root()))
}
