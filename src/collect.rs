//! Document collection — appends typedef records to a documentation list.
//!
//! The list is the generic dataset produced by the documentation pipeline:
//! a JSON array of doc objects. Only `kind: "file"` entries naming a
//! TypeScript source are expanded; everything else passes through untouched.

use crate::error::Result;
use crate::model::DocumentationRecord;
use crate::parser;
use serde::Serialize;
use serde_json::Value;

/// A record with the identity fields the documentation list expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StampedRecord {
    #[serde(flatten)]
    pub record: DocumentationRecord,
    pub longname: String,
    pub memberof: String,
    #[serde(rename = "__docId__")]
    pub doc_id: usize,
}

/// Attach identity to a record extracted from `file_name`.
pub fn stamp(record: DocumentationRecord, file_name: &str, doc_id: usize) -> StampedRecord {
    StampedRecord {
        longname: format!("{}~{}", file_name, record.name),
        memberof: file_name.to_string(),
        doc_id,
        record,
    }
}

/// Expand every TypeScript file doc present in `docs` on entry and append
/// the stamped records. Returns the number of records appended.
pub fn augment_docs(docs: &mut Vec<Value>) -> Result<usize> {
    let initial = docs.len();
    let mut appended = 0;

    for index in 0..initial {
        let Some((name, parse_name, content)) = typescript_file(&docs[index]) else {
            continue;
        };

        let records = match parser::extract_file(&parse_name, &content) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(file = %name, error = %e, "skipping unparsable file");
                continue;
            }
        };
        tracing::debug!(file = %name, records = records.len(), "extracted typedefs");

        for record in records {
            let doc_id = docs.len() + 1;
            docs.push(serde_json::to_value(stamp(record, &name, doc_id))?);
            appended += 1;
        }
    }

    Ok(appended)
}

/// `(name, parse name, content)` for a TypeScript file doc.
fn typescript_file(doc: &Value) -> Option<(String, String, String)> {
    if doc.get("kind").and_then(Value::as_str) != Some("file") {
        return None;
    }
    let name = doc.get("name").and_then(Value::as_str)?;
    if !parser::is_typescript(name) {
        return None;
    }
    let parse_name = doc
        .get("longname")
        .and_then(Value::as_str)
        .unwrap_or(name);
    let content = doc.get("content").and_then(Value::as_str).unwrap_or("");
    Some((name.to_string(), parse_name.to_string(), content.to_string()))
}

/// Extract and stamp records for a set of `(file name, content)` sources,
/// numbering them from 1. Unparsable files are logged and skipped.
pub fn collect_sources<'a, I>(sources: I) -> Vec<StampedRecord>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut stamped = Vec::new();
    for (name, content) in sources {
        match parser::extract_file(name, content) {
            Ok(records) => {
                tracing::debug!(file = %name, records = records.len(), "extracted typedefs");
                for record in records {
                    let doc_id = stamped.len() + 1;
                    stamped.push(stamp(record, name, doc_id));
                }
            }
            Err(e) => tracing::warn!(file = %name, error = %e, "skipping unparsable file"),
        }
    }
    stamped
}
