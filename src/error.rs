//! Library error type.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid documentation list: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to load TypeScript grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    #[error("failed to parse {0}")]
    Parse(String),

    #[error("invalid alias '{0}', expected LABEL=REPLACEMENT")]
    InvalidAlias(String),
}
