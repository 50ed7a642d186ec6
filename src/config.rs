//! Page-transformation configuration.
//!
//! Loaded once (JSON file and/or CLI flags) and then shared read-only by
//! every page transformation.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Branding and navigation options for rendered pages.
///
/// Accepts the documentation plugin's option names (`logo`, `alias`,
/// `testCoverage`) as well as the descriptive ones.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContext {
    #[serde(alias = "logo")]
    pub logo_url: Option<String>,
    /// Shown next to the logo as plain text; markup in it is escaped.
    pub title: Option<String>,
    /// Displayed navigation label → replacement label.
    #[serde(alias = "alias")]
    pub nav_alias: Option<BTreeMap<String, String>>,
    #[serde(alias = "testCoverage")]
    pub coverage_url: Option<String>,
}

/// Values given on the command line; each one replaces the file value.
#[derive(Debug, Default)]
pub struct Overrides {
    pub logo_url: Option<String>,
    pub title: Option<String>,
    pub aliases: Vec<String>,
    pub coverage_url: Option<String>,
}

impl PageContext {
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply CLI overrides. `--alias` entries are merged into the alias map.
    pub fn with_overrides(mut self, overrides: Overrides) -> Result<Self> {
        if overrides.logo_url.is_some() {
            self.logo_url = overrides.logo_url;
        }
        if overrides.title.is_some() {
            self.title = overrides.title;
        }
        if overrides.coverage_url.is_some() {
            self.coverage_url = overrides.coverage_url;
        }
        for raw in &overrides.aliases {
            let (label, replacement) = parse_alias(raw)?;
            self.nav_alias
                .get_or_insert_with(BTreeMap::new)
                .insert(label, replacement);
        }
        Ok(self)
    }

    /// Replacement for a navigation label. Empty replacements count as unset.
    pub fn alias_for(&self, label: &str) -> Option<&str> {
        self.nav_alias
            .as_ref()?
            .get(label)
            .map(String::as_str)
            .filter(|r| !r.is_empty())
    }
}

fn parse_alias(raw: &str) -> Result<(String, String)> {
    match raw.split_once('=') {
        Some((label, replacement)) if !label.is_empty() => {
            Ok((label.to_string(), replacement.to_string()))
        }
        _ => Err(Error::InvalidAlias(raw.to_string())),
    }
}
