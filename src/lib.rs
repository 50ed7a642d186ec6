//! tsdoc-press — typedef documentation for TypeScript declarations and
//! post-processing of rendered documentation pages.
//!
//! Two independent stages:
//!
//! - **Extraction** ([`extract`], [`collect`]): documented `interface` and
//!   `type` declarations become typedef records appended to a documentation list.
//! - **Page transformation** ([`page`]): rendered HTML pages get branding,
//!   navigation fixes, "Declare:" labels and an optional coverage report.

pub mod collect;
pub mod config;
pub mod error;
pub mod extract;
pub mod logging;
pub mod model;
pub mod page;
pub mod parser;

pub use config::PageContext;
pub use error::{Error, Result};
pub use page::transform_page;
