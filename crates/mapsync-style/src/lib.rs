// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Style documents for mapsync.
//!
//! - [`document`]: the style document model (version, sources, layers).
//! - [`catalog`]: nested `group:variant` catalog of named styles.
//! - [`resolve`]: light/dark reference selection and catalog resolution.
//! - [`merge`]: keep caller-owned (`cl-`) layers/sources across replacement.
//!
//! Everything here is pure; applying a style to a live map is the view
//! crate's concern.
#![forbid(unsafe_code)]

use thiserror::Error;

pub mod catalog;
pub mod document;
pub mod merge;
pub mod resolve;

pub use catalog::StyleCatalog;
pub use document::{Layer, StyleDocument, FOREIGN_PREFIX, STYLE_VERSION};
pub use merge::{merge_foreign, ForeignContent};
pub use resolve::{resolve, select, StyleRef};

/// Error type for style parsing and catalog edits.
#[derive(Debug, Error)]
pub enum StyleError {
    /// JSON did not match the style document shape.
    #[error("style json error: {0}")]
    Json(#[from] serde_json::Error),
    /// A catalog path crossed a non-group value.
    #[error("invalid catalog path: {0}")]
    InvalidPath(String),
}
