// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Named style catalog addressed by `group:variant` paths.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{StyleDocument, StyleError};

/// Separator between catalog path segments.
pub const PATH_SEPARATOR: char = ':';

/// Nested catalog of style documents.
///
/// Intermediate objects are groups; a leaf is any object that parses as a
/// [`StyleDocument`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleCatalog {
    root: Value,
}

impl Default for StyleCatalog {
    fn default() -> Self {
        Self {
            root: Value::Object(serde_json::Map::new()),
        }
    }
}

impl StyleCatalog {
    /// Wrap a JSON tree as a catalog.
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// Parse a catalog from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, StyleError> {
        Ok(Self::from_value(serde_json::from_str(text)?))
    }

    /// Insert (or replace) the document at `path`, creating groups as needed.
    ///
    /// Fails when a segment along the way is already a non-object value.
    pub fn insert(&mut self, path: &str, doc: &StyleDocument) -> Result<(), StyleError> {
        let mut node = &mut self.root;
        let segments: Vec<&str> = path.split(PATH_SEPARATOR).collect();
        let Some((last, groups)) = segments.split_last() else {
            return Err(StyleError::InvalidPath(path.to_owned()));
        };
        for seg in groups {
            node = match node {
                Value::Object(map) => map
                    .entry((*seg).to_owned())
                    .or_insert_with(|| Value::Object(serde_json::Map::new())),
                _ => return Err(StyleError::InvalidPath(path.to_owned())),
            };
        }
        let Value::Object(map) = node else {
            return Err(StyleError::InvalidPath(path.to_owned()));
        };
        map.insert((*last).to_owned(), doc.to_value()?);
        Ok(())
    }

    /// Walk `path` segment by segment and return the document at the leaf.
    ///
    /// Returns `None` when a segment is missing or the leaf is not a style
    /// document.
    pub fn lookup(&self, path: &str) -> Option<StyleDocument> {
        let leaf = path
            .split(PATH_SEPARATOR)
            .try_fold(&self.root, |node, seg| node.as_object()?.get(seg))?;
        StyleDocument::from_value(leaf.clone()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog() -> StyleCatalog {
        StyleCatalog::from_value(json!({
            "streets": {
                "light": {"version": 8, "name": "streets-light", "sources": {}, "layers": []},
                "dark": {"version": 8, "name": "streets-dark", "sources": {}, "layers": []}
            },
            "satellite": {"version": 8, "name": "satellite", "sources": {}, "layers": []}
        }))
    }

    #[test]
    fn lookup_walks_nested_groups() {
        let doc = catalog().lookup("streets:dark").unwrap();
        assert_eq!(doc.extra.get("name"), Some(&json!("streets-dark")));
    }

    #[test]
    fn lookup_single_segment_leaf() {
        let doc = catalog().lookup("satellite").unwrap();
        assert_eq!(doc.extra.get("name"), Some(&json!("satellite")));
    }

    #[test]
    fn lookup_missing_segment_is_none() {
        assert!(catalog().lookup("streets:sepia").is_none());
        assert!(catalog().lookup("nope").is_none());
        assert!(catalog().lookup("satellite:extra").is_none());
    }

    #[test]
    fn lookup_group_is_not_a_document() {
        assert!(catalog().lookup("streets").is_none());
    }

    #[test]
    fn insert_creates_groups() {
        let mut cat = StyleCatalog::default();
        cat.insert("outdoors:winter", &StyleDocument::empty()).unwrap();
        assert_eq!(cat.lookup("outdoors:winter"), Some(StyleDocument::empty()));
    }

    #[test]
    fn insert_through_leaf_fails() {
        let mut cat = StyleCatalog::from_value(json!({"a": 1}));
        let err = cat.insert("a:b", &StyleDocument::empty()).unwrap_err();
        assert!(matches!(err, StyleError::InvalidPath(_)));
    }
}
