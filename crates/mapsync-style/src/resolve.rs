// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Resolve a light/dark style reference pair into a concrete document.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{StyleCatalog, StyleDocument};

/// A style as supplied by the caller: inline document or catalog path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleRef {
    /// `group:variant` path into a [`StyleCatalog`].
    Path(String),
    /// Inline style document.
    Document(StyleDocument),
}

impl From<StyleDocument> for StyleRef {
    fn from(doc: StyleDocument) -> Self {
        Self::Document(doc)
    }
}

impl From<&str> for StyleRef {
    fn from(path: &str) -> Self {
        Self::Path(path.to_owned())
    }
}

impl From<String> for StyleRef {
    fn from(path: String) -> Self {
        Self::Path(path)
    }
}

/// Pick the reference to use for the current color scheme.
///
/// The dark reference only wins when `is_dark` is set and one was supplied.
pub fn select<'a>(
    light: Option<&'a StyleRef>,
    dark: Option<&'a StyleRef>,
    is_dark: bool,
) -> Option<&'a StyleRef> {
    if is_dark {
        dark.or(light)
    } else {
        light
    }
}

/// Resolve `light`/`dark` against `catalog` for the given color scheme.
///
/// Never fails: an absent reference or a path that does not reach a style
/// document yields [`StyleDocument::empty`].
pub fn resolve(
    light: Option<&StyleRef>,
    dark: Option<&StyleRef>,
    is_dark: bool,
    catalog: &StyleCatalog,
) -> StyleDocument {
    match select(light, dark, is_dark) {
        Some(StyleRef::Document(doc)) => doc.clone(),
        Some(StyleRef::Path(path)) => catalog.lookup(path).unwrap_or_else(|| {
            debug!(path = %path, "style path not in catalog; using empty style");
            StyleDocument::empty()
        }),
        None => StyleDocument::empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn named(name: &str) -> StyleDocument {
        StyleDocument::from_value(json!({"version": 8, "name": name})).unwrap()
    }

    fn catalog() -> StyleCatalog {
        let mut cat = StyleCatalog::default();
        cat.insert("streets:light", &named("streets-light")).unwrap();
        cat.insert("streets:dark", &named("streets-dark")).unwrap();
        cat
    }

    #[test]
    fn light_used_when_not_dark() {
        let light = StyleRef::from("streets:light");
        let dark = StyleRef::from("streets:dark");
        let doc = resolve(Some(&light), Some(&dark), false, &catalog());
        assert_eq!(doc, named("streets-light"));
    }

    #[test]
    fn dark_used_when_dark_and_supplied() {
        let light = StyleRef::from("streets:light");
        let dark = StyleRef::from("streets:dark");
        let doc = resolve(Some(&light), Some(&dark), true, &catalog());
        assert_eq!(doc, named("streets-dark"));
    }

    #[test]
    fn dark_falls_back_to_light() {
        let light = StyleRef::from("streets:light");
        let doc = resolve(Some(&light), None, true, &catalog());
        assert_eq!(doc, named("streets-light"));
    }

    #[test]
    fn inline_document_returned_unchanged() {
        let light = StyleRef::from(named("inline"));
        let doc = resolve(Some(&light), None, false, &StyleCatalog::default());
        assert_eq!(doc, named("inline"));
    }

    #[test]
    fn unknown_path_yields_empty_style() {
        let light = StyleRef::from("streets:sepia");
        let doc = resolve(Some(&light), None, false, &catalog());
        assert_eq!(doc, StyleDocument::empty());
    }

    #[test]
    fn absent_reference_yields_empty_style() {
        assert_eq!(
            resolve(None, None, true, &catalog()),
            StyleDocument::empty()
        );
    }

    #[test]
    fn style_ref_deserializes_untagged() {
        let path: StyleRef = serde_json::from_value(json!("streets:dark")).unwrap();
        assert_eq!(path, StyleRef::Path("streets:dark".into()));
        let doc: StyleRef = serde_json::from_value(json!({"version": 8})).unwrap();
        assert_eq!(doc, StyleRef::Document(StyleDocument::empty()));
    }
}
