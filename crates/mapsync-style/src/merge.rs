// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Foreign-content merge across base style replacement.
//!
//! The engine replaces a style atomically, so caller-owned content is
//! captured from the outgoing document here and composed onto the incoming
//! one once the engine has loaded it.

use serde_json::{Map, Value};

use crate::{Layer, StyleDocument};

/// Caller-owned layers and sources captured from a style document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForeignContent {
    /// Foreign layers in their original relative order.
    pub layers: Vec<Layer>,
    /// Foreign sources by name.
    pub sources: Map<String, Value>,
}

impl ForeignContent {
    /// Capture every layer/source of `doc` whose id/name starts with `prefix`.
    pub fn extract(doc: &StyleDocument, prefix: &str) -> Self {
        Self {
            layers: doc.foreign_layers(prefix),
            sources: doc.foreign_sources(prefix),
        }
    }

    /// True when nothing foreign was captured.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty() && self.sources.is_empty()
    }

    /// Compose the captured content onto `base`.
    ///
    /// Sources: `base` sources plus captured ones not redefined by `base`.
    /// Layers: non-foreign `base` layers first, then captured layers in
    /// their prior order (a same-id layer from `base` replaces the captured
    /// definition in place), then foreign layers only `base` declares.
    pub fn compose(&self, base: &StyleDocument, prefix: &str) -> StyleDocument {
        let mut sources = base.sources.clone();
        for (name, def) in &self.sources {
            if !sources.contains_key(name) {
                sources.insert(name.clone(), def.clone());
            }
        }

        let (base_foreign, mut layers): (Vec<&Layer>, Vec<&Layer>) =
            base.layers.iter().partition(|l| l.is_foreign(prefix));
        for kept in &self.layers {
            let replacement = base_foreign.iter().copied().find(|l| l.id == kept.id);
            layers.push(replacement.unwrap_or(kept));
        }
        for extra in base_foreign.iter().copied() {
            if !self.layers.iter().any(|l| l.id == extra.id) {
                layers.push(extra);
            }
        }

        StyleDocument {
            version: base.version,
            sources,
            layers: layers.into_iter().cloned().collect(),
            extra: base.extra.clone(),
        }
    }
}

/// Merge the foreign content of `old` onto `new`.
pub fn merge_foreign(old: &StyleDocument, new: &StyleDocument, prefix: &str) -> StyleDocument {
    ForeignContent::extract(old, prefix).compose(new, prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FOREIGN_PREFIX;
    use serde_json::json;

    fn doc(value: Value) -> StyleDocument {
        StyleDocument::from_value(value).unwrap()
    }

    #[test]
    fn foreign_layers_appended_after_base() {
        let old = doc(json!({
            "version": 8,
            "sources": {"dark-base": {}, "cl-points": {"type": "geojson"}},
            "layers": [{"id": "dark-bg"}, {"id": "cl-dots"}, {"id": "dark-roads"}, {"id": "cl-labels"}]
        }));
        let new = doc(json!({
            "version": 8,
            "sources": {"light-base": {}},
            "layers": [{"id": "light-bg"}, {"id": "light-roads"}]
        }));
        let merged = merge_foreign(&old, &new, FOREIGN_PREFIX);
        assert_eq!(
            merged.layer_ids(),
            vec!["light-bg", "light-roads", "cl-dots", "cl-labels"]
        );
        assert!(merged.sources.contains_key("light-base"));
        assert!(merged.sources.contains_key("cl-points"));
        assert!(!merged.sources.contains_key("dark-base"));
    }

    #[test]
    fn new_document_redefinition_wins_and_stays_on_top() {
        let old = doc(json!({
            "version": 8,
            "sources": {"cl-src": {"v": 1}},
            "layers": [{"id": "cl-a", "v": 1}, {"id": "cl-b", "v": 1}]
        }));
        let new = doc(json!({
            "version": 8,
            "sources": {"cl-src": {"v": 2}},
            "layers": [{"id": "cl-b", "v": 2}, {"id": "base"}, {"id": "cl-c"}]
        }));
        let merged = merge_foreign(&old, &new, FOREIGN_PREFIX);
        assert_eq!(merged.layer_ids(), vec!["base", "cl-a", "cl-b", "cl-c"]);
        assert_eq!(merged.layer("cl-b").unwrap().spec.get("v"), Some(&json!(2)));
        assert_eq!(merged.sources.get("cl-src"), Some(&json!({"v": 2})));
    }

    #[test]
    fn nothing_foreign_returns_new_document() {
        let old = doc(json!({"version": 8, "layers": [{"id": "a"}]}));
        let new = doc(json!({"version": 8, "name": "n", "layers": [{"id": "b"}]}));
        assert!(ForeignContent::extract(&old, FOREIGN_PREFIX).is_empty());
        assert_eq!(merge_foreign(&old, &new, FOREIGN_PREFIX), new);
    }

    #[test]
    fn custom_prefix() {
        let old = doc(json!({"version": 8, "layers": [{"id": "app/overlay"}, {"id": "cl-x"}]}));
        let new = StyleDocument::empty();
        let merged = merge_foreign(&old, &new, "app/");
        assert_eq!(merged.layer_ids(), vec!["app/overlay"]);
    }
}
