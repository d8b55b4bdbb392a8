// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Style document builders for tests.

use mapsync_style::{Layer, StyleCatalog, StyleDocument, STYLE_VERSION};
use serde_json::{json, Map, Value};

/// Builder for [`StyleDocument`] fixtures.
///
/// # Example
///
/// ```
/// use mapsync_dry_tests::StyleBuilder;
///
/// let doc = StyleBuilder::new("dark")
///     .source("base", "vector")
///     .layer("water", "fill", "base")
///     .build();
/// assert_eq!(doc.layer_ids(), vec!["water"]);
/// ```
#[derive(Debug, Clone)]
pub struct StyleBuilder {
    name: String,
    sources: Map<String, Value>,
    layers: Vec<Layer>,
}

impl StyleBuilder {
    /// Start an empty style carrying `name` as its root `name` key.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sources: Map::new(),
            layers: Vec::new(),
        }
    }

    /// Add a source of the given `type`.
    pub fn source(mut self, name: &str, kind: &str) -> Self {
        self.sources.insert(name.to_owned(), json!({ "type": kind }));
        self
    }

    /// Append a layer of `kind` drawing from `source`.
    pub fn layer(mut self, id: &str, kind: &str, source: &str) -> Self {
        self.layers
            .push(Layer::new(id, json!({ "type": kind, "source": source })));
        self
    }

    /// Finish the document.
    pub fn build(self) -> StyleDocument {
        let mut extra = Map::new();
        extra.insert("name".to_owned(), Value::String(self.name));
        StyleDocument {
            version: STYLE_VERSION,
            sources: self.sources,
            layers: self.layers,
            extra,
        }
    }
}

/// Base style with one source (`<name>-base`) and the given base layers.
pub fn base_style(name: &str, layer_ids: &[&str]) -> StyleDocument {
    let source = format!("{name}-base");
    layer_ids
        .iter()
        .fold(StyleBuilder::new(name).source(&source, "vector"), |b, id| {
            b.layer(id, "fill", &source)
        })
        .build()
}

/// Catalog with `streets:light` and `streets:dark` built by [`base_style`].
#[allow(clippy::expect_used)]
pub fn streets_catalog() -> StyleCatalog {
    let mut catalog = StyleCatalog::default();
    for (path, name) in [("streets:light", "light"), ("streets:dark", "dark")] {
        catalog
            .insert(path, &base_style(name, &["background", "roads"]))
            .expect("fresh catalog accepts group paths");
    }
    catalog
}
