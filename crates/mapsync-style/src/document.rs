// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Style document model.
//!
//! Only the parts the merge engine needs are typed (version, sources, layer
//! ids). Everything else is carried through verbatim as JSON so documents
//! survive a round trip through the engine untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::StyleError;

/// Style specification version emitted for empty documents.
pub const STYLE_VERSION: u32 = 8;

/// Reserved id/name prefix marking caller-owned layers and sources.
pub const FOREIGN_PREFIX: &str = "cl-";

/// A single style layer. `id` is unique within a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// Layer identifier.
    pub id: String,
    /// Remaining layer definition (`type`, `source`, `paint`, ...).
    #[serde(flatten)]
    pub spec: Map<String, Value>,
}

impl Layer {
    /// Build a layer from an id and a JSON object body.
    ///
    /// Non-object bodies yield a layer with an empty definition.
    pub fn new(id: impl Into<String>, spec: Value) -> Self {
        let spec = match spec {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            id: id.into(),
            spec,
        }
    }

    /// True when the layer id carries the foreign `prefix`.
    pub fn is_foreign(&self, prefix: &str) -> bool {
        self.id.starts_with(prefix)
    }
}

/// Structured map style: version tag, named sources, ordered layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleDocument {
    /// Style specification version.
    pub version: u32,
    /// Source name to source definition.
    #[serde(default)]
    pub sources: Map<String, Value>,
    /// Layers in paint order (first is bottom-most).
    #[serde(default)]
    pub layers: Vec<Layer>,
    /// Other root keys (`name`, `sprite`, `glyphs`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for StyleDocument {
    fn default() -> Self {
        Self::empty()
    }
}

impl StyleDocument {
    /// The explicit empty style `{version: 8, sources: {}, layers: []}`.
    pub fn empty() -> Self {
        Self {
            version: STYLE_VERSION,
            sources: Map::new(),
            layers: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Parse a document from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, StyleError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Convert a JSON value into a document.
    pub fn from_value(value: Value) -> Result<Self, StyleError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Serialize the document back into a JSON value.
    pub fn to_value(&self) -> Result<Value, StyleError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Look up a layer by id.
    pub fn layer(&self, id: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    /// Ids of all layers, in paint order.
    pub fn layer_ids(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.id.as_str()).collect()
    }

    /// Layers whose id starts with `prefix`, in document order.
    pub fn foreign_layers(&self, prefix: &str) -> Vec<Layer> {
        self.layers
            .iter()
            .filter(|l| l.is_foreign(prefix))
            .cloned()
            .collect()
    }

    /// Sources whose name starts with `prefix`.
    pub fn foreign_sources(&self, prefix: &str) -> Map<String, Value> {
        self.sources
            .iter()
            .filter(|(name, _)| name.starts_with(prefix))
            .map(|(name, def)| (name.clone(), def.clone()))
            .collect()
    }
}
