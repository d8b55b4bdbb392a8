// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Two-phase style application.
//!
//! Phase 1 hands the new document to the engine. Phase 2 runs on the next
//! style-data signal and re-applies it with the foreign content captured
//! from the outgoing style. If the signal never arrives the captured
//! content is dropped on the next change.

use mapsync_port::MapPort;
use mapsync_style::{ForeignContent, StyleDocument};
use tracing::debug;

/// Tracks the last applied style and any pending re-injection.
#[derive(Debug, Clone)]
pub struct StyleSync {
    prefix: String,
    applied: Option<StyleDocument>,
    pending: Option<ForeignContent>,
}

impl StyleSync {
    /// `initial` is the style the engine was constructed with.
    pub fn new(prefix: impl Into<String>, initial: Option<StyleDocument>) -> Self {
        Self {
            prefix: prefix.into(),
            applied: initial,
            pending: None,
        }
    }

    /// Foreign id/name prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Last document handed to the engine in phase 1.
    pub fn applied(&self) -> Option<&StyleDocument> {
        self.applied.as_ref()
    }

    /// True while a phase 2 re-injection is waiting for style data.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Phase 1. Returns false when `doc` equals the last applied document.
    pub fn apply<M: MapPort>(&mut self, map: &mut M, doc: StyleDocument) -> bool {
        if self.applied.as_ref() == Some(&doc) {
            return false;
        }
        let captured = if map.is_style_loaded() {
            ForeignContent::extract(&map.style(), &self.prefix)
        } else {
            // Previous phase 2 never ran; keep what it was carrying.
            self.pending.take().unwrap_or_default()
        };
        debug!(
            layers = doc.layers.len(),
            foreign_layers = captured.layers.len(),
            foreign_sources = captured.sources.len(),
            "applying style"
        );
        map.set_style(&doc);
        self.applied = Some(doc);
        self.pending = Some(captured);
        true
    }

    /// Phase 2. Re-applies the loaded style with the captured content.
    ///
    /// Returns true when a composed document was sent to the engine.
    pub fn on_style_data<M: MapPort>(&mut self, map: &mut M) -> bool {
        let Some(foreign) = self.pending.take() else {
            return false;
        };
        if foreign.is_empty() {
            return false;
        }
        let loaded = map.style();
        let composed = foreign.compose(&loaded, &self.prefix);
        if composed == loaded {
            return false;
        }
        debug!(
            foreign_layers = foreign.layers.len(),
            "re-injecting foreign style content"
        );
        map.set_style(&composed);
        true
    }
}
