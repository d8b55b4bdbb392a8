// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Persisted defaults for a map view (transition, overlays, cursor, prefix).

use mapsync_port::{DebugFlags, TransitionMode};
use mapsync_style::FOREIGN_PREFIX;
use serde::{Deserialize, Serialize};

/// Config key for [`MapSettings`].
pub const SETTINGS_KEY: &str = "map-settings";
/// Config key for the style catalog.
pub const CATALOG_KEY: &str = "style-catalog";

/// Saved settings for a map view.
///
/// Every field has a default so partial files load cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapSettings {
    /// Default transition for programmatic viewport changes.
    pub transition: TransitionMode,
    /// Engine debug overlays.
    pub debug_flags: DebugFlags,
    /// Log every prop-driven update.
    pub debug: bool,
    /// Canvas cursor style.
    pub cursor: Option<String>,
    /// Id/name prefix marking caller-owned style content.
    pub foreign_prefix: String,
    /// Stop forwarding container resizes to the map.
    pub disable_resize: bool,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            transition: TransitionMode::Animated,
            debug_flags: DebugFlags::default(),
            debug: false,
            cursor: None,
            foreign_prefix: FOREIGN_PREFIX.to_owned(),
            disable_resize: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_settings_fill_defaults() {
        let s: MapSettings = serde_json::from_str(r#"{"transition": "easeTo"}"#).unwrap();
        assert_eq!(s.transition, TransitionMode::Eased);
        assert_eq!(s.foreign_prefix, "cl-");
        assert!(!s.disable_resize);
    }

    #[test]
    fn default_transition_is_animated() {
        assert_eq!(MapSettings::default().transition, TransitionMode::Animated);
    }
}
