// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Declarative viewport value and the identities used to break update loops.

use core::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use mapsync_port::{CameraOptions, CameraPose, LngLat, LngLatBounds, Padding};
use serde::{Deserialize, Serialize};

static NEXT_ORIGIN: AtomicU64 = AtomicU64::new(1);
static NEXT_CONTAINER: AtomicU64 = AtomicU64::new(1);

/// Tag stamped on every movement report a view emits.
///
/// A viewport coming back with the view's own token is an echo of that
/// report and is not applied again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OriginToken(u64);

impl OriginToken {
    /// Process-unique token.
    pub fn fresh() -> Self {
        Self(NEXT_ORIGIN.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Caller-visible identity of a map container.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContainerId(String);

impl ContainerId {
    /// Generated `mapsync-<n>` id, unique within the process.
    pub fn fresh() -> Self {
        Self(format!(
            "mapsync-{}",
            NEXT_CONTAINER.fetch_add(1, Ordering::Relaxed)
        ))
    }

    /// Borrow as `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ContainerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ContainerId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What part of the world the caller wants on screen.
///
/// `bounds` wins over `center` for initial placement; afterwards `center`
/// tracks the camera. `id` and `origin` only break update loops.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Viewport {
    /// Caller or container identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Set on reports emitted by a view.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<OriginToken>,
    /// Camera center.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<LngLat>,
    /// Box to fit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<LngLatBounds>,
    /// Zoom level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,
    /// Tilt in degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch: Option<f64>,
    /// Rotation in degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearing: Option<f64>,
    /// Screen insets in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<Padding>,
}

impl Viewport {
    /// Viewport centered on `center` at `zoom`.
    pub fn centered(center: LngLat, zoom: f64) -> Self {
        Self {
            center: Some(center),
            zoom: Some(zoom),
            ..Self::default()
        }
    }

    /// Viewport fitting `bounds`.
    pub fn fitting(bounds: LngLatBounds) -> Self {
        Self {
            bounds: Some(bounds),
            ..Self::default()
        }
    }

    /// Movement request for the engine. Missing padding becomes zero; other
    /// missing fields stay unset so the engine keeps its current value.
    pub fn camera_options(&self) -> CameraOptions {
        CameraOptions {
            center: self.center,
            bounds: self.bounds,
            zoom: self.zoom,
            pitch: self.pitch,
            bearing: self.bearing,
            padding: self.padding.unwrap_or(Padding::ZERO),
        }
    }

    /// Copy with center, zoom, pitch and bearing taken from `pose`.
    pub fn with_pose(&self, pose: &CameraPose) -> Self {
        Self {
            center: Some(pose.center),
            zoom: Some(pose.zoom),
            pitch: Some(pose.pitch),
            bearing: Some(pose.bearing),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tokens_are_unique() {
        assert_ne!(OriginToken::fresh(), OriginToken::fresh());
        assert_ne!(ContainerId::fresh(), ContainerId::fresh());
    }

    #[test]
    fn camera_options_default_padding_only() {
        let vp = Viewport {
            zoom: Some(5.0),
            ..Viewport::default()
        };
        let opts = vp.camera_options();
        assert_eq!(opts.zoom, Some(5.0));
        assert_eq!(opts.padding, Padding::ZERO);
        assert!(opts.center.is_none() && opts.pitch.is_none() && opts.bearing.is_none());
    }

    #[test]
    fn explicit_zero_survives() {
        let vp = Viewport {
            pitch: Some(0.0),
            ..Viewport::default()
        };
        assert_eq!(vp.camera_options().pitch, Some(0.0));
    }

    #[test]
    fn serializes_camel_case_without_empty_fields() {
        let vp = Viewport::centered(LngLat::new(13.4, 52.5), 9.0);
        let value = serde_json::to_value(&vp).unwrap();
        assert_eq!(
            value,
            json!({"center": {"lng": 13.4, "lat": 52.5}, "zoom": 9.0})
        );
        let back: Viewport = serde_json::from_value(value).unwrap();
        assert_eq!(back, vp);
    }
}
