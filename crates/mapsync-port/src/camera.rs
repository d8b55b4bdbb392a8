// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Camera pose, movement options and engine-side presentation settings.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::geo::{LngLat, LngLatBounds, Padding};

/// Fully specified camera pose as reported by the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    /// Map center.
    pub center: LngLat,
    /// Zoom level.
    pub zoom: f64,
    /// Tilt in degrees.
    pub pitch: f64,
    /// Rotation in degrees.
    pub bearing: f64,
}

/// Arguments for the three movement primitives.
///
/// `None` means "leave unchanged"; it is never the same as an explicit zero.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CameraOptions {
    /// Target center.
    pub center: Option<LngLat>,
    /// Target bounds.
    pub bounds: Option<LngLatBounds>,
    /// Target zoom.
    pub zoom: Option<f64>,
    /// Target pitch.
    pub pitch: Option<f64>,
    /// Target bearing.
    pub bearing: Option<f64>,
    /// Screen inset applied to the target.
    pub padding: Padding,
}

/// Engine debug overlays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DebugFlags {
    /// Draw tile borders.
    pub show_tile_boundaries: bool,
    /// Draw terrain wireframe.
    pub show_terrain_wireframe: bool,
    /// Outline the padding inset.
    pub show_padding: bool,
    /// Draw label collision boxes.
    pub show_collision_boxes: bool,
    /// Draw every feature outline, including those the style hides.
    pub show_overdraw_inspector: bool,
}

/// Map projection, e.g. `{"name": "globe"}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    /// Projection name (`mercator`, `globe`, `albers`, ...).
    pub name: String,
    /// Projection parameters (`center`, `parallels`, ...).
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

impl Projection {
    /// Projection with no extra parameters.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Map::new(),
        }
    }
}

/// Which movement primitive carries a programmatic viewport change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitionMode {
    /// `jumpTo`: move instantly.
    #[serde(rename = "jumpTo")]
    Instantaneous,
    /// `easeTo`: eased transition.
    #[serde(rename = "easeTo")]
    Eased,
    /// `flyTo`: animated flight.
    #[default]
    #[serde(rename = "flyTo")]
    Animated,
}

impl TransitionMode {
    /// Engine name of the primitive.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Instantaneous => "jumpTo",
            Self::Eased => "easeTo",
            Self::Animated => "flyTo",
        }
    }
}

impl fmt::Display for TransitionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown transition name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transition mode: {0}")]
pub struct UnknownTransition(pub String);

impl FromStr for TransitionMode {
    type Err = UnknownTransition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "jumpTo" => Ok(Self::Instantaneous),
            "easeTo" => Ok(Self::Eased),
            "flyTo" => Ok(Self::Animated),
            other => Err(UnknownTransition(other.to_owned())),
        }
    }
}
