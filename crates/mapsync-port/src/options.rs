// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Construction options handed to the map engine factory.

use mapsync_style::StyleDocument;
use serde_json::{Map, Value};

use crate::{LngLat, LngLatBounds, Padding, Projection};

/// Everything the engine needs to create a map.
///
/// `extra` carries the caller's engine-specific option bag untouched; the
/// typed fields take precedence over keys of the same name in it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MapOptions {
    /// Initial (resolved) style.
    pub style: StyleDocument,
    /// Initial center; ignored by the engine when `bounds` is set.
    pub center: Option<LngLat>,
    /// Initial bounds; takes precedence over `center`.
    pub bounds: Option<LngLatBounds>,
    /// Padding used when fitting `bounds`.
    pub fit_padding: Option<Padding>,
    /// Initial zoom.
    pub zoom: Option<f64>,
    /// Initial pitch.
    pub pitch: Option<f64>,
    /// Initial bearing.
    pub bearing: Option<f64>,
    /// Whether user gestures move the camera.
    pub interactive: bool,
    /// Initial projection.
    pub projection: Option<Projection>,
    /// Engine-specific options.
    pub extra: Map<String, Value>,
}
