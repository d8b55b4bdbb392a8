// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Map port trait defining the engine contract.

use mapsync_style::StyleDocument;

use crate::{
    CameraOptions, CameraPose, DebugFlags, LngLat, LngLatBounds, Listener, ListenerId, Padding,
    Projection,
};

/// Map engine port.
///
/// Adapters wrap a concrete engine (mapbox-gl over wasm, a native
/// renderer, a test fake). Lifecycle and camera events do not go through
/// this trait: the host pumps them into the view as [`crate::MapEvent`]s.
///
/// # Ownership
///
/// The view owns the port for the map's whole lifetime and is its only
/// mutator. Implementations need not be `Send`.
pub trait MapPort {
    /// Current center.
    fn center(&self) -> LngLat;
    /// Current zoom.
    fn zoom(&self) -> f64;
    /// Current pitch.
    fn pitch(&self) -> f64;
    /// Current bearing.
    fn bearing(&self) -> f64;

    /// Current camera pose.
    fn pose(&self) -> CameraPose {
        CameraPose {
            center: self.center(),
            zoom: self.zoom(),
            pitch: self.pitch(),
            bearing: self.bearing(),
        }
    }

    /// The style currently held by the engine.
    fn style(&self) -> StyleDocument;
    /// Whether the current style has finished loading.
    fn is_style_loaded(&self) -> bool;
    /// Pose that fits `bounds` inside the viewport minus `padding`.
    ///
    /// `None` when the engine cannot fit the box (degenerate bounds, zero size).
    fn camera_for_bounds(&self, bounds: &LngLatBounds, padding: &Padding) -> Option<CameraPose>;

    /// Replace the style atomically. Completion is signalled by
    /// [`crate::MapEvent::StyleData`].
    fn set_style(&mut self, style: &StyleDocument);
    /// Move without animation.
    fn jump_to(&mut self, camera: &CameraOptions);
    /// Move with an eased transition.
    fn ease_to(&mut self, camera: &CameraOptions);
    /// Move with an animated flight.
    fn fly_to(&mut self, camera: &CameraOptions);
    /// Stop any in-flight animation.
    fn stop(&mut self);

    /// Set debug overlays.
    fn set_debug_flags(&mut self, flags: &DebugFlags);
    /// Set the canvas cursor style (`None` restores the engine default).
    fn set_cursor(&mut self, cursor: Option<&str>);
    /// Set the projection (`None` restores the style's projection).
    fn set_projection(&mut self, projection: Option<&Projection>);
    /// Re-measure the container.
    fn resize(&mut self);

    /// Subscribe `listener` to `event`, optionally scoped to `layer_id`.
    fn on(&mut self, event: &str, layer_id: Option<&str>, listener: Listener) -> ListenerId;
    /// Remove a subscription. Unknown ids are ignored.
    fn off(&mut self, id: ListenerId);
}
