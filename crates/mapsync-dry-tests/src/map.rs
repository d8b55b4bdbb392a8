// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Recording fake of the map engine.
//!
//! Movement primitives apply instantly. Projection is equirectangular with
//! 512 px per 360° at zoom 0, enough to exercise bounds fitting without
//! real projection math.

use mapsync_port::{
    CameraOptions, CameraPose, DebugFlags, HandlerEvent, LngLat, LngLatBounds, Listener,
    ListenerId, MapOptions, MapPort, Padding, Projection,
};
use mapsync_style::StyleDocument;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// World width in pixels at zoom 0.
pub const TILE_SIZE: f64 = 512.0;

/// Which movement primitive was called.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Primitive {
    /// `jump_to`
    Jump,
    /// `ease_to`
    Ease,
    /// `fly_to`
    Fly,
}

/// One recorded port call.
#[derive(Clone, Debug, PartialEq)]
pub enum MapCall {
    /// `set_style`
    SetStyle(StyleDocument),
    /// `jump_to` / `ease_to` / `fly_to`
    Move(Primitive, CameraOptions),
    /// `stop`
    Stop,
    /// `set_debug_flags`
    SetDebugFlags(DebugFlags),
    /// `set_cursor`
    SetCursor(Option<String>),
    /// `set_projection`
    SetProjection(Option<Projection>),
    /// `resize`
    Resize,
    /// `on`
    On {
        /// Event name.
        event: String,
        /// Layer scope.
        layer_id: Option<String>,
        /// Returned handle.
        id: ListenerId,
    },
    /// `off`
    Off(ListenerId),
}

struct Subscription {
    event: String,
    layer_id: Option<String>,
    listener: Listener,
}

struct FakeState {
    pose: CameraPose,
    size: (f64, f64),
    style: StyleDocument,
    style_loaded: bool,
    calls: Vec<MapCall>,
    listeners: BTreeMap<ListenerId, Subscription>,
    next_listener: u64,
    options: MapOptions,
}

/// Fake [`MapPort`]; clones share state so tests can inspect the instance
/// owned by the view.
#[derive(Clone)]
pub struct FakeMap {
    inner: Rc<RefCell<FakeState>>,
}

impl Default for FakeMap {
    fn default() -> Self {
        Self::new(MapOptions::default())
    }
}

impl FakeMap {
    /// Build a 1024×768 map the way an engine would from `options`.
    ///
    /// The initial style counts as loaded.
    pub fn new(options: MapOptions) -> Self {
        let map = Self {
            inner: Rc::new(RefCell::new(FakeState {
                pose: CameraPose::default(),
                size: (1024.0, 768.0),
                style: options.style.clone(),
                style_loaded: true,
                calls: Vec::new(),
                listeners: BTreeMap::new(),
                next_listener: 1,
                options: options.clone(),
            })),
        };
        // Initial bounds take precedence over the initial center.
        let initial = CameraOptions {
            center: options.center.filter(|_| options.bounds.is_none()),
            bounds: options.bounds,
            zoom: options.zoom,
            pitch: options.pitch,
            bearing: options.bearing,
            padding: options.fit_padding.unwrap_or_default(),
        };
        map.apply(&initial);
        map
    }

    /// Options the map was created with.
    pub fn options(&self) -> MapOptions {
        self.inner.borrow().options.clone()
    }

    /// Every call recorded so far.
    pub fn calls(&self) -> Vec<MapCall> {
        self.inner.borrow().calls.clone()
    }

    /// Recorded movement primitives only.
    pub fn moves(&self) -> Vec<(Primitive, CameraOptions)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                MapCall::Move(p, opts) => Some((p, opts)),
                _ => None,
            })
            .collect()
    }

    /// Recorded `set_style` documents only.
    pub fn styles_set(&self) -> Vec<StyleDocument> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                MapCall::SetStyle(doc) => Some(doc),
                _ => None,
            })
            .collect()
    }

    /// Forget recorded calls.
    pub fn clear_calls(&self) {
        self.inner.borrow_mut().calls.clear();
    }

    /// Put the camera somewhere without recording a call (user gesture).
    pub fn set_pose(&self, pose: CameraPose) {
        self.inner.borrow_mut().pose = pose;
    }

    /// Change the canvas size in pixels.
    pub fn set_size(&self, width: f64, height: f64) {
        self.inner.borrow_mut().size = (width, height);
    }

    /// Mark the pending style as loaded. The test still has to pump
    /// `MapEvent::StyleData` into the view.
    pub fn finish_style_load(&self) {
        self.inner.borrow_mut().style_loaded = true;
    }

    /// Active subscriptions as `(event, layer)` pairs, in id order.
    pub fn subscriptions(&self) -> Vec<(String, Option<String>)> {
        self.inner
            .borrow()
            .listeners
            .values()
            .map(|s| (s.event.clone(), s.layer_id.clone()))
            .collect()
    }

    /// Listeners currently subscribed to `event` (any layer).
    pub fn listeners_for(&self, event: &str) -> Vec<Listener> {
        self.inner
            .borrow()
            .listeners
            .values()
            .filter(|s| s.event == event)
            .map(|s| Rc::clone(&s.listener))
            .collect()
    }

    /// Fire `event` at every matching listener; returns how many ran.
    ///
    /// Global listeners always match; layer listeners match when `layer_id`
    /// names their layer.
    pub fn emit(&self, event: &str, layer_id: Option<&str>) -> usize {
        let targets: Vec<(Option<String>, Listener)> = self
            .inner
            .borrow()
            .listeners
            .values()
            .filter(|s| s.event == event)
            .filter(|s| s.layer_id.is_none() || s.layer_id.as_deref() == layer_id)
            .map(|s| (s.layer_id.clone(), Rc::clone(&s.listener)))
            .collect();
        for (layer, listener) in &targets {
            listener(&HandlerEvent {
                event: event.to_owned(),
                layer_id: layer.clone(),
                ..HandlerEvent::default()
            });
        }
        targets.len()
    }

    /// Bounds visible inside `padding` for the current pose.
    pub fn visible_bounds(&self, padding: &Padding) -> LngLatBounds {
        let state = self.inner.borrow();
        let (w, h) = state.size;
        let dpp = degrees_per_pixel(state.pose.zoom);
        let cx = state.pose.center.lng + (padding.left - padding.right) / 2.0 * dpp;
        let cy = state.pose.center.lat - (padding.top - padding.bottom) / 2.0 * dpp;
        let half_w = (w - padding.left - padding.right) / 2.0 * dpp;
        let half_h = (h - padding.top - padding.bottom) / 2.0 * dpp;
        LngLatBounds::new(
            LngLat::new(cx - half_w, cy - half_h),
            LngLat::new(cx + half_w, cy + half_h),
        )
    }

    fn record(&self, call: MapCall) {
        self.inner.borrow_mut().calls.push(call);
    }

    fn apply(&self, camera: &CameraOptions) {
        let fitted = match (camera.center, camera.bounds) {
            (None, Some(bounds)) => self.camera_for_bounds(&bounds, &camera.padding),
            _ => None,
        };
        let mut state = self.inner.borrow_mut();
        if let Some(fit) = fitted {
            state.pose.center = fit.center;
            state.pose.zoom = fit.zoom;
        }
        if let Some(center) = camera.center {
            state.pose.center = center;
        }
        if let Some(zoom) = camera.zoom {
            state.pose.zoom = zoom;
        }
        if let Some(pitch) = camera.pitch {
            state.pose.pitch = pitch;
        }
        if let Some(bearing) = camera.bearing {
            state.pose.bearing = bearing;
        }
    }

    fn move_with(&self, primitive: Primitive, camera: &CameraOptions) {
        self.record(MapCall::Move(primitive, camera.clone()));
        self.apply(camera);
    }
}

fn degrees_per_pixel(zoom: f64) -> f64 {
    360.0 / (TILE_SIZE * zoom.exp2())
}

impl MapPort for FakeMap {
    fn center(&self) -> LngLat {
        self.inner.borrow().pose.center
    }

    fn zoom(&self) -> f64 {
        self.inner.borrow().pose.zoom
    }

    fn pitch(&self) -> f64 {
        self.inner.borrow().pose.pitch
    }

    fn bearing(&self) -> f64 {
        self.inner.borrow().pose.bearing
    }

    fn style(&self) -> StyleDocument {
        self.inner.borrow().style.clone()
    }

    fn is_style_loaded(&self) -> bool {
        self.inner.borrow().style_loaded
    }

    fn camera_for_bounds(&self, bounds: &LngLatBounds, padding: &Padding) -> Option<CameraPose> {
        let (w, h) = self.inner.borrow().size;
        let avail_w = w - padding.left - padding.right;
        let avail_h = h - padding.top - padding.bottom;
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 || avail_w <= 0.0 || avail_h <= 0.0 {
            return None;
        }
        let zoom_w = (avail_w * 360.0 / (TILE_SIZE * bounds.width())).log2();
        let zoom_h = (avail_h * 360.0 / (TILE_SIZE * bounds.height())).log2();
        let zoom = zoom_w.min(zoom_h);
        let dpp = degrees_per_pixel(zoom);
        let mid = bounds.center();
        Some(CameraPose {
            center: LngLat::new(
                mid.lng - (padding.left - padding.right) / 2.0 * dpp,
                mid.lat + (padding.top - padding.bottom) / 2.0 * dpp,
            ),
            zoom,
            pitch: 0.0,
            bearing: 0.0,
        })
    }

    fn set_style(&mut self, style: &StyleDocument) {
        self.record(MapCall::SetStyle(style.clone()));
        let mut state = self.inner.borrow_mut();
        state.style = style.clone();
        state.style_loaded = false;
    }

    fn jump_to(&mut self, camera: &CameraOptions) {
        self.move_with(Primitive::Jump, camera);
    }

    fn ease_to(&mut self, camera: &CameraOptions) {
        self.move_with(Primitive::Ease, camera);
    }

    fn fly_to(&mut self, camera: &CameraOptions) {
        self.move_with(Primitive::Fly, camera);
    }

    fn stop(&mut self) {
        self.record(MapCall::Stop);
    }

    fn set_debug_flags(&mut self, flags: &DebugFlags) {
        self.record(MapCall::SetDebugFlags(*flags));
    }

    fn set_cursor(&mut self, cursor: Option<&str>) {
        self.record(MapCall::SetCursor(cursor.map(str::to_owned)));
    }

    fn set_projection(&mut self, projection: Option<&Projection>) {
        self.record(MapCall::SetProjection(projection.cloned()));
    }

    fn resize(&mut self) {
        self.record(MapCall::Resize);
    }

    fn on(&mut self, event: &str, layer_id: Option<&str>, listener: Listener) -> ListenerId {
        let id = {
            let mut state = self.inner.borrow_mut();
            let id = ListenerId(state.next_listener);
            state.next_listener += 1;
            state.listeners.insert(
                id,
                Subscription {
                    event: event.to_owned(),
                    layer_id: layer_id.map(str::to_owned),
                    listener,
                },
            );
            id
        };
        self.record(MapCall::On {
            event: event.to_owned(),
            layer_id: layer_id.map(str::to_owned),
            id,
        });
        id
    }

    fn off(&mut self, id: ListenerId) {
        self.inner.borrow_mut().listeners.remove(&id);
        self.record(MapCall::Off(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_for_bounds_centers_box() {
        let map = FakeMap::default();
        let b = LngLatBounds::new(LngLat::new(0.0, 0.0), LngLat::new(10.0, 5.0));
        let pose = map.camera_for_bounds(&b, &Padding::ZERO).unwrap();
        assert_eq!(pose.center, b.center());
        assert!(pose.zoom > 0.0);
    }

    #[test]
    fn degenerate_bounds_do_not_fit() {
        let map = FakeMap::default();
        let point = LngLatBounds::new(LngLat::new(1.0, 1.0), LngLat::new(1.0, 1.0));
        assert!(map.camera_for_bounds(&point, &Padding::ZERO).is_none());
    }

    #[test]
    fn initial_bounds_win_over_center() {
        let b = LngLatBounds::new(LngLat::new(-20.0, -10.0), LngLat::new(20.0, 10.0));
        let map = FakeMap::new(MapOptions {
            center: Some(LngLat::new(100.0, 50.0)),
            bounds: Some(b),
            ..MapOptions::default()
        });
        assert_ne!(map.center(), LngLat::new(100.0, 50.0));
        let _ = map.visible_bounds(&Padding::ZERO);
    }

    #[test]
    fn off_removes_listener() {
        let mut map = FakeMap::default();
        let id = map.on("click", None, Rc::new(|_| {}));
        assert_eq!(map.emit("click", None), 1);
        map.off(id);
        assert_eq!(map.emit("click", None), 0);
    }
}
