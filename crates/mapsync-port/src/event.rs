// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Events flowing out of the map engine.

use std::rc::Rc;

use serde_json::Value;

use crate::geo::LngLat;

/// Kind of direct user input that drove a camera movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionKind {
    /// Mouse drag / pan.
    Drag,
    /// Scroll-wheel zoom.
    Wheel,
    /// Touch gesture.
    Touch,
    /// Keyboard navigation.
    Keyboard,
}

/// What caused a camera movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOrigin {
    /// Caused by a movement primitive (`jump_to`, `ease_to`, `fly_to`).
    Programmatic,
    /// Carries an original input event.
    Interaction(InteractionKind),
}

/// Payload of `move` / `moveend`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveEvent {
    /// Movement cause.
    pub origin: MoveOrigin,
}

impl MoveEvent {
    /// Movement caused by a movement primitive.
    pub const fn programmatic() -> Self {
        Self {
            origin: MoveOrigin::Programmatic,
        }
    }

    /// Movement caused by user input.
    pub const fn interaction(kind: InteractionKind) -> Self {
        Self {
            origin: MoveOrigin::Interaction(kind),
        }
    }

    /// True when an original input event is attached.
    pub const fn is_interaction(&self) -> bool {
        matches!(self.origin, MoveOrigin::Interaction(_))
    }
}

/// Engine lifecycle and camera events, pumped by the host into the view.
#[derive(Clone, Debug, PartialEq)]
pub enum MapEvent {
    /// One-shot: the map finished its initial load.
    Load,
    /// One-shot per `set_style`: the new style finished loading.
    StyleData,
    /// Incremental camera movement.
    Move(MoveEvent),
    /// Camera movement finished.
    MoveEnd(MoveEvent),
    /// The hosting container changed size.
    ContainerResized,
    /// Engine-reported failure (style parse, tile fetch, ...).
    Error(String),
}

/// Event handed to caller-registered listeners.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HandlerEvent {
    /// Raw event name (`click`, `mousemove`, ...).
    pub event: String,
    /// Layer the listener was scoped to, if any.
    pub layer_id: Option<String>,
    /// Geographic location of the pointer.
    pub lng_lat: Option<LngLat>,
    /// Screen location of the pointer.
    pub point: Option<[f64; 2]>,
    /// Rendered features under the pointer.
    pub features: Vec<Value>,
}

/// Caller callback for engine events.
pub type Listener = Rc<dyn Fn(&HandlerEvent)>;

/// Handle returned by [`crate::MapPort::on`], consumed by [`crate::MapPort::off`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(pub u64);
