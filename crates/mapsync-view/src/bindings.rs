// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Declarative event handlers and their engine subscriptions.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use mapsync_port::{HandlerEvent, Listener, ListenerId, MapPort};
use thiserror::Error;
use tracing::debug;

/// Handler property names a [`HandlerSet`] accepts.
pub const HANDLER_PROPS: [&str; 46] = [
    "onClick",
    "onDblClick",
    "onMouseDown",
    "onMouseUp",
    "onMouseMove",
    "onMouseEnter",
    "onMouseLeave",
    "onMouseOver",
    "onMouseOut",
    "onContextMenu",
    "onWheel",
    "onTouchStart",
    "onTouchEnd",
    "onTouchMove",
    "onTouchCancel",
    "onMoveStart",
    "onMove",
    "onMoveEnd",
    "onDragStart",
    "onDrag",
    "onDragEnd",
    "onZoomStart",
    "onZoom",
    "onZoomEnd",
    "onRotateStart",
    "onRotate",
    "onRotateEnd",
    "onPitchStart",
    "onPitch",
    "onPitchEnd",
    "onBoxZoomStart",
    "onBoxZoomEnd",
    "onBoxZoomCancel",
    "onResize",
    "onRemove",
    "onLoad",
    "onRender",
    "onIdle",
    "onError",
    "onData",
    "onStyleData",
    "onSourceData",
    "onDataLoading",
    "onStyleDataLoading",
    "onSourceDataLoading",
    "onStyleImageMissing",
];

/// Engine event name for a handler property: `onMouseMove` → `mousemove`.
pub fn event_name(prop: &str) -> String {
    prop.strip_prefix("on").unwrap_or(prop).to_lowercase()
}

/// Handler-set errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    /// The property is not in [`HANDLER_PROPS`].
    #[error("unknown handler property: {0}")]
    UnknownProperty(String),
}

/// One declared handler.
#[derive(Clone)]
pub enum Handler {
    /// Fires for the event anywhere on the map.
    Global(Listener),
    /// Fires per layer id, scoped to that layer.
    Layered(BTreeMap<String, Listener>),
}

impl Handler {
    /// Global handler from a closure.
    pub fn global(f: impl Fn(&HandlerEvent) + 'static) -> Self {
        Self::Global(Rc::new(f))
    }

    /// Layer-scoped handlers from `(layer id, listener)` pairs.
    pub fn layered<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Listener)>,
        S: Into<String>,
    {
        Self::Layered(
            entries
                .into_iter()
                .map(|(layer, listener)| (layer.into(), listener))
                .collect(),
        )
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global(_) => f.write_str("Global"),
            Self::Layered(layers) => f
                .debug_tuple("Layered")
                .field(&layers.keys().collect::<Vec<_>>())
                .finish(),
        }
    }
}

/// Declared handlers keyed by property name.
#[derive(Clone, Debug, Default)]
pub struct HandlerSet {
    entries: BTreeMap<String, Handler>,
}

impl HandlerSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `handler` for `prop`, replacing any previous one.
    pub fn insert(&mut self, prop: &str, handler: Handler) -> Result<(), BindingError> {
        if !HANDLER_PROPS.contains(&prop) {
            return Err(BindingError::UnknownProperty(prop.to_owned()));
        }
        self.entries.insert(prop.to_owned(), handler);
        Ok(())
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, prop: &str, handler: Handler) -> Result<Self, BindingError> {
        self.insert(prop, handler)?;
        Ok(self)
    }

    /// Drop the handler for `prop`.
    pub fn remove(&mut self, prop: &str) -> Option<Handler> {
        self.entries.remove(prop)
    }

    /// Number of declared properties.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Declared properties in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Handler)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// True when both sets declare the same properties, layers and
    /// listener instances.
    pub fn same_as(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(&other.entries)
                .all(|((ka, a), (kb, b))| ka == kb && same_handler(a, b))
    }
}

fn same_handler(a: &Handler, b: &Handler) -> bool {
    match (a, b) {
        (Handler::Global(a), Handler::Global(b)) => Rc::ptr_eq(a, b),
        (Handler::Layered(a), Handler::Layered(b)) => {
            a.len() == b.len()
                && a
                    .iter()
                    .zip(b)
                    .all(|((la, a), (lb, b))| la == lb && Rc::ptr_eq(a, b))
        }
        _ => false,
    }
}

#[derive(Debug, Clone)]
struct Binding {
    event: String,
    layer_id: Option<String>,
    id: ListenerId,
}

/// Subscriptions currently installed on the engine.
#[derive(Debug, Default)]
pub struct EventBindingRegistry {
    installed: Vec<Binding>,
}

impl EventBindingRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Converge the engine's subscriptions to exactly `set`.
    ///
    /// Everything previously installed is removed before anything new is
    /// subscribed.
    pub fn sync<M: MapPort>(&mut self, map: &mut M, set: &HandlerSet) {
        self.clear(map);
        for (prop, handler) in set.iter() {
            let event = event_name(prop);
            match handler {
                Handler::Global(listener) => {
                    let id = map.on(&event, None, Rc::clone(listener));
                    self.installed.push(Binding {
                        event: event.clone(),
                        layer_id: None,
                        id,
                    });
                }
                Handler::Layered(layers) => {
                    for (layer, listener) in layers {
                        let id = map.on(&event, Some(layer), Rc::clone(listener));
                        self.installed.push(Binding {
                            event: event.clone(),
                            layer_id: Some(layer.clone()),
                            id,
                        });
                    }
                }
            }
        }
        debug!(count = self.installed.len(), "event bindings installed");
    }

    /// Remove every installed subscription.
    pub fn clear<M: MapPort>(&mut self, map: &mut M) {
        for binding in self.installed.drain(..) {
            map.off(binding.id);
        }
    }

    /// Installed `(event, layer)` pairs in install order.
    pub fn installed(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.installed
            .iter()
            .map(|b| (b.event.as_str(), b.layer_id.as_deref()))
    }

    /// Number of installed subscriptions.
    pub fn len(&self) -> usize {
        self.installed.len()
    }

    /// True when nothing is installed.
    pub fn is_empty(&self) -> bool {
        self.installed.is_empty()
    }
}
