// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Reconciles a declarative map view with an imperative map engine.
//!
//! [`MapView`] owns the engine handle behind [`MapPort`](mapsync_port::MapPort)
//! and keeps four things consistent:
//!
//! - the camera and the caller's [`Viewport`] ([`reconcile`]),
//! - the movement primitive in force ([`transition`]),
//! - the resolved light/dark style and caller-owned layers ([`style_sync`]),
//! - engine subscriptions and declared handlers ([`bindings`]).
//!
//! Everything runs on the host's thread; the host pumps
//! [`MapEvent`](mapsync_port::MapEvent)s into [`MapView::handle_event`].
#![forbid(unsafe_code)]

pub mod bindings;
pub mod reconcile;
pub mod style_sync;
pub mod transition;
pub mod view;
pub mod viewport;

pub use bindings::{
    event_name, BindingError, EventBindingRegistry, Handler, HandlerSet, HANDLER_PROPS,
};
pub use reconcile::ViewportReconciler;
pub use style_sync::StyleSync;
pub use transition::{TransitionEvent, TransitionState};
pub use view::{MapProps, MapView, ViewportCallback};
pub use viewport::{ContainerId, OriginToken, Viewport};
