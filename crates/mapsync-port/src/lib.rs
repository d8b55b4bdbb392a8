// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Map port contract for mapsync.
//!
//! This crate defines the boundary between the reconciliation core and an
//! external map engine. It contains no reconciliation logic.
//!
//! # Design Principles
//!
//! - **Engines are dumb** — they expose camera state and primitives, nothing else.
//! - **Absent is not zero** — camera fields the caller did not set stay `None`.
//! - **Events are pumped** — the host forwards engine events to the view.
#![forbid(unsafe_code)]

use thiserror::Error;

/// Error type for engine construction and adapter failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    /// The engine refused to create a map.
    #[error("map construction failed: {0}")]
    Construction(String),
    /// An adapter-specific error occurred.
    #[error("backend error: {0}")]
    Backend(String),
}

mod camera;
mod event;
mod geo;
mod options;
mod port;

pub use camera::{
    CameraOptions, CameraPose, DebugFlags, Projection, TransitionMode, UnknownTransition,
};
pub use event::{
    HandlerEvent, InteractionKind, Listener, ListenerId, MapEvent, MoveEvent, MoveOrigin,
};
pub use geo::{LngLat, LngLatBounds, Padding};
pub use options::MapOptions;
pub use port::MapPort;
