// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Two-way viewport reconciliation.
//!
//! Inbound: a caller viewport becomes exactly one movement primitive unless
//! it is an echo of this view's own report. Outbound: user gestures become
//! viewport reports tagged with the container id and the view's
//! [`OriginToken`].

use mapsync_port::{LngLatBounds, MapPort, MoveEvent, Padding, TransitionMode};
use tracing::trace;

use crate::transition::{TransitionEvent, TransitionState};
use crate::viewport::{ContainerId, OriginToken, Viewport};

/// Loop-breaking state for one map container.
#[derive(Debug, Clone)]
pub struct ViewportReconciler {
    container: ContainerId,
    origin: OriginToken,
    last_bounds: Option<LngLatBounds>,
}

impl ViewportReconciler {
    /// `initial_bounds` is the box the camera was constructed with; only
    /// later changes are reported.
    pub fn new(container: ContainerId, initial_bounds: Option<LngLatBounds>) -> Self {
        Self {
            container,
            origin: OriginToken::fresh(),
            last_bounds: initial_bounds,
        }
    }

    /// Container id stamped on reports.
    pub fn container(&self) -> &ContainerId {
        &self.container
    }

    /// Token stamped on reports.
    pub fn origin(&self) -> OriginToken {
        self.origin
    }

    /// True for viewports this container produced itself.
    pub fn is_own(&self, viewport: &Viewport) -> bool {
        viewport.origin == Some(self.origin)
            || viewport.id.as_deref() == Some(self.container.as_str())
    }

    /// Move the camera to `viewport` with the primitive `mode` selects.
    ///
    /// Stops any running animation first. Returns false for echoes.
    pub fn apply_external<M: MapPort>(
        &self,
        map: &mut M,
        viewport: &Viewport,
        mode: TransitionMode,
    ) -> bool {
        if self.is_own(viewport) {
            trace!(container = %self.container, "skipping own viewport echo");
            return false;
        }
        let camera = viewport.camera_options();
        map.stop();
        match mode {
            TransitionMode::Instantaneous => map.jump_to(&camera),
            TransitionMode::Eased => map.ease_to(&camera),
            TransitionMode::Animated => map.fly_to(&camera),
        }
        true
    }

    /// Current camera pose merged with the caller's padding and bounds.
    pub fn report<M: MapPort>(&self, map: &M, supplied: Option<&Viewport>) -> Viewport {
        Viewport {
            id: Some(self.container.as_str().to_owned()),
            origin: Some(self.origin),
            bounds: supplied.and_then(|v| v.bounds),
            padding: supplied.and_then(|v| v.padding),
            ..Viewport::default()
        }
        .with_pose(&map.pose())
    }

    /// Movement tick. User-originated ticks force instantaneous transitions
    /// and produce a report.
    pub fn on_move<M: MapPort>(
        &self,
        map: &M,
        event: &MoveEvent,
        supplied: Option<&Viewport>,
        transition: &mut TransitionState,
    ) -> Option<Viewport> {
        if !event.is_interaction() {
            return None;
        }
        transition.apply(TransitionEvent::InteractionStarted);
        Some(self.report(map, supplied))
    }

    /// Movement end. Always restores the default transition; reports the
    /// final pose for user-originated movement.
    pub fn on_move_end<M: MapPort>(
        &self,
        map: &M,
        event: &MoveEvent,
        supplied: Option<&Viewport>,
        transition: &mut TransitionState,
    ) -> Option<Viewport> {
        let report = event
            .is_interaction()
            .then(|| self.report(map, supplied));
        transition.apply(TransitionEvent::InteractionEnded);
        report
    }

    /// Report the pose fitting `supplied.bounds` when the box changed.
    ///
    /// Center, zoom, pitch and bearing come from the fitted pose; every
    /// other field is the caller's. The report carries this view's origin
    /// token, so writing it back does not move the camera again.
    pub fn on_bounds_change<M: MapPort>(
        &mut self,
        map: &M,
        supplied: &Viewport,
    ) -> Option<Viewport> {
        if supplied.bounds == self.last_bounds {
            return None;
        }
        self.last_bounds = supplied.bounds;
        let bounds = supplied.bounds?;
        let padding = supplied.padding.unwrap_or(Padding::ZERO);
        let pose = map.camera_for_bounds(&bounds, &padding)?;
        Some(Viewport {
            origin: Some(self.origin),
            ..supplied.with_pose(&pose)
        })
    }
}
