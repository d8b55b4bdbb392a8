// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Pure state transitions for the movement primitive selection.

use mapsync_port::TransitionMode;

/// Inputs that move the transition state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionEvent {
    /// A user-originated camera movement was observed.
    InteractionStarted,
    /// A movement sequence ended.
    InteractionEnded,
    /// The caller changed the configured default.
    DefaultChanged(TransitionMode),
}

/// Configured default plus the mode currently in force.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionState {
    default: TransitionMode,
    current: TransitionMode,
    interacting: bool,
}

impl Default for TransitionState {
    fn default() -> Self {
        Self::new(TransitionMode::default())
    }
}

impl TransitionState {
    /// Start at `default` with no interaction in progress.
    pub const fn new(default: TransitionMode) -> Self {
        Self {
            default,
            current: default,
            interacting: false,
        }
    }

    /// Mode the next programmatic movement uses.
    pub const fn current(&self) -> TransitionMode {
        self.current
    }

    /// Caller-configured default.
    pub const fn default_mode(&self) -> TransitionMode {
        self.default
    }

    /// Whether a user gesture is in progress.
    pub const fn is_interacting(&self) -> bool {
        self.interacting
    }

    /// Apply `ev` in place.
    pub fn apply(&mut self, ev: TransitionEvent) {
        *self = reduce(self, ev);
    }
}

/// Next state for `ev`.
pub fn reduce(state: &TransitionState, ev: TransitionEvent) -> TransitionState {
    let mut next = *state;
    match ev {
        TransitionEvent::InteractionStarted => {
            next.interacting = true;
            next.current = TransitionMode::Instantaneous;
        }
        TransitionEvent::InteractionEnded => {
            next.interacting = false;
            next.current = next.default;
        }
        TransitionEvent::DefaultChanged(mode) => {
            next.default = mode;
            if !next.interacting {
                next.current = mode;
            }
        }
    }
    next
}
