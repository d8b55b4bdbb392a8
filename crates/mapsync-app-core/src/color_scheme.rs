// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Dark-mode flag fed by the OS preference and an app-level root marker.
//!
//! The detection primitives (media query, attribute observer) belong to
//! the host. The host installs its two listeners once and forwards their
//! readings here; nothing is ever uninstalled.

use tracing::debug;

use crate::observable::{Observable, Subscription};

/// Which listener produced a reading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemeSource {
    /// `prefers-color-scheme: dark` media query.
    MediaQuery,
    /// Dark marker on the document root (e.g. a `dark` class).
    RootMarker,
}

/// Process-wide dark-mode flag as an injectable service.
///
/// Clones share state, so the host keeps one handle for its listeners and
/// hands clones to every view.
#[derive(Clone, Debug)]
pub struct ColorSchemeMonitor {
    dark: Observable<bool>,
}

impl ColorSchemeMonitor {
    /// Initial state is dark when either source currently reports dark.
    pub fn new(media_prefers_dark: bool, root_has_dark_marker: bool) -> Self {
        Self {
            dark: Observable::new(media_prefers_dark || root_has_dark_marker),
        }
    }

    /// Current flag.
    pub fn is_dark(&self) -> bool {
        self.dark.get()
    }

    /// Media-query listener: the OS preference changed.
    pub fn on_media_change(&self, prefers_dark: bool) {
        self.apply(SchemeSource::MediaQuery, prefers_dark);
    }

    /// Attribute-observer listener: the root element's attributes changed.
    pub fn on_root_attributes_changed(&self, has_dark_marker: bool) {
        self.apply(SchemeSource::RootMarker, has_dark_marker);
    }

    /// Each listener writes its own reading; the last write wins.
    pub fn apply(&self, source: SchemeSource, dark: bool) {
        if self.dark.get() != dark {
            debug!(?source, dark, "color scheme changed");
        }
        self.dark.set(dark);
    }

    /// Observe changes of the flag.
    pub fn subscribe(&self, callback: impl Fn(bool) + 'static) -> Subscription {
        self.dark.subscribe(move |dark| callback(*dark))
    }

    /// Bumped on every change; lets views dirty-check without subscribing.
    pub fn version(&self) -> u64 {
        self.dark.version()
    }
}

impl Default for ColorSchemeMonitor {
    fn default() -> Self {
        Self::new(false, false)
    }
}
