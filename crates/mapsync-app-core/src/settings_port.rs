// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Settings port shared by mapsync hosts.

use mapsync_style::StyleCatalog;
use tracing::warn;

use crate::config::{ConfigService, ConfigStore};
use crate::settings::{MapSettings, CATALOG_KEY, SETTINGS_KEY};

/// Best-effort access to persisted map settings and the style catalog.
///
/// Failures are logged and surface as `None`/`false`; a host never stops
/// rendering because its config is unreadable.
pub trait SettingsPort {
    /// Load settings (None if missing or unreadable).
    fn load_settings(&self) -> Option<MapSettings>;
    /// Persist settings.
    fn save_settings(&self, settings: &MapSettings);
    /// Edit the stored settings in place, starting from defaults when none
    /// are stored. Returns the saved value.
    fn update_settings(&self, edit: &mut dyn FnMut(&mut MapSettings)) -> Option<MapSettings>;
    /// Forget stored settings so the next load yields `None`.
    fn reset_settings(&self) -> bool;
    /// Load the style catalog (None if missing or unreadable).
    fn load_catalog(&self) -> Option<StyleCatalog>;
}

impl<S> SettingsPort for ConfigService<S>
where
    S: ConfigStore,
{
    fn load_settings(&self) -> Option<MapSettings> {
        self.load(SETTINGS_KEY).unwrap_or_else(|err| {
            warn!(%err, "failed to load map settings");
            None
        })
    }

    fn save_settings(&self, settings: &MapSettings) {
        if let Err(err) = self.save(SETTINGS_KEY, settings) {
            warn!(%err, "failed to save map settings");
        }
    }

    fn update_settings(&self, edit: &mut dyn FnMut(&mut MapSettings)) -> Option<MapSettings> {
        self.update(SETTINGS_KEY, edit)
            .map_err(|err| warn!(%err, "failed to update map settings"))
            .ok()
    }

    fn reset_settings(&self) -> bool {
        self.remove(SETTINGS_KEY)
            .map_err(|err| warn!(%err, "failed to reset map settings"))
            .is_ok()
    }

    fn load_catalog(&self) -> Option<StyleCatalog> {
        self.load(CATALOG_KEY).unwrap_or_else(|err| {
            warn!(%err, "failed to load style catalog");
            None
        })
    }
}
