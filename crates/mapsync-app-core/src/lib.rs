// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared application services for mapsync hosts (config, settings, color scheme).
//! Keeps engine adapters thin and framework-agnostic.

pub mod color_scheme;
pub mod config;
pub mod observable;
pub mod settings;
pub mod settings_port;
