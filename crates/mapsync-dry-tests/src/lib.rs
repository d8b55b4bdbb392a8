// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared test doubles and fixtures for mapsync crates.
#![forbid(unsafe_code)]
//!
//! # Modules
//!
//! - [`config`] - In-memory config store fake for testing without filesystem
//! - [`fixtures`] - Style document and catalog builders
//! - [`logging`] - `tracing` subscriber setup for tests
//! - [`map`] - Recording [`MapPort`](mapsync_port::MapPort) fake

pub mod config;
pub mod fixtures;
pub mod logging;
pub mod map;

// Re-export commonly used items at crate root for convenience
pub use config::InMemoryConfigStore;
pub use fixtures::{base_style, streets_catalog, StyleBuilder};
pub use logging::init_tracing;
pub use map::{FakeMap, MapCall, Primitive, TILE_SIZE};
