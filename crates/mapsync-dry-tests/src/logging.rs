// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Test log output.

use tracing_subscriber::EnvFilter;

/// Install a `fmt` subscriber writing through the test harness.
///
/// `RUST_LOG` overrides the default `debug` filter. Safe to call from every
/// test; only the first call installs anything.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_test_writer()
        .try_init();
}
