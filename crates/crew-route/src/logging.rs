/*!
Logging setup for the command-line front end.

Logs go to stderr so a JSON report on stdout stays machine-readable. When `RUST_LOG`
is not set, a default filter is applied: `debug` for this workspace's crates in debug
builds, `info` in release builds.
*/

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

const DEBUG_FILTER: &str = "info,crew_route=debug,crew_route_lib=debug";
const RELEASE_FILTER: &str = "info";

/// Default filter directive used when `RUST_LOG` is unset
pub fn default_filter() -> &'static str {
    if cfg!(debug_assertions) {
        DEBUG_FILTER
    } else {
        RELEASE_FILTER
    }
}

/// Initialize the global tracing subscriber
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn setup_logging() {
    let (filter, from_env) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, true),
        Err(_) => (EnvFilter::new(default_filter()), false),
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(filter);

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        return;
    }

    if !from_env {
        tracing::info!("RUST_LOG not set, using default: {}", default_filter());
    }
}
