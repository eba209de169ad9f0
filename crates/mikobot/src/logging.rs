//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! The default level is `info`, or `debug` when the `debug` configuration
//! flag is set. At `debug` the client crate also logs wire traffic, so the
//! flag doubles as a protocol trace switch. `RUST_LOG` always wins over
//! the configured level.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Initializes the global tracing subscriber.
pub fn init(debug: bool) {
    let base_filter = if debug { "debug" } else { "info" };

    // RUST_LOG takes precedence over the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(base_filter));

    let layer = fmt::layer().compact().with_target(true);

    // Use try_init to avoid panicking if already initialized
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init();
}
