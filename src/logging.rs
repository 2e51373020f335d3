//! Logging initialization and configuration.
//!
//! Command logging on a [`crate::Runner`] goes through `tracing`; nothing
//! is printed unless a subscriber is installed. These helpers install a
//! compact stderr subscriber for binaries that have no subscriber of
//! their own.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter applied when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "runtee=info";

fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Initialize the logging system.
///
/// Uses the `RUST_LOG` environment variable for filtering, defaulting to
/// `runtee=info` when it is not set.
///
/// # Panics
///
/// Panics if called more than once, or if another tracing subscriber has
/// already been set.
pub fn init() {
    init_with_filter(DEFAULT_FILTER);
}

/// Initialize the logging system with an explicit fallback filter, e.g.
/// `"runtee=debug"` to see every executed command line.
///
/// `RUST_LOG` still wins when set.
///
/// # Panics
///
/// Panics if called more than once, or if another tracing subscriber has
/// already been set.
pub fn init_with_filter(fallback: &str) {
    tracing_subscriber::registry()
        .with(env_filter(fallback))
        .with(tracing_subscriber::fmt::layer().compact())
        .init();
}

/// Try to initialize the logging system.
///
/// Returns `Ok(())` if successful, or `Err` if a subscriber has already
/// been installed.
pub fn try_init() -> Result<(), tracing_subscriber::util::TryInitError> {
    tracing_subscriber::registry()
        .with(env_filter(DEFAULT_FILTER))
        .with(tracing_subscriber::fmt::layer().compact())
        .try_init()
}
