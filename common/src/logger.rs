// Copyright (c) 2025 The Vela Foundation

//! Vela logging.
//!
//! Logging uses the tracing framework. Log levels are configured through the
//! `RUST_LOG` environment variable; crates log with the `tracing` macros
//! directly and no logger instance is threaded through call sites.

pub use tracing::{debug, error, info, trace, warn};

/// Initialize the global tracing subscriber.
///
/// Reads the filter from `RUST_LOG`, defaulting to `info`. Safe to call more
/// than once; later calls are no-ops.
pub fn init() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}
