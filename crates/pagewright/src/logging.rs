//! Tracing subscriber bootstrap for test binaries.
//!
//! Library code only emits `tracing` events; a scenario runner calls
//! [`init_tracing`] once to see them. `RUST_LOG` overrides the filter.

use crate::result::{PageError, PageResult};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "pagewright=info";

/// Output format of the fmt layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Single-line human readable events
    #[default]
    Compact,
    /// One JSON object per event, for CI log collectors
    Json,
}

/// Resolve the filter directive, preferring `RUST_LOG`
#[must_use]
pub fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Install the global subscriber.
///
/// Fails with `Config` if a global subscriber is already set.
pub fn init_tracing(filter: &str, format: LogFormat) -> PageResult<()> {
    let registry = tracing_subscriber::registry().with(env_filter(filter));
    let installed = match format {
        LogFormat::Compact => registry
            .with(fmt::layer().with_target(true).compact())
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().with_target(true).json())
            .try_init(),
    };
    installed.map_err(|e| PageError::Config {
        message: format!("failed to initialize tracing: {e}"),
    })
}

/// [`init_tracing`] with [`DEFAULT_FILTER`] and compact output
pub fn init_default_tracing() -> PageResult<()> {
    init_tracing(DEFAULT_FILTER, LogFormat::Compact)
}
