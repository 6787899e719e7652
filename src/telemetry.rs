//! Structured logging bootstrap for the binaries.

use thiserror::Error;
use tracing_subscriber::{EnvFilter, prelude::*};

const DEFAULT_LEVEL: &str = "info";

/// Failure to install the tracing subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The filter directive could not be parsed.
    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
    /// A global subscriber was already installed.
    #[error("tracing subscriber already installed: {0}")]
    Install(#[from] tracing_subscriber::util::TryInitError),
}

/// Builds the filter `warn,itinerary=<level>`.
///
/// `level` is typically the value of `RUST_LOG`; `None` or a blank value
/// selects `info`.
#[must_use]
pub fn filter_directive(level: Option<&str>) -> String {
    let chosen = level
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_LEVEL);
    format!("warn,itinerary={chosen}")
}

/// Installs a formatted subscriber filtered by `RUST_LOG`.
///
/// # Errors
///
/// Returns [`TelemetryError`] when the filter is malformed or a subscriber is
/// already installed.
pub fn init() -> Result<(), TelemetryError> {
    let level = std::env::var("RUST_LOG").ok();
    let env_filter = EnvFilter::try_new(filter_directive(level.as_deref()))?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(env_filter))
        .try_init()?;
    Ok(())
}
