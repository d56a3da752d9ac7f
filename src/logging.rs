//! Logging initialization.
//!
//! Diagnostics go to stderr through `tracing`, so findings on stdout stay
//! clean for piping. The level comes from the configured verbosity unless
//! `RUST_LOG` is set.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::error::{Result, YvcError};

/// Maps a verbosity count (`-v` occurrences) to a filter directive.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the global tracing subscriber. Call once, before logging.
///
/// # Formats
///
/// * `"text"` - bare messages with their fields, no timestamps
/// * `"json"` - one JSON object per line
pub fn init_tracing(verbosity: u8, format: &str) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)));

    match format {
        "text" => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .without_time()
                    .with_target(false),
            )
            .try_init()
            .map_err(|e| YvcError::Logging(e.to_string())),
        "json" => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .map_err(|e| YvcError::Logging(e.to_string())),
        other => Err(YvcError::Logging(format!(
            "unknown log format '{}', expected 'text' or 'json'",
            other
        ))),
    }
}
