//! Logging for swiftly.
//!
//! Diagnostics go through `tracing` to stderr, separate from the user-facing
//! messages printed by `swiftly-ui`. `RUST_LOG` overrides the level chosen by
//! `-v`, and `SWIFTLY_LOG_JSON` switches to one JSON object per event.

use std::time::Instant;
use swiftly_core::EnvVars;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    prelude::*,
};

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Level and message only.
    Compact,
    /// Structured events with spans, targets, and source locations.
    Json,
}

impl LogFormat {
    pub fn from_env() -> Self {
        if std::env::var_os(EnvVars::SWIFTLY_LOG_JSON).is_some() {
            Self::Json
        } else {
            Self::Compact
        }
    }
}

/// Filter used when `RUST_LOG` is unset.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "swiftly=debug" } else { "swiftly=warn" }
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init(verbose: bool) {
    init_with(verbose, LogFormat::from_env());
}

pub fn init_with(verbose: bool, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_span_events(FmtSpan::CLOSE)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .without_time(),
            )
            .try_init(),
    };

    if installed.is_err() {
        tracing::trace!("tracing subscriber already installed");
    }
}

/// Logs how long a command took when dropped.
pub struct TimingGuard {
    operation: &'static str,
    start: Instant,
}

impl TimingGuard {
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            start: Instant::now(),
        }
    }
}

impl Drop for TimingGuard {
    fn drop(&mut self) {
        tracing::debug!(
            operation = self.operation,
            elapsed_ms = self.start.elapsed().as_millis() as u64,
            "finished"
        );
    }
}
