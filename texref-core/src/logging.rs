//! Structured logging using **tracing**.
//!
//! Events go to stderr as JSON so stdout stays reserved for the report.
//! `RUST_LOG` takes precedence; otherwise the level follows the CLI verbosity.

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Maps a signed verbosity (verbose minus quiet) to a filter directive.
pub fn level_for_verbosity(verbosity: i32) -> &'static str {
    match verbosity {
        i32::MIN..=-1 => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initializes the global tracing collector (subscriber).
///
/// Call once at startup. A second call is ignored rather than panicking,
/// which keeps tests that drive the CLI entry points safe.
pub fn init_structured_logging(verbosity: i32) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbosity)));

    let _ = tracing_subscriber::fmt()
        .json()
        .with_ansi(false)
        .with_level(true)
        .with_target(true)
        .with_current_span(true)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Logs an info event.
pub fn log_info(message: &str) {
    info!(detail = %message);
}

/// Logs a custom event, mapping the event name to a level.
pub fn log_event(event: &str, detail: &str) {
    match event.to_uppercase().as_str() {
        "ERROR" => error!(event = %event, detail = %detail),
        "WARN" | "WARNING" => warn!(event = %event, detail = %detail),
        _ => info!(event = %event, detail = %detail),
    }
}
