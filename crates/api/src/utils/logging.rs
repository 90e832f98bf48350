use std::time::{Duration, Instant};

use timegrid_domain::{LoggingConfig, Result as DomainResult, TimeGridError};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `config.level` is used as the filter.
/// Output goes to stderr so command results on stdout stay machine-readable.
/// Calling this twice is harmless: the second install is ignored.
pub fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);
    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// Log the outcome of a command execution with structured fields.
///
/// # Parameters
/// * `command` - Logical command identifier (e.g. `"schedule::add"`).
/// * `elapsed` - Duration the command execution took.
/// * `outcome` - `None` on success, otherwise the error label.
///
/// Callers must avoid forwarding sensitive values in `command`.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, outcome: Option<&str>) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    match outcome {
        None => info!(command, duration_ms, "command_execution_success"),
        Some(error_type) => {
            warn!(command, duration_ms, error_type, "command_execution_failure");
        }
    }
}

/// Log a finished command started at `start`, labelling failures.
pub fn log_command_result<T>(command: &str, start: Instant, result: &DomainResult<T>) {
    let label = result.as_ref().err().map(error_label);
    log_command_execution(command, start.elapsed(), label);
}

/// Convert a `TimeGridError` into a stable label suitable for logging.
#[inline]
pub const fn error_label(error: &TimeGridError) -> &'static str {
    match error {
        TimeGridError::InvalidDuration { .. } => "invalid_duration",
        TimeGridError::OverlapConflict { .. } => "overlap_conflict",
        TimeGridError::InvalidCalendarWindow(_) => "invalid_calendar_window",
        TimeGridError::InvalidInput(_) => "invalid_input",
        TimeGridError::NotFound(_) => "not_found",
        TimeGridError::Database(_) => "database",
        TimeGridError::Config(_) => "config",
        TimeGridError::Internal(_) => "internal",
    }
}
