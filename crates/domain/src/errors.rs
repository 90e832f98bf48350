//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for TimeGrid
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum TimeGridError {
    /// A schedule item must last at least one minute and end on a
    /// representable date.
    #[error("Invalid duration: {minutes} minutes")]
    InvalidDuration { minutes: u32 },

    /// The candidate interval overlaps an existing item of the same owner.
    #[error("This schedule item conflicts with another event ({conflicting_id})")]
    OverlapConflict { conflicting_id: String },

    /// Malformed year/month/date inputs for a calendar grid.
    #[error("Invalid calendar window: {0}")]
    InvalidCalendarWindow(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TimeGridError {
    /// Whether the error was caused by the caller's input rather than the
    /// environment. Validation errors never leave side effects behind.
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidDuration { .. }
                | Self::OverlapConflict { .. }
                | Self::InvalidCalendarWindow(_)
                | Self::InvalidInput(_)
        )
    }
}

/// Result type alias for TimeGrid operations
pub type Result<T> = std::result::Result<T, TimeGridError>;
