//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Schedule item defaults
pub const DEFAULT_DURATION_MINUTES: u32 = 60;
pub const MAX_TITLE_LENGTH: usize = 200;

// Calendar grid shape
pub const HOURS_PER_DAY: u32 = 24;
pub const DAYS_PER_WEEK: usize = 7;
pub const WORKWEEK_DAYS: i64 = 5;

// Dashboard
pub const DEFAULT_UPCOMING_LIMIT: usize = 10;

// Storage defaults
pub const DEFAULT_DB_PATH: &str = "timegrid.db";
pub const DEFAULT_DB_POOL_SIZE: u32 = 8;
pub const DEFAULT_DB_CONNECTION_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_LOG_LEVEL: &str = "info";
