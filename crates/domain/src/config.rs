//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_DB_CONNECTION_TIMEOUT_SECS, DEFAULT_DB_PATH, DEFAULT_DB_POOL_SIZE, DEFAULT_LOG_LEVEL,
    DEFAULT_UPCOMING_LIMIT,
};
use crate::types::OverlapScope;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Database configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
    pub pool_size: u32,
    pub connection_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_DB_PATH.to_string(),
            pool_size: DEFAULT_DB_POOL_SIZE,
            connection_timeout_secs: DEFAULT_DB_CONNECTION_TIMEOUT_SECS,
        }
    }
}

/// Scheduling rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub overlap_scope: OverlapScope,
    /// Number of items on the dashboard's upcoming list.
    pub upcoming_limit: usize,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self { overlap_scope: OverlapScope::default(), upcoming_limit: DEFAULT_UPCOMING_LIMIT }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Fallback filter directive when `RUST_LOG` is unset.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: DEFAULT_LOG_LEVEL.to_string(), json: false }
    }
}
