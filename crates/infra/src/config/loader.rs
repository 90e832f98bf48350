//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `TIMEGRID_DB_PATH` is unset, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `TIMEGRID_DB_PATH`: Database file path (required for env loading)
//! - `TIMEGRID_DB_POOL_SIZE`: Connection pool size
//! - `TIMEGRID_DB_CONNECTION_TIMEOUT`: Pool checkout timeout in seconds
//! - `TIMEGRID_OVERLAP_SCOPE`: `same_date` or `adjacent_days`
//! - `TIMEGRID_UPCOMING_LIMIT`: Items shown on the upcoming list
//! - `TIMEGRID_LOG_LEVEL`: Default tracing filter directive
//! - `TIMEGRID_LOG_JSON`: Emit JSON log lines (true/false)
//!
//! ## File Locations
//! The loader probes `config.{json,toml}` and `timegrid.{json,toml}` in the
//! current directory, its two parents, and next to the executable.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use timegrid_domain::{
    Config, DatabaseConfig, LoggingConfig, OverlapScope, Result, ScheduleConfig, TimeGridError,
};

const CONFIG_FILE_NAMES: [&str; 4] =
    ["config.json", "config.toml", "timegrid.json", "timegrid.toml"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the database path
/// is not set there, falls back to loading from a config file.
///
/// # Errors
/// Returns `TimeGridError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - An environment value is malformed
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// `TIMEGRID_DB_PATH` must be present; every other variable falls back to
/// its default when unset.
///
/// # Errors
/// Returns `TimeGridError::Config` if the database path is missing or a
/// variable has an invalid value.
pub fn load_from_env() -> Result<Config> {
    let defaults = Config::default();

    let path = env_var("TIMEGRID_DB_PATH")?;
    let pool_size = env_parse("TIMEGRID_DB_POOL_SIZE", defaults.database.pool_size)?;
    let connection_timeout_secs =
        env_parse("TIMEGRID_DB_CONNECTION_TIMEOUT", defaults.database.connection_timeout_secs)?;

    let overlap_scope =
        env_parse::<OverlapScope>("TIMEGRID_OVERLAP_SCOPE", defaults.schedule.overlap_scope)?;
    let upcoming_limit = env_parse("TIMEGRID_UPCOMING_LIMIT", defaults.schedule.upcoming_limit)?;

    let level = std::env::var("TIMEGRID_LOG_LEVEL").unwrap_or(defaults.logging.level);
    let json = env_bool("TIMEGRID_LOG_JSON", defaults.logging.json);

    Ok(Config {
        database: DatabaseConfig { path, pool_size, connection_timeout_secs },
        schedule: ScheduleConfig { overlap_scope, upcoming_limit },
        logging: LoggingConfig { level, json },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `TimeGridError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(TimeGridError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            TimeGridError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| TimeGridError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| TimeGridError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| TimeGridError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(TimeGridError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the current working directory, its two parents, and then the
/// same locations relative to the executable.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd);
    }
    if let Some(exe_dir) =
        std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        roots.push(exe_dir);
    }

    roots
        .iter()
        .flat_map(|root| [root.clone(), root.join(".."), root.join("../..")])
        .flat_map(|dir| CONFIG_FILE_NAMES.map(|name| dir.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        TimeGridError::Config(format!("Missing required environment variable: {key}"))
    })
}

/// Parse an optional environment variable, using `default` when unset.
fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| TimeGridError::Config(format!("Invalid value for {key}: {e}"))),
        Err(_) => Ok(default),
    }
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
