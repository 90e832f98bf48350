//! SQLite connection pool
//!
//! r2d2 pool of plain SQLite connections. Every connection gets the same
//! pragmas on checkout-creation so WAL and busy handling apply uniformly.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use timegrid_domain::constants::{DEFAULT_DB_CONNECTION_TIMEOUT_SECS, DEFAULT_DB_POOL_SIZE};
use timegrid_domain::{DatabaseConfig, Result as DomainResult};
use tracing::{info, instrument, warn};

use crate::errors::InfraError;

pub type SqlitePool = Pool<SqliteConnectionManager>;
pub type SqliteConnection = PooledConnection<SqliteConnectionManager>;

/// Pool configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlitePoolConfig {
    pub max_size: u32,
    pub connection_timeout: Duration,
    pub busy_timeout: Duration,
    pub enable_wal: bool,
}

impl Default for SqlitePoolConfig {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_DB_POOL_SIZE,
            connection_timeout: Duration::from_secs(DEFAULT_DB_CONNECTION_TIMEOUT_SECS),
            busy_timeout: Duration::from_millis(5000),
            enable_wal: true,
        }
    }
}

impl From<&DatabaseConfig> for SqlitePoolConfig {
    fn from(config: &DatabaseConfig) -> Self {
        Self {
            max_size: config.pool_size.max(1),
            connection_timeout: Duration::from_secs(config.connection_timeout_secs),
            ..Self::default()
        }
    }
}

/// Build a pool for the database file at `path`, creating the file if needed.
///
/// # Errors
/// `Database` when the file cannot be opened or the pragmas are rejected.
#[instrument(skip_all, fields(db_path = %path.as_ref().display(), pool_size = config.max_size))]
pub fn create_sqlite_pool<P: AsRef<Path>>(
    path: P,
    config: &SqlitePoolConfig,
) -> DomainResult<Arc<SqlitePool>> {
    let pragma_config = config.clone();
    let manager = SqliteConnectionManager::file(path.as_ref())
        .with_init(move |conn| apply_connection_pragmas(conn, &pragma_config));

    let pool = Pool::builder()
        .max_size(config.max_size)
        .connection_timeout(config.connection_timeout)
        .build(manager)
        .map_err(|err| {
            warn!(error = %err, "failed to create connection pool");
            InfraError::from(err)
        })?;

    info!("sqlite pool created");
    Ok(Arc::new(pool))
}

/// Apply connection-level pragmas
///
/// - WAL mode for concurrent readers alongside one writer
/// - NORMAL synchronous mode
/// - Foreign key enforcement
/// - Busy timeout for lock contention between pooled connections
fn apply_connection_pragmas(
    conn: &mut Connection,
    config: &SqlitePoolConfig,
) -> rusqlite::Result<()> {
    if config.enable_wal {
        // both pragmas echo the resulting value as a row
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |_| Ok(()))?;
        conn.pragma_update_and_check(None, "wal_autocheckpoint", 1000, |_| Ok(()))?;
    }
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    conn.pragma_update(None, "foreign_keys", "ON")?;

    conn.busy_timeout(config.busy_timeout)
}
