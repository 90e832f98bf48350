//! Database connection manager backed by the r2d2 SQLite pool.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rusqlite::params;
use timegrid_domain::{DatabaseConfig, Result, TimeGridError};
use tracing::info;

use super::pool::{create_sqlite_pool, SqliteConnection, SqlitePool, SqlitePoolConfig};
use crate::errors::InfraError;

const SCHEMA_VERSION: i32 = 1;
const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Database manager that wraps an [`SqlitePool`].
pub struct DbManager {
    pool: Arc<SqlitePool>,
    path: PathBuf,
}

impl DbManager {
    /// Create a new manager with the given pool size.
    pub fn new<P: AsRef<Path>>(db_path: P, pool_size: u32) -> Result<Self> {
        let config = SqlitePoolConfig { max_size: pool_size.max(1), ..SqlitePoolConfig::default() };
        Self::with_pool_config(db_path, &config)
    }

    /// Create a manager from the `[database]` configuration section.
    pub fn from_config(config: &DatabaseConfig) -> Result<Self> {
        Self::with_pool_config(&config.path, &SqlitePoolConfig::from(config))
    }

    fn with_pool_config<P: AsRef<Path>>(db_path: P, config: &SqlitePoolConfig) -> Result<Self> {
        let path = db_path.as_ref().to_path_buf();
        let pool = create_sqlite_pool(&path, config)?;

        info!(
            db_path = %path.display(),
            max_connections = pool.max_size(),
            "sqlite pool initialised"
        );

        Ok(Self { pool, path })
    }

    /// Borrow the underlying pool.
    pub fn pool(&self) -> &Arc<SqlitePool> {
        &self.pool
    }

    /// Acquire a connection from the pool.
    pub fn get_connection(&self) -> Result<SqliteConnection> {
        self.pool.get().map_err(|err| TimeGridError::from(InfraError::from(err)))
    }

    /// Ensure the full schema exists on the current database.
    pub fn run_migrations(&self) -> Result<()> {
        let conn = self.get_connection()?;
        create_schema(&conn)?;
        info!(version = SCHEMA_VERSION, "schema migrations applied");
        Ok(())
    }

    /// Return the configured database path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Verify the database is reachable by running `SELECT 1`.
    pub fn health_check(&self) -> Result<()> {
        let conn = self.get_connection()?;
        conn.query_row("SELECT 1", params![], |row| row.get::<_, i32>(0)).map_err(map_sql_error)?;
        Ok(())
    }
}

fn create_schema(conn: &SqliteConnection) -> Result<()> {
    conn.execute_batch(SCHEMA_SQL).map_err(map_sql_error)?;
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?, CAST(strftime('%s','now') AS INTEGER))",
        params![SCHEMA_VERSION],
    )
    .map_err(map_sql_error)?;
    Ok(())
}

fn map_sql_error(err: rusqlite::Error) -> TimeGridError {
    TimeGridError::from(InfraError::from(err))
}
