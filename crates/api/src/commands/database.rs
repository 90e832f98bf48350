//! Database maintenance commands

use serde::Serialize;
use timegrid_domain::Result as DomainResult;
use tracing::info;

use crate::context::AppContext;

/// Result of `migrate`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseStatus {
    pub path: String,
    pub healthy: bool,
}

/// Apply the schema (idempotent) and verify the database answers queries.
pub fn migrate_database(ctx: &AppContext) -> DomainResult<DatabaseStatus> {
    ctx.db.run_migrations()?;
    ctx.db.health_check()?;

    let path = ctx.db.path().display().to_string();
    info!(db_path = %path, "database ready");
    Ok(DatabaseStatus { path, healthy: true })
}
