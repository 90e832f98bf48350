//! SQLite-backed implementation of the ScheduleItemRepository port.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row, TransactionBehavior};
use timegrid_core::ScheduleItemRepository;
use timegrid_domain::{
    DateRange, OwnerId, Result as DomainResult, ScheduleItem, ScheduleItemType, TimeGridError,
};
use tokio::task;
use tracing::{debug, instrument};
use uuid::Uuid;

use super::manager::DbManager;
use crate::errors::InfraError;

const SELECT_COLUMNS: &str = "SELECT id, owner_id, item_type, title, notes, date, time,
        duration_minutes, created_at
 FROM schedule_items";

/// SQLite implementation of `ScheduleItemRepository`
pub struct SqliteScheduleItemRepository {
    db: Arc<DbManager>,
}

impl SqliteScheduleItemRepository {
    /// Create a new schedule item repository
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ScheduleItemRepository for SqliteScheduleItemRepository {
    #[instrument(skip(self), fields(owner = %owner))]
    async fn find(&self, owner: &OwnerId, range: DateRange) -> DomainResult<Vec<ScheduleItem>> {
        let db = Arc::clone(&self.db);
        let owner = owner.clone();

        task::spawn_blocking(move || -> DomainResult<Vec<ScheduleItem>> {
            let conn = db.get_connection()?;
            let mut stmt = conn
                .prepare(&format!(
                    "{SELECT_COLUMNS}
                     WHERE owner_id = ?1 AND date BETWEEN ?2 AND ?3
                     ORDER BY date ASC, time ASC"
                ))
                .map_err(InfraError::from)?;

            let items = stmt
                .query_map(params![owner.as_str(), range.start, range.end], map_schedule_item_row)
                .map_err(InfraError::from)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(InfraError::from)?;

            debug!(
                count = items.len(),
                start = %range.start,
                end = %range.end,
                "loaded schedule items"
            );
            Ok(items)
        })
        .await
        .map_err(InfraError::from)?
    }

    #[instrument(skip(self), fields(owner = %owner))]
    async fn find_by_owner_and_date(
        &self,
        owner: &OwnerId,
        date: NaiveDate,
    ) -> DomainResult<Vec<ScheduleItem>> {
        self.find(owner, DateRange::day(date)).await
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<ScheduleItem>> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<ScheduleItem>> {
            let conn = db.get_connection()?;
            let item = conn
                .query_row(
                    &format!("{SELECT_COLUMNS} WHERE id = ?1"),
                    params![&id],
                    map_schedule_item_row,
                )
                .optional()
                .map_err(InfraError::from)?;
            Ok(item)
        })
        .await
        .map_err(InfraError::from)?
    }

    #[instrument(skip(self), fields(owner = %owner))]
    async fn upcoming(&self, owner: &OwnerId, limit: usize) -> DomainResult<Vec<ScheduleItem>> {
        let db = Arc::clone(&self.db);
        let owner = owner.clone();
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        task::spawn_blocking(move || -> DomainResult<Vec<ScheduleItem>> {
            let conn = db.get_connection()?;
            let mut stmt = conn
                .prepare(&format!(
                    "{SELECT_COLUMNS}
                     WHERE owner_id = ?1
                     ORDER BY date ASC, time ASC
                     LIMIT ?2"
                ))
                .map_err(InfraError::from)?;

            let items = stmt
                .query_map(params![owner.as_str(), limit], map_schedule_item_row)
                .map_err(InfraError::from)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(InfraError::from)?;
            Ok(items)
        })
        .await
        .map_err(InfraError::from)?
    }

    #[instrument(skip(self, item), fields(owner = %item.owner_id, id = ?item.id))]
    async fn save(&self, item: ScheduleItem) -> DomainResult<ScheduleItem> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<ScheduleItem> {
            let mut conn = db.get_connection()?;
            let tx = conn
                .transaction_with_behavior(TransactionBehavior::Immediate)
                .map_err(InfraError::from)?;

            let saved = match item.id.clone() {
                Some(id) => {
                    let changed = tx
                        .execute(
                            "UPDATE schedule_items
                             SET item_type = ?2, title = ?3, notes = ?4, date = ?5, time = ?6,
                                 duration_minutes = ?7
                             WHERE id = ?1",
                            params![
                                &id,
                                item.item_type.to_string(),
                                &item.title,
                                &item.notes,
                                item.date,
                                item.time,
                                item.duration_minutes,
                            ],
                        )
                        .map_err(InfraError::from)?;
                    if changed == 0 {
                        return Err(TimeGridError::NotFound(format!("schedule item {id}")));
                    }
                    debug!(%id, "updated schedule item");
                    item
                }
                None => {
                    let id = Uuid::now_v7().to_string();
                    let created_at = whole_seconds(Utc::now());
                    tx.execute(
                        "INSERT INTO schedule_items (
                            id, owner_id, item_type, title, notes, date, time,
                            duration_minutes, created_at
                        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                        params![
                            &id,
                            item.owner_id.as_str(),
                            item.item_type.to_string(),
                            &item.title,
                            &item.notes,
                            item.date,
                            item.time,
                            item.duration_minutes,
                            created_at.timestamp(),
                        ],
                    )
                    .map_err(InfraError::from)?;
                    debug!(%id, "inserted schedule item");
                    ScheduleItem { id: Some(id), created_at: Some(created_at), ..item }
                }
            };

            tx.commit().map_err(InfraError::from)?;
            Ok(saved)
        })
        .await
        .map_err(InfraError::from)?
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> DomainResult<bool> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();

        task::spawn_blocking(move || -> DomainResult<bool> {
            let conn = db.get_connection()?;
            let deleted = conn
                .execute("DELETE FROM schedule_items WHERE id = ?1", params![&id])
                .map_err(InfraError::from)?;
            debug!(%id, deleted, "deleted schedule item");
            Ok(deleted > 0)
        })
        .await
        .map_err(InfraError::from)?
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Map a row to a ScheduleItem
fn map_schedule_item_row(row: &Row) -> rusqlite::Result<ScheduleItem> {
    let item_type: String = row.get(2)?;
    let item_type = item_type
        .parse::<ScheduleItemType>()
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, err.into()))?;

    let created_at: i64 = row.get(8)?;
    let created_at = DateTime::from_timestamp(created_at, 0).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            8,
            Type::Integer,
            Box::new(TimeGridError::Database(format!("invalid created_at {created_at}"))),
        )
    })?;

    Ok(ScheduleItem {
        id: Some(row.get(0)?),
        owner_id: OwnerId::new(row.get::<_, String>(1)?),
        item_type,
        title: row.get(3)?,
        notes: row.get(4)?,
        date: row.get(5)?,
        time: row.get(6)?,
        duration_minutes: row.get(7)?,
        created_at: Some(created_at),
    })
}

/// `created_at` is stored as unix seconds; drop sub-second precision so the
/// returned value equals what a later read produces.
fn whole_seconds(at: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp(at.timestamp(), 0).unwrap_or(at)
}
