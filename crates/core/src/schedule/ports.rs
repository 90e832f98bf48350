//! Port interfaces for schedule storage
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations.

use async_trait::async_trait;
use chrono::NaiveDate;
use timegrid_domain::{DateRange, OwnerId, Result, ScheduleItem};

/// Trait for persisting and querying schedule items.
///
/// Every sequence returned is ordered by `(date, time)`.
#[async_trait]
pub trait ScheduleItemRepository: Send + Sync {
    /// Items of `owner` whose date falls inside the inclusive `range`.
    async fn find(&self, owner: &OwnerId, range: DateRange) -> Result<Vec<ScheduleItem>>;

    /// Items of `owner` on a single date.
    async fn find_by_owner_and_date(
        &self,
        owner: &OwnerId,
        date: NaiveDate,
    ) -> Result<Vec<ScheduleItem>>;

    /// Look up an item by id regardless of owner.
    async fn find_by_id(&self, id: &str) -> Result<Option<ScheduleItem>>;

    /// The owner's first `limit` items.
    async fn upcoming(&self, owner: &OwnerId, limit: usize) -> Result<Vec<ScheduleItem>>;

    /// Insert an unsaved item (assigning `id` and `created_at`) or fully
    /// replace a saved one. Returns the stored item.
    async fn save(&self, item: ScheduleItem) -> Result<ScheduleItem>;

    /// Delete by id. Returns whether a row was removed.
    async fn delete(&self, id: &str) -> Result<bool>;
}
