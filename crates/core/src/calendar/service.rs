//! Calendar service - fetches an owner's window and aggregates it

use std::sync::Arc;

use chrono::NaiveDate;
use timegrid_domain::{DailyGrid, MonthlyGrid, OwnerId, Result, WeeklyGrid};
use tracing::{debug, instrument};

use super::aggregator;
use crate::schedule::ports::ScheduleItemRepository;

/// Calendar view service
pub struct CalendarService {
    repository: Arc<dyn ScheduleItemRepository>,
}

impl CalendarService {
    pub fn new(repository: Arc<dyn ScheduleItemRepository>) -> Self {
        Self { repository }
    }

    /// Hour grid of one day.
    #[instrument(skip(self), fields(owner = %owner))]
    pub async fn daily(&self, owner: &OwnerId, date: NaiveDate) -> Result<DailyGrid> {
        let items = self.repository.find_by_owner_and_date(owner, date).await?;
        debug!(count = items.len(), "building daily grid");
        aggregator::daily(date, &items)
    }

    /// Monday–Friday grid of the week containing `week_start`.
    #[instrument(skip(self), fields(owner = %owner))]
    pub async fn weekly(&self, owner: &OwnerId, week_start: NaiveDate) -> Result<WeeklyGrid> {
        let range = aggregator::week_range(week_start)?;
        let items = self.repository.find(owner, range).await?;
        debug!(count = items.len(), start = %range.start, "building weekly grid");
        aggregator::weekly(range.start, &items)
    }

    /// Calendar page of one month.
    #[instrument(skip(self), fields(owner = %owner))]
    pub async fn monthly(&self, owner: &OwnerId, year: i32, month: u32) -> Result<MonthlyGrid> {
        let range = aggregator::month_range(year, month)?;
        let items = self.repository.find(owner, range).await?;
        debug!(count = items.len(), "building monthly grid");
        aggregator::monthly(year, month, &items)
    }
}
