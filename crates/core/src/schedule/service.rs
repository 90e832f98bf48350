//! Schedule service - core business logic
//!
//! Every write runs fetch → validate → persist while holding the owner's
//! lock, so concurrent writers for the same owner are serialised and the
//! no-overlap invariant holds for everything the repository stores.

use std::sync::Arc;

use timegrid_domain::constants::DEFAULT_UPCOMING_LIMIT;
use timegrid_domain::{
    OverlapScope, OwnerId, Result, ScheduleItem, ScheduleItemDraft, TimeGridError,
};
use tracing::{debug, info, instrument, warn};

use super::locks::OwnerLocks;
use super::ports::ScheduleItemRepository;
use super::validator::OverlapValidator;

/// Schedule item service
pub struct ScheduleService {
    repository: Arc<dyn ScheduleItemRepository>,
    validator: OverlapValidator,
    locks: OwnerLocks,
    upcoming_limit: usize,
}

impl ScheduleService {
    /// Create a new schedule service using the default overlap scope
    pub fn new(repository: Arc<dyn ScheduleItemRepository>) -> Self {
        Self {
            repository,
            validator: OverlapValidator::default(),
            locks: OwnerLocks::new(),
            upcoming_limit: DEFAULT_UPCOMING_LIMIT,
        }
    }

    /// Choose which of the owner's items a candidate is compared against.
    pub fn with_overlap_scope(mut self, scope: OverlapScope) -> Self {
        self.validator = OverlapValidator::new(scope);
        self
    }

    /// Number of items returned by [`Self::upcoming`].
    pub fn with_upcoming_limit(mut self, limit: usize) -> Self {
        self.upcoming_limit = limit;
        self
    }

    pub const fn validator(&self) -> &OverlapValidator {
        &self.validator
    }

    /// Validate and store a new item for `owner`.
    ///
    /// # Errors
    /// `InvalidInput`, `InvalidDuration` or `OverlapConflict` without touching
    /// storage; repository errors otherwise.
    #[instrument(skip(self, draft), fields(owner = %owner, date = %draft.date))]
    pub async fn create(&self, owner: &OwnerId, draft: ScheduleItemDraft) -> Result<ScheduleItem> {
        draft.validate()?;
        let candidate = ScheduleItem::from_draft(owner.clone(), draft);
        OverlapValidator::check_duration(&candidate)?;

        let _guard = self.locks.acquire(owner).await;
        self.ensure_no_conflict(&candidate).await?;

        let saved = self.repository.save(candidate).await?;
        info!(id = ?saved.id, "schedule item created");
        Ok(saved)
    }

    /// Fully replace the editable fields of an owner's item.
    ///
    /// # Errors
    /// `NotFound` when the item does not exist or belongs to someone else,
    /// plus the validation errors of [`Self::create`].
    #[instrument(skip(self, draft), fields(owner = %owner))]
    pub async fn replace(
        &self,
        owner: &OwnerId,
        id: &str,
        draft: ScheduleItemDraft,
    ) -> Result<ScheduleItem> {
        draft.validate()?;

        let _guard = self.locks.acquire(owner).await;
        let mut item = self.owned(owner, id).await?;
        item.apply(draft);
        OverlapValidator::check_duration(&item)?;
        self.ensure_no_conflict(&item).await?;

        let saved = self.repository.save(item).await?;
        info!(id, "schedule item replaced");
        Ok(saved)
    }

    /// Delete an owner's item.
    ///
    /// # Errors
    /// `NotFound` when the item does not exist or belongs to someone else.
    #[instrument(skip(self), fields(owner = %owner))]
    pub async fn delete(&self, owner: &OwnerId, id: &str) -> Result<()> {
        let _guard = self.locks.acquire(owner).await;
        self.owned(owner, id).await?;

        if !self.repository.delete(id).await? {
            return Err(TimeGridError::NotFound(format!("schedule item {id}")));
        }
        info!(id, "schedule item removed");
        Ok(())
    }

    /// Detail lookup scoped to the owner.
    ///
    /// # Errors
    /// `NotFound` when the item does not exist or belongs to someone else.
    pub async fn get(&self, owner: &OwnerId, id: &str) -> Result<ScheduleItem> {
        self.owned(owner, id).await
    }

    /// The owner's next items in `(date, time)` order, for the dashboard.
    pub async fn upcoming(&self, owner: &OwnerId) -> Result<Vec<ScheduleItem>> {
        self.repository.upcoming(owner, self.upcoming_limit).await
    }

    async fn owned(&self, owner: &OwnerId, id: &str) -> Result<ScheduleItem> {
        match self.repository.find_by_id(id).await? {
            Some(item) if item.owner_id == *owner => Ok(item),
            Some(_) => {
                warn!(id, owner = %owner, "schedule item requested by non-owner");
                Err(TimeGridError::NotFound(format!("schedule item {id}")))
            }
            None => Err(TimeGridError::NotFound(format!("schedule item {id}"))),
        }
    }

    async fn ensure_no_conflict(&self, candidate: &ScheduleItem) -> Result<()> {
        let existing = match self.validator.scope() {
            OverlapScope::SameDate => {
                self.repository.find_by_owner_and_date(&candidate.owner_id, candidate.date).await?
            }
            OverlapScope::AdjacentDays => {
                let window = self.validator.comparison_window(candidate.date);
                self.repository.find(&candidate.owner_id, window).await?
            }
        };
        debug!(compared = existing.len(), "checking schedule item for overlaps");

        self.validator.validate(candidate, &existing).inspect_err(|err| {
            warn!(error = %err, "schedule item rejected");
        })
    }
}
