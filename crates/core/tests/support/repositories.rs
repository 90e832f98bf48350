use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use timegrid_core::ScheduleItemRepository;
use timegrid_domain::{DateRange, OwnerId, Result as DomainResult, ScheduleItem, TimeGridError};

/// In-memory mock for `ScheduleItemRepository`.
///
/// Keeps rows in a vector, assigns sequential ids on insert and counts calls
/// so tests can assert that rejected writes never reach storage. An optional
/// save delay widens the window between validation and persistence for
/// concurrency tests.
#[derive(Default, Clone)]
pub struct MockScheduleItemRepository {
    items: Arc<Mutex<Vec<ScheduleItem>>>,
    next_id: Arc<AtomicUsize>,
    saves: Arc<AtomicUsize>,
    find_calls: Arc<AtomicUsize>,
    date_calls: Arc<AtomicUsize>,
    save_delay: Option<Duration>,
}

impl MockScheduleItemRepository {
    /// Create a new mock seeded with the provided items.
    pub fn new(items: Vec<ScheduleItem>) -> Self {
        Self { items: Arc::new(Mutex::new(items)), ..Self::default() }
    }

    /// Sleep inside `save` before storing the item.
    pub fn with_save_delay(mut self, delay: Duration) -> Self {
        self.save_delay = Some(delay);
        self
    }

    pub fn items(&self) -> Vec<ScheduleItem> {
        self.items.lock().unwrap().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn find_count(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }

    pub fn find_by_date_count(&self) -> usize {
        self.date_calls.load(Ordering::SeqCst)
    }

    fn sorted(mut items: Vec<ScheduleItem>) -> Vec<ScheduleItem> {
        items.sort_by_key(|item| (item.date, item.time));
        items
    }
}

#[async_trait]
impl ScheduleItemRepository for MockScheduleItemRepository {
    async fn find(&self, owner: &OwnerId, range: DateRange) -> DomainResult<Vec<ScheduleItem>> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        let items = self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|item| item.owner_id == *owner && range.contains(item.date))
            .cloned()
            .collect();
        Ok(Self::sorted(items))
    }

    async fn find_by_owner_and_date(
        &self,
        owner: &OwnerId,
        date: NaiveDate,
    ) -> DomainResult<Vec<ScheduleItem>> {
        self.date_calls.fetch_add(1, Ordering::SeqCst);
        let items = self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|item| item.owner_id == *owner && item.date == date)
            .cloned()
            .collect();
        Ok(Self::sorted(items))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<ScheduleItem>> {
        Ok(self.items.lock().unwrap().iter().find(|item| item.id.as_deref() == Some(id)).cloned())
    }

    async fn upcoming(&self, owner: &OwnerId, limit: usize) -> DomainResult<Vec<ScheduleItem>> {
        let items =
            self.items.lock().unwrap().iter().filter(|item| item.owner_id == *owner).cloned().collect();
        Ok(Self::sorted(items).into_iter().take(limit).collect())
    }

    async fn save(&self, mut item: ScheduleItem) -> DomainResult<ScheduleItem> {
        if let Some(delay) = self.save_delay {
            tokio::time::sleep(delay).await;
        }
        self.saves.fetch_add(1, Ordering::SeqCst);

        let mut items = self.items.lock().unwrap();
        match item.id.clone() {
            Some(id) => {
                let slot = items
                    .iter_mut()
                    .find(|existing| existing.id.as_deref() == Some(id.as_str()))
                    .ok_or_else(|| TimeGridError::NotFound(format!("schedule item {id}")))?;
                *slot = item.clone();
            }
            None => {
                let n = self.next_id.fetch_add(1, Ordering::SeqCst);
                item.id = Some(format!("item-{n}"));
                item.created_at = Some(Utc::now());
                items.push(item.clone());
            }
        }
        Ok(item)
    }

    async fn delete(&self, id: &str) -> DomainResult<bool> {
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|item| item.id.as_deref() != Some(id));
        Ok(items.len() != before)
    }
}
