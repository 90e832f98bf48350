//! Per-owner write serialisation
//!
//! Validation followed by persistence is a check-then-act sequence. Holding
//! the owner's lock across both steps keeps two concurrent writers from
//! validating against the same snapshot.

use std::sync::Arc;

use dashmap::DashMap;
use timegrid_domain::OwnerId;
use tokio::sync::{Mutex, OwnedMutexGuard};

type LockMap = DashMap<OwnerId, Arc<Mutex<()>>>;

/// Lazily created async mutex per owner.
///
/// Entries live only while some task holds or waits for the owner's lock.
#[derive(Debug, Default)]
pub struct OwnerLocks {
    locks: LockMap,
}

impl OwnerLocks {
    /// Empty lock table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for and take the owner's lock. Released when the guard drops.
    pub async fn acquire(&self, owner: &OwnerId) -> OwnerGuard<'_> {
        // Cloned under the shard lock, so eviction never races this clone.
        let lock = Arc::clone(self.locks.entry(owner.clone()).or_default().value());
        let guard = lock.lock_owned().await;
        OwnerGuard { locks: &self.locks, owner: owner.clone(), guard: Some(guard) }
    }

    /// Number of owners currently holding or waiting for a lock.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    /// Whether no owner holds or waits for a lock.
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

/// Held owner lock. Dropping it releases the lock and evicts the owner's
/// entry when no other task references it.
#[derive(Debug)]
pub struct OwnerGuard<'a> {
    locks: &'a LockMap,
    owner: OwnerId,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for OwnerGuard<'_> {
    fn drop(&mut self) {
        // The guard owns one reference to the Arc; release it first.
        drop(self.guard.take());
        self.locks.remove_if(&self.owner, |_, lock| Arc::strong_count(lock) == 1);
    }
}
