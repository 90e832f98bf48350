//! Temporary database harness shared by infra integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use tempfile::TempDir;
use timegrid_domain::{OwnerId, ScheduleItem, ScheduleItemDraft};
use timegrid_infra::database::{DbManager, SqliteScheduleItemRepository};

/// Migrated database in a temporary directory that lives as long as the
/// harness.
pub struct DbHarness {
    _temp_dir: TempDir,
    pub manager: Arc<DbManager>,
}

impl DbHarness {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temporary directory should be created");
        let db_path = temp_dir.path().join("timegrid-integration.db");

        let manager =
            Arc::new(DbManager::new(&db_path, 4).expect("database manager should initialise"));
        manager.run_migrations().expect("schema migrations should apply");

        Self { _temp_dir: temp_dir, manager }
    }

    pub fn repository(&self) -> SqliteScheduleItemRepository {
        SqliteScheduleItemRepository::new(Arc::clone(&self.manager))
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("valid test time")
}

pub fn transient(
    owner: &str,
    title: &str,
    d: NaiveDate,
    t: NaiveTime,
    minutes: u32,
) -> ScheduleItem {
    ScheduleItem::from_draft(
        OwnerId::new(owner),
        ScheduleItemDraft::new(title, d, t).with_duration(minutes),
    )
}
