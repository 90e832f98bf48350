//! Shared test helpers for `timegrid-core` integration tests.
//!
//! These helpers provide reusable fixtures and lightweight mocks so that
//! service tests can focus on behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod repositories;

use chrono::{NaiveDate, NaiveTime};
use timegrid_domain::{OwnerId, ScheduleItem, ScheduleItemDraft};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("valid test time")
}

pub fn owner(name: &str) -> OwnerId {
    OwnerId::new(name)
}

pub fn draft(title: &str, d: NaiveDate, t: NaiveTime, minutes: u32) -> ScheduleItemDraft {
    ScheduleItemDraft::new(title, d, t).with_duration(minutes)
}

/// A stored item as the repository would hand it back.
pub fn stored(id: &str, owner_id: &OwnerId, draft: ScheduleItemDraft) -> ScheduleItem {
    let mut item = ScheduleItem::from_draft(owner_id.clone(), draft);
    item.id = Some(id.to_string());
    item.created_at = Some(chrono::Utc::now());
    item
}
