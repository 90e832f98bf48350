//! Schedule item model
//!
//! A [`ScheduleItem`] is one timed event on an owner's calendar. Items are
//! built from a [`ScheduleItemDraft`] (the user-editable fields) bound to an
//! owner, validated against the owner's other items, and only then persisted.

use std::fmt;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_DURATION_MINUTES;
use crate::errors::{Result, TimeGridError};
use crate::impl_domain_enum_conversions;

/// Identifier of the user owning a schedule item.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    /// Wrap a raw owner identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OwnerId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Kind of schedule item
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleItemType {
    /// Lectures, seminars and other course sessions.
    #[default]
    Classes,
    /// Shifts and other paid work.
    Work,
}

impl_domain_enum_conversions!(ScheduleItemType {
    Classes => "classes",
    Work => "work",
});

/// Which of the owner's items a candidate is compared against.
///
/// `SameDate` only looks at items on the candidate's own date, so an item
/// running past midnight is never checked against the next day. `AdjacentDays`
/// also includes the day before and after and compares true instants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapScope {
    /// Compare only against items on the candidate's date.
    SameDate,
    /// Compare against the candidate's date and both neighbouring dates.
    #[default]
    AdjacentDays,
}

impl_domain_enum_conversions!(OverlapScope {
    SameDate => "same_date",
    AdjacentDays => "adjacent_days",
});

/// User-editable fields of a schedule item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItemDraft {
    pub item_type: ScheduleItemType,
    /// Non-blank display title.
    pub title: String,
    pub notes: String,
    /// Local calendar date the item starts on.
    pub date: NaiveDate,
    /// Local start time.
    pub time: NaiveTime,
    /// Length in minutes; must be positive.
    pub duration_minutes: u32,
}

impl ScheduleItemDraft {
    /// Create a draft with the default type (classes), no notes and the
    /// default one-hour duration.
    pub fn new(title: impl Into<String>, date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            item_type: ScheduleItemType::default(),
            title: title.into(),
            notes: String::new(),
            date,
            time,
            duration_minutes: DEFAULT_DURATION_MINUTES,
        }
    }

    /// Set the item type.
    pub fn with_type(mut self, item_type: ScheduleItemType) -> Self {
        self.item_type = item_type;
        self
    }

    /// Set free-form notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Set the duration in minutes. Zero is rejected later by validation.
    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration_minutes = minutes;
        self
    }

    /// Check field-level rules that do not depend on other items.
    ///
    /// # Errors
    /// `InvalidInput` for a blank title.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(TimeGridError::InvalidInput("title must not be empty".into()));
        }
        Ok(())
    }
}

/// A timed event on an owner's calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    /// Assigned by storage; `None` until the item is persisted.
    pub id: Option<String>,
    pub owner_id: OwnerId,
    pub item_type: ScheduleItemType,
    pub title: String,
    pub notes: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration_minutes: u32,
    /// Assigned by storage on first save, never changed afterwards.
    pub created_at: Option<DateTime<Utc>>,
}

impl ScheduleItem {
    /// Bind a draft to its owner, producing a transient (unsaved) item.
    pub fn from_draft(owner_id: OwnerId, draft: ScheduleItemDraft) -> Self {
        Self {
            id: None,
            owner_id,
            item_type: draft.item_type,
            title: draft.title,
            notes: draft.notes,
            date: draft.date,
            time: draft.time,
            duration_minutes: draft.duration_minutes,
            created_at: None,
        }
    }

    /// Replace every user-editable field. `id`, `owner_id` and `created_at`
    /// are kept.
    pub fn apply(&mut self, draft: ScheduleItemDraft) {
        self.item_type = draft.item_type;
        self.title = draft.title;
        self.notes = draft.notes;
        self.date = draft.date;
        self.time = draft.time;
        self.duration_minutes = draft.duration_minutes;
    }

    /// Whether storage has assigned an id.
    pub const fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Start instant (local wall-clock time).
    pub fn start(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// Start plus duration, or `None` when that instant is past chrono's
    /// maximum date.
    pub fn end(&self) -> Option<NaiveDateTime> {
        self.start().checked_add_signed(Duration::minutes(i64::from(self.duration_minutes)))
    }

    /// Half-open interval overlap: touching endpoints do not overlap.
    ///
    /// An unrepresentable end is treated as open-ended.
    pub fn overlaps(&self, other: &Self) -> bool {
        let self_end = self.end().unwrap_or(NaiveDateTime::MAX);
        let other_end = other.end().unwrap_or(NaiveDateTime::MAX);
        self.start() < other_end && self_end > other.start()
    }
}

impl fmt::Display for ScheduleItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) - {} {}", self.title, self.item_type, self.date, self.time)
    }
}

/// Inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First date, inclusive.
    pub start: NaiveDate,
    /// Last date, inclusive.
    pub end: NaiveDate,
}

impl DateRange {
    /// # Errors
    /// `InvalidCalendarWindow` when `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(TimeGridError::InvalidCalendarWindow(format!(
                "range start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// A range covering exactly one day.
    pub const fn day(date: NaiveDate) -> Self {
        Self { start: date, end: date }
    }

    /// Whether `date` lies inside the range, bounds included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}
