//! Calendar grid shapes
//!
//! Display-ready projections of schedule items. Every grid is fully
//! populated: empty hours, empty weekday cells and out-of-month days are
//! present as empty entries rather than omitted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::schedule::ScheduleItem;

/// One hour of a day with the items starting in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourRow {
    pub hour: u32,
    pub items: Vec<ScheduleItem>,
}

impl HourRow {
    pub const fn empty(hour: u32) -> Self {
        Self { hour, items: Vec::new() }
    }
}

/// Single-day view: 24 hour rows plus navigation dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyGrid {
    pub chosen_date: NaiveDate,
    pub previous_date: NaiveDate,
    pub next_date: NaiveDate,
    /// Monday of the chosen date's week.
    pub week_start_date: NaiveDate,
    pub rows: Vec<HourRow>,
}

impl DailyGrid {
    pub fn item_count(&self) -> usize {
        self.rows.iter().map(|row| row.items.len()).sum()
    }
}

/// Items of one weekday column within one hour row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekCell {
    pub date: NaiveDate,
    pub items: Vec<ScheduleItem>,
}

/// One hour across the workweek columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekRow {
    pub hour: u32,
    pub cells: Vec<WeekCell>,
}

/// Monday–Friday view with 24 hour rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyGrid {
    /// Always a Monday.
    pub week_start: NaiveDate,
    /// Sunday closing the week (`week_start + 6 days`).
    pub week_end: NaiveDate,
    pub previous_week_start: NaiveDate,
    pub next_week_start: NaiveDate,
    /// Column dates, Monday through Friday.
    pub weekdays: Vec<NaiveDate>,
    pub hours: Vec<u32>,
    pub rows: Vec<WeekRow>,
}

/// A day of the month page. `day` is `None` for placeholder cells that
/// belong to the previous or next month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCell {
    pub day: Option<u32>,
    pub items: Vec<ScheduleItem>,
}

impl MonthCell {
    pub const fn placeholder() -> Self {
        Self { day: None, items: Vec::new() }
    }
}

/// Month page: Monday-first weeks of exactly seven cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyGrid {
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub previous_year: i32,
    pub previous_month: u32,
    pub next_year: i32,
    pub next_month: u32,
    pub weeks: Vec<Vec<MonthCell>>,
}

impl MonthlyGrid {
    /// Day numbers of the real (non-placeholder) cells in calendar order.
    pub fn days(&self) -> impl Iterator<Item = u32> + '_ {
        self.weeks.iter().flatten().filter_map(|cell| cell.day)
    }
}
