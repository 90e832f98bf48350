//! Calendar query parameters
//!
//! Turns the raw `date`, `week_start` and `year`/`month` request parameters
//! into typed calendar inputs. Absent or blank parameters default relative to
//! the caller-supplied `today`; malformed ones are rejected instead of being
//! silently replaced.

use chrono::{Datelike, NaiveDate};
use timegrid_domain::{Result, TimeGridError};

use super::aggregator::week_start_of;

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an ISO 8601 calendar date (`YYYY-MM-DD`).
///
/// # Errors
/// `InvalidCalendarWindow` when `raw` is not a valid date.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), ISO_DATE_FORMAT).map_err(|err| {
        TimeGridError::InvalidCalendarWindow(format!("invalid date '{raw}': {err}"))
    })
}

/// The day to show in the daily view.
///
/// # Errors
/// `InvalidCalendarWindow` when `raw` is present but malformed.
pub fn resolve_date(raw: Option<&str>, today: NaiveDate) -> Result<NaiveDate> {
    match non_blank(raw) {
        Some(value) => parse_date(value),
        None => Ok(today),
    }
}

/// Monday of the week to show in the weekly view.
///
/// # Errors
/// `InvalidCalendarWindow` when `raw` is present but malformed.
pub fn resolve_week_start(raw: Option<&str>, today: NaiveDate) -> Result<NaiveDate> {
    week_start_of(resolve_date(raw, today)?)
}

/// Year and month to show in the monthly view.
///
/// # Errors
/// `InvalidCalendarWindow` for a month outside 1..=12.
pub fn resolve_month(
    year: Option<i32>,
    month: Option<u32>,
    today: NaiveDate,
) -> Result<(i32, u32)> {
    let year = year.unwrap_or_else(|| today.year());
    let month = month.unwrap_or_else(|| today.month());

    if !(1..=12).contains(&month) {
        return Err(TimeGridError::InvalidCalendarWindow(format!(
            "month must be between 1 and 12, got {month}"
        )));
    }
    Ok((year, month))
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}
