//! Calendar aggregation
//!
//! Projects a flat, already-filtered sequence of schedule items onto the
//! daily, weekly and monthly grids. Filtering by owner and window is the
//! repository's job; these functions only place items into cells. None of
//! them mutate their input.
//!
//! Weeks start on Monday everywhere.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Days, Month, NaiveDate, Timelike};
use timegrid_domain::constants::{DAYS_PER_WEEK, HOURS_PER_DAY, WORKWEEK_DAYS};
use timegrid_domain::{
    DailyGrid, DateRange, HourRow, MonthCell, MonthlyGrid, Result, ScheduleItem, TimeGridError,
    WeekCell, WeekRow, WeeklyGrid,
};

/// Build the 24-row view of `date`.
///
/// Every item lands in the row of its starting hour, so the rows partition
/// `items` exactly. Within a row items are ordered by time.
///
/// # Errors
/// `InvalidCalendarWindow` when a navigation date falls outside chrono's range.
pub fn daily(date: NaiveDate, items: &[ScheduleItem]) -> Result<DailyGrid> {
    let mut rows: Vec<HourRow> = (0..HOURS_PER_DAY).map(HourRow::empty).collect();

    for item in sorted_by_start(items) {
        if let Some(row) = rows.get_mut(item.time.hour() as usize) {
            row.items.push(item.clone());
        }
    }

    Ok(DailyGrid {
        chosen_date: date,
        previous_date: shift_days(date, -1)?,
        next_date: shift_days(date, 1)?,
        week_start_date: week_start_of(date)?,
        rows,
    })
}

/// Build the Monday–Friday view of the week containing `week_start`.
///
/// Any day of the week may be passed; it is normalised to that week's Monday.
///
/// # Errors
/// `InvalidCalendarWindow` when a navigation date falls outside chrono's range.
pub fn weekly(week_start: NaiveDate, items: &[ScheduleItem]) -> Result<WeeklyGrid> {
    let week_start = week_start_of(week_start)?;
    let weekdays = (0..WORKWEEK_DAYS)
        .map(|offset| shift_days(week_start, offset))
        .collect::<Result<Vec<_>>>()?;
    let hours: Vec<u32> = (0..HOURS_PER_DAY).collect();

    let mut by_slot: BTreeMap<(NaiveDate, u32), Vec<ScheduleItem>> = BTreeMap::new();
    for item in sorted_by_start(items) {
        by_slot.entry((item.date, item.time.hour())).or_default().push(item.clone());
    }

    let rows = hours
        .iter()
        .map(|&hour| WeekRow {
            hour,
            cells: weekdays
                .iter()
                .map(|&date| WeekCell {
                    date,
                    items: by_slot.get(&(date, hour)).cloned().unwrap_or_default(),
                })
                .collect(),
        })
        .collect();

    Ok(WeeklyGrid {
        week_start,
        week_end: shift_days(week_start, 6)?,
        previous_week_start: shift_days(week_start, -7)?,
        next_week_start: shift_days(week_start, 7)?,
        weekdays,
        hours,
        rows,
    })
}

/// Build the calendar page for `month` of `year`.
///
/// Weeks are Monday-first with exactly seven cells; days of the neighbouring
/// months are placeholders without items. Only items dated inside the month
/// are placed.
///
/// # Errors
/// `InvalidCalendarWindow` for a month outside 1..=12 or an unrepresentable year.
pub fn monthly(year: i32, month: u32, items: &[ScheduleItem]) -> Result<MonthlyGrid> {
    let range = month_range(year, month)?;
    let (previous_year, previous_month) = previous_month(year, month);
    let (next_year, next_month) = next_month(year, month);

    let mut by_day: HashMap<u32, Vec<ScheduleItem>> = HashMap::new();
    for item in sorted_by_start(items).filter(|item| range.contains(item.date)) {
        by_day.entry(item.date.day()).or_default().push(item.clone());
    }

    let weeks = month_matrix(year, month)?
        .into_iter()
        .map(|week| {
            week.into_iter()
                .map(|day| match day {
                    Some(day) => MonthCell {
                        day: Some(day),
                        items: by_day.get(&day).cloned().unwrap_or_default(),
                    },
                    None => MonthCell::placeholder(),
                })
                .collect()
        })
        .collect();

    Ok(MonthlyGrid {
        year,
        month,
        month_name: month_name(month)?,
        previous_year,
        previous_month,
        next_year,
        next_month,
        weeks,
    })
}

/// Monday of the week containing `date`.
///
/// # Errors
/// `InvalidCalendarWindow` when that Monday is outside chrono's range.
pub fn week_start_of(date: NaiveDate) -> Result<NaiveDate> {
    shift_days(date, -i64::from(date.weekday().num_days_from_monday()))
}

/// Monday through Sunday of the week containing `date`.
///
/// # Errors
/// `InvalidCalendarWindow` when the week is outside chrono's range.
pub fn week_range(date: NaiveDate) -> Result<DateRange> {
    let start = week_start_of(date)?;
    DateRange::new(start, shift_days(start, 6)?)
}

/// First through last day of a month.
///
/// # Errors
/// `InvalidCalendarWindow` for a month outside 1..=12 or an unrepresentable year.
pub fn month_range(year: i32, month: u32) -> Result<DateRange> {
    let first = first_of_month(year, month)?;
    let last = first.with_day(days_in_month(year, month)?).ok_or_else(|| {
        TimeGridError::InvalidCalendarWindow(format!("{year}-{month:02} has no last day"))
    })?;
    DateRange::new(first, last)
}

/// Number of days in a month, honouring leap years.
///
/// # Errors
/// `InvalidCalendarWindow` for a month outside 1..=12 or an unrepresentable year.
pub fn days_in_month(year: i32, month: u32) -> Result<u32> {
    let first = first_of_month(year, month)?;
    Ok((29..=31).rev().find(|&day| first.with_day(day).is_some()).unwrap_or(28))
}

/// Monday-first weeks of the month; `None` marks days of adjacent months.
///
/// # Errors
/// `InvalidCalendarWindow` for a month outside 1..=12 or an unrepresentable year.
pub fn month_matrix(year: i32, month: u32) -> Result<Vec<[Option<u32>; DAYS_PER_WEEK]>> {
    let first = first_of_month(year, month)?;
    let last_day = days_in_month(year, month)?;
    let leading = first.weekday().num_days_from_monday() as usize;

    let mut weeks = Vec::new();
    let mut week = [None; DAYS_PER_WEEK];
    let mut column = leading;
    for day in 1..=last_day {
        if let Some(cell) = week.get_mut(column) {
            *cell = Some(day);
        }
        column += 1;
        if column == DAYS_PER_WEEK {
            weeks.push(week);
            week = [None; DAYS_PER_WEEK];
            column = 0;
        }
    }
    if column > 0 {
        weeks.push(week);
    }
    Ok(weeks)
}

/// The month before, rolling the year over at January.
pub const fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month <= 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// The month after, rolling the year over at December.
pub const fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month >= 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

fn first_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    if !(1..=12).contains(&month) {
        return Err(TimeGridError::InvalidCalendarWindow(format!(
            "month must be between 1 and 12, got {month}"
        )));
    }
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        TimeGridError::InvalidCalendarWindow(format!("year {year} is out of range"))
    })
}

fn month_name(month: u32) -> Result<String> {
    u8::try_from(month)
        .ok()
        .and_then(|number| Month::try_from(number).ok())
        .map(|month| month.name().to_string())
        .ok_or_else(|| TimeGridError::InvalidCalendarWindow(format!("unknown month {month}")))
}

fn shift_days(date: NaiveDate, days: i64) -> Result<NaiveDate> {
    let delta = Days::new(days.unsigned_abs());
    let shifted =
        if days >= 0 { date.checked_add_days(delta) } else { date.checked_sub_days(delta) };
    shifted.ok_or_else(|| {
        TimeGridError::InvalidCalendarWindow(format!("{date} shifted by {days} days is out of range"))
    })
}

fn sorted_by_start(items: &[ScheduleItem]) -> impl Iterator<Item = &ScheduleItem> {
    let mut ordered: Vec<&ScheduleItem> = items.iter().collect();
    ordered.sort_by_key(|item| (item.date, item.time));
    ordered.into_iter()
}
