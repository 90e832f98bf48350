//! Calendar view commands
//!
//! Query parameters are optional strings and integers; missing ones default
//! relative to the local date.

use std::time::Instant;

use chrono::{Local, NaiveDate};
use timegrid_core::calendar::query;
use timegrid_domain::{DailyGrid, MonthlyGrid, OwnerId, Result as DomainResult, WeeklyGrid};
use tracing::info;

use crate::context::AppContext;
use crate::utils::logging::log_command_result;

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Hour grid for `date` (default today).
pub async fn get_daily_calendar(
    ctx: &AppContext,
    owner: &OwnerId,
    date: Option<&str>,
) -> DomainResult<DailyGrid> {
    let command_name = "calendar::daily";
    let start = Instant::now();
    info!(command = command_name, owner = %owner, date, "Building daily calendar");

    let result = match query::resolve_date(date, today()) {
        Ok(date) => ctx.calendar_service.daily(owner, date).await,
        Err(err) => Err(err),
    };

    log_command_result(command_name, start, &result);
    result
}

/// Workweek grid for the week containing `week_start` (default this week).
pub async fn get_weekly_calendar(
    ctx: &AppContext,
    owner: &OwnerId,
    week_start: Option<&str>,
) -> DomainResult<WeeklyGrid> {
    let command_name = "calendar::weekly";
    let start = Instant::now();
    info!(command = command_name, owner = %owner, week_start, "Building weekly calendar");

    let result = match query::resolve_week_start(week_start, today()) {
        Ok(monday) => ctx.calendar_service.weekly(owner, monday).await,
        Err(err) => Err(err),
    };

    log_command_result(command_name, start, &result);
    result
}

/// Month page for `year`/`month` (default the current month).
pub async fn get_monthly_calendar(
    ctx: &AppContext,
    owner: &OwnerId,
    year: Option<i32>,
    month: Option<u32>,
) -> DomainResult<MonthlyGrid> {
    let command_name = "calendar::monthly";
    let start = Instant::now();
    info!(command = command_name, owner = %owner, ?year, ?month, "Building monthly calendar");

    let result = match query::resolve_month(year, month, today()) {
        Ok((year, month)) => ctx.calendar_service.monthly(owner, year, month).await,
        Err(err) => Err(err),
    };

    log_command_result(command_name, start, &result);
    result
}
