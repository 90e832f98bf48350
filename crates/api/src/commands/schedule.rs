//! Schedule item commands
//!
//! Request input arrives as strings (form fields, CLI arguments) and is
//! converted into a typed draft before reaching the schedule service. Every
//! command is scoped to the calling owner.

use std::time::Instant;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use timegrid_domain::constants::{DEFAULT_DURATION_MINUTES, MAX_TITLE_LENGTH};
use timegrid_domain::{
    OwnerId, Result as DomainResult, ScheduleItem, ScheduleItemDraft, ScheduleItemType,
    TimeGridError,
};
use tracing::info;

use crate::context::AppContext;
use crate::utils::logging::log_command_result;

/// Raw schedule item fields as submitted by a client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItemInput {
    /// `classes` or `work`; defaults to `classes`.
    pub item_type: Option<String>,
    pub title: String,
    pub notes: Option<String>,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM` or `HH:MM:SS`
    pub time: String,
    pub duration_minutes: Option<u32>,
}

impl TryFrom<ScheduleItemInput> for ScheduleItemDraft {
    type Error = TimeGridError;

    fn try_from(input: ScheduleItemInput) -> DomainResult<Self> {
        let item_type = match input.item_type.as_deref().map(str::trim) {
            None | Some("") => ScheduleItemType::default(),
            Some(raw) => raw.parse::<ScheduleItemType>().map_err(TimeGridError::InvalidInput)?,
        };

        let title = input.title.trim().to_string();
        if title.chars().count() > MAX_TITLE_LENGTH {
            return Err(TimeGridError::InvalidInput(format!(
                "title must be at most {MAX_TITLE_LENGTH} characters"
            )));
        }

        let draft = Self::new(title, parse_date(&input.date)?, parse_time(&input.time)?)
            .with_type(item_type)
            .with_notes(input.notes.unwrap_or_default())
            .with_duration(input.duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES));
        draft.validate()?;
        Ok(draft)
    }
}

fn parse_date(raw: &str) -> DomainResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| TimeGridError::InvalidInput(format!("invalid date '{raw}': {err}")))
}

fn parse_time(raw: &str) -> DomainResult<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|err| TimeGridError::InvalidInput(format!("invalid time '{raw}': {err}")))
}

/// Create a schedule item for `owner`.
pub async fn add_schedule_item(
    ctx: &AppContext,
    owner: &OwnerId,
    input: ScheduleItemInput,
) -> DomainResult<ScheduleItem> {
    let command_name = "schedule::add";
    let start = Instant::now();
    info!(command = command_name, owner = %owner, "Executing add_schedule_item");

    let result = match ScheduleItemDraft::try_from(input) {
        Ok(draft) => ctx.schedule_service.create(owner, draft).await,
        Err(err) => Err(err),
    };

    log_command_result(command_name, start, &result);
    result
}

/// Replace every editable field of one of `owner`'s items.
pub async fn update_schedule_item(
    ctx: &AppContext,
    owner: &OwnerId,
    id: &str,
    input: ScheduleItemInput,
) -> DomainResult<ScheduleItem> {
    let command_name = "schedule::update";
    let start = Instant::now();
    info!(command = command_name, owner = %owner, id, "Executing update_schedule_item");

    let result = match ScheduleItemDraft::try_from(input) {
        Ok(draft) => ctx.schedule_service.replace(owner, id, draft).await,
        Err(err) => Err(err),
    };

    log_command_result(command_name, start, &result);
    result
}

/// Delete one of `owner`'s items.
pub async fn remove_schedule_item(
    ctx: &AppContext,
    owner: &OwnerId,
    id: &str,
) -> DomainResult<()> {
    let command_name = "schedule::remove";
    let start = Instant::now();
    info!(command = command_name, owner = %owner, id, "Executing remove_schedule_item");

    let result = ctx.schedule_service.delete(owner, id).await;

    log_command_result(command_name, start, &result);
    result
}

/// Detail view of one of `owner`'s items.
pub async fn get_schedule_item(
    ctx: &AppContext,
    owner: &OwnerId,
    id: &str,
) -> DomainResult<ScheduleItem> {
    let command_name = "schedule::show";
    let start = Instant::now();

    let result = ctx.schedule_service.get(owner, id).await;

    log_command_result(command_name, start, &result);
    result
}

/// Dashboard list of `owner`'s next items.
pub async fn list_upcoming(ctx: &AppContext, owner: &OwnerId) -> DomainResult<Vec<ScheduleItem>> {
    let command_name = "schedule::upcoming";
    let start = Instant::now();

    let result = ctx.schedule_service.upcoming(owner).await;

    log_command_result(command_name, start, &result);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(date: &str, time: &str) -> ScheduleItemInput {
        ScheduleItemInput {
            title: "Algebra".into(),
            date: date.into(),
            time: time.into(),
            ..ScheduleItemInput::default()
        }
    }

    #[test]
    fn defaults_apply_to_missing_fields() {
        let draft = ScheduleItemDraft::try_from(input("2024-03-11", "09:00")).unwrap();

        assert_eq!(draft.item_type, ScheduleItemType::Classes);
        assert_eq!(draft.duration_minutes, DEFAULT_DURATION_MINUTES);
        assert!(draft.notes.is_empty());
        assert_eq!(draft.time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    }

    #[test]
    fn accepts_seconds_in_time() {
        let draft = ScheduleItemDraft::try_from(input("2024-03-11", "09:15:30")).unwrap();
        assert_eq!(draft.time, NaiveTime::from_hms_opt(9, 15, 30).unwrap());
    }

    #[test]
    fn parses_item_type_case_insensitively() {
        let raw =
            ScheduleItemInput { item_type: Some("WORK".into()), ..input("2024-03-11", "09:00") };
        assert_eq!(ScheduleItemDraft::try_from(raw).unwrap().item_type, ScheduleItemType::Work);
    }

    #[test]
    fn rejects_malformed_fields() {
        for raw in [
            input("2024-02-30", "09:00"),
            input("2024-03-11", "25:00"),
            ScheduleItemInput { item_type: Some("meeting".into()), ..input("2024-03-11", "09:00") },
            ScheduleItemInput { title: "  ".into(), ..input("2024-03-11", "09:00") },
            ScheduleItemInput {
                title: "x".repeat(MAX_TITLE_LENGTH + 1),
                ..input("2024-03-11", "09:00")
            },
        ] {
            assert!(matches!(
                ScheduleItemDraft::try_from(raw),
                Err(TimeGridError::InvalidInput(_))
            ));
        }
    }
}
