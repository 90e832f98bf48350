//! Domain types shared by every layer

pub mod calendar;
pub mod schedule;

pub use calendar::{DailyGrid, HourRow, MonthCell, MonthlyGrid, WeekCell, WeekRow, WeeklyGrid};
pub use schedule::{
    DateRange, OverlapScope, OwnerId, ScheduleItem, ScheduleItemDraft, ScheduleItemType,
};
