//! # TimeGrid Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The overlap validator gating every create/update of a schedule item
//! - The calendar aggregator building daily, weekly and monthly grids
//! - Port/adapter interfaces (traits)
//! - Services composing repository access with the pure logic
//!
//! ## Architecture Principles
//! - Only depends on `timegrid-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod calendar;
pub mod schedule;

// Re-export specific items to avoid ambiguity
pub use calendar::CalendarService;
pub use schedule::ports::ScheduleItemRepository;
pub use schedule::validator::OverlapValidator;
pub use schedule::ScheduleService;
