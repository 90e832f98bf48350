//! Application commands

pub mod calendar;
pub mod database;
pub mod schedule;

pub use calendar::*;
pub use database::*;
pub use schedule::*;
