//! Calendar views
//!
//! Pure grid construction plus the service that feeds it from storage.

pub mod aggregator;
pub mod query;
pub mod service;

pub use aggregator::{daily, monthly, weekly};
pub use service::CalendarService;
