//! Database implementations

pub mod manager;
pub mod pool;
pub mod schedule_item_repository;

pub use manager::*;
pub use pool::*;
pub use schedule_item_repository::*;
