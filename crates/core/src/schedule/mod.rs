//! Schedule item management
//!
//! Conflict validation plus the create/replace/delete workflow around it.

pub mod locks;
pub mod ports;
pub mod service;
pub mod validator;

pub use locks::{OwnerGuard, OwnerLocks};
pub use service::ScheduleService;
