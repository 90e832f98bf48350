//! # TimeGrid Domain
//!
//! Business domain types and models for TimeGrid.
//!
//! This crate contains:
//! - Schedule item model and drafts
//! - Calendar grid shapes (daily, weekly, monthly)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other TimeGrid crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
