//! # TimeGrid Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - SQLite storage for schedule items (r2d2 pool, schema, repository)
//! - Configuration loading from environment variables and files
//!
//! ## Architecture
//! - Implements traits defined in `timegrid-core`
//! - Contains all "impure" code (file system, database I/O)

pub mod config;
pub mod database;
pub mod errors;

// Re-export commonly used items
pub use database::*;
pub use errors::InfraError;
