//! # TimeGrid App
//!
//! Application layer - commands and the `timegrid` command-line entry point.
//!
//! This crate contains:
//! - Commands (string-typed request input → domain services → grids/items)
//! - Application context (dependency injection)
//! - Logging setup shared by the binary and tests
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture

pub mod commands;
pub mod context;
pub mod utils;

// Re-export for convenience
pub use commands::*;
pub use context::*;
