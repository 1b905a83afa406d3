//! Integration test utilities for the community server
//!
//! This crate provides in-memory repository implementations and fixtures
//! for exercising the service layer end to end without a database.

pub mod fixtures;

pub use fixtures::*;
pub use memory::*;
