//! # community-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for the repository traits
//! defined in `community-core`. It handles:
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations, with every membership-row write that
//!   carries a member-count adjustment executed in a single transaction
//!
//! ## Schema expectations
//!
//! `community_members` has `PRIMARY KEY (community_id, user_id)`, and
//! `communities` has a partial unique index on `slug WHERE NOT is_deleted`.
//! Concurrent identical joins therefore surface as a unique violation, which
//! maps to `DomainError::AlreadyMember` rather than a duplicate row.

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use repositories::{PgCategoryRepository, PgCommunityRepository, PgMemberRepository};
