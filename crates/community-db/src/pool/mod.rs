//! Connection pool management

mod postgres;

pub use community_common::DatabaseConfig;
pub use postgres::{create_pool, create_pool_from_env};
pub use sqlx::PgPool;
