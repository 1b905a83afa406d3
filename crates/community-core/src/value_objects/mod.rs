//! Value objects - immutable domain primitives

mod role;
mod slug;
mod snowflake;

pub use role::{CommunityRole, RoleParseError};
pub use slug::Slug;
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
