//! # community-core
//!
//! Domain layer containing entities, value objects, the authorization policy,
//! and repository traits. This crate has zero dependencies on infrastructure
//! (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod policy;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Community, CommunityMember};
pub use error::DomainError;
pub use policy::{authorize_member_action, ActorStanding, MemberAction, TargetStanding};
pub use traits::{CategoryRepository, CommunityRepository, MemberRepository, RepoResult};
pub use value_objects::{
    CommunityRole, RoleParseError, Slug, Snowflake, SnowflakeGenerator, SnowflakeParseError,
};
