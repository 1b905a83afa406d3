//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Operations that pair a membership-row write
//! with a member-count adjustment are single trait methods so implementations
//! can make them atomic; the counter is floored at zero inside the store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{Community, CommunityMember};
use crate::error::DomainError;
use crate::value_objects::{CommunityRole, Snowflake};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Community Repository
// ============================================================================

#[async_trait]
pub trait CommunityRepository: Send + Sync {
    /// Find community by ID
    ///
    /// Soft-deleted rows are invisible unless `include_deleted` is set;
    /// inclusion is always explicit at the call site.
    async fn find_by_id(&self, id: Snowflake, include_deleted: bool)
        -> RepoResult<Option<Community>>;

    /// Check whether a slug is taken by any non-deleted community other
    /// than `exclude_id`
    async fn slug_exists(&self, slug: &str, exclude_id: Option<Snowflake>) -> RepoResult<bool>;

    /// Count non-deleted communities created by a user (quota check)
    async fn count_by_creator(&self, creator_id: Snowflake) -> RepoResult<i64>;

    /// Insert the community and the creator's Admin membership row in one
    /// transaction
    async fn create_with_creator(
        &self,
        community: &Community,
        creator: &CommunityMember,
    ) -> RepoResult<()>;

    /// Update mutable community fields
    async fn update(&self, community: &Community) -> RepoResult<()>;

    /// Soft delete: set deleted flags and deactivate, membership rows and
    /// counters untouched
    async fn soft_delete(&self, id: Snowflake, deleted_at: DateTime<Utc>) -> RepoResult<()>;

    /// Clear the deleted flags and reactivate
    async fn restore(&self, id: Snowflake) -> RepoResult<()>;

    /// Remove the community row outright (privileged path); membership
    /// cleanup cascades at the store
    async fn hard_delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Flip the active flag
    async fn set_active(&self, id: Snowflake, is_active: bool) -> RepoResult<()>;

    /// Current value of the derived member counter
    async fn member_count(&self, id: Snowflake) -> RepoResult<i64>;
}

// ============================================================================
// Member Repository
// ============================================================================

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Find member by community and user ID
    async fn find(
        &self,
        community_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<CommunityMember>>;

    /// List members of a community, optionally only pending rows
    async fn find_by_community(
        &self,
        community_id: Snowflake,
        pending_only: bool,
        limit: i64,
        after: Option<Snowflake>,
    ) -> RepoResult<Vec<CommunityMember>>;

    /// Insert a membership row; when the new member counts
    /// (approved and not banned), increment the community's member counter
    /// in the same transaction
    async fn insert(&self, member: &CommunityMember) -> RepoResult<()>;

    /// Approve a pending member and increment the member counter, one
    /// transaction
    async fn approve(&self, community_id: Snowflake, user_id: Snowflake) -> RepoResult<()>;

    /// Set the ban flag; when `adjust_count` is set, the member counter is
    /// decremented (ban) or incremented (unban) in the same transaction
    async fn set_banned(
        &self,
        community_id: Snowflake,
        user_id: Snowflake,
        banned: bool,
        adjust_count: bool,
    ) -> RepoResult<()>;

    /// Update the member's role only
    async fn update_role(
        &self,
        community_id: Snowflake,
        user_id: Snowflake,
        role: CommunityRole,
    ) -> RepoResult<()>;

    /// Delete the membership row; when `was_counted` is set, decrement the
    /// member counter in the same transaction
    async fn remove(
        &self,
        community_id: Snowflake,
        user_id: Snowflake,
        was_counted: bool,
    ) -> RepoResult<()>;
}

// ============================================================================
// Category Repository (external entity, existence check only)
// ============================================================================

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Check that the referenced category exists
    async fn exists(&self, id: Snowflake) -> RepoResult<bool>;
}
