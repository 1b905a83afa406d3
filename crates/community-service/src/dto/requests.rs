//! Request DTOs for service operations
//!
//! All request DTOs implement `Deserialize` and, where input needs checking,
//! `Validate`.

use community_core::{CommunityRole, Snowflake};
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Community Requests
// ============================================================================

/// Create community request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommunityRequest {
    #[validate(length(min = 3, max = 100, message = "Community name must be 3-100 characters"))]
    pub name: String,

    pub category_id: Snowflake,

    /// Hide the community from non-members
    #[serde(default)]
    pub is_private: bool,

    /// Hold new joins as pending until a moderator approves them
    #[serde(default)]
    pub require_approval: bool,
}

/// Update community request
///
/// Every field is optional; absent fields are left unchanged. A name change
/// regenerates the slug.
#[derive(Debug, Clone, Deserialize, Validate, Default)]
pub struct UpdateCommunityRequest {
    #[validate(length(min = 3, max = 100, message = "Community name must be 3-100 characters"))]
    pub name: Option<String>,

    pub category_id: Option<Snowflake>,

    pub is_private: Option<bool>,

    pub require_approval: Option<bool>,
}

/// Delete community request
#[derive(Debug, Clone, Deserialize, Default)]
pub struct DeleteCommunityRequest {
    /// Skip the soft-delete stage and erase the community outright
    #[serde(default)]
    pub permanent: bool,
}

// ============================================================================
// Membership Requests
// ============================================================================

/// Change member role request
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeRoleRequest {
    pub role: CommunityRole,
}

/// List members request
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ListMembersRequest {
    /// Only return members awaiting approval
    #[serde(default)]
    pub pending_only: bool,

    /// Page size (clamped to 1-100, defaults to 50)
    pub limit: Option<i64>,

    /// Return members with user IDs strictly greater than this cursor
    pub after: Option<Snowflake>,
}
