//! Response DTOs for service operations
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use community_core::entities::{Community, CommunityMember};
use serde::Serialize;

use crate::services::ServiceError;

// ============================================================================
// Common Response Types
// ============================================================================

/// Uniform operation envelope
///
/// Every operation reports `success` plus either a payload or the list of
/// errors that stopped it.
#[derive(Debug, Serialize)]
pub struct OperationOutcome<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<OutcomeError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Single error entry in an operation envelope
#[derive(Debug, Serialize)]
pub struct OutcomeError {
    pub code: String,
    pub category: &'static str,
    pub message: String,
}

impl From<&ServiceError> for OutcomeError {
    fn from(err: &ServiceError) -> Self {
        Self {
            code: err.error_code().to_string(),
            category: err.category().as_str(),
            message: err.to_string(),
        }
    }
}

impl<T> OperationOutcome<T> {
    /// Wrap a successful payload
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            data: Some(data),
        }
    }

    /// Wrap a failure
    pub fn err(error: &ServiceError) -> Self {
        Self {
            success: false,
            errors: vec![OutcomeError::from(error)],
            data: None,
        }
    }

    /// Convert a service result into an envelope
    pub fn from_result(result: crate::services::ServiceResult<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::err(&e),
        }
    }
}

/// Paginated response with cursor-based pagination
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, after: Option<String>, has_more: bool, limit: i64) -> Self {
        Self {
            data,
            pagination: PaginationMeta {
                after,
                has_more,
                limit,
            },
        }
    }
}

/// Pagination metadata
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    /// Cursor for fetching the next page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    /// Whether more results exist
    pub has_more: bool,
    /// Page size limit used
    pub limit: i64,
}

// ============================================================================
// Community Responses
// ============================================================================

/// Community response
#[derive(Debug, Clone, Serialize)]
pub struct CommunityResponse {
    pub id: String,
    pub name: String,
    pub slug: String,
    /// Routable form of the slug ("c/{slug}")
    pub full_slug: String,
    pub category_id: String,
    pub creator_id: String,
    pub member_count: i64,
    pub post_count: i64,
    pub is_private: bool,
    pub require_approval: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Community> for CommunityResponse {
    fn from(community: &Community) -> Self {
        Self {
            id: community.id.to_string(),
            name: community.name.clone(),
            slug: community.slug.as_str().to_string(),
            full_slug: community.slug.full(),
            category_id: community.category_id.to_string(),
            creator_id: community.creator_id.to_string(),
            member_count: community.member_count,
            post_count: community.post_count,
            is_private: community.is_private,
            require_approval: community.require_approval,
            is_active: community.is_active,
            created_at: community.created_at,
            updated_at: community.updated_at,
        }
    }
}

/// Delete community response
#[derive(Debug, Serialize)]
pub struct DeleteCommunityResponse {
    pub id: String,
    /// False when the community was erased permanently
    pub soft_deleted: bool,
    /// Last instant at which restore is still accepted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_restore_until: Option<DateTime<Utc>>,
}

/// Active status response
#[derive(Debug, Serialize)]
pub struct ActiveStatusResponse {
    pub id: String,
    pub is_active: bool,
}

// ============================================================================
// Membership Responses
// ============================================================================

/// Community member response
#[derive(Debug, Clone, Serialize)]
pub struct MemberResponse {
    pub community_id: String,
    pub user_id: String,
    pub role: &'static str,
    pub is_approved: bool,
    pub is_banned: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banned_at: Option<DateTime<Utc>>,
    pub joined_at: DateTime<Utc>,
}

impl From<&CommunityMember> for MemberResponse {
    fn from(member: &CommunityMember) -> Self {
        Self {
            community_id: member.community_id.to_string(),
            user_id: member.user_id.to_string(),
            role: member.role.as_str(),
            is_approved: member.is_approved,
            is_banned: member.is_banned,
            banned_at: member.banned_at,
            joined_at: member.joined_at,
        }
    }
}

/// Join community response
#[derive(Debug, Serialize)]
pub struct JoinResponse {
    pub member: MemberResponse,
    /// True when the join was parked as pending
    pub requires_approval: bool,
}
