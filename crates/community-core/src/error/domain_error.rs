//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Community not found: {0}")]
    CommunityNotFound(Snowflake),

    #[error("Category not found: {0}")]
    CategoryNotFound(Snowflake),

    #[error("Member not found in community")]
    MemberNotFound,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Community name must be {min}-{max} characters")]
    NameLength { min: usize, max: usize },

    #[error("Community name cannot be turned into a URL slug")]
    UnslugifiableName,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Authentication required")]
    NotAuthenticated,

    #[error("Only the community creator can do this")]
    CreatorOnly,

    #[error("Moderator or admin role required")]
    ModeratorRequired,

    #[error("Banned members cannot moderate")]
    ActorBanned,

    #[error("Moderators cannot act on other moderators or admins")]
    TargetOutranksActor,

    #[error("The community creator cannot be banned, removed, or demoted")]
    CreatorImmune,

    // =========================================================================
    // State Conflict Errors
    // =========================================================================
    #[error("Already a member of this community")]
    AlreadyMember,

    #[error("Membership is already pending approval")]
    AlreadyPending,

    #[error("Member is already approved")]
    AlreadyApproved,

    #[error("User is banned from this community")]
    AlreadyBanned,

    #[error("Member is not banned")]
    NotBanned,

    #[error("Cannot reject an approved member; remove them instead")]
    CannotRejectApproved,

    #[error("The community creator cannot leave; delete the community instead")]
    CreatorCannotLeave,

    #[error("This community is not active")]
    CommunityInactive,

    #[error("This community has been deleted")]
    CommunityDeleted,

    #[error("Community is not deleted")]
    NotDeleted,

    #[error("The restore period for this community has expired")]
    RestoreWindowExpired,

    #[error("Community limit reached: at most {max} communities per user")]
    QuotaExceeded { max: u32 },

    #[error("Could not generate a unique slug")]
    SlugExhausted,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::CommunityNotFound(_) => "UNKNOWN_COMMUNITY",
            Self::CategoryNotFound(_) => "UNKNOWN_CATEGORY",
            Self::MemberNotFound => "UNKNOWN_MEMBER",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::NameLength { .. } => "INVALID_NAME_LENGTH",
            Self::UnslugifiableName => "INVALID_NAME",

            // Authorization
            Self::NotAuthenticated => "NOT_AUTHENTICATED",
            Self::CreatorOnly => "CREATOR_ONLY",
            Self::ModeratorRequired => "MODERATOR_REQUIRED",
            Self::ActorBanned => "ACTOR_BANNED",
            Self::TargetOutranksActor => "TARGET_OUTRANKS_ACTOR",
            Self::CreatorImmune => "CREATOR_IMMUNE",

            // State Conflicts
            Self::AlreadyMember => "ALREADY_MEMBER",
            Self::AlreadyPending => "ALREADY_PENDING",
            Self::AlreadyApproved => "ALREADY_APPROVED",
            Self::AlreadyBanned => "ALREADY_BANNED",
            Self::NotBanned => "NOT_BANNED",
            Self::CannotRejectApproved => "CANNOT_REJECT_APPROVED",
            Self::CreatorCannotLeave => "CREATOR_CANNOT_LEAVE",
            Self::CommunityInactive => "COMMUNITY_INACTIVE",
            Self::CommunityDeleted => "COMMUNITY_DELETED",
            Self::NotDeleted => "NOT_DELETED",
            Self::RestoreWindowExpired => "RESTORE_WINDOW_EXPIRED",
            Self::QuotaExceeded { .. } => "QUOTA_EXCEEDED",
            Self::SlugExhausted => "SLUG_EXHAUSTED",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::CommunityNotFound(_) | Self::CategoryNotFound(_) | Self::MemberNotFound
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::NameLength { .. } | Self::UnslugifiableName
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::NotAuthenticated
                | Self::CreatorOnly
                | Self::ModeratorRequired
                | Self::ActorBanned
                | Self::TargetOutranksActor
                | Self::CreatorImmune
        )
    }

    /// Check if this is a state-conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::AlreadyMember
                | Self::AlreadyPending
                | Self::AlreadyApproved
                | Self::AlreadyBanned
                | Self::NotBanned
                | Self::CannotRejectApproved
                | Self::CreatorCannotLeave
                | Self::CommunityInactive
                | Self::CommunityDeleted
                | Self::NotDeleted
                | Self::RestoreWindowExpired
                | Self::QuotaExceeded { .. }
                | Self::SlugExhausted
        )
    }

    /// Check if this is an infrastructure error
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, Self::DatabaseError(_) | Self::InternalError(_))
    }
}
