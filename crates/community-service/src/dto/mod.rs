//! Data transfer objects for service requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for operation inputs
//! - Response DTOs for serializing operation outputs
//! - The uniform operation envelope wrapping both

pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    ChangeRoleRequest, CreateCommunityRequest, DeleteCommunityRequest, ListMembersRequest,
    UpdateCommunityRequest,
};

// Re-export commonly used response types
pub use responses::{
    ActiveStatusResponse, CommunityResponse, DeleteCommunityResponse, JoinResponse,
    MemberResponse, OperationOutcome, OutcomeError, PaginatedResponse, PaginationMeta,
};
