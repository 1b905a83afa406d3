//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod community;
pub mod context;
pub mod error;
pub mod membership;
pub mod slug;

// Re-export all services for convenience
pub use community::CommunityService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ErrorCategory, ServiceError, ServiceResult};
pub use membership::MembershipService;
pub use slug::SlugService;
