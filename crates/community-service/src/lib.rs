//! # community-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    CommunityService, MembershipService, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult, SlugService,
};
