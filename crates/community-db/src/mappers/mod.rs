//! Entity ↔ model mappers

mod community;
mod member;

pub use member::member_from_model;
