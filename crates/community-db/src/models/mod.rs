//! Database models (SQLx `FromRow` structs)

mod community;
mod member;

pub use community::CommunityModel;
pub use member::CommunityMemberModel;
