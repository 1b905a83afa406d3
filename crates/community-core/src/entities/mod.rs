//! Domain entities

mod community;
mod member;

pub use community::Community;
pub use member::CommunityMember;
