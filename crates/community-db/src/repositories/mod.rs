//! PostgreSQL repository implementations

mod category;
mod community;
mod error;
mod member;

pub use category::PgCategoryRepository;
pub use community::PgCommunityRepository;
pub use member::PgMemberRepository;
