//! Repository traits (ports)

mod repositories;

pub use repositories::{CategoryRepository, CommunityRepository, MemberRepository, RepoResult};
