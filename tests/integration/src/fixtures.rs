//! Test fixtures
//!
//! Wires the services to the in-memory repositories and provides reusable
//! actors and request builders.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use community_common::CommunityConfig;
use community_core::{Snowflake, SnowflakeGenerator};
use community_service::dto::CreateCommunityRequest;
use community_service::{
    CommunityService, MembershipService, ServiceContext, ServiceContextBuilder,
};

use crate::memory::{
    MemoryCategoryRepository, MemoryCommunityRepository, MemoryMemberRepository, MemoryStore,
};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Seeded category every harness starts with
pub const CATEGORY_ID: Snowflake = Snowflake::new(1000);

/// Well-known test users
pub const CREATOR: Snowflake = Snowflake::new(1);
pub const ALICE: Snowflake = Snowflake::new(2);
pub const BOB: Snowflake = Snowflake::new(3);
pub const CAROL: Snowflake = Snowflake::new(4);

/// Service context plus a handle on the backing store
pub struct TestHarness {
    pub store: Arc<MemoryStore>,
    pub ctx: ServiceContext,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_config(CommunityConfig::default())
    }

    pub fn with_config(config: CommunityConfig) -> Self {
        let store = MemoryStore::new();
        store.seed_category(CATEGORY_ID);

        let ctx = ServiceContextBuilder::new()
            .community_repo(Arc::new(MemoryCommunityRepository::new(Arc::clone(&store))))
            .member_repo(Arc::new(MemoryMemberRepository::new(Arc::clone(&store))))
            .category_repo(Arc::new(MemoryCategoryRepository::new(Arc::clone(&store))))
            .community_config(config)
            .snowflake_generator(Arc::new(SnowflakeGenerator::new(1)))
            .build()
            .expect("test context should build");

        Self { store, ctx }
    }

    pub fn communities(&self) -> CommunityService<'_> {
        CommunityService::new(&self.ctx)
    }

    pub fn memberships(&self) -> MembershipService<'_> {
        MembershipService::new(&self.ctx)
    }

    /// Create a community and return its ID
    pub async fn create_community(&self, request: CreateCommunityRequest) -> Snowflake {
        let response = self
            .communities()
            .create_community(CREATOR, request)
            .await
            .expect("community creation should succeed");
        response.id.parse().expect("response id should be a snowflake")
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Create-community request with a unique name
pub fn create_request() -> CreateCommunityRequest {
    let suffix = unique_suffix();
    named_request(&format!("Test Community {suffix}"))
}

/// Create-community request with an explicit name
pub fn named_request(name: &str) -> CreateCommunityRequest {
    CreateCommunityRequest {
        name: name.to_string(),
        category_id: CATEGORY_ID,
        is_private: false,
        require_approval: false,
    }
}

/// Create-community request whose joins are held as pending
pub fn gated_request(name: &str) -> CreateCommunityRequest {
    CreateCommunityRequest {
        require_approval: true,
        ..named_request(name)
    }
}
