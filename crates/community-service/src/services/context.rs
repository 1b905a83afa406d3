//! Service context - dependency container for services
//!
//! Holds the repositories, configuration, and ID generator needed by services.

use std::sync::Arc;

use community_common::CommunityConfig;
use community_core::traits::{CategoryRepository, CommunityRepository, MemberRepository};
use community_core::SnowflakeGenerator;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Database repositories
/// - Community policy configuration (name bounds, quota, retention)
/// - Snowflake generator for ID generation
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    community_repo: Arc<dyn CommunityRepository>,
    member_repo: Arc<dyn MemberRepository>,
    category_repo: Arc<dyn CategoryRepository>,

    // Configuration
    community_config: CommunityConfig,

    // Services
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        community_repo: Arc<dyn CommunityRepository>,
        member_repo: Arc<dyn MemberRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        community_config: CommunityConfig,
        snowflake_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            community_repo,
            member_repo,
            category_repo,
            community_config,
            snowflake_generator,
        }
    }

    // === Repositories ===

    /// Get the community repository
    pub fn community_repo(&self) -> &dyn CommunityRepository {
        self.community_repo.as_ref()
    }

    /// Get the member repository
    pub fn member_repo(&self) -> &dyn MemberRepository {
        self.member_repo.as_ref()
    }

    /// Get the category repository
    pub fn category_repo(&self) -> &dyn CategoryRepository {
        self.category_repo.as_ref()
    }

    // === Configuration ===

    /// Get the community policy configuration
    pub fn community_config(&self) -> &CommunityConfig {
        &self.community_config
    }

    // === Services ===

    /// Get the snowflake ID generator
    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> community_core::Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("community_config", &self.community_config)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    community_repo: Option<Arc<dyn CommunityRepository>>,
    member_repo: Option<Arc<dyn MemberRepository>>,
    category_repo: Option<Arc<dyn CategoryRepository>>,
    community_config: Option<CommunityConfig>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            community_repo: None,
            member_repo: None,
            category_repo: None,
            community_config: None,
            snowflake_generator: None,
        }
    }

    pub fn community_repo(mut self, repo: Arc<dyn CommunityRepository>) -> Self {
        self.community_repo = Some(repo);
        self
    }

    pub fn member_repo(mut self, repo: Arc<dyn MemberRepository>) -> Self {
        self.member_repo = Some(repo);
        self
    }

    pub fn category_repo(mut self, repo: Arc<dyn CategoryRepository>) -> Self {
        self.category_repo = Some(repo);
        self
    }

    pub fn community_config(mut self, config: CommunityConfig) -> Self {
        self.community_config = Some(config);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if a required repository is missing.
    /// The configuration and generator fall back to defaults.
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.community_repo.ok_or_else(|| {
                super::error::ServiceError::validation("community_repo is required")
            })?,
            self.member_repo
                .ok_or_else(|| super::error::ServiceError::validation("member_repo is required"))?,
            self.category_repo.ok_or_else(|| {
                super::error::ServiceError::validation("category_repo is required")
            })?,
            self.community_config.unwrap_or_default(),
            self.snowflake_generator
                .unwrap_or_else(|| Arc::new(SnowflakeGenerator::new(0))),
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
