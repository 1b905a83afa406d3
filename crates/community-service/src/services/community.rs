//! Community service
//!
//! Handles community creation, settings, soft delete, restore, and
//! activation.

use chrono::Utc;
use community_core::entities::{Community, CommunityMember};
use community_core::{DomainError, Snowflake};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{
    ActiveStatusResponse, CommunityResponse, CreateCommunityRequest, DeleteCommunityRequest,
    DeleteCommunityResponse, UpdateCommunityRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::slug::SlugService;

/// Community service
pub struct CommunityService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommunityService<'a> {
    /// Create a new CommunityService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a new community
    ///
    /// The creator becomes the first member (Admin, approved) and counts
    /// toward the member counter from the start.
    #[instrument(skip(self, request))]
    pub async fn create_community(
        &self,
        creator_id: Snowflake,
        request: CreateCommunityRequest,
    ) -> ServiceResult<CommunityResponse> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let name = request.name.trim().to_string();
        self.check_name_bounds(&name)?;

        let config = self.ctx.community_config();
        let owned = self
            .ctx
            .community_repo()
            .count_by_creator(creator_id)
            .await?;
        if owned >= i64::from(config.max_communities_per_user) {
            return Err(DomainError::QuotaExceeded {
                max: config.max_communities_per_user,
            }
            .into());
        }

        if !self.ctx.category_repo().exists(request.category_id).await? {
            return Err(DomainError::CategoryNotFound(request.category_id).into());
        }

        let slug = SlugService::new(self.ctx).generate(&name, None).await?;

        let community_id = self.ctx.generate_id();
        let community = Community::new(
            community_id,
            name,
            slug,
            request.category_id,
            creator_id,
            request.is_private,
            request.require_approval,
        );
        let creator = CommunityMember::creator(community_id, creator_id);

        self.ctx
            .community_repo()
            .create_with_creator(&community, &creator)
            .await?;

        info!(
            community_id = %community_id,
            creator_id = %creator_id,
            slug = %community.slug,
            "Community created"
        );

        Ok(CommunityResponse::from(&community))
    }

    /// Get a community by ID (soft-deleted communities are invisible)
    #[instrument(skip(self))]
    pub async fn get_community(&self, community_id: Snowflake) -> ServiceResult<CommunityResponse> {
        let community = self.load(community_id).await?;
        Ok(CommunityResponse::from(&community))
    }

    /// Update community settings
    ///
    /// Permitted for the creator and for unbanned moderators/admins. A name
    /// change regenerates the slug, skipping the community's own slug during
    /// collision probes.
    #[instrument(skip(self, request))]
    pub async fn update_community(
        &self,
        community_id: Snowflake,
        actor_id: Snowflake,
        request: UpdateCommunityRequest,
    ) -> ServiceResult<CommunityResponse> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let mut community = self.load(community_id).await?;
        self.require_manager(&community, actor_id).await?;

        if let Some(name) = request.name {
            let name = name.trim().to_string();
            self.check_name_bounds(&name)?;

            if name != community.name {
                community.slug = SlugService::new(self.ctx)
                    .generate(&name, Some(community_id))
                    .await?;
                community.name = name;
            }
        }

        if let Some(category_id) = request.category_id {
            if !self.ctx.category_repo().exists(category_id).await? {
                return Err(DomainError::CategoryNotFound(category_id).into());
            }
            community.category_id = category_id;
        }

        if let Some(is_private) = request.is_private {
            community.is_private = is_private;
        }

        if let Some(require_approval) = request.require_approval {
            community.require_approval = require_approval;
        }

        community.updated_at = Utc::now();
        self.ctx.community_repo().update(&community).await?;

        info!(community_id = %community_id, actor_id = %actor_id, "Community updated");

        Ok(CommunityResponse::from(&community))
    }

    /// Delete a community
    ///
    /// Default is a soft delete that opens a restore window. With
    /// `permanent` set, the community and its memberships are erased
    /// outright, including an already soft-deleted community. Creator only.
    #[instrument(skip(self, request))]
    pub async fn delete_community(
        &self,
        community_id: Snowflake,
        actor_id: Snowflake,
        request: DeleteCommunityRequest,
    ) -> ServiceResult<DeleteCommunityResponse> {
        let community = self
            .ctx
            .community_repo()
            .find_by_id(community_id, true)
            .await?
            .ok_or(DomainError::CommunityNotFound(community_id))?;

        if !community.is_creator(actor_id) {
            return Err(DomainError::CreatorOnly.into());
        }

        if request.permanent {
            self.ctx.community_repo().hard_delete(community_id).await?;

            warn!(community_id = %community_id, actor_id = %actor_id, "Community erased permanently");

            return Ok(DeleteCommunityResponse {
                id: community_id.to_string(),
                soft_deleted: false,
                can_restore_until: None,
            });
        }

        if community.is_deleted {
            return Err(DomainError::CommunityDeleted.into());
        }

        let now = Utc::now();
        self.ctx
            .community_repo()
            .soft_delete(community_id, now)
            .await?;

        let retention_days = self.ctx.community_config().retention_days;
        let mut deleted = community;
        deleted.soft_delete(now);

        info!(community_id = %community_id, actor_id = %actor_id, "Community soft-deleted");

        Ok(DeleteCommunityResponse {
            id: community_id.to_string(),
            soft_deleted: true,
            can_restore_until: deleted.restore_deadline(retention_days),
        })
    }

    /// Restore a soft-deleted community
    ///
    /// Accepted up to and including the retention deadline. Creator only.
    #[instrument(skip(self))]
    pub async fn restore_community(
        &self,
        community_id: Snowflake,
        actor_id: Snowflake,
    ) -> ServiceResult<CommunityResponse> {
        let mut community = self
            .ctx
            .community_repo()
            .find_by_id(community_id, true)
            .await?
            .ok_or(DomainError::CommunityNotFound(community_id))?;

        if !community.is_creator(actor_id) {
            return Err(DomainError::CreatorOnly.into());
        }

        if !community.is_deleted {
            return Err(DomainError::NotDeleted.into());
        }

        let retention_days = self.ctx.community_config().retention_days;
        if !community.can_restore_at(Utc::now(), retention_days) {
            return Err(DomainError::RestoreWindowExpired.into());
        }

        self.ctx.community_repo().restore(community_id).await?;
        community.restore();

        info!(community_id = %community_id, actor_id = %actor_id, "Community restored");

        Ok(CommunityResponse::from(&community))
    }

    /// Activate or deactivate a community
    ///
    /// Deactivated communities reject new joins but keep existing members.
    /// Soft-deleted communities cannot be toggled.
    #[instrument(skip(self))]
    pub async fn set_active(
        &self,
        community_id: Snowflake,
        actor_id: Snowflake,
        is_active: bool,
    ) -> ServiceResult<ActiveStatusResponse> {
        let community = self
            .ctx
            .community_repo()
            .find_by_id(community_id, true)
            .await?
            .ok_or(DomainError::CommunityNotFound(community_id))?;

        if community.is_deleted {
            return Err(DomainError::CommunityDeleted.into());
        }

        self.require_manager(&community, actor_id).await?;

        if community.is_active != is_active {
            self.ctx
                .community_repo()
                .set_active(community_id, is_active)
                .await?;

            info!(community_id = %community_id, is_active, "Community active status changed");
        }

        Ok(ActiveStatusResponse {
            id: community_id.to_string(),
            is_active,
        })
    }

    // === Helpers ===

    /// Load a non-deleted community or fail with not-found
    async fn load(&self, community_id: Snowflake) -> ServiceResult<Community> {
        self.ctx
            .community_repo()
            .find_by_id(community_id, false)
            .await?
            .ok_or_else(|| DomainError::CommunityNotFound(community_id).into())
    }

    /// Require the actor to be the creator or an unbanned moderator/admin
    async fn require_manager(
        &self,
        community: &Community,
        actor_id: Snowflake,
    ) -> ServiceResult<()> {
        if community.is_creator(actor_id) {
            return Ok(());
        }

        let member = self
            .ctx
            .member_repo()
            .find(community.id, actor_id)
            .await?
            .ok_or(DomainError::ModeratorRequired)?;

        if member.is_banned {
            return Err(DomainError::ActorBanned.into());
        }
        if !member.is_approved || !member.role.is_moderator() {
            return Err(DomainError::ModeratorRequired.into());
        }

        Ok(())
    }

    fn check_name_bounds(&self, name: &str) -> ServiceResult<()> {
        let config = self.ctx.community_config();
        let len = name.chars().count();

        if len < config.name_min_length || len > config.name_max_length {
            return Err(DomainError::NameLength {
                min: config.name_min_length,
                max: config.name_max_length,
            }
            .into());
        }

        Ok(())
    }
}
