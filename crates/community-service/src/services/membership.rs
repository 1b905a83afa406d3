//! Membership service
//!
//! Handles joining and leaving communities plus the moderation state
//! machine: approve, reject, ban, unban, remove, and role assignment.
//!
//! Every counter-touching transition goes through a composite repository
//! operation, so the membership row and the community's member counter move
//! in the same store transaction.

use community_core::entities::{Community, CommunityMember};
use community_core::policy::{
    authorize_member_action, ActorStanding, MemberAction, TargetStanding,
};
use community_core::{CommunityRole, DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{JoinResponse, ListMembersRequest, MemberResponse, PaginatedResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

const DEFAULT_PAGE_SIZE: i64 = 50;
const MAX_PAGE_SIZE: i64 = 100;

/// Membership service
pub struct MembershipService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MembershipService<'a> {
    /// Create a new MembershipService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Join a community
    ///
    /// Joins an approval-gated community as pending; otherwise the member is
    /// approved (and counted) immediately. Rejoining reports the current
    /// state: banned, already a member, or still pending.
    #[instrument(skip(self))]
    pub async fn join(
        &self,
        community_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<JoinResponse> {
        let community = self.load_community(community_id).await?;

        if !community.is_active {
            return Err(DomainError::CommunityInactive.into());
        }

        if let Some(existing) = self.ctx.member_repo().find(community_id, user_id).await? {
            return Err(if existing.is_banned {
                DomainError::AlreadyBanned.into()
            } else if existing.is_approved {
                DomainError::AlreadyMember.into()
            } else {
                DomainError::AlreadyPending.into()
            });
        }

        let approved = !community.require_approval;
        let member = CommunityMember::join(community_id, user_id, approved);

        // A concurrent duplicate join loses on the primary key and surfaces
        // as AlreadyMember here
        self.ctx.member_repo().insert(&member).await?;

        info!(
            community_id = %community_id,
            user_id = %user_id,
            approved,
            "User joined community"
        );

        Ok(JoinResponse {
            member: MemberResponse::from(&member),
            requires_approval: !approved,
        })
    }

    /// Leave a community
    ///
    /// Only approved and pending members can leave. The creator cannot
    /// leave; deleting the community is the way out. Banned members cannot
    /// leave either: dropping the row would let them rejoin as fresh
    /// members, so the ban record stays until a moderator lifts it.
    #[instrument(skip(self))]
    pub async fn leave(&self, community_id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        let community = self.load_community(community_id).await?;

        if community.is_creator(user_id) {
            return Err(DomainError::CreatorCannotLeave.into());
        }

        let member = self.load_member(community_id, user_id).await?;

        if member.is_banned {
            return Err(DomainError::AlreadyBanned.into());
        }

        self.ctx
            .member_repo()
            .remove(community_id, user_id, member.is_counted())
            .await?;

        info!(community_id = %community_id, user_id = %user_id, "User left community");

        Ok(())
    }

    /// Approve a pending member
    #[instrument(skip(self))]
    pub async fn approve_member(
        &self,
        community_id: Snowflake,
        actor_id: Snowflake,
        target_user_id: Snowflake,
    ) -> ServiceResult<MemberResponse> {
        let community = self.load_community(community_id).await?;
        let mut target = self
            .authorize(&community, actor_id, target_user_id, MemberAction::Approve)
            .await?;

        if target.is_banned {
            return Err(DomainError::AlreadyBanned.into());
        }
        if target.is_approved {
            return Err(DomainError::AlreadyApproved.into());
        }

        self.ctx
            .member_repo()
            .approve(community_id, target_user_id)
            .await?;
        target.approve();

        info!(
            community_id = %community_id,
            actor_id = %actor_id,
            target_user_id = %target_user_id,
            "Member approved"
        );

        Ok(MemberResponse::from(&target))
    }

    /// Reject a pending member, removing the membership row
    #[instrument(skip(self))]
    pub async fn reject_member(
        &self,
        community_id: Snowflake,
        actor_id: Snowflake,
        target_user_id: Snowflake,
    ) -> ServiceResult<()> {
        let community = self.load_community(community_id).await?;
        let target = self
            .authorize(&community, actor_id, target_user_id, MemberAction::Reject)
            .await?;

        if target.is_approved {
            return Err(DomainError::CannotRejectApproved.into());
        }

        // Pending rows were never counted
        self.ctx
            .member_repo()
            .remove(community_id, target_user_id, false)
            .await?;

        info!(
            community_id = %community_id,
            actor_id = %actor_id,
            target_user_id = %target_user_id,
            "Pending member rejected"
        );

        Ok(())
    }

    /// Ban a member
    ///
    /// The membership row stays, so a later join attempt reports the ban
    /// instead of re-admitting the user.
    #[instrument(skip(self))]
    pub async fn ban_member(
        &self,
        community_id: Snowflake,
        actor_id: Snowflake,
        target_user_id: Snowflake,
    ) -> ServiceResult<MemberResponse> {
        let community = self.load_community(community_id).await?;
        let mut target = self
            .authorize(&community, actor_id, target_user_id, MemberAction::Ban)
            .await?;

        if target.is_banned {
            return Err(DomainError::AlreadyBanned.into());
        }

        self.ctx
            .member_repo()
            .set_banned(community_id, target_user_id, true, target.is_counted())
            .await?;
        target.set_banned(true);

        info!(
            community_id = %community_id,
            actor_id = %actor_id,
            target_user_id = %target_user_id,
            "Member banned"
        );

        Ok(MemberResponse::from(&target))
    }

    /// Lift a member's ban
    #[instrument(skip(self))]
    pub async fn unban_member(
        &self,
        community_id: Snowflake,
        actor_id: Snowflake,
        target_user_id: Snowflake,
    ) -> ServiceResult<MemberResponse> {
        let community = self.load_community(community_id).await?;
        let mut target = self
            .authorize(&community, actor_id, target_user_id, MemberAction::Unban)
            .await?;

        if !target.is_banned {
            return Err(DomainError::NotBanned.into());
        }

        // After the unban the member counts again iff already approved
        self.ctx
            .member_repo()
            .set_banned(community_id, target_user_id, false, target.is_approved)
            .await?;
        target.set_banned(false);

        info!(
            community_id = %community_id,
            actor_id = %actor_id,
            target_user_id = %target_user_id,
            "Member unbanned"
        );

        Ok(MemberResponse::from(&target))
    }

    /// Remove a member from the community
    #[instrument(skip(self))]
    pub async fn remove_member(
        &self,
        community_id: Snowflake,
        actor_id: Snowflake,
        target_user_id: Snowflake,
    ) -> ServiceResult<()> {
        let community = self.load_community(community_id).await?;
        let target = self
            .authorize(&community, actor_id, target_user_id, MemberAction::Remove)
            .await?;

        self.ctx
            .member_repo()
            .remove(community_id, target_user_id, target.is_counted())
            .await?;

        info!(
            community_id = %community_id,
            actor_id = %actor_id,
            target_user_id = %target_user_id,
            "Member removed"
        );

        Ok(())
    }

    /// Assign a member's role (creator only)
    #[instrument(skip(self))]
    pub async fn change_role(
        &self,
        community_id: Snowflake,
        actor_id: Snowflake,
        target_user_id: Snowflake,
        role: CommunityRole,
    ) -> ServiceResult<MemberResponse> {
        let community = self.load_community(community_id).await?;
        let mut target = self
            .authorize(&community, actor_id, target_user_id, MemberAction::ChangeRole)
            .await?;

        if target.role != role {
            self.ctx
                .member_repo()
                .update_role(community_id, target_user_id, role)
                .await?;
            target.set_role(role);

            info!(
                community_id = %community_id,
                actor_id = %actor_id,
                target_user_id = %target_user_id,
                role = role.as_str(),
                "Member role changed"
            );
        }

        Ok(MemberResponse::from(&target))
    }

    /// List community members with cursor pagination
    ///
    /// The pending queue is visible to managers only. For private
    /// communities the full roster requires membership.
    #[instrument(skip(self, request))]
    pub async fn list_members(
        &self,
        community_id: Snowflake,
        actor_id: Snowflake,
        request: ListMembersRequest,
    ) -> ServiceResult<PaginatedResponse<MemberResponse>> {
        let community = self.load_community(community_id).await?;

        if request.pending_only {
            self.require_manager(&community, actor_id).await?;
        } else if community.is_private && !community.is_creator(actor_id) {
            let member = self.ctx.member_repo().find(community_id, actor_id).await?;
            let is_visible = member.is_some_and(|m| m.is_counted());
            if !is_visible {
                return Err(DomainError::CommunityNotFound(community_id).into());
            }
        }

        let limit = request
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);

        // Fetch one extra row to learn whether another page exists
        let mut members = self
            .ctx
            .member_repo()
            .find_by_community(community_id, request.pending_only, limit + 1, request.after)
            .await?;

        let has_more = members.len() as i64 > limit;
        if has_more {
            members.truncate(limit as usize);
        }

        let after = has_more
            .then(|| members.last().map(|m| m.user_id.to_string()))
            .flatten();
        let data = members.iter().map(MemberResponse::from).collect();

        Ok(PaginatedResponse::new(data, after, has_more, limit))
    }

    // === Helpers ===

    async fn load_community(&self, community_id: Snowflake) -> ServiceResult<Community> {
        self.ctx
            .community_repo()
            .find_by_id(community_id, false)
            .await?
            .ok_or_else(|| DomainError::CommunityNotFound(community_id).into())
    }

    async fn load_member(
        &self,
        community_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<CommunityMember> {
        self.ctx
            .member_repo()
            .find(community_id, user_id)
            .await?
            .ok_or_else(|| DomainError::MemberNotFound.into())
    }

    /// Load the actor's and target's standing and run the policy check
    ///
    /// Returns the target membership row for the caller to transition.
    async fn authorize(
        &self,
        community: &Community,
        actor_id: Snowflake,
        target_user_id: Snowflake,
        action: MemberAction,
    ) -> ServiceResult<CommunityMember> {
        let actor = self.actor_standing(community, actor_id).await?;
        let target = self.load_member(community.id, target_user_id).await?;

        let target_standing = TargetStanding {
            role: target.role,
            is_creator: community.is_creator(target_user_id),
        };

        authorize_member_action(Some(actor), target_standing, action)?;

        Ok(target)
    }

    async fn actor_standing(
        &self,
        community: &Community,
        actor_id: Snowflake,
    ) -> ServiceResult<ActorStanding> {
        if community.is_creator(actor_id) {
            return Ok(ActorStanding::creator());
        }

        let member = self
            .ctx
            .member_repo()
            .find(community.id, actor_id)
            .await?
            .ok_or(DomainError::ModeratorRequired)?;

        if !member.is_approved {
            return Err(DomainError::ModeratorRequired.into());
        }

        Ok(ActorStanding {
            role: member.role,
            is_banned: member.is_banned,
            is_creator: false,
        })
    }

    async fn require_manager(
        &self,
        community: &Community,
        actor_id: Snowflake,
    ) -> ServiceResult<()> {
        let standing = self.actor_standing(community, actor_id).await?;

        if standing.is_banned {
            return Err(DomainError::ActorBanned.into());
        }
        if !standing.is_creator && !standing.role.is_moderator() {
            return Err(DomainError::ModeratorRequired.into());
        }

        Ok(())
    }
}
