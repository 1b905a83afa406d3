//! Authorization policy - pure decision logic for membership operations
//!
//! Stateless: callers load the actor's and target's standing from the store
//! and ask for a verdict. Rules are applied in a fixed precedence:
//!
//! 1. Anonymous actors are rejected for every mutating action.
//! 2. The creator's row is immune to role change, ban, and removal.
//! 3. Role change is permitted only to the creator.
//! 4. Approve/reject/ban/remove require an unbanned Moderator or Admin.
//! 5. A Moderator may not act on a target ranked Moderator or above;
//!    only an Admin (or the creator) may.

use crate::error::DomainError;
use crate::value_objects::CommunityRole;

/// Moderation action requested against a target member
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberAction {
    Approve,
    Reject,
    Ban,
    Unban,
    Remove,
    ChangeRole,
}

impl MemberAction {
    /// Actions from which the creator's row is unconditionally shielded
    const fn touches_creator_protections(self) -> bool {
        matches!(self, Self::Ban | Self::Unban | Self::Remove | Self::ChangeRole)
    }
}

/// Snapshot of the acting user's standing within the community
#[derive(Debug, Clone, Copy)]
pub struct ActorStanding {
    pub role: CommunityRole,
    pub is_banned: bool,
    pub is_creator: bool,
}

impl ActorStanding {
    /// Standing of the community creator (always an unbanned Admin)
    pub fn creator() -> Self {
        Self {
            role: CommunityRole::Admin,
            is_banned: false,
            is_creator: true,
        }
    }
}

/// Snapshot of the target member's standing
#[derive(Debug, Clone, Copy)]
pub struct TargetStanding {
    pub role: CommunityRole,
    pub is_creator: bool,
}

/// Decide whether `actor` may perform `action` on `target`
///
/// `actor` is `None` for unauthenticated callers. Returns the first rule
/// violation in precedence order, or `Ok(())` when the action is permitted.
pub fn authorize_member_action(
    actor: Option<ActorStanding>,
    target: TargetStanding,
    action: MemberAction,
) -> Result<(), DomainError> {
    // Rule 1: anonymous actors never mutate
    let actor = actor.ok_or(DomainError::NotAuthenticated)?;

    // Rule 2: the creator's row is untouchable
    if target.is_creator && action.touches_creator_protections() {
        return Err(DomainError::CreatorImmune);
    }

    // Rule 3: role assignment is a creator privilege
    if action == MemberAction::ChangeRole {
        if !actor.is_creator {
            return Err(DomainError::CreatorOnly);
        }
        return Ok(());
    }

    // Rule 4: moderation requires an unbanned Moderator/Admin (creator passes)
    if actor.is_banned {
        return Err(DomainError::ActorBanned);
    }
    if !actor.is_creator && !actor.role.is_moderator() {
        return Err(DomainError::ModeratorRequired);
    }

    // Rule 5: a Moderator may not act on peers or superiors
    if !actor.is_creator
        && actor.role == CommunityRole::Moderator
        && target.role.rank() >= CommunityRole::Moderator.rank()
    {
        return Err(DomainError::TargetOutranksActor);
    }

    Ok(())
}
