//! CommunityMember entity <-> model mapper

use community_core::entities::CommunityMember;
use community_core::error::DomainError;
use community_core::value_objects::{CommunityRole, Snowflake};

use crate::models::CommunityMemberModel;

/// Convert CommunityMemberModel to CommunityMember entity
///
/// Fails when the stored role string is not a known role; such a row is a
/// data corruption, not caller input.
pub fn member_from_model(model: CommunityMemberModel) -> Result<CommunityMember, DomainError> {
    let role: CommunityRole = model
        .role
        .parse()
        .map_err(|e| DomainError::InternalError(format!("corrupt member role: {e}")))?;

    Ok(CommunityMember {
        community_id: Snowflake::new(model.community_id),
        user_id: Snowflake::new(model.user_id),
        role,
        is_approved: model.is_approved,
        is_banned: model.is_banned,
        banned_at: model.banned_at,
        joined_at: model.joined_at,
        updated_at: model.updated_at,
    })
}
