//! Community entity <-> model mapper

use community_core::entities::Community;
use community_core::value_objects::{Slug, Snowflake};

use crate::models::CommunityModel;

/// Convert CommunityModel to Community entity
impl From<CommunityModel> for Community {
    fn from(model: CommunityModel) -> Self {
        Community {
            id: Snowflake::new(model.id),
            name: model.name,
            slug: Slug::from_stored(model.slug),
            category_id: Snowflake::new(model.category_id),
            creator_id: Snowflake::new(model.creator_id),
            member_count: model.member_count,
            post_count: model.post_count,
            is_private: model.is_private,
            require_approval: model.require_approval,
            is_active: model.is_active,
            is_deleted: model.is_deleted,
            deleted_at: model.deleted_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
