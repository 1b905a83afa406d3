//! Community member database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the community_members table
///
/// `role` is stored as text (`member` / `moderator` / `admin`) and checked
/// at the mapper.
#[derive(Debug, Clone, FromRow)]
pub struct CommunityMemberModel {
    pub community_id: i64,
    pub user_id: i64,
    pub role: String,
    pub is_approved: bool,
    pub is_banned: bool,
    pub banned_at: Option<DateTime<Utc>>,
    pub joined_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
