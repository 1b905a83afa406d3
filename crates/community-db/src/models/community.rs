//! Community database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the communities table
#[derive(Debug, Clone, FromRow)]
pub struct CommunityModel {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub category_id: i64,
    pub creator_id: i64,
    pub member_count: i64,
    pub post_count: i64,
    pub is_private: bool,
    pub require_approval: bool,
    pub is_active: bool,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
