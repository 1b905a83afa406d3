//! CommunityMember entity - a user's membership in a community

use chrono::{DateTime, Utc};

use crate::value_objects::{CommunityRole, Snowflake};

/// Community member entity (junction between user and community)
///
/// Identity is the `(community_id, user_id)` pair. The creator's row always
/// has role Admin, `is_approved = true`, `is_banned = false`, and is immune
/// to every membership operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommunityMember {
    pub community_id: Snowflake,
    pub user_id: Snowflake,
    pub role: CommunityRole,
    pub is_approved: bool,
    pub is_banned: bool,
    pub banned_at: Option<DateTime<Utc>>,
    pub joined_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CommunityMember {
    /// Create a joining member (role Member)
    ///
    /// `approved` is true when the community does not require approval.
    pub fn join(community_id: Snowflake, user_id: Snowflake, approved: bool) -> Self {
        let now = Utc::now();
        Self {
            community_id,
            user_id,
            role: CommunityRole::Member,
            is_approved: approved,
            is_banned: false,
            banned_at: None,
            joined_at: now,
            updated_at: now,
        }
    }

    /// Create the creator's membership row (Admin, approved)
    pub fn creator(community_id: Snowflake, user_id: Snowflake) -> Self {
        let now = Utc::now();
        Self {
            community_id,
            user_id,
            role: CommunityRole::Admin,
            is_approved: true,
            is_banned: false,
            banned_at: None,
            joined_at: now,
            updated_at: now,
        }
    }

    /// Check if this member counts toward the community's member counter
    #[inline]
    pub fn is_counted(&self) -> bool {
        self.is_approved && !self.is_banned
    }

    /// Mark the pending membership as approved
    pub fn approve(&mut self) {
        self.is_approved = true;
        self.updated_at = Utc::now();
    }

    /// Set the ban state, keeping `banned_at` bookkeeping in sync
    pub fn set_banned(&mut self, banned: bool) {
        let now = Utc::now();
        self.is_banned = banned;
        self.banned_at = banned.then_some(now);
        self.updated_at = now;
    }

    /// Assign a new role (approval and ban state untouched)
    pub fn set_role(&mut self, role: CommunityRole) {
        self.role = role;
        self.updated_at = Utc::now();
    }
}
