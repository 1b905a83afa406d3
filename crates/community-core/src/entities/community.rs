//! Community entity - a named, ownable group with privacy and approval settings

use chrono::{DateTime, Duration, Utc};

use crate::value_objects::{Slug, Snowflake};

/// Community entity
///
/// `member_count` is a derived counter: it always equals the number of
/// membership rows with `is_approved = true` and `is_banned = false`, and it
/// never goes negative. Every membership transition that changes the
/// approved/banned status adjusts it in the same store transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Community {
    pub id: Snowflake,
    pub name: String,
    pub slug: Slug,
    pub category_id: Snowflake,
    /// Immutable after creation
    pub creator_id: Snowflake,
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

impl Community {
    /// Create a new Community
    ///
    /// Starts active and non-deleted with `member_count = 1` (the creator)
    /// and `post_count = 0`.
    #[allow(clippy::fn_params_excessive_bools)]
    pub fn new(
        id: Snowflake,
        name: String,
        slug: Slug,
        category_id: Snowflake,
        creator_id: Snowflake,
        is_private: bool,
        require_approval: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            slug,
            category_id,
            creator_id,
            member_count: 1,
            post_count: 0,
            is_private,
            require_approval,
            is_active: true,
            is_deleted: false,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if a user is the community creator
    #[inline]
    pub fn is_creator(&self, user_id: Snowflake) -> bool {
        self.creator_id == user_id
    }

    /// Increment the member counter
    pub fn increment_members(&mut self) {
        self.member_count += 1;
    }

    /// Decrement the member counter, floored at zero
    pub fn decrement_members(&mut self) {
        self.member_count = (self.member_count - 1).max(0);
    }

    /// Mark as soft-deleted: deleted, timestamped, and deactivated
    pub fn soft_delete(&mut self, at: DateTime<Utc>) {
        self.is_deleted = true;
        self.deleted_at = Some(at);
        self.is_active = false;
        self.updated_at = at;
    }

    /// Undo a soft delete and reactivate
    pub fn restore(&mut self) {
        self.is_deleted = false;
        self.deleted_at = None;
        self.is_active = true;
        self.updated_at = Utc::now();
    }

    /// Latest instant at which this community can still be restored
    ///
    /// `None` when the community is not soft-deleted.
    pub fn restore_deadline(&self, retention_days: i64) -> Option<DateTime<Utc>> {
        self.deleted_at.map(|at| at + Duration::days(retention_days))
    }

    /// Check if restoring is still possible at `now` (deadline inclusive)
    pub fn can_restore_at(&self, now: DateTime<Utc>, retention_days: i64) -> bool {
        match self.restore_deadline(retention_days) {
            Some(deadline) => now <= deadline,
            None => false,
        }
    }
}
