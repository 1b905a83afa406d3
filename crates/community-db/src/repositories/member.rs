//! PostgreSQL implementation of MemberRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use community_core::entities::CommunityMember;
use community_core::error::DomainError;
use community_core::traits::{MemberRepository, RepoResult};
use community_core::value_objects::{CommunityRole, Snowflake};

use crate::mappers::member_from_model;
use crate::models::CommunityMemberModel;

use super::error::{map_db_error, map_unique_violation, member_not_found};

const MEMBER_COLUMNS: &str =
    "community_id, user_id, role, is_approved, is_banned, banned_at, joined_at, updated_at";

/// PostgreSQL implementation of MemberRepository
#[derive(Clone)]
pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    /// Create a new PgMemberRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    #[instrument(skip(self))]
    async fn find(
        &self,
        community_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<CommunityMember>> {
        let query = format!(
            "SELECT {MEMBER_COLUMNS} FROM community_members WHERE community_id = $1 AND user_id = $2"
        );

        let result = sqlx::query_as::<_, CommunityMemberModel>(&query)
            .bind(community_id.into_inner())
            .bind(user_id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(member_from_model).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_community(
        &self,
        community_id: Snowflake,
        pending_only: bool,
        limit: i64,
        after: Option<Snowflake>,
    ) -> RepoResult<Vec<CommunityMember>> {
        let query = format!(
            "SELECT {MEMBER_COLUMNS} FROM community_members \
             WHERE community_id = $1 \
             AND ($2::BIGINT IS NULL OR user_id > $2) \
             {} \
             ORDER BY user_id ASC \
             LIMIT $3",
            if pending_only {
                "AND is_approved = FALSE AND is_banned = FALSE"
            } else {
                ""
            }
        );

        let rows = sqlx::query_as::<_, CommunityMemberModel>(&query)
            .bind(community_id.into_inner())
            .bind(after.map(Snowflake::into_inner))
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        rows.into_iter().map(member_from_model).collect()
    }

    #[instrument(skip(self, member))]
    async fn insert(&self, member: &CommunityMember) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let insert = sqlx::query(
            r"
            INSERT INTO community_members (community_id, user_id, role, is_approved, is_banned,
                banned_at, joined_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(member.community_id.into_inner())
        .bind(member.user_id.into_inner())
        .bind(member.role.as_str())
        .bind(member.is_approved)
        .bind(member.is_banned)
        .bind(member.banned_at)
        .bind(member.joined_at)
        .bind(member.updated_at)
        .execute(&mut *tx)
        .await;

        if let Err(e) = insert {
            tx.rollback().await.ok();
            return Err(map_unique_violation(e, || DomainError::AlreadyMember));
        }

        // An immediately-approved join counts toward the community total
        if member.is_counted() {
            let bump = sqlx::query(
                r"
                UPDATE communities
                SET member_count = member_count + 1, updated_at = NOW()
                WHERE id = $1
                ",
            )
            .bind(member.community_id.into_inner())
            .execute(&mut *tx)
            .await;

            if let Err(e) = bump {
                tx.rollback().await.ok();
                return Err(map_db_error(e));
            }
        }

        tx.commit().await.map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn approve(&self, community_id: Snowflake, user_id: Snowflake) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let updated = sqlx::query(
            r"
            UPDATE community_members
            SET is_approved = TRUE, updated_at = NOW()
            WHERE community_id = $1 AND user_id = $2 AND is_approved = FALSE
            ",
        )
        .bind(community_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&mut *tx)
        .await;

        match updated {
            Err(e) => {
                tx.rollback().await.ok();
                return Err(map_db_error(e));
            }
            Ok(result) if result.rows_affected() == 0 => {
                tx.rollback().await.ok();
                return Err(member_not_found());
            }
            Ok(_) => {}
        }

        let bump = sqlx::query(
            r"
            UPDATE communities
            SET member_count = member_count + 1, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(community_id.into_inner())
        .execute(&mut *tx)
        .await;

        if let Err(e) = bump {
            tx.rollback().await.ok();
            return Err(map_db_error(e));
        }

        tx.commit().await.map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn set_banned(
        &self,
        community_id: Snowflake,
        user_id: Snowflake,
        banned: bool,
        adjust_count: bool,
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let updated = sqlx::query(
            r"
            UPDATE community_members
            SET is_banned = $3,
                banned_at = CASE WHEN $3 THEN NOW() ELSE NULL END,
                updated_at = NOW()
            WHERE community_id = $1 AND user_id = $2
            ",
        )
        .bind(community_id.into_inner())
        .bind(user_id.into_inner())
        .bind(banned)
        .execute(&mut *tx)
        .await;

        match updated {
            Err(e) => {
                tx.rollback().await.ok();
                return Err(map_db_error(e));
            }
            Ok(result) if result.rows_affected() == 0 => {
                tx.rollback().await.ok();
                return Err(member_not_found());
            }
            Ok(_) => {}
        }

        if adjust_count {
            // Bans release a counted slot, unbans reclaim one; never below zero
            let adjust = if banned {
                "UPDATE communities \
                 SET member_count = GREATEST(member_count - 1, 0), updated_at = NOW() \
                 WHERE id = $1"
            } else {
                "UPDATE communities \
                 SET member_count = member_count + 1, updated_at = NOW() \
                 WHERE id = $1"
            };

            let bump = sqlx::query(adjust)
                .bind(community_id.into_inner())
                .execute(&mut *tx)
                .await;

            if let Err(e) = bump {
                tx.rollback().await.ok();
                return Err(map_db_error(e));
            }
        }

        tx.commit().await.map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn update_role(
        &self,
        community_id: Snowflake,
        user_id: Snowflake,
        role: CommunityRole,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE community_members
            SET role = $3, updated_at = NOW()
            WHERE community_id = $1 AND user_id = $2
            ",
        )
        .bind(community_id.into_inner())
        .bind(user_id.into_inner())
        .bind(role.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(member_not_found());
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove(
        &self,
        community_id: Snowflake,
        user_id: Snowflake,
        was_counted: bool,
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let deleted = sqlx::query(
            r"
            DELETE FROM community_members WHERE community_id = $1 AND user_id = $2
            ",
        )
        .bind(community_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&mut *tx)
        .await;

        match deleted {
            Err(e) => {
                tx.rollback().await.ok();
                return Err(map_db_error(e));
            }
            Ok(result) if result.rows_affected() == 0 => {
                tx.rollback().await.ok();
                return Err(member_not_found());
            }
            Ok(_) => {}
        }

        if was_counted {
            let bump = sqlx::query(
                r"
                UPDATE communities
                SET member_count = GREATEST(member_count - 1, 0), updated_at = NOW()
                WHERE id = $1
                ",
            )
            .bind(community_id.into_inner())
            .execute(&mut *tx)
            .await;

            if let Err(e) = bump {
                tx.rollback().await.ok();
                return Err(map_db_error(e));
            }
        }

        tx.commit().await.map_err(map_db_error)
    }
}
