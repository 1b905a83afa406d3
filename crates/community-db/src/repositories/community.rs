//! PostgreSQL implementation of CommunityRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use community_core::entities::{Community, CommunityMember};
use community_core::traits::{CommunityRepository, RepoResult};
use community_core::value_objects::Snowflake;

use crate::models::CommunityModel;

use super::error::{community_not_found, map_db_error, map_unique_violation};

const COMMUNITY_COLUMNS: &str = "id, name, slug, category_id, creator_id, member_count, \
     post_count, is_private, require_approval, is_active, is_deleted, deleted_at, \
     created_at, updated_at";

/// PostgreSQL implementation of CommunityRepository
#[derive(Clone)]
pub struct PgCommunityRepository {
    pool: PgPool,
}

impl PgCommunityRepository {
    /// Create a new PgCommunityRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommunityRepository for PgCommunityRepository {
    #[instrument(skip(self))]
    async fn find_by_id(
        &self,
        id: Snowflake,
        include_deleted: bool,
    ) -> RepoResult<Option<Community>> {
        let query = format!(
            "SELECT {COMMUNITY_COLUMNS} FROM communities WHERE id = $1{}",
            if include_deleted { "" } else { " AND is_deleted = FALSE" }
        );

        let result = sqlx::query_as::<_, CommunityModel>(&query)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Community::from))
    }

    #[instrument(skip(self))]
    async fn slug_exists(&self, slug: &str, exclude_id: Option<Snowflake>) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM communities
                WHERE slug = $1 AND is_deleted = FALSE AND ($2::BIGINT IS NULL OR id <> $2)
            )
            ",
        )
        .bind(slug)
        .bind(exclude_id.map(Snowflake::into_inner))
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn count_by_creator(&self, creator_id: Snowflake) -> RepoResult<i64> {
        let result = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM communities WHERE creator_id = $1 AND is_deleted = FALSE
            ",
        )
        .bind(creator_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self, community, creator))]
    async fn create_with_creator(
        &self,
        community: &Community,
        creator: &CommunityMember,
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let insert_community = sqlx::query(
            r"
            INSERT INTO communities (id, name, slug, category_id, creator_id, member_count,
                post_count, is_private, require_approval, is_active, is_deleted, deleted_at,
                created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            ",
        )
        .bind(community.id.into_inner())
        .bind(&community.name)
        .bind(community.slug.as_str())
        .bind(community.category_id.into_inner())
        .bind(community.creator_id.into_inner())
        .bind(community.member_count)
        .bind(community.post_count)
        .bind(community.is_private)
        .bind(community.require_approval)
        .bind(community.is_active)
        .bind(community.is_deleted)
        .bind(community.deleted_at)
        .bind(community.created_at)
        .bind(community.updated_at)
        .execute(&mut *tx)
        .await;

        if let Err(e) = insert_community {
            tx.rollback().await.ok();
            return Err(map_unique_violation(e, || {
                community_core::DomainError::SlugExhausted
            }));
        }

        let insert_creator = sqlx::query(
            r"
            INSERT INTO community_members (community_id, user_id, role, is_approved, is_banned,
                banned_at, joined_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(creator.community_id.into_inner())
        .bind(creator.user_id.into_inner())
        .bind(creator.role.as_str())
        .bind(creator.is_approved)
        .bind(creator.is_banned)
        .bind(creator.banned_at)
        .bind(creator.joined_at)
        .bind(creator.updated_at)
        .execute(&mut *tx)
        .await;

        if let Err(e) = insert_creator {
            tx.rollback().await.ok();
            return Err(map_db_error(e));
        }

        tx.commit().await.map_err(map_db_error)
    }

    #[instrument(skip(self, community))]
    async fn update(&self, community: &Community) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE communities
            SET name = $2, slug = $3, category_id = $4, is_private = $5,
                require_approval = $6, is_active = $7, updated_at = $8
            WHERE id = $1 AND is_deleted = FALSE
            ",
        )
        .bind(community.id.into_inner())
        .bind(&community.name)
        .bind(community.slug.as_str())
        .bind(community.category_id.into_inner())
        .bind(community.is_private)
        .bind(community.require_approval)
        .bind(community.is_active)
        .bind(community.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(community_not_found(community.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn soft_delete(&self, id: Snowflake, deleted_at: DateTime<Utc>) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE communities
            SET is_deleted = TRUE, deleted_at = $2, is_active = FALSE, updated_at = $2
            WHERE id = $1 AND is_deleted = FALSE
            ",
        )
        .bind(id.into_inner())
        .bind(deleted_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(community_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn restore(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE communities
            SET is_deleted = FALSE, deleted_at = NULL, is_active = TRUE, updated_at = NOW()
            WHERE id = $1 AND is_deleted = TRUE
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(community_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn hard_delete(&self, id: Snowflake) -> RepoResult<()> {
        // Membership rows cascade via the FK constraint
        let result = sqlx::query(
            r"
            DELETE FROM communities WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(community_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_active(&self, id: Snowflake, is_active: bool) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE communities
            SET is_active = $2, updated_at = NOW()
            WHERE id = $1 AND is_deleted = FALSE
            ",
        )
        .bind(id.into_inner())
        .bind(is_active)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(community_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn member_count(&self, id: Snowflake) -> RepoResult<i64> {
        let result = sqlx::query_scalar::<_, i64>(
            r"
            SELECT member_count FROM communities WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.ok_or_else(|| community_not_found(id))
    }
}
