//! Slug service
//!
//! Derives a unique URL slug from a community name, probing the store for
//! collisions and suffixing until a free slug is found.

use community_core::{DomainError, Slug, Snowflake};
use tracing::{debug, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Highest numeric suffix tried before falling back to random suffixes
const MAX_NUMERIC_SUFFIX: u32 = 20;

/// Random suffix attempts before giving up
const MAX_RANDOM_ATTEMPTS: u32 = 5;

const RANDOM_SUFFIX_LEN: usize = 6;

/// Slug service
pub struct SlugService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SlugService<'a> {
    /// Create a new SlugService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Derive a unique slug for the given community name
    ///
    /// `exclude_id` ignores the named community during collision probes, so a
    /// rename that keeps the same slug does not collide with itself.
    #[instrument(skip(self))]
    pub async fn generate(
        &self,
        name: &str,
        exclude_id: Option<Snowflake>,
    ) -> ServiceResult<Slug> {
        let base = Slug::from_name(name).ok_or(DomainError::UnslugifiableName)?;

        if !self.exists(&base, exclude_id).await? {
            return Ok(base);
        }

        for n in 2..=MAX_NUMERIC_SUFFIX {
            let candidate = base.with_suffix(&n.to_string());
            if !self.exists(&candidate, exclude_id).await? {
                debug!(slug = %candidate, "slug collision resolved with numeric suffix");
                return Ok(candidate);
            }
        }

        for _ in 0..MAX_RANDOM_ATTEMPTS {
            let candidate = base.with_suffix(&random_suffix());
            if !self.exists(&candidate, exclude_id).await? {
                debug!(slug = %candidate, "slug collision resolved with random suffix");
                return Ok(candidate);
            }
        }

        Err(DomainError::SlugExhausted.into())
    }

    async fn exists(&self, slug: &Slug, exclude_id: Option<Snowflake>) -> ServiceResult<bool> {
        Ok(self
            .ctx
            .community_repo()
            .slug_exists(slug.as_str(), exclude_id)
            .await?)
    }
}

/// Generate a short lowercase alphanumeric suffix
///
/// Kept out of the async path so the thread-local RNG never crosses an await.
fn random_suffix() -> String {
    use rand::Rng;

    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

    let mut rng = rand::thread_rng();
    (0..RANDOM_SUFFIX_LEN)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}
