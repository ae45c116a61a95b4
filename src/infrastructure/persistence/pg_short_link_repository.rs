//! PostgreSQL implementation of short link repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::ShortLink;
use crate::domain::repositories::ShortLinkRepository;
use crate::error::{AppError, is_unique_violation_on};

const CODE_CONSTRAINT: &str = "recipe_short_links_code_key";

/// PostgreSQL repository for recipe short links.
///
/// `recipe_short_links_code_key` keeps codes globally unique and
/// `recipe_short_links_recipe_key` keeps one link per recipe, so concurrent
/// first requests for the same recipe converge on a single code.
pub struct PgShortLinkRepository {
    pool: Arc<PgPool>,
}

impl PgShortLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShortLinkRepository for PgShortLinkRepository {
    async fn find_by_recipe(&self, recipe_id: i64) -> Result<Option<ShortLink>, AppError> {
        let link = sqlx::query_as::<_, ShortLink>(
            "SELECT id, recipe_id, code, created_at FROM recipe_short_links WHERE recipe_id = $1",
        )
        .bind(recipe_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError> {
        let link = sqlx::query_as::<_, ShortLink>(
            "SELECT id, recipe_id, code, created_at FROM recipe_short_links WHERE code = $1",
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn create(&self, recipe_id: i64, code: &str) -> Result<Option<ShortLink>, AppError> {
        // On a recipe conflict the no-op update makes RETURNING yield the
        // existing row, whose code is left untouched.
        let result = sqlx::query_as::<_, ShortLink>(
            r#"
            INSERT INTO recipe_short_links (recipe_id, code)
            VALUES ($1, $2)
            ON CONFLICT ON CONSTRAINT recipe_short_links_recipe_key
            DO UPDATE SET recipe_id = EXCLUDED.recipe_id
            RETURNING id, recipe_id, code, created_at
            "#,
        )
        .bind(recipe_id)
        .bind(code)
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(link) => Ok(Some(link)),
            Err(e) if is_unique_violation_on(&e, CODE_CONSTRAINT) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
