//! PostgreSQL implementation of collection repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::RecipeCollection;
use crate::domain::repositories::CollectionRepository;
use crate::error::AppError;

/// PostgreSQL repository for shopping cart and favorites entries.
///
/// Each collection has its own table with a unique (user_id, recipe_id)
/// constraint; table names come from [`RecipeCollection::table`].
pub struct PgCollectionRepository {
    pool: Arc<PgPool>,
}

impl PgCollectionRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CollectionRepository for PgCollectionRepository {
    async fn add(
        &self,
        collection: RecipeCollection,
        user_id: i64,
        recipe_id: i64,
    ) -> Result<(), AppError> {
        let result = sqlx::query(&format!(
            "INSERT INTO {} (user_id, recipe_id) VALUES ($1, $2)",
            collection.table()
        ))
        .bind(user_id)
        .bind(recipe_id)
        .execute(self.pool.as_ref())
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if e.as_database_error().is_some_and(|db| db.is_unique_violation()) => {
                Err(AppError::already_exists(
                    format!("Recipe is already in {collection}"),
                    json!({ "recipe_id": recipe_id }),
                ))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn remove(
        &self,
        collection: RecipeCollection,
        user_id: i64,
        recipe_id: i64,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(&format!(
            "DELETE FROM {} WHERE user_id = $1 AND recipe_id = $2",
            collection.table()
        ))
        .bind(user_id)
        .bind(recipe_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn contains(
        &self,
        collection: RecipeCollection,
        user_id: i64,
        recipe_id: i64,
    ) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(&format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE user_id = $1 AND recipe_id = $2)",
            collection.table()
        ))
        .bind(user_id)
        .bind(recipe_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }
}
