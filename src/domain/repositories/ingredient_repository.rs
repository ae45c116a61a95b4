//! Repository trait for ingredients.

use crate::domain::entities::Ingredient;
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IngredientRepository: Send + Sync {
    /// Lists ingredients ordered by name.
    ///
    /// When `name_prefix` is given, only ingredients whose name starts with it
    /// (case-insensitive) are returned.
    async fn list(&self, name_prefix: Option<String>) -> Result<Vec<Ingredient>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Ingredient>, AppError>;

    /// Returns the subset of `ids` that exist.
    async fn existing_ids(&self, ids: &[i64]) -> Result<Vec<i64>, AppError>;
}
