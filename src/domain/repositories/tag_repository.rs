//! Repository trait for tags.

use crate::domain::entities::Tag;
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Lists all tags ordered by name.
    async fn list(&self) -> Result<Vec<Tag>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Tag>, AppError>;

    /// Returns the subset of `ids` that exist.
    async fn existing_ids(&self, ids: &[i64]) -> Result<Vec<i64>, AppError>;

    /// Tags attached to a recipe, ordered by name.
    async fn list_for_recipe(&self, recipe_id: i64) -> Result<Vec<Tag>, AppError>;
}
