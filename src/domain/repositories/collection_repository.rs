//! Repository trait for shopping cart and favorites entries.

use crate::domain::entities::RecipeCollection;
use crate::error::AppError;
use async_trait::async_trait;

/// Stores (user, recipe) pairs for each [`RecipeCollection`].
///
/// The store holds a unique constraint per collection on (user, recipe).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CollectionRepository: Send + Sync {
    /// Adds the pair.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AlreadyExists`] if the pair is already present.
    async fn add(
        &self,
        collection: RecipeCollection,
        user_id: i64,
        recipe_id: i64,
    ) -> Result<(), AppError>;

    /// Removes the pair. Returns `Ok(false)` if it was absent.
    async fn remove(
        &self,
        collection: RecipeCollection,
        user_id: i64,
        recipe_id: i64,
    ) -> Result<bool, AppError>;

    async fn contains(
        &self,
        collection: RecipeCollection,
        user_id: i64,
        recipe_id: i64,
    ) -> Result<bool, AppError>;
}
