//! Repository trait for the recipe aggregate.

use crate::domain::entities::{
    CartIngredientLine, Recipe, RecipeDraft, RecipeFilter, RecipeIngredient,
};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for recipes, their tag set and ingredient lines.
///
/// Writes of the aggregate (recipe row + tags + lines) are atomic.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgRecipeRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_recipe.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Inserts a recipe with its tags and ingredient lines.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AlreadyExists`] if an ingredient appears twice and
    /// [`AppError::UnknownReference`] if a tag or ingredient id does not exist.
    async fn create(&self, author_id: i64, draft: RecipeDraft) -> Result<Recipe, AppError>;

    /// Replaces the recipe's fields, tags and ingredient lines.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the recipe does not exist.
    async fn update(&self, id: i64, draft: RecipeDraft) -> Result<Recipe, AppError>;

    /// Deletes a recipe; dependent rows cascade.
    ///
    /// Returns `Ok(false)` if nothing was deleted.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Recipe>, AppError>;

    /// Lists recipes matching `filter`, newest first.
    async fn list(
        &self,
        filter: RecipeFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Recipe>, AppError>;

    async fn count(&self, filter: RecipeFilter) -> Result<i64, AppError>;

    /// Ingredient lines of a recipe in insertion order.
    async fn ingredients(&self, recipe_id: i64) -> Result<Vec<RecipeIngredient>, AppError>;

    /// Every ingredient line of every recipe in the user's shopping cart.
    async fn cart_ingredient_lines(
        &self,
        user_id: i64,
    ) -> Result<Vec<CartIngredientLine>, AppError>;
}
