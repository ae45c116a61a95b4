//! Shopping cart and favorites toggles.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{Principal, Recipe, RecipeCollection};
use crate::domain::repositories::{CollectionRepository, RecipeRepository};
use crate::error::AppError;

/// Adds recipes to and removes them from a user's cart or favorites.
///
/// Each (user, recipe) pair is either absent or present; adding a present
/// entry and removing an absent one both fail.
pub struct CollectionService<C: CollectionRepository, R: RecipeRepository> {
    collections: Arc<C>,
    recipes: Arc<R>,
}

impl<C: CollectionRepository, R: RecipeRepository> CollectionService<C, R> {
    pub fn new(collections: Arc<C>, recipes: Arc<R>) -> Self {
        Self {
            collections,
            recipes,
        }
    }

    async fn require_recipe(&self, recipe_id: i64) -> Result<Recipe, AppError> {
        self.recipes.find_by_id(recipe_id).await?.ok_or_else(|| {
            AppError::not_found("Recipe not found", json!({ "recipe_id": recipe_id }))
        })
    }

    /// Adds `recipe_id` to the principal's collection and returns the recipe.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the recipe doesn't exist
    /// - [`AppError::AlreadyExists`] if the entry is already present
    pub async fn add(
        &self,
        principal: Principal,
        collection: RecipeCollection,
        recipe_id: i64,
    ) -> Result<Recipe, AppError> {
        let recipe = self.require_recipe(recipe_id).await?;

        if self
            .collections
            .contains(collection, principal.user_id, recipe_id)
            .await?
        {
            return Err(AppError::already_exists(
                format!("Recipe is already in the {}", collection.label()),
                json!({ "recipe_id": recipe_id }),
            ));
        }

        self.collections
            .add(collection, principal.user_id, recipe_id)
            .await?;
        tracing::debug!(user_id = principal.user_id, recipe_id, %collection, "Recipe added");

        Ok(recipe)
    }

    /// Removes `recipe_id` from the principal's collection.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the recipe doesn't exist or was
    /// never added.
    pub async fn remove(
        &self,
        principal: Principal,
        collection: RecipeCollection,
        recipe_id: i64,
    ) -> Result<(), AppError> {
        self.require_recipe(recipe_id).await?;

        let removed = self
            .collections
            .remove(collection, principal.user_id, recipe_id)
            .await?;

        if !removed {
            return Err(AppError::not_found(
                format!("Recipe is not in the {}", collection.label()),
                json!({ "recipe_id": recipe_id }),
            ));
        }
        tracing::debug!(user_id = principal.user_id, recipe_id, %collection, "Recipe removed");

        Ok(())
    }
}
