//! Read-only access to tags and ingredients.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{Ingredient, Tag};
use crate::domain::repositories::{IngredientRepository, TagRepository};
use crate::error::AppError;

/// Read access to reference data shared by all recipes.
///
/// Tags and ingredients are seeded by administrators and never changed
/// through the API, so results are not paginated.
pub struct CatalogService<T: TagRepository, I: IngredientRepository> {
    tags: Arc<T>,
    ingredients: Arc<I>,
}

impl<T: TagRepository, I: IngredientRepository> CatalogService<T, I> {
    /// Creates a new catalog service.
    pub fn new(tags: Arc<T>, ingredients: Arc<I>) -> Self {
        Self { tags, ingredients }
    }

    /// All tags ordered by name.
    pub async fn tags(&self) -> Result<Vec<Tag>, AppError> {
        self.tags.list().await
    }

    /// Loads a tag.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no tag has this id.
    pub async fn tag(&self, id: i64) -> Result<Tag, AppError> {
        self.tags
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Tag not found", json!({ "tag_id": id })))
    }

    /// Ingredients ordered by name, optionally filtered by a
    /// case-insensitive name prefix. A blank prefix means no filter.
    pub async fn ingredients(&self, name_prefix: Option<String>) -> Result<Vec<Ingredient>, AppError> {
        let name_prefix = name_prefix
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());

        self.ingredients.list(name_prefix).await
    }

    /// Loads an ingredient.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no ingredient has this id.
    pub async fn ingredient(&self, id: i64) -> Result<Ingredient, AppError> {
        self.ingredients.find_by_id(id).await?.ok_or_else(|| {
            AppError::not_found("Ingredient not found", json!({ "ingredient_id": id }))
        })
    }
}
