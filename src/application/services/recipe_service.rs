//! Recipe aggregate orchestration: create, replace, delete, read and list.

use std::sync::Arc;

use serde_json::json;

use crate::application::services::user_service::{UserProfile, UserService};
use crate::application::validation::{ensure_references_exist, validate_recipe_draft};
use crate::domain::entities::{
    Page, PageRequest, Principal, Recipe, RecipeCollection, RecipeDraft, RecipeFilter,
    RecipeIngredient, Tag,
};
use crate::domain::repositories::{
    CollectionRepository, IngredientRepository, RecipeRepository, SubscriptionRepository,
    TagRepository, UserRepository,
};
use crate::error::AppError;

/// A recipe with everything the detail view shows.
#[derive(Debug, Clone)]
pub struct RecipeDetails {
    pub recipe: Recipe,
    pub author: UserProfile,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<RecipeIngredient>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

/// List filters as requested by a client.
///
/// `is_favorited` and `is_in_shopping_cart` only apply to an authenticated
/// viewer and are ignored otherwise.
#[derive(Debug, Clone, Default)]
pub struct RecipeQuery {
    pub author_id: Option<i64>,
    pub tags: Vec<String>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

impl RecipeQuery {
    fn into_filter(self, viewer: Option<Principal>) -> RecipeFilter {
        let viewer_id = viewer.map(|p| p.user_id);
        RecipeFilter {
            author_id: self.author_id,
            tags: self.tags,
            favorited_by: viewer_id.filter(|_| self.is_favorited),
            in_cart_of: viewer_id.filter(|_| self.is_in_shopping_cart),
        }
    }
}

/// Service for the recipe aggregate.
///
/// Every mutation takes the acting [`Principal`] explicitly. Drafts are
/// checked by the validation layer before anything is written, and only a
/// recipe's author may replace or delete it.
pub struct RecipeService<R, I, T, C, U, S>
where
    R: RecipeRepository,
    I: IngredientRepository,
    T: TagRepository,
    C: CollectionRepository,
    U: UserRepository,
    S: SubscriptionRepository,
{
    recipes: Arc<R>,
    ingredients: Arc<I>,
    tags: Arc<T>,
    collections: Arc<C>,
    users: Arc<UserService<U, S>>,
}

impl<R, I, T, C, U, S> RecipeService<R, I, T, C, U, S>
where
    R: RecipeRepository,
    I: IngredientRepository,
    T: TagRepository,
    C: CollectionRepository,
    U: UserRepository,
    S: SubscriptionRepository,
{
    /// Creates a new recipe service.
    pub fn new(
        recipes: Arc<R>,
        ingredients: Arc<I>,
        tags: Arc<T>,
        collections: Arc<C>,
        users: Arc<UserService<U, S>>,
    ) -> Self {
        Self {
            recipes,
            ingredients,
            tags,
            collections,
            users,
        }
    }

    /// Loads a recipe or fails with [`AppError::NotFound`].
    pub async fn require(&self, id: i64) -> Result<Recipe, AppError> {
        self.recipes
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Recipe not found", json!({ "recipe_id": id })))
    }

    /// Runs every draft check, including existence of referenced ids.
    async fn check_draft(&self, draft: &RecipeDraft) -> Result<(), AppError> {
        validate_recipe_draft(draft)?;

        let ingredient_ids: Vec<i64> = draft.ingredients.iter().map(|l| l.ingredient_id).collect();
        let existing = self.ingredients.existing_ids(&ingredient_ids).await?;
        ensure_references_exist("ingredient", &ingredient_ids, &existing)?;

        let existing = self.tags.existing_ids(&draft.tags).await?;
        ensure_references_exist("tag", &draft.tags, &existing)?;

        Ok(())
    }

    async fn require_owned(&self, principal: Principal, id: i64) -> Result<Recipe, AppError> {
        let recipe = self.require(id).await?;

        if recipe.author_id != principal.user_id {
            return Err(AppError::forbidden(
                "Only the author can modify this recipe",
                json!({ "recipe_id": id }),
            ));
        }

        Ok(recipe)
    }

    /// Creates a recipe authored by the principal.
    ///
    /// # Errors
    ///
    /// - [`AppError::EmptyCollection`] without ingredients or tags
    /// - [`AppError::DuplicateEntry`] for a repeated ingredient or tag
    /// - [`AppError::UnknownReference`] listing ids that don't exist
    pub async fn create(
        &self,
        principal: Principal,
        draft: RecipeDraft,
    ) -> Result<RecipeDetails, AppError> {
        self.check_draft(&draft).await?;

        let recipe = self.recipes.create(principal.user_id, draft).await?;
        metrics::counter!("recipes_created_total").increment(1);
        tracing::info!(recipe_id = recipe.id, author_id = recipe.author_id, "Recipe created");

        self.details(Some(principal), recipe).await
    }

    /// Replaces the recipe's fields, tags and ingredient lines.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the recipe doesn't exist
    /// - [`AppError::Forbidden`] if the principal isn't the author
    /// - validation errors as for [`Self::create`]
    pub async fn update(
        &self,
        principal: Principal,
        id: i64,
        draft: RecipeDraft,
    ) -> Result<RecipeDetails, AppError> {
        self.require_owned(principal, id).await?;
        self.check_draft(&draft).await?;

        let recipe = self.recipes.update(id, draft).await?;
        tracing::info!(recipe_id = id, "Recipe updated");

        self.details(Some(principal), recipe).await
    }

    /// Deletes a recipe with its lines, collection entries and short link.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the recipe doesn't exist
    /// - [`AppError::Forbidden`] if the principal isn't the author
    pub async fn delete(&self, principal: Principal, id: i64) -> Result<(), AppError> {
        self.require_owned(principal, id).await?;

        if !self.recipes.delete(id).await? {
            return Err(AppError::not_found(
                "Recipe not found",
                json!({ "recipe_id": id }),
            ));
        }
        tracing::info!(recipe_id = id, "Recipe deleted");

        Ok(())
    }

    /// Loads a recipe with the viewer's favorite and cart flags.
    ///
    /// Flags are `false` for anonymous viewers.
    pub async fn get(
        &self,
        viewer: Option<Principal>,
        id: i64,
    ) -> Result<RecipeDetails, AppError> {
        let recipe = self.require(id).await?;
        self.details(viewer, recipe).await
    }

    /// Lists recipes newest first.
    ///
    /// See [`RecipeQuery`] for how viewer-dependent filters apply.
    pub async fn list(
        &self,
        viewer: Option<Principal>,
        query: RecipeQuery,
        request: PageRequest,
    ) -> Result<Page<RecipeDetails>, AppError> {
        let filter = query.into_filter(viewer);

        let recipes = self
            .recipes
            .list(filter.clone(), request.offset(), request.limit())
            .await?;
        let count = self.recipes.count(filter).await?;

        let mut items = Vec::with_capacity(recipes.len());
        for recipe in recipes {
            items.push(self.details(viewer, recipe).await?);
        }

        Ok(Page {
            items,
            count,
            request,
        })
    }

    async fn details(
        &self,
        viewer: Option<Principal>,
        recipe: Recipe,
    ) -> Result<RecipeDetails, AppError> {
        let author = self.users.profile(viewer, recipe.author_id).await?;
        let tags = self.tags.list_for_recipe(recipe.id).await?;
        let ingredients = self.recipes.ingredients(recipe.id).await?;

        let (is_favorited, is_in_shopping_cart) = match viewer {
            Some(principal) => (
                self.collections
                    .contains(RecipeCollection::Favorites, principal.user_id, recipe.id)
                    .await?,
                self.collections
                    .contains(RecipeCollection::ShoppingCart, principal.user_id, recipe.id)
                    .await?,
            ),
            None => (false, false),
        };

        Ok(RecipeDetails {
            recipe,
            author,
            tags,
            ingredients,
            is_favorited,
            is_in_shopping_cart,
        })
    }
}
