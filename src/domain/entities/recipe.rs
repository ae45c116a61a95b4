//! Recipe aggregate: the recipe record, its ingredient lines and tags.

use chrono::{DateTime, Utc};

/// A published recipe owned by its author.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Recipe {
    pub id: i64,
    pub author_id: i64,
    pub name: String,
    pub text: String,
    /// Opaque reference to the stored recipe image.
    pub image: String,
    /// Minutes, always positive.
    pub cooking_time: i32,
    pub pub_date: DateTime<Utc>,
}

/// One ingredient line of a recipe, joined with the ingredient's data.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct RecipeIngredient {
    pub ingredient_id: i64,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

/// Requested quantity of an ingredient in a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientAmount {
    pub ingredient_id: i64,
    pub amount: i32,
}

/// Full content of a recipe being created or replaced.
///
/// Tags and ingredient lines are replaced wholesale on update.
#[derive(Debug, Clone)]
pub struct RecipeDraft {
    pub name: String,
    pub text: String,
    pub image: String,
    pub cooking_time: i32,
    pub tags: Vec<i64>,
    pub ingredients: Vec<IngredientAmount>,
}

/// Recipe list filters. `None`/empty means "don't filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    pub author_id: Option<i64>,
    /// Tag slugs; a recipe matches if it carries any of them.
    pub tags: Vec<String>,
    /// Only recipes in this user's favorites.
    pub favorited_by: Option<i64>,
    /// Only recipes in this user's shopping cart.
    pub in_cart_of: Option<i64>,
}

/// An ingredient line belonging to a recipe in someone's shopping cart.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CartIngredientLine {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}
