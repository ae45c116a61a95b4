//! DTOs for recipe endpoints.

use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::api::dto::catalog::TagView;
use crate::api::dto::pagination::PaginationParams;
use crate::api::dto::user::UserView;
use crate::application::services::{RecipeDetails, RecipeQuery};
use crate::domain::entities::{IngredientAmount, Recipe, RecipeDraft, RecipeIngredient};
use crate::error::AppError;

#[derive(Debug, Deserialize, Validate)]
pub struct IngredientAmountRequest {
    pub id: i64,

    #[validate(range(min = 1, max = 32000))]
    pub amount: i32,
}

/// Body of recipe create and update. Updates replace the whole recipe.
#[derive(Debug, Deserialize, Validate)]
pub struct RecipeRequest {
    #[validate(nested)]
    pub ingredients: Vec<IngredientAmountRequest>,

    pub tags: Vec<i64>,

    /// Opaque reference to the stored image.
    #[validate(length(min = 1, message = "Image must not be empty"))]
    pub image: String,

    #[validate(length(min = 1, max = 256))]
    pub name: String,

    #[validate(length(min = 1, message = "Text must not be empty"))]
    pub text: String,

    #[validate(range(min = 1, max = 32000))]
    pub cooking_time: i32,
}

impl From<RecipeRequest> for RecipeDraft {
    fn from(req: RecipeRequest) -> Self {
        Self {
            name: req.name,
            text: req.text,
            image: req.image,
            cooking_time: req.cooking_time,
            tags: req.tags,
            ingredients: req
                .ingredients
                .into_iter()
                .map(|line| IngredientAmount {
                    ingredient_id: line.id,
                    amount: line.amount,
                })
                .collect(),
        }
    }
}

/// Short form used in cart, favorites and subscription responses.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeSummaryView {
    pub id: i64,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

impl From<Recipe> for RecipeSummaryView {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name,
            image: recipe.image,
            cooking_time: recipe.cooking_time,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecipeIngredientView {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

impl From<RecipeIngredient> for RecipeIngredientView {
    fn from(line: RecipeIngredient) -> Self {
        Self {
            id: line.ingredient_id,
            name: line.name,
            measurement_unit: line.measurement_unit,
            amount: line.amount,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecipeDetailView {
    pub id: i64,
    pub tags: Vec<TagView>,
    pub author: UserView,
    pub ingredients: Vec<RecipeIngredientView>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
}

impl From<RecipeDetails> for RecipeDetailView {
    fn from(details: RecipeDetails) -> Self {
        let RecipeDetails {
            recipe,
            author,
            tags,
            ingredients,
            is_favorited,
            is_in_shopping_cart,
        } = details;

        Self {
            id: recipe.id,
            tags: tags.into_iter().map(Into::into).collect(),
            author: author.into(),
            ingredients: ingredients.into_iter().map(Into::into).collect(),
            is_favorited,
            is_in_shopping_cart,
            name: recipe.name,
            image: recipe.image,
            text: recipe.text,
            cooking_time: recipe.cooking_time,
        }
    }
}

/// Parsed `GET /api/recipes` query string.
///
/// Parsed by hand because `tags` may repeat (`?tags=lunch&tags=dinner`).
#[derive(Debug, Default)]
pub struct RecipeListParams {
    pub query: RecipeQuery,
    pub pagination: PaginationParams,
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, AppError> {
    value.parse().map_err(|_| {
        AppError::bad_request(
            format!("Invalid value for '{key}'"),
            json!({ "param": key, "value": value }),
        )
    })
}

fn parse_flag(value: &str) -> bool {
    matches!(value, "1" | "true" | "True")
}

impl RecipeListParams {
    /// Parses a raw query string. Unknown parameters are ignored.
    pub fn parse(raw: Option<&str>) -> Result<Self, AppError> {
        let mut params = Self::default();

        let Some(raw) = raw else {
            return Ok(params);
        };

        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            match key.as_ref() {
                "author" => params.query.author_id = Some(parse_number(&key, &value)?),
                "tags" => {
                    if !value.is_empty() {
                        params.query.tags.push(value.into_owned());
                    }
                }
                "is_favorited" => params.query.is_favorited = parse_flag(&value),
                "is_in_shopping_cart" => params.query.is_in_shopping_cart = parse_flag(&value),
                "page" => params.pagination.page = Some(parse_number(&key, &value)?),
                "limit" => params.pagination.limit = Some(parse_number(&key, &value)?),
                _ => {}
            }
        }

        Ok(params)
    }
}
