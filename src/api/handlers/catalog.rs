//! Handlers for tags and ingredients. Not paginated.

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::api::dto::catalog::{IngredientSearchParams, IngredientView, TagView};
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/tags`
pub async fn list_tags_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<TagView>>, AppError> {
    let tags = state.catalog_service.tags().await?;
    Ok(Json(tags.into_iter().map(Into::into).collect()))
}

/// `GET /api/tags/{id}`
pub async fn get_tag_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TagView>, AppError> {
    Ok(Json(state.catalog_service.tag(id).await?.into()))
}

/// Lists ingredients, optionally by case-insensitive name prefix.
///
/// # Endpoint
///
/// `GET /api/ingredients?name=fl`
pub async fn list_ingredients_handler(
    State(state): State<AppState>,
    Query(params): Query<IngredientSearchParams>,
) -> Result<Json<Vec<IngredientView>>, AppError> {
    let ingredients = state.catalog_service.ingredients(params.name).await?;
    Ok(Json(ingredients.into_iter().map(Into::into).collect()))
}

/// `GET /api/ingredients/{id}`
pub async fn get_ingredient_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<IngredientView>, AppError> {
    Ok(Json(state.catalog_service.ingredient(id).await?.into()))
}
