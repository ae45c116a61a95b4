//! Handlers for the shopping cart, favorites and the shopping list download.

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::api::dto::recipe::RecipeSummaryView;
use crate::api::middleware::AuthUser;
use crate::domain::entities::RecipeCollection;
use crate::error::AppError;
use crate::state::AppState;

async fn add(
    state: &AppState,
    AuthUser(principal): AuthUser,
    collection: RecipeCollection,
    recipe_id: i64,
) -> Result<(StatusCode, Json<RecipeSummaryView>), AppError> {
    let recipe = state
        .collection_service
        .add(principal, collection, recipe_id)
        .await?;

    Ok((StatusCode::CREATED, Json(recipe.into())))
}

async fn remove(
    state: &AppState,
    AuthUser(principal): AuthUser,
    collection: RecipeCollection,
    recipe_id: i64,
) -> Result<StatusCode, AppError> {
    state
        .collection_service
        .remove(principal, collection, recipe_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/recipes/{id}/shopping_cart`
///
/// Returns 400 `already_exists` if the recipe is already in the cart.
pub async fn add_to_cart_handler(
    State(state): State<AppState>,
    user: AuthUser,
    Path(recipe_id): Path<i64>,
) -> Result<(StatusCode, Json<RecipeSummaryView>), AppError> {
    add(&state, user, RecipeCollection::ShoppingCart, recipe_id).await
}

/// `DELETE /api/recipes/{id}/shopping_cart`
///
/// Returns 404 if the recipe was not in the cart.
pub async fn remove_from_cart_handler(
    State(state): State<AppState>,
    user: AuthUser,
    Path(recipe_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    remove(&state, user, RecipeCollection::ShoppingCart, recipe_id).await
}

/// `POST /api/recipes/{id}/favorite`
pub async fn add_to_favorites_handler(
    State(state): State<AppState>,
    user: AuthUser,
    Path(recipe_id): Path<i64>,
) -> Result<(StatusCode, Json<RecipeSummaryView>), AppError> {
    add(&state, user, RecipeCollection::Favorites, recipe_id).await
}

/// `DELETE /api/recipes/{id}/favorite`
pub async fn remove_from_favorites_handler(
    State(state): State<AppState>,
    user: AuthUser,
    Path(recipe_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    remove(&state, user, RecipeCollection::Favorites, recipe_id).await
}

/// Downloads the caller's aggregated shopping list as a text file.
///
/// # Endpoint
///
/// `GET /api/recipes/download_shopping_cart`
///
/// # Response
///
/// ```text
/// СПИСОК ПОКУПОК
/// ------------------------------
/// • egg (pcs) — 5
/// • flour (cup) — 1
/// ```
///
/// Returns 400 `empty_collection` if the cart is empty.
pub async fn download_shopping_cart_handler(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let text = state
        .shopping_list_service
        .shopping_list_text(principal)
        .await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"shopping_list.txt\"",
            ),
        ],
        text,
    ))
}
