//! Handlers for the recipe resource.

use axum::{
    Json,
    extract::{OriginalUri, Path, RawQuery, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::pagination::Paginated;
use crate::api::dto::recipe::{RecipeDetailView, RecipeListParams, RecipeRequest};
use crate::api::middleware::{AuthUser, Viewer};
use crate::error::AppError;
use crate::state::AppState;

/// Lists recipes, newest first.
///
/// # Endpoint
///
/// `GET /api/recipes`
///
/// # Query Parameters
///
/// - `author` (optional): Author user id
/// - `tags` (optional, repeatable): Tag slug; matches recipes with any of them
/// - `is_favorited` (optional): `1` to show only the caller's favorites
/// - `is_in_shopping_cart` (optional): `1` to show only the caller's cart
/// - `page`, `limit` (optional): Pagination (default limit 6, max 100)
///
/// The two flags are ignored for anonymous callers.
pub async fn list_recipes_handler(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    OriginalUri(uri): OriginalUri,
    RawQuery(raw): RawQuery,
) -> Result<Json<Paginated<RecipeDetailView>>, AppError> {
    let params = RecipeListParams::parse(raw.as_deref())?;
    let request = params.pagination.to_page_request()?;

    let page = state
        .recipe_service
        .list(viewer, params.query, request)
        .await?;

    Ok(Json(Paginated::new(
        page.map(RecipeDetailView::from),
        &state.base_url,
        &uri,
    )))
}

/// Creates a recipe authored by the caller.
///
/// # Endpoint
///
/// `POST /api/recipes`
///
/// # Request Body
///
/// ```json
/// {
///   "ingredients": [{ "id": 1, "amount": 10 }],
///   "tags": [1, 2],
///   "image": "recipes/images/soup.png",
///   "name": "Soup",
///   "text": "Boil everything.",
///   "cooking_time": 30
/// }
/// ```
///
/// # Errors
///
/// - 400 `empty_collection` without ingredients or tags
/// - 400 `duplicate_entry` for a repeated ingredient or tag
/// - 400 `unknown_reference` for ingredient or tag ids that don't exist
/// - 400 `validation_error` for out-of-range fields
pub async fn create_recipe_handler(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Json(payload): Json<RecipeRequest>,
) -> Result<(StatusCode, Json<RecipeDetailView>), AppError> {
    payload.validate()?;

    let details = state
        .recipe_service
        .create(principal, payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(details.into())))
}

/// `GET /api/recipes/{id}`
pub async fn get_recipe_handler(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    Path(id): Path<i64>,
) -> Result<Json<RecipeDetailView>, AppError> {
    let details = state.recipe_service.get(viewer, id).await?;
    Ok(Json(details.into()))
}

/// Replaces a recipe. Only its author may do this.
///
/// # Endpoint
///
/// `PATCH /api/recipes/{id}` with the same body as create.
///
/// # Errors
///
/// - 403 if the caller is not the author
/// - 404 if the recipe doesn't exist
/// - validation errors as for create
pub async fn update_recipe_handler(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<RecipeRequest>,
) -> Result<Json<RecipeDetailView>, AppError> {
    payload.validate()?;

    let details = state
        .recipe_service
        .update(principal, id, payload.into())
        .await?;

    Ok(Json(details.into()))
}

/// Deletes a recipe and forgets its cached short code.
///
/// # Endpoint
///
/// `DELETE /api/recipes/{id}`
pub async fn delete_recipe_handler(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let short_link = state.short_link_service.find_for_recipe(id).await?;

    state.recipe_service.delete(principal, id).await?;

    if let Some(link) = short_link {
        if let Err(e) = state.cache.invalidate(&link.code).await {
            tracing::error!(code = %link.code, "Failed to invalidate cached short link: {}", e);
        }
    }

    Ok(StatusCode::NO_CONTENT)
}
