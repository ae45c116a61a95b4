//! Handlers for following authors.

use axum::{
    Json,
    extract::{OriginalUri, Path, Query, State},
    http::StatusCode,
};

use crate::api::dto::pagination::{Paginated, PaginationParams};
use crate::api::dto::user::{RecipesLimitParams, UserWithRecipesView};
use crate::api::middleware::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Authors the caller follows, each with a recipe preview.
///
/// # Endpoint
///
/// `GET /api/users/subscriptions?page=1&limit=6&recipes_limit=3`
pub async fn subscriptions_handler(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    OriginalUri(uri): OriginalUri,
    Query(pagination): Query<PaginationParams>,
    Query(limit): Query<RecipesLimitParams>,
) -> Result<Json<Paginated<UserWithRecipesView>>, AppError> {
    let request = pagination.to_page_request()?;

    let page = state
        .subscription_service
        .subscriptions(principal, request, limit.get())
        .await?;

    Ok(Json(Paginated::new(
        page.map(UserWithRecipesView::from),
        &state.base_url,
        &uri,
    )))
}

/// Follows a user.
///
/// # Endpoint
///
/// `POST /api/users/{id}/subscribe?recipes_limit=3`
///
/// # Errors
///
/// - 400 `self_reference` when following yourself
/// - 400 `already_exists` when already following
/// - 404 if the user doesn't exist
pub async fn subscribe_handler(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(author_id): Path<i64>,
    Query(limit): Query<RecipesLimitParams>,
) -> Result<(StatusCode, Json<UserWithRecipesView>), AppError> {
    let author = state
        .subscription_service
        .subscribe(principal, author_id, limit.get())
        .await?;

    Ok((StatusCode::CREATED, Json(author.into())))
}

/// `DELETE /api/users/{id}/subscribe`
pub async fn unsubscribe_handler(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(author_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state
        .subscription_service
        .unsubscribe(principal, author_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
