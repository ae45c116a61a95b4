//! Handlers for user registration, profiles and avatars.

use axum::{
    Json,
    extract::{OriginalUri, Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::pagination::{Paginated, PaginationParams};
use crate::api::dto::user::{
    AvatarRequest, AvatarResponse, RegisterRequest, RegisteredUserView, UserView,
};
use crate::api::middleware::{AuthUser, Viewer};
use crate::error::AppError;
use crate::state::AppState;

/// Lists users.
///
/// # Endpoint
///
/// `GET /api/users?page=1&limit=6`
pub async fn list_users_handler(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Paginated<UserView>>, AppError> {
    let request = params.to_page_request()?;
    let page = state.user_service.list(viewer, request).await?;

    Ok(Json(Paginated::new(
        page.map(UserView::from),
        &state.base_url,
        &uri,
    )))
}

/// Registers a user.
///
/// # Endpoint
///
/// `POST /api/users`
///
/// # Errors
///
/// - 400 `validation_error` for malformed fields
/// - 400 `already_exists` if the email or username is taken
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisteredUserView>), AppError> {
    payload.validate()?;

    let user = state.user_service.register(payload.into()).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// `GET /api/users/me`
pub async fn me_handler(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
) -> Result<Json<UserView>, AppError> {
    let profile = state.user_service.me(principal).await?;
    Ok(Json(profile.into()))
}

/// `GET /api/users/{id}`
pub async fn get_user_handler(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    Path(id): Path<i64>,
) -> Result<Json<UserView>, AppError> {
    let profile = state.user_service.profile(viewer, id).await?;
    Ok(Json(profile.into()))
}

/// `PUT /api/users/me/avatar`
pub async fn set_avatar_handler(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Json(payload): Json<AvatarRequest>,
) -> Result<Json<AvatarResponse>, AppError> {
    payload.validate()?;

    let user = state
        .user_service
        .set_avatar(principal, payload.avatar)
        .await?;

    Ok(Json(AvatarResponse {
        avatar: user.avatar,
    }))
}

/// `DELETE /api/users/me/avatar`
///
/// Returns 404 if no avatar is set.
pub async fn delete_avatar_handler(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
) -> Result<StatusCode, AppError> {
    state.user_service.remove_avatar(principal).await?;
    Ok(StatusCode::NO_CONTENT)
}
