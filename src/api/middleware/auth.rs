//! Bearer token authentication middleware and principal extractors.
//!
//! [`layer`] runs on every API route. A valid token attaches the
//! [`Principal`] to the request; an absent header leaves the request
//! anonymous; an invalid token is rejected with `401`. Handlers then pick
//! [`AuthUser`] (authentication required) or [`Viewer`] (optional).

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;
use std::convert::Infallible;

use crate::{domain::entities::Principal, error::AppError, state::AppState};

/// Resolves the request's Bearer token, if any, to a [`Principal`].
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Errors
///
/// Returns `401 Unauthorized` with `WWW-Authenticate: Bearer` if the header
/// is present but malformed, or the token is unknown or revoked.
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !req.headers().contains_key(header::AUTHORIZATION) {
        return Ok(next.run(req).await);
    }

    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let principal = st.auth_service.authenticate(&token).await?;
    parts.extensions.insert(principal);

    let req = Request::from_parts(parts, body);

    Ok(next.run(req).await)
}

/// The authenticated principal. Rejects anonymous requests with `401`.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Principal);

impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .copied()
            .map(AuthUser)
            .ok_or_else(|| {
                AppError::unauthorized(
                    "Unauthorized",
                    json!({"reason": "Authentication credentials were not provided"}),
                )
            })
    }
}

/// The principal if the request is authenticated, `None` otherwise.
#[derive(Debug, Clone, Copy)]
pub struct Viewer(pub Option<Principal>);

impl<S: Send + Sync> FromRequestParts<S> for Viewer {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Viewer(parts.extensions.get::<Principal>().copied()))
    }
}
