//! Handlers for issuing and following recipe short links.

use axum::{
    Json,
    extract::{Path, State},
    response::Redirect,
};
use tracing::{debug, error};

use crate::api::dto::short_link::ShortLinkResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the recipe's short link, creating it on first request.
///
/// # Endpoint
///
/// `GET /api/recipes/{id}/get-link`
///
/// # Response
///
/// ```json
/// { "short-link": "http://localhost:8000/s/aB3dE9" }
/// ```
///
/// Repeated calls return the same link.
pub async fn get_link_handler(
    State(state): State<AppState>,
    Path(recipe_id): Path<i64>,
) -> Result<Json<ShortLinkResponse>, AppError> {
    let link = state.short_link_service.get_or_create(recipe_id).await?;

    Ok(Json(ShortLinkResponse {
        short_link: state.short_link_service.short_url(&link.code),
    }))
}

/// Redirects a short code to its recipe page.
///
/// # Endpoint
///
/// `GET /s/{code}`
///
/// # Cache Strategy
///
/// - **Cache hit**: Immediate redirect
/// - **Cache miss**: Query DB, spawn async cache write
/// - **Cache error**: Log and fall back to DB
///
/// The cache fill is not ordered against recipe deletion. A fill that lands
/// after the delete has invalidated the code keeps redirecting to the
/// removed recipe page until the entry's TTL expires.
///
/// # Errors
///
/// Returns 404 Not Found if the code was never issued.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let recipe_id = match state.cache.get_recipe_id(&code).await {
        Ok(Some(recipe_id)) => {
            debug!("Cache HIT for {}", code);
            recipe_id
        }
        Ok(None) => {
            debug!("Cache MISS for {}", code);

            let link = state.short_link_service.resolve(&code).await?;

            let cache = state.cache.clone();
            let code = link.code.clone();
            let recipe_id = link.recipe_id;
            tokio::spawn(async move {
                if let Err(e) = cache.set_recipe_id(&code, recipe_id, None).await {
                    error!("Failed to cache short link: {}", e);
                }
            });

            link.recipe_id
        }
        Err(e) => {
            error!("Cache error: {}", e);
            state.short_link_service.resolve(&code).await?.recipe_id
        }
    };

    Ok(Redirect::temporary(
        &state.short_link_service.recipe_url(recipe_id),
    ))
}
