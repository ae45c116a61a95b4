//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /s/{code}` - Short link redirect to the recipe page (public)
//! - `GET  /health`   - Health check: DB, cache (public)
//! - `/api/*`         - REST API (Bearer token optional on reads, required on writes)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Authentication** - Bearer token resolved to a principal
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::rate_limit::{self, Policy};
use crate::api::middleware::{auth, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let auth_layer = middleware::from_fn_with_state(state.clone(), auth::layer);

    let public_api = rate_limit::apply(
        api::routes::public_routes().route_layer(auth_layer.clone()),
        Policy::Public,
        behind_proxy,
    );
    let protected_api = rate_limit::apply(
        api::routes::protected_routes().route_layer(auth_layer),
        Policy::Secure,
        behind_proxy,
    );

    let site = rate_limit::apply(
        Router::new()
            .route("/s/{code}", get(redirect_handler))
            .route("/health", get(health_handler)),
        Policy::Public,
        behind_proxy,
    );

    let router = site
        .nest("/api", public_api.merge(protected_api))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
