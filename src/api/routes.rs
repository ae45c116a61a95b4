//! API route configuration.
//!
//! Routes are split by rate limit policy: [`public_routes`] are reads
//! (anonymous allowed), [`protected_routes`] require a Bearer token and
//! mutate state or expose per-user data. Both share paths where a resource
//! is readable anonymously but writable only when authenticated.

use crate::api::handlers::{
    add_to_cart_handler, add_to_favorites_handler, create_recipe_handler, delete_avatar_handler,
    delete_recipe_handler, download_shopping_cart_handler, get_ingredient_handler,
    get_link_handler, get_recipe_handler, get_tag_handler, get_user_handler,
    list_ingredients_handler, list_recipes_handler, list_tags_handler, list_users_handler,
    me_handler, register_handler, remove_from_cart_handler, remove_from_favorites_handler,
    set_avatar_handler, subscribe_handler, subscriptions_handler, unsubscribe_handler,
    update_recipe_handler,
};
use crate::api::middleware::auth;
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{get, patch, post, put},
};

/// Read endpoints. A valid token, if sent, personalises the response.
///
/// # Endpoints
///
/// - `GET /users`, `GET /users/{id}`
/// - `POST /users` - registration
/// - `GET /tags`, `GET /tags/{id}`
/// - `GET /ingredients`, `GET /ingredients/{id}`
/// - `GET /recipes`, `GET /recipes/{id}`, `GET /recipes/{id}/get-link`
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users_handler).post(register_handler))
        .route("/users/{id}", get(get_user_handler))
        .route("/tags", get(list_tags_handler))
        .route("/tags/{id}", get(get_tag_handler))
        .route("/ingredients", get(list_ingredients_handler))
        .route("/ingredients/{id}", get(get_ingredient_handler))
        .route("/recipes", get(list_recipes_handler))
        .route("/recipes/{id}", get(get_recipe_handler))
        .route("/recipes/{id}/get-link", get(get_link_handler))
}

/// Endpoints that require authentication.
///
/// # Endpoints
///
/// - `GET /users/me`
/// - `PUT|DELETE /users/me/avatar`
/// - `GET /users/subscriptions`
/// - `POST|DELETE /users/{id}/subscribe`
/// - `POST /recipes`, `PATCH|DELETE /recipes/{id}`
/// - `POST|DELETE /recipes/{id}/shopping_cart`
/// - `POST|DELETE /recipes/{id}/favorite`
/// - `GET /recipes/download_shopping_cart`
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(me_handler))
        .route(
            "/users/me/avatar",
            put(set_avatar_handler).delete(delete_avatar_handler),
        )
        .route("/users/subscriptions", get(subscriptions_handler))
        .route(
            "/users/{id}/subscribe",
            post(subscribe_handler).delete(unsubscribe_handler),
        )
        .route("/recipes", post(create_recipe_handler))
        .route(
            "/recipes/{id}",
            patch(update_recipe_handler).delete(delete_recipe_handler),
        )
        .route(
            "/recipes/{id}/shopping_cart",
            post(add_to_cart_handler).delete(remove_from_cart_handler),
        )
        .route(
            "/recipes/{id}/favorite",
            post(add_to_favorites_handler).delete(remove_from_favorites_handler),
        )
        .route(
            "/recipes/download_shopping_cart",
            get(download_shopping_cart_handler),
        )
}

/// All API routes behind token resolution, without rate limiting.
pub fn router(state: &AppState) -> Router<AppState> {
    public_routes()
        .merge(protected_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer))
}
