#![allow(dead_code)]

use axum::{Router, routing::get};
use axum_test::TestServer;
use foodgram::api::handlers::{health_handler, redirect_handler};
use foodgram::application::services::auth_service::hash_token;
use foodgram::infrastructure::cache::NullCache;
use foodgram::state::AppState;
use sqlx::PgPool;
use std::sync::Arc;

pub const SIGNING_SECRET: &str = "test-signing-secret";
pub const BASE_URL: &str = "http://testserver";

pub fn create_test_state(pool: PgPool) -> AppState {
    AppState::new(
        Arc::new(pool),
        Arc::new(NullCache),
        SIGNING_SECRET.to_string(),
        BASE_URL,
    )
}

/// The full API under `/api` plus the short link redirect, without rate limits.
pub fn create_test_server(pool: PgPool) -> TestServer {
    let state = create_test_state(pool);

    let app = Router::new()
        .nest("/api", foodgram::api::routes::router(&state))
        .route("/s/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

pub async fn create_user(pool: &PgPool, username: &str) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO users (email, username, first_name, last_name)
        VALUES ($1, $2, 'Test', 'User')
        RETURNING id
        "#,
    )
    .bind(format!("{username}@example.com"))
    .bind(username)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Issues a token for `user_id` and returns the raw value.
pub async fn create_token(pool: &PgPool, user_id: i64) -> String {
    let raw = format!("token-for-user-{user_id}");

    sqlx::query("INSERT INTO api_tokens (user_id, name, token_hash) VALUES ($1, $2, $3)")
        .bind(user_id)
        .bind(format!("user-{user_id}"))
        .bind(hash_token(SIGNING_SECRET, &raw))
        .execute(pool)
        .await
        .unwrap();

    raw
}

/// Creates a user with a token. Returns `(user_id, raw_token)`.
pub async fn create_authenticated_user(pool: &PgPool, username: &str) -> (i64, String) {
    let user_id = create_user(pool, username).await;
    let token = create_token(pool, user_id).await;
    (user_id, token)
}

pub async fn create_tag(pool: &PgPool, slug: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO tags (name, slug) VALUES ($1, $1) RETURNING id")
        .bind(slug)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_ingredient(pool: &PgPool, name: &str, unit: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO ingredients (name, measurement_unit) VALUES ($1, $2) RETURNING id",
    )
    .bind(name)
    .bind(unit)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Inserts a recipe with the given tag links and `(ingredient_id, amount)` lines.
pub async fn create_recipe(
    pool: &PgPool,
    author_id: i64,
    name: &str,
    tags: &[i64],
    ingredients: &[(i64, i32)],
) -> i64 {
    let recipe_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO recipes (author_id, name, text, image, cooking_time)
        VALUES ($1, $2, 'Mix and cook.', 'recipes/images/test.png', 10)
        RETURNING id
        "#,
    )
    .bind(author_id)
    .bind(name)
    .fetch_one(pool)
    .await
    .unwrap();

    for tag_id in tags {
        sqlx::query("INSERT INTO recipe_tags (recipe_id, tag_id) VALUES ($1, $2)")
            .bind(recipe_id)
            .bind(tag_id)
            .execute(pool)
            .await
            .unwrap();
    }

    for (ingredient_id, amount) in ingredients {
        sqlx::query(
            "INSERT INTO recipe_ingredients (recipe_id, ingredient_id, amount) VALUES ($1, $2, $3)",
        )
        .bind(recipe_id)
        .bind(ingredient_id)
        .bind(amount)
        .execute(pool)
        .await
        .unwrap();
    }

    recipe_id
}

pub async fn add_to_cart(pool: &PgPool, user_id: i64, recipe_id: i64) {
    sqlx::query("INSERT INTO shopping_cart (user_id, recipe_id) VALUES ($1, $2)")
        .bind(user_id)
        .bind(recipe_id)
        .execute(pool)
        .await
        .unwrap();
}
