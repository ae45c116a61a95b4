mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test]
async fn test_register_success(pool: PgPool) {
    let server = common::create_test_server(pool);

    let response = server
        .post("/api/users")
        .json(&json!({
            "email": "ann@example.com",
            "username": "ann",
            "first_name": "Ann",
            "last_name": "Smith"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<serde_json::Value>();
    assert!(json["id"].is_i64());
    assert_eq!(json["username"], "ann");
    assert_eq!(json["email"], "ann@example.com");
}

#[sqlx::test]
async fn test_register_invalid_username(pool: PgPool) {
    let server = common::create_test_server(pool);

    let response = server
        .post("/api/users")
        .json(&json!({
            "email": "ann@example.com",
            "username": "ann smith",
            "first_name": "Ann",
            "last_name": "Smith"
        }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "validation_error"
    );
}

#[sqlx::test]
async fn test_register_duplicate_email(pool: PgPool) {
    common::create_user(&pool, "ann").await;
    let server = common::create_test_server(pool);

    let response = server
        .post("/api/users")
        .json(&json!({
            "email": "ann@example.com",
            "username": "another",
            "first_name": "Ann",
            "last_name": "Smith"
        }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "already_exists"
    );
}

#[sqlx::test]
async fn test_me_requires_token(pool: PgPool) {
    let server = common::create_test_server(pool);

    let response = server.get("/api/users/me").await;

    response.assert_status_unauthorized();
    assert_eq!(response.header("www-authenticate"), "Bearer");
}

#[sqlx::test]
async fn test_invalid_token_rejected_on_public_route(pool: PgPool) {
    let server = common::create_test_server(pool);

    let response = server
        .get("/api/recipes")
        .add_header("Authorization", common::bearer("not-a-real-token"))
        .await;

    response.assert_status_unauthorized();
}

#[sqlx::test]
async fn test_me(pool: PgPool) {
    let (user_id, token) = common::create_authenticated_user(&pool, "ann").await;
    let server = common::create_test_server(pool);

    let response = server
        .get("/api/users/me")
        .add_header("Authorization", common::bearer(&token))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["id"], user_id);
    assert_eq!(json["is_subscribed"], false);
    assert!(json["avatar"].is_null());
}

#[sqlx::test]
async fn test_list_users_paginated(pool: PgPool) {
    for name in ["ann", "bob", "cid"] {
        common::create_user(&pool, name).await;
    }
    let server = common::create_test_server(pool);

    let response = server.get("/api/users?limit=2").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["count"], 3);
    assert_eq!(json["results"].as_array().unwrap().len(), 2);
    assert_eq!(json["next"], "http://testserver/api/users?limit=2&page=2");
    assert!(json["previous"].is_null());
}

#[sqlx::test]
async fn test_get_unknown_user(pool: PgPool) {
    let server = common::create_test_server(pool);

    server.get("/api/users/9999").await.assert_status_not_found();
}

#[sqlx::test]
async fn test_avatar_set_and_remove(pool: PgPool) {
    let (_, token) = common::create_authenticated_user(&pool, "ann").await;
    let server = common::create_test_server(pool);

    let response = server
        .put("/api/users/me/avatar")
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({ "avatar": "users/avatars/ann.png" }))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<serde_json::Value>()["avatar"],
        "users/avatars/ann.png"
    );

    server
        .delete("/api/users/me/avatar")
        .add_header("Authorization", common::bearer(&token))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .delete("/api/users/me/avatar")
        .add_header("Authorization", common::bearer(&token))
        .await
        .assert_status_not_found();
}

#[sqlx::test]
async fn test_subscribe_flow(pool: PgPool) {
    let (_, token) = common::create_authenticated_user(&pool, "ann").await;
    let author = common::create_user(&pool, "chef").await;
    for i in 0..4 {
        common::create_recipe(&pool, author, &format!("Dish {i}"), &[], &[]).await;
    }
    let server = common::create_test_server(pool);

    let response = server
        .post(&format!("/api/users/{author}/subscribe?recipes_limit=2"))
        .add_header("Authorization", common::bearer(&token))
        .await;

    response.assert_status(StatusCode::CREATED);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["id"], author);
    assert_eq!(json["is_subscribed"], true);
    assert_eq!(json["recipes"].as_array().unwrap().len(), 2);
    assert_eq!(json["recipes_count"], 4);

    let again = server
        .post(&format!("/api/users/{author}/subscribe"))
        .add_header("Authorization", common::bearer(&token))
        .await;
    again.assert_status_bad_request();
    assert_eq!(
        again.json::<serde_json::Value>()["error"]["code"],
        "already_exists"
    );

    let list = server
        .get("/api/users/subscriptions")
        .add_header("Authorization", common::bearer(&token))
        .await;
    list.assert_status_ok();
    let json = list.json::<serde_json::Value>();
    assert_eq!(json["count"], 1);
    assert_eq!(json["results"][0]["recipes"].as_array().unwrap().len(), 3);

    server
        .delete(&format!("/api/users/{author}/subscribe"))
        .add_header("Authorization", common::bearer(&token))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .delete(&format!("/api/users/{author}/subscribe"))
        .add_header("Authorization", common::bearer(&token))
        .await
        .assert_status_not_found();
}

#[sqlx::test]
async fn test_subscribe_to_self(pool: PgPool) {
    let (user_id, token) = common::create_authenticated_user(&pool, "ann").await;
    let server = common::create_test_server(pool);

    let response = server
        .post(&format!("/api/users/{user_id}/subscribe"))
        .add_header("Authorization", common::bearer(&token))
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "self_reference"
    );
}
