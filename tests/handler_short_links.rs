mod common;

use axum::http::StatusCode;
use serde_json::Value;
use sqlx::PgPool;

#[sqlx::test]
async fn test_get_link_is_stable(pool: PgPool) {
    let author = common::create_user(&pool, "chef").await;
    let recipe_id = common::create_recipe(&pool, author, "Soup", &[], &[]).await;
    let server = common::create_test_server(pool);
    let path = format!("/api/recipes/{recipe_id}/get-link");

    let first = server.get(&path).await;
    first.assert_status_ok();
    let first = first.json::<Value>()["short-link"]
        .as_str()
        .unwrap()
        .to_string();

    let second = server.get(&path).await.json::<Value>()["short-link"]
        .as_str()
        .unwrap()
        .to_string();

    assert!(first.starts_with("http://testserver/s/"));
    assert_eq!(first.len(), "http://testserver/s/".len() + 6);
    assert_eq!(first, second);
}

#[sqlx::test]
async fn test_get_link_unknown_recipe(pool: PgPool) {
    let server = common::create_test_server(pool);

    server
        .get("/api/recipes/9999/get-link")
        .await
        .assert_status_not_found();
}

#[sqlx::test]
async fn test_redirect_to_recipe(pool: PgPool) {
    let author = common::create_user(&pool, "chef").await;
    let recipe_id = common::create_recipe(&pool, author, "Soup", &[], &[]).await;
    let server = common::create_test_server(pool);

    let link = server
        .get(&format!("/api/recipes/{recipe_id}/get-link"))
        .await
        .json::<Value>()["short-link"]
        .as_str()
        .unwrap()
        .to_string();
    let code = link.rsplit('/').next().unwrap();

    let response = server.get(&format!("/s/{code}")).await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(
        response.header("location"),
        format!("http://testserver/recipes/{recipe_id}/").as_str()
    );
}

#[sqlx::test]
async fn test_redirect_unknown_code(pool: PgPool) {
    let server = common::create_test_server(pool);

    server.get("/s/zzzzzz").await.assert_status_not_found();
    server.get("/s/not-a-code").await.assert_status_not_found();
}

#[sqlx::test]
async fn test_redirect_after_recipe_delete(pool: PgPool) {
    let (author, token) = common::create_authenticated_user(&pool, "chef").await;
    let recipe_id = common::create_recipe(&pool, author, "Soup", &[], &[]).await;
    let server = common::create_test_server(pool);

    let link = server
        .get(&format!("/api/recipes/{recipe_id}/get-link"))
        .await
        .json::<Value>()["short-link"]
        .as_str()
        .unwrap()
        .to_string();
    let code = link.rsplit('/').next().unwrap().to_string();

    assert_eq!(server.get(&format!("/s/{code}")).await.status_code(), 307);

    server
        .delete(&format!("/api/recipes/{recipe_id}"))
        .add_header("Authorization", common::bearer(&token))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server.get(&format!("/s/{code}")).await.assert_status_not_found();
}
