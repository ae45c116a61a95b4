mod common;

use serde_json::Value;
use sqlx::PgPool;

#[sqlx::test]
async fn test_tags(pool: PgPool) {
    let lunch = common::create_tag(&pool, "lunch").await;
    common::create_tag(&pool, "dinner").await;
    let server = common::create_test_server(pool);

    let list = server.get("/api/tags").await;
    list.assert_status_ok();
    assert_eq!(list.json::<Value>().as_array().unwrap().len(), 2);

    let tag = server.get(&format!("/api/tags/{lunch}")).await.json::<Value>();
    assert_eq!(tag["slug"], "lunch");

    server.get("/api/tags/9999").await.assert_status_not_found();
}

#[sqlx::test]
async fn test_ingredient_prefix_search(pool: PgPool) {
    common::create_ingredient(&pool, "Flour", "g").await;
    common::create_ingredient(&pool, "flaxseed", "g").await;
    common::create_ingredient(&pool, "sugar", "g").await;
    let server = common::create_test_server(pool);

    let all = server.get("/api/ingredients").await.json::<Value>();
    assert_eq!(all.as_array().unwrap().len(), 3);

    let fl = server.get("/api/ingredients?name=fl").await.json::<Value>();
    assert_eq!(fl.as_array().unwrap().len(), 2);

    let blank = server.get("/api/ingredients?name=").await.json::<Value>();
    assert_eq!(blank.as_array().unwrap().len(), 3);
}

#[sqlx::test]
async fn test_get_ingredient(pool: PgPool) {
    let id = common::create_ingredient(&pool, "milk", "ml").await;
    let server = common::create_test_server(pool);

    let json = server
        .get(&format!("/api/ingredients/{id}"))
        .await
        .json::<Value>();
    assert_eq!(json["name"], "milk");
    assert_eq!(json["measurement_unit"], "ml");

    server.get("/api/ingredients/9999").await.assert_status_not_found();
}

#[sqlx::test]
async fn test_ingredient_prefix_search_non_ascii(pool: PgPool) {
    common::create_ingredient(&pool, "Мука", "г").await;
    common::create_ingredient(&pool, "Молоко", "мл").await;
    common::create_ingredient(&pool, "flour", "g").await;
    let server = common::create_test_server(pool);

    // ?name=Му
    let mu = server
        .get("/api/ingredients?name=%D0%9C%D1%83")
        .await
        .json::<Value>();
    let names: Vec<&str> = mu
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Мука"]);

    let upper = server.get("/api/ingredients?name=FL").await.json::<Value>();
    assert_eq!(upper.as_array().unwrap().len(), 1);
    assert_eq!(upper[0]["name"], "flour");
}
