mod common;

use foodgram::domain::repositories::ShortLinkRepository;
use foodgram::infrastructure::persistence::PgShortLinkRepository;
use sqlx::PgPool;
use std::sync::Arc;

async fn seed_recipe(pool: &PgPool, name: &str) -> i64 {
    let author = common::create_user(pool, &format!("author-{name}")).await;
    common::create_recipe(pool, author, name, &[], &[]).await
}

#[sqlx::test]
async fn test_create_and_find(pool: PgPool) {
    let recipe_id = seed_recipe(&pool, "soup").await;
    let repo = PgShortLinkRepository::new(Arc::new(pool));

    let link = repo.create(recipe_id, "abc123").await.unwrap().unwrap();

    assert_eq!(link.recipe_id, recipe_id);
    assert_eq!(link.code, "abc123");

    let by_code = repo.find_by_code("abc123").await.unwrap().unwrap();
    let by_recipe = repo.find_by_recipe(recipe_id).await.unwrap().unwrap();
    assert_eq!(by_code, link);
    assert_eq!(by_recipe, link);
}

#[sqlx::test]
async fn test_create_for_linked_recipe_returns_existing(pool: PgPool) {
    let recipe_id = seed_recipe(&pool, "soup").await;
    let repo = PgShortLinkRepository::new(Arc::new(pool));

    let first = repo.create(recipe_id, "abc123").await.unwrap().unwrap();
    let second = repo.create(recipe_id, "zzz999").await.unwrap().unwrap();

    assert_eq!(second.code, first.code);
    assert!(repo.find_by_code("zzz999").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_create_with_taken_code_returns_none(pool: PgPool) {
    let soup = seed_recipe(&pool, "soup").await;
    let salad = seed_recipe(&pool, "salad").await;
    let repo = PgShortLinkRepository::new(Arc::new(pool));

    repo.create(soup, "abc123").await.unwrap();
    let result = repo.create(salad, "abc123").await.unwrap();

    assert!(result.is_none());
    assert!(repo.find_by_recipe(salad).await.unwrap().is_none());
}

#[sqlx::test]
async fn test_link_removed_with_recipe(pool: PgPool) {
    let recipe_id = seed_recipe(&pool, "soup").await;
    let repo = PgShortLinkRepository::new(Arc::new(pool.clone()));

    repo.create(recipe_id, "abc123").await.unwrap();
    sqlx::query("DELETE FROM recipes WHERE id = $1")
        .bind(recipe_id)
        .execute(&pool)
        .await
        .unwrap();

    assert!(repo.find_by_code("abc123").await.unwrap().is_none());
}
