mod common;

use foodgram::domain::repositories::TokenRepository;
use foodgram::infrastructure::persistence::PgTokenRepository;
use sqlx::PgPool;
use std::sync::Arc;

#[sqlx::test]
async fn test_create_token(pool: PgPool) {
    let user_id = common::create_user(&pool, "ann").await;
    let repo = PgTokenRepository::new(Arc::new(pool));

    let token = repo.create_token(user_id, "cli", "hash123").await.unwrap();

    assert_eq!(token.user_id, user_id);
    assert_eq!(token.name, "cli");
    assert_eq!(token.token_hash, "hash123");
    assert!(token.revoked_at.is_none());
    assert!(token.last_used_at.is_none());
}

#[sqlx::test]
async fn test_create_token_duplicate_name(pool: PgPool) {
    let user_id = common::create_user(&pool, "ann").await;
    let repo = PgTokenRepository::new(Arc::new(pool));

    repo.create_token(user_id, "cli", "hash1").await.unwrap();
    let result = repo.create_token(user_id, "cli", "hash2").await;

    assert!(matches!(
        result,
        Err(foodgram::error::AppError::AlreadyExists { .. })
    ));
}

#[sqlx::test]
async fn test_find_user_id(pool: PgPool) {
    let user_id = common::create_user(&pool, "ann").await;
    let repo = PgTokenRepository::new(Arc::new(pool));

    repo.create_token(user_id, "cli", "validhash").await.unwrap();

    assert_eq!(repo.find_user_id("validhash").await.unwrap(), Some(user_id));
    assert_eq!(repo.find_user_id("nonexistent").await.unwrap(), None);
}

#[sqlx::test]
async fn test_revoked_token_does_not_resolve(pool: PgPool) {
    let user_id = common::create_user(&pool, "ann").await;
    let repo = PgTokenRepository::new(Arc::new(pool));

    let token = repo.create_token(user_id, "cli", "revokedhash").await.unwrap();
    repo.revoke_token(token.id).await.unwrap();

    assert_eq!(repo.find_user_id("revokedhash").await.unwrap(), None);

    let stored = repo.find_by_id(token.id).await.unwrap().unwrap();
    assert!(stored.revoked_at.is_some());
}

#[sqlx::test]
async fn test_update_last_used(pool: PgPool) {
    let user_id = common::create_user(&pool, "ann").await;
    let repo = PgTokenRepository::new(Arc::new(pool));

    repo.create_token(user_id, "cli", "usedhash").await.unwrap();
    repo.update_last_used("usedhash").await.unwrap();

    let token = repo.find_by_name("cli").await.unwrap().unwrap();
    assert!(token.last_used_at.is_some());
}

#[sqlx::test]
async fn test_list_tokens(pool: PgPool) {
    let ann = common::create_user(&pool, "ann").await;
    let bob = common::create_user(&pool, "bob").await;
    let repo = PgTokenRepository::new(Arc::new(pool));

    repo.create_token(ann, "ann-cli", "hash1").await.unwrap();
    repo.create_token(bob, "bob-cli", "hash2").await.unwrap();

    let tokens = repo.list_tokens().await.unwrap();

    assert_eq!(tokens.len(), 2);
}
