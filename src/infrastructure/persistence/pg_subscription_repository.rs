//! PostgreSQL implementation of subscription repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Subscription, User};
use crate::domain::repositories::SubscriptionRepository;
use crate::error::{AppError, is_unique_violation_on};

/// PostgreSQL repository for follower relations.
///
/// The `unique_user_subscription` and `prevent_self_follow` constraints are
/// the source of truth for both subscription invariants.
pub struct PgSubscriptionRepository {
    pool: Arc<PgPool>,
}

impl PgSubscriptionRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionRepository for PgSubscriptionRepository {
    async fn create(
        &self,
        author_id: i64,
        subscriber_id: i64,
    ) -> Result<Subscription, AppError> {
        let result = sqlx::query_as::<_, Subscription>(
            r#"
            INSERT INTO subscriptions (author_id, subscriber_id)
            VALUES ($1, $2)
            RETURNING id, author_id, subscriber_id, created_at
            "#,
        )
        .bind(author_id)
        .bind(subscriber_id)
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(subscription) => Ok(subscription),
            Err(e) if is_unique_violation_on(&e, "unique_user_subscription") => {
                Err(AppError::already_exists(
                    "Already subscribed to this user",
                    json!({ "author_id": author_id }),
                ))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, author_id: i64, subscriber_id: i64) -> Result<bool, AppError> {
        let result =
            sqlx::query("DELETE FROM subscriptions WHERE author_id = $1 AND subscriber_id = $2")
                .bind(author_id)
                .bind(subscriber_id)
                .execute(self.pool.as_ref())
                .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, author_id: i64, subscriber_id: i64) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM subscriptions
                WHERE author_id = $1 AND subscriber_id = $2
            )
            "#,
        )
        .bind(author_id)
        .bind(subscriber_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn list_authors(
        &self,
        subscriber_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<User>, AppError> {
        let authors = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.email, u.username, u.first_name, u.last_name, u.avatar, u.created_at
            FROM subscriptions s
            JOIN users u ON u.id = s.author_id
            WHERE s.subscriber_id = $1
            ORDER BY s.created_at DESC, s.id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(subscriber_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(authors)
    }

    async fn count_authors(&self, subscriber_id: i64) -> Result<i64, AppError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM subscriptions WHERE subscriber_id = $1")
                .bind(subscriber_id)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(count)
    }
}
