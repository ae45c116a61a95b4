//! Repository trait for follower relations.

use crate::domain::entities::{Subscription, User};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for subscriptions.
///
/// The store rejects duplicate pairs and self-subscriptions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Makes `subscriber_id` follow `author_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AlreadyExists`] if the pair exists.
    async fn create(&self, author_id: i64, subscriber_id: i64)
    -> Result<Subscription, AppError>;

    /// Returns `Ok(false)` if the pair did not exist.
    async fn delete(&self, author_id: i64, subscriber_id: i64) -> Result<bool, AppError>;

    async fn exists(&self, author_id: i64, subscriber_id: i64) -> Result<bool, AppError>;

    /// Authors followed by `subscriber_id`, most recent subscription first.
    async fn list_authors(
        &self,
        subscriber_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<User>, AppError>;

    async fn count_authors(&self, subscriber_id: i64) -> Result<i64, AppError>;
}
