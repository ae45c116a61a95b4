//! Subscription (follow) relation.

use chrono::{DateTime, Utc};

/// `subscriber_id` follows `author_id`.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Subscription {
    pub id: i64,
    pub author_id: i64,
    pub subscriber_id: i64,
    pub created_at: DateTime<Utc>,
}
