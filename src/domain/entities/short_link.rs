//! Short link entity.

use chrono::{DateTime, Utc};

/// Maps a globally unique short code to a recipe.
///
/// A recipe has at most one short link; the code never moves to another recipe.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ShortLink {
    pub id: i64,
    pub recipe_id: i64,
    pub code: String,
    pub created_at: DateTime<Utc>,
}
