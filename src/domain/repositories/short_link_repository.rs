//! Repository trait for recipe short links.

use crate::domain::entities::ShortLink;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for short links.
///
/// The store enforces unique `code` and unique `recipe_id`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortLinkRepository: Send + Sync {
    async fn find_by_recipe(&self, recipe_id: i64) -> Result<Option<ShortLink>, AppError>;

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError>;

    /// Stores `code` for `recipe_id`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(link))` with the recipe's link. If another request already
    ///   stored a link for this recipe, that link is returned unchanged.
    /// - `Ok(None)` if `code` is already taken by another recipe.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UnknownReference`] if the recipe does not exist.
    async fn create(&self, recipe_id: i64, code: &str) -> Result<Option<ShortLink>, AppError>;
}
