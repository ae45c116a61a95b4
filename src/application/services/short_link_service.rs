//! Short link issue and resolution.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::ShortLink;
use crate::domain::repositories::{RecipeRepository, ShortLinkRepository};
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, is_valid_code};

/// Upper bound on code generation attempts before giving up.
const MAX_ATTEMPTS: usize = 10;

/// Issues one short code per recipe, lazily, and resolves codes back.
///
/// Codes are unique across all recipes and a recipe never gets a second
/// code, even under concurrent first requests: both are enforced by unique
/// constraints in the store.
pub struct ShortLinkService<L: ShortLinkRepository, R: RecipeRepository> {
    links: Arc<L>,
    recipes: Arc<R>,
    base_url: String,
}

impl<L: ShortLinkRepository, R: RecipeRepository> ShortLinkService<L, R> {
    /// Creates a new short link service.
    ///
    /// `base_url` is the public origin links are built against, e.g.
    /// `https://foodgram.example`.
    pub fn new(links: Arc<L>, recipes: Arc<R>, base_url: impl Into<String>) -> Self {
        Self {
            links,
            recipes,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Returns the recipe's short link, creating it on first request.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the recipe doesn't exist
    /// - [`AppError::Internal`] if no free code was found in 10 attempts
    pub async fn get_or_create(&self, recipe_id: i64) -> Result<ShortLink, AppError> {
        if self.recipes.find_by_id(recipe_id).await?.is_none() {
            return Err(AppError::not_found(
                "Recipe not found",
                json!({ "recipe_id": recipe_id }),
            ));
        }

        if let Some(link) = self.links.find_by_recipe(recipe_id).await? {
            return Ok(link);
        }

        for attempt in 1..=MAX_ATTEMPTS {
            let code = generate_code();

            if self.links.find_by_code(&code).await?.is_some() {
                tracing::debug!(attempt, "Short code collision, retrying");
                continue;
            }

            // None means another recipe claimed the code between the check and the insert.
            if let Some(link) = self.links.create(recipe_id, &code).await? {
                if link.code == code {
                    metrics::counter!("short_links_created_total").increment(1);
                    tracing::info!(recipe_id, code = %link.code, "Short link created");
                }
                return Ok(link);
            }
        }

        Err(AppError::internal(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions" }),
        ))
    }

    /// Looks up the link a code was issued for.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no recipe has this code.
    pub async fn resolve(&self, code: &str) -> Result<ShortLink, AppError> {
        let not_found = || AppError::not_found("Short link not found", json!({ "code": code }));

        if !is_valid_code(code) {
            return Err(not_found());
        }

        self.links.find_by_code(code).await?.ok_or_else(not_found)
    }

    /// The recipe's short link, if one was ever issued.
    ///
    /// Never creates a link. Used before deletion to find the cached code.
    pub async fn find_for_recipe(&self, recipe_id: i64) -> Result<Option<ShortLink>, AppError> {
        self.links.find_by_recipe(recipe_id).await
    }

    /// Public URL that redirects to the recipe.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/s/{}", self.base_url, code)
    }

    /// Public URL of the recipe page a short link points to.
    pub fn recipe_url(&self, recipe_id: i64) -> String {
        format!("{}/recipes/{}/", self.base_url, recipe_id)
    }
}
