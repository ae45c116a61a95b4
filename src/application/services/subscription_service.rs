//! Follow and unfollow authors.

use std::sync::Arc;

use serde_json::json;

use crate::application::services::user_service::UserProfile;
use crate::application::validation::ensure_not_self;
use crate::domain::entities::{Page, PageRequest, Principal, Recipe, RecipeFilter, User};
use crate::domain::repositories::{RecipeRepository, SubscriptionRepository, UserRepository};
use crate::error::AppError;

/// Default number of recipes shown per followed author.
pub const DEFAULT_RECIPES_LIMIT: u32 = 3;

/// A followed author with a preview of their recipes.
#[derive(Debug, Clone)]
pub struct AuthorWithRecipes {
    pub profile: UserProfile,
    pub recipes: Vec<Recipe>,
    pub recipes_count: i64,
}

/// Service for follower relations between users.
///
/// A user can follow an author once and never themselves. Listings show
/// each followed author with a preview of their newest recipes.
pub struct SubscriptionService<S, U, R>
where
    S: SubscriptionRepository,
    U: UserRepository,
    R: RecipeRepository,
{
    subscriptions: Arc<S>,
    users: Arc<U>,
    recipes: Arc<R>,
}

impl<S, U, R> SubscriptionService<S, U, R>
where
    S: SubscriptionRepository,
    U: UserRepository,
    R: RecipeRepository,
{
    /// Creates a new subscription service.
    pub fn new(subscriptions: Arc<S>, users: Arc<U>, recipes: Arc<R>) -> Self {
        Self {
            subscriptions,
            users,
            recipes,
        }
    }

    async fn require_author(&self, author_id: i64) -> Result<User, AppError> {
        self.users
            .find_by_id(author_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "user_id": author_id })))
    }

    async fn with_recipes(
        &self,
        author: User,
        recipes_limit: u32,
    ) -> Result<AuthorWithRecipes, AppError> {
        let filter = RecipeFilter {
            author_id: Some(author.id),
            ..RecipeFilter::default()
        };
        let recipes = self
            .recipes
            .list(filter.clone(), 0, i64::from(recipes_limit))
            .await?;
        let recipes_count = self.recipes.count(filter).await?;

        Ok(AuthorWithRecipes {
            profile: UserProfile {
                user: author,
                is_subscribed: true,
            },
            recipes,
            recipes_count,
        })
    }

    /// Makes the principal follow `author_id`.
    ///
    /// # Errors
    ///
    /// - [`AppError::SelfReference`] if the principal is the author
    /// - [`AppError::NotFound`] if the author doesn't exist
    /// - [`AppError::AlreadyExists`] if already following
    pub async fn subscribe(
        &self,
        principal: Principal,
        author_id: i64,
        recipes_limit: u32,
    ) -> Result<AuthorWithRecipes, AppError> {
        ensure_not_self(principal, author_id)?;
        let author = self.require_author(author_id).await?;

        if self
            .subscriptions
            .exists(author_id, principal.user_id)
            .await?
        {
            return Err(AppError::already_exists(
                "You are already subscribed to this user",
                json!({ "user_id": author_id }),
            ));
        }

        self.subscriptions
            .create(author_id, principal.user_id)
            .await?;
        tracing::info!(subscriber_id = principal.user_id, author_id, "Subscribed");

        self.with_recipes(author, recipes_limit).await
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the author doesn't exist or isn't followed.
    pub async fn unsubscribe(&self, principal: Principal, author_id: i64) -> Result<(), AppError> {
        self.require_author(author_id).await?;

        if !self
            .subscriptions
            .delete(author_id, principal.user_id)
            .await?
        {
            return Err(AppError::not_found(
                "You are not subscribed to this user",
                json!({ "user_id": author_id }),
            ));
        }
        tracing::info!(subscriber_id = principal.user_id, author_id, "Unsubscribed");

        Ok(())
    }

    /// Authors the principal follows, each with up to `recipes_limit` recipes.
    pub async fn subscriptions(
        &self,
        principal: Principal,
        request: PageRequest,
        recipes_limit: u32,
    ) -> Result<Page<AuthorWithRecipes>, AppError> {
        let authors = self
            .subscriptions
            .list_authors(principal.user_id, request.offset(), request.limit())
            .await?;
        let count = self.subscriptions.count_authors(principal.user_id).await?;

        let mut items = Vec::with_capacity(authors.len());
        for author in authors {
            items.push(self.with_recipes(author, recipes_limit).await?);
        }

        Ok(Page {
            items,
            count,
            request,
        })
    }
}
