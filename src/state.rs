//! Shared application state injected into every handler.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{
    AuthService, CatalogService, CollectionService, RecipeService, ShoppingListService,
    ShortLinkService, SubscriptionService, UserService,
};
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::persistence::{
    PgCollectionRepository, PgIngredientRepository, PgRecipeRepository, PgShortLinkRepository,
    PgSubscriptionRepository, PgTagRepository, PgTokenRepository, PgUserRepository,
};

pub type PgAuthService = AuthService<PgTokenRepository>;
pub type PgUserService = UserService<PgUserRepository, PgSubscriptionRepository>;
pub type PgRecipeService = RecipeService<
    PgRecipeRepository,
    PgIngredientRepository,
    PgTagRepository,
    PgCollectionRepository,
    PgUserRepository,
    PgSubscriptionRepository,
>;
pub type PgCollectionService = CollectionService<PgCollectionRepository, PgRecipeRepository>;
pub type PgShoppingListService = ShoppingListService<PgRecipeRepository>;
pub type PgShortLinkService = ShortLinkService<PgShortLinkRepository, PgRecipeRepository>;
pub type PgSubscriptionService =
    SubscriptionService<PgSubscriptionRepository, PgUserRepository, PgRecipeRepository>;
pub type PgCatalogService = CatalogService<PgTagRepository, PgIngredientRepository>;

/// Services wired to their PostgreSQL repositories, plus the cache.
#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<PgPool>,
    /// Public origin without a trailing slash.
    pub base_url: String,
    pub auth_service: Arc<PgAuthService>,
    pub user_service: Arc<PgUserService>,
    pub recipe_service: Arc<PgRecipeService>,
    pub collection_service: Arc<PgCollectionService>,
    pub shopping_list_service: Arc<PgShoppingListService>,
    pub short_link_service: Arc<PgShortLinkService>,
    pub subscription_service: Arc<PgSubscriptionService>,
    pub catalog_service: Arc<PgCatalogService>,
    pub cache: Arc<dyn CacheService>,
}

impl AppState {
    /// Builds every repository and service on top of `pool`.
    ///
    /// # Arguments
    ///
    /// - `token_signing_secret` - HMAC key for API tokens
    /// - `base_url` - public origin short links are built against
    pub fn new(
        pool: Arc<PgPool>,
        cache: Arc<dyn CacheService>,
        token_signing_secret: String,
        base_url: &str,
    ) -> Self {
        let users = Arc::new(PgUserRepository::new(pool.clone()));
        let tokens = Arc::new(PgTokenRepository::new(pool.clone()));
        let tags = Arc::new(PgTagRepository::new(pool.clone()));
        let ingredients = Arc::new(PgIngredientRepository::new(pool.clone()));
        let recipes = Arc::new(PgRecipeRepository::new(pool.clone()));
        let collections = Arc::new(PgCollectionRepository::new(pool.clone()));
        let subscriptions = Arc::new(PgSubscriptionRepository::new(pool.clone()));
        let short_links = Arc::new(PgShortLinkRepository::new(pool.clone()));

        let user_service = Arc::new(UserService::new(users.clone(), subscriptions.clone()));

        Self {
            auth_service: Arc::new(AuthService::new(tokens, token_signing_secret)),
            recipe_service: Arc::new(RecipeService::new(
                recipes.clone(),
                ingredients.clone(),
                tags.clone(),
                collections.clone(),
                user_service.clone(),
            )),
            collection_service: Arc::new(CollectionService::new(collections, recipes.clone())),
            shopping_list_service: Arc::new(ShoppingListService::new(recipes.clone())),
            short_link_service: Arc::new(ShortLinkService::new(
                short_links,
                recipes.clone(),
                base_url,
            )),
            subscription_service: Arc::new(SubscriptionService::new(
                subscriptions,
                users,
                recipes,
            )),
            catalog_service: Arc::new(CatalogService::new(tags, ingredients)),
            user_service,
            cache,
            pool,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}
