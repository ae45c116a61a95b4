//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with
//! runtime-checked queries mapped through `sqlx::FromRow`.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - User accounts
//! - [`PgTokenRepository`] - API token storage and validation
//! - [`PgTagRepository`] / [`PgIngredientRepository`] - Reference data
//! - [`PgRecipeRepository`] - Recipe aggregate writes and filtered listing
//! - [`PgCollectionRepository`] - Shopping cart and favorites
//! - [`PgSubscriptionRepository`] - Follower relations
//! - [`PgShortLinkRepository`] - Recipe short codes

pub mod pg_collection_repository;
pub mod pg_ingredient_repository;
pub mod pg_recipe_repository;
pub mod pg_short_link_repository;
pub mod pg_subscription_repository;
pub mod pg_tag_repository;
pub mod pg_token_repository;
pub mod pg_user_repository;

pub use pg_collection_repository::PgCollectionRepository;
pub use pg_ingredient_repository::PgIngredientRepository;
pub use pg_recipe_repository::PgRecipeRepository;
pub use pg_short_link_repository::PgShortLinkRepository;
pub use pg_subscription_repository::PgSubscriptionRepository;
pub use pg_tag_repository::PgTagRepository;
pub use pg_token_repository::PgTokenRepository;
pub use pg_user_repository::PgUserRepository;
