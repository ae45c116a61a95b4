//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and
//! receive the acting [`crate::domain::entities::Principal`] explicitly.
//!
//! # Available Services
//!
//! - [`services::recipe_service::RecipeService`] - Recipe aggregate CRUD and listing
//! - [`services::collection_service::CollectionService`] - Shopping cart and favorites toggles
//! - [`services::shopping_list_service::ShoppingListService`] - Cart ingredient aggregation
//! - [`services::short_link_service::ShortLinkService`] - Short code issue and resolution
//! - [`services::subscription_service::SubscriptionService`] - Follow/unfollow
//! - [`services::user_service::UserService`] - Registration, profiles, avatars
//! - [`services::catalog_service::CatalogService`] - Tags and ingredients
//! - [`services::auth_service::AuthService`] - API token authentication
//!
//! Invariant checks that don't need the store live in [`validation`].

pub mod services;
pub mod validation;
