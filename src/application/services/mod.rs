//! Business logic services for the application layer.

pub mod auth_service;
pub mod catalog_service;
pub mod collection_service;
pub mod recipe_service;
pub mod shopping_list_service;
pub mod short_link_service;
pub mod subscription_service;
pub mod user_service;

pub use auth_service::AuthService;
pub use catalog_service::CatalogService;
pub use collection_service::CollectionService;
pub use recipe_service::{RecipeDetails, RecipeQuery, RecipeService};
pub use shopping_list_service::{ShoppingListItem, ShoppingListService};
pub use short_link_service::ShortLinkService;
pub use subscription_service::{AuthorWithRecipes, SubscriptionService};
pub use user_service::{UserProfile, UserService};
