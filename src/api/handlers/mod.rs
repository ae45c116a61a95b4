//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod catalog;
pub mod collections;
pub mod health;
pub mod recipes;
pub mod short_links;
pub mod subscriptions;
pub mod users;

pub use catalog::{
    get_ingredient_handler, get_tag_handler, list_ingredients_handler, list_tags_handler,
};
pub use collections::{
    add_to_cart_handler, add_to_favorites_handler, download_shopping_cart_handler,
    remove_from_cart_handler, remove_from_favorites_handler,
};
pub use health::health_handler;
pub use recipes::{
    create_recipe_handler, delete_recipe_handler, get_recipe_handler, list_recipes_handler,
    update_recipe_handler,
};
pub use short_links::{get_link_handler, redirect_handler};
pub use subscriptions::{subscribe_handler, subscriptions_handler, unsubscribe_handler};
pub use users::{
    delete_avatar_handler, get_user_handler, list_users_handler, me_handler, register_handler,
    set_avatar_handler,
};
