//! Core domain entities representing the recipe-sharing data model.
//!
//! Entities are plain data structures mirroring persisted records. Creation
//! and mutation inputs live next to them as separate structs:
//!
//! - [`User`] / [`NewUser`] - registered accounts, plus the acting [`Principal`]
//! - [`Tag`], [`Ingredient`] - shared reference data
//! - [`Recipe`] / [`RecipeDraft`] - the recipe aggregate and its ingredient lines
//! - [`Subscription`] - follower relation between two users
//! - [`ShortLink`] - short code issued for a recipe
//! - [`RecipeCollection`] - per-user recipe lists (shopping cart, favorites)
//! - [`PageRequest`] / [`Page`] - offset pagination

pub mod collection;
pub mod ingredient;
pub mod page;
pub mod recipe;
pub mod short_link;
pub mod subscription;
pub mod tag;
pub mod user;

pub use collection::RecipeCollection;
pub use ingredient::Ingredient;
pub use page::{Page, PageRequest};
pub use recipe::{
    CartIngredientLine, IngredientAmount, Recipe, RecipeDraft, RecipeFilter, RecipeIngredient,
};
pub use short_link::ShortLink;
pub use subscription::Subscription;
pub use tag::Tag;
pub use user::{NewUser, Principal, User};
