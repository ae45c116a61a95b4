//! DTOs for user, avatar and subscription endpoints.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use std::sync::LazyLock;
use validator::Validate;

use crate::api::dto::recipe::RecipeSummaryView;
use crate::application::services::{AuthorWithRecipes, UserProfile};
use crate::application::services::subscription_service::DEFAULT_RECIPES_LIMIT;
use crate::domain::entities::{NewUser, User};

/// Letters, digits and `@ . + - _`.
static USERNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.@+-]+\z").expect("valid username regex"));

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email address"), length(max = 254))]
    pub email: String,

    #[validate(length(min = 1, max = 150))]
    #[validate(regex(path = "*USERNAME_REGEX", message = "Invalid characters in username"))]
    pub username: String,

    #[validate(length(min = 1, max = 150))]
    pub first_name: String,

    #[validate(length(min = 1, max = 150))]
    pub last_name: String,
}

impl From<RegisterRequest> for NewUser {
    fn from(req: RegisterRequest) -> Self {
        Self {
            email: req.email,
            username: req.username,
            first_name: req.first_name,
            last_name: req.last_name,
        }
    }
}

/// Response to a successful registration.
#[derive(Debug, Serialize)]
pub struct RegisteredUserView {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<User> for RegisteredUserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub is_subscribed: bool,
}

impl From<UserProfile> for UserView {
    fn from(profile: UserProfile) -> Self {
        let UserProfile {
            user,
            is_subscribed,
        } = profile;

        Self {
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            avatar: user.avatar.filter(|a| !a.is_empty()),
            is_subscribed,
        }
    }
}

/// A followed author with a preview of their recipes.
#[derive(Debug, Serialize)]
pub struct UserWithRecipesView {
    #[serde(flatten)]
    pub user: UserView,
    pub recipes: Vec<RecipeSummaryView>,
    pub recipes_count: i64,
}

impl From<AuthorWithRecipes> for UserWithRecipesView {
    fn from(author: AuthorWithRecipes) -> Self {
        Self {
            user: author.profile.into(),
            recipes: author.recipes.into_iter().map(Into::into).collect(),
            recipes_count: author.recipes_count,
        }
    }
}

/// Avatar upload. The value is an opaque reference to the stored image.
#[derive(Debug, Deserialize, Validate)]
pub struct AvatarRequest {
    #[validate(length(min = 1, max = 512, message = "Avatar must not be empty"))]
    pub avatar: String,
}

#[derive(Debug, Serialize)]
pub struct AvatarResponse {
    pub avatar: Option<String>,
}

/// `?recipes_limit=N` on subscription endpoints.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct RecipesLimitParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub recipes_limit: Option<u32>,
}

impl RecipesLimitParams {
    pub fn get(&self) -> u32 {
        self.recipes_limit.unwrap_or(DEFAULT_RECIPES_LIMIT)
    }
}
