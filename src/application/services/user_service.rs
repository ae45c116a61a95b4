//! User registration, profiles and avatars.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{NewUser, Page, PageRequest, Principal, User};
use crate::domain::repositories::{SubscriptionRepository, UserRepository};
use crate::error::AppError;

/// A user as seen by a (possibly anonymous) viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub user: User,
    /// Whether the viewer follows this user. Always `false` for anonymous viewers.
    pub is_subscribed: bool,
}

/// Service for user accounts, profiles and avatars.
pub struct UserService<U: UserRepository, S: SubscriptionRepository> {
    users: Arc<U>,
    subscriptions: Arc<S>,
}

impl<U: UserRepository, S: SubscriptionRepository> UserService<U, S> {
    /// Creates a new user service.
    pub fn new(users: Arc<U>, subscriptions: Arc<S>) -> Self {
        Self {
            users,
            subscriptions,
        }
    }

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AlreadyExists`] if the email or username is taken.
    pub async fn register(&self, new_user: NewUser) -> Result<User, AppError> {
        if self.users.find_by_email(&new_user.email).await?.is_some() {
            return Err(AppError::already_exists(
                "A user with this email already exists",
                json!({ "email": new_user.email }),
            ));
        }

        let user = self.users.create(new_user).await?;
        tracing::info!(user_id = user.id, username = %user.username, "User registered");

        Ok(user)
    }

    /// Loads a user or fails with [`AppError::NotFound`].
    pub async fn require(&self, id: i64) -> Result<User, AppError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "user_id": id })))
    }

    /// Wraps `user` with the viewer's subscription flag.
    pub async fn profile_of(
        &self,
        viewer: Option<Principal>,
        user: User,
    ) -> Result<UserProfile, AppError> {
        let is_subscribed = match viewer {
            Some(principal) if principal.user_id != user.id => {
                self.subscriptions
                    .exists(user.id, principal.user_id)
                    .await?
            }
            _ => false,
        };

        Ok(UserProfile {
            user,
            is_subscribed,
        })
    }

    /// Loads a user's profile as seen by `viewer`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user doesn't exist.
    pub async fn profile(
        &self,
        viewer: Option<Principal>,
        id: i64,
    ) -> Result<UserProfile, AppError> {
        let user = self.require(id).await?;
        self.profile_of(viewer, user).await
    }

    /// The principal's own profile.
    pub async fn me(&self, principal: Principal) -> Result<UserProfile, AppError> {
        self.profile(Some(principal), principal.user_id).await
    }

    /// Lists users in registration order.
    pub async fn list(
        &self,
        viewer: Option<Principal>,
        request: PageRequest,
    ) -> Result<Page<UserProfile>, AppError> {
        let users = self.users.list(request.offset(), request.limit()).await?;
        let count = self.users.count().await?;

        let mut items = Vec::with_capacity(users.len());
        for user in users {
            items.push(self.profile_of(viewer, user).await?);
        }

        Ok(Page {
            items,
            count,
            request,
        })
    }

    /// Replaces the principal's avatar reference.
    pub async fn set_avatar(&self, principal: Principal, avatar: String) -> Result<User, AppError> {
        let user = self
            .users
            .set_avatar(principal.user_id, Some(avatar))
            .await?;
        tracing::debug!(user_id = user.id, "Avatar updated");

        Ok(user)
    }

    /// Clears the principal's avatar.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no avatar is set.
    pub async fn remove_avatar(&self, principal: Principal) -> Result<(), AppError> {
        let user = self.require(principal.user_id).await?;

        if !user.has_avatar() {
            return Err(AppError::not_found(
                "Avatar is not set",
                json!({ "user_id": user.id }),
            ));
        }

        self.users.set_avatar(user.id, None).await?;
        tracing::debug!(user_id = user.id, "Avatar removed");

        Ok(())
    }
}
