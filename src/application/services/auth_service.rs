//! Authentication service for API token validation.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::entities::Principal;
use crate::domain::repositories::{ApiToken, TokenRepository};
use crate::error::AppError;
use crate::utils::code_generator::generate_token;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

/// Hashes a raw token with HMAC-SHA256 keyed by `signing_secret`.
///
/// Returns a 64-character lowercase hex-encoded MAC. The admin CLI and the
/// request path must agree on this function, so both call it.
pub fn hash_token(signing_secret: &str, token: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(signing_secret.as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(token.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Service for resolving Bearer tokens to a [`Principal`].
///
/// Only hashes are stored, so a read-only view of the database is not enough
/// to verify or forge tokens without the server-side secret.
pub struct AuthService<R: TokenRepository> {
    repository: Arc<R>,
    signing_secret: String,
}

impl<R: TokenRepository> AuthService<R> {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `repository` - token repository for DB operations
    /// - `signing_secret` - HMAC key; must match the value used when tokens were created
    pub fn new(repository: Arc<R>, signing_secret: String) -> Self {
        Self {
            repository,
            signing_secret,
        }
    }

    /// Resolves a raw token to the user it was issued for.
    ///
    /// On success the token's `last_used_at` is refreshed; a failure there
    /// is logged and does not fail the request.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is unknown or revoked.
    pub async fn authenticate(&self, token: &str) -> Result<Principal, AppError> {
        let token_hash = hash_token(&self.signing_secret, token);

        let Some(user_id) = self.repository.find_user_id(&token_hash).await? else {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Invalid or revoked token"}),
            ));
        };

        if let Err(e) = self.repository.update_last_used(&token_hash).await {
            tracing::warn!(user_id, error = %e, "Failed to update token last_used_at");
        }

        Ok(Principal::new(user_id))
    }

    /// Issues a new token for `user_id` and returns the raw value once.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AlreadyExists`] if `name` is already used and
    /// [`AppError::UnknownReference`] if the user does not exist.
    pub async fn issue_token(
        &self,
        user_id: i64,
        name: &str,
    ) -> Result<(String, ApiToken), AppError> {
        let raw = generate_token();
        let token_hash = hash_token(&self.signing_secret, &raw);
        let token = self
            .repository
            .create_token(user_id, name, &token_hash)
            .await?;

        tracing::info!(user_id, token_id = token.id, "API token issued");
        Ok((raw, token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockTokenRepository;
    use chrono::Utc;

    fn test_secret() -> String {
        "test-signing-secret".to_string()
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let mut mock_repo = MockTokenRepository::new();

        let token = "valid-token";
        let expected_hash = hash_token(&test_secret(), token);
        let expected_for_update = expected_hash.clone();

        mock_repo
            .expect_find_user_id()
            .withf(move |hash| hash == expected_hash)
            .times(1)
            .returning(|_| Ok(Some(7)));

        mock_repo
            .expect_update_last_used()
            .withf(move |hash| hash == expected_for_update)
            .times(1)
            .returning(|_| Ok(()));

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        let principal = service.authenticate(token).await.unwrap();

        assert_eq!(principal, Principal::new(7));
    }

    #[tokio::test]
    async fn test_authenticate_invalid_token() {
        let mut mock_repo = MockTokenRepository::new();

        mock_repo
            .expect_find_user_id()
            .times(1)
            .returning(|_| Ok(None));
        mock_repo.expect_update_last_used().never();

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        let result = service.authenticate("invalid-token").await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_authenticate_survives_last_used_failure() {
        let mut mock_repo = MockTokenRepository::new();

        mock_repo
            .expect_find_user_id()
            .returning(|_| Ok(Some(3)));
        mock_repo
            .expect_update_last_used()
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        assert_eq!(service.authenticate("t").await.unwrap().user_id, 3);
    }

    #[tokio::test]
    async fn test_issue_token_stores_hash_of_returned_value() {
        let mut mock_repo = MockTokenRepository::new();

        mock_repo
            .expect_create_token()
            .withf(|user_id, name, hash| *user_id == 5 && name == "mobile" && hash.len() == 64)
            .times(1)
            .returning(|user_id, name, hash| {
                Ok(ApiToken {
                    id: 1,
                    user_id,
                    name: name.to_string(),
                    token_hash: hash.to_string(),
                    created_at: Utc::now(),
                    last_used_at: None,
                    revoked_at: None,
                })
            });

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        let (raw, stored) = service.issue_token(5, "mobile").await.unwrap();

        assert_eq!(stored.token_hash, hash_token(&test_secret(), &raw));
    }

    #[test]
    fn test_hash_token_consistency() {
        let hash1 = hash_token(&test_secret(), "test-token");
        let hash2 = hash_token(&test_secret(), "test-token");

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
        assert_ne!(hash1, hash_token(&test_secret(), "other-token"));
    }

    #[test]
    fn test_hash_token_secret_matters() {
        assert_ne!(hash_token("secret-a", "token"), hash_token("secret-b", "token"));
    }
}
