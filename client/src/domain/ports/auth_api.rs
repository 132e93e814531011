//! Driven port for the backend's token and identity endpoints.

use async_trait::async_trait;

use super::ApiError;
use crate::domain::{LoginCredentials, TokenPair, User};

/// Port for exchanging credentials and resolving the bearer's identity.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for an access/refresh token pair.
    async fn obtain_tokens(&self, credentials: &LoginCredentials) -> Result<TokenPair, ApiError>;

    /// Mint a new access token from a refresh token.
    async fn refresh_access_token(&self, refresh_token: &str) -> Result<String, ApiError>;

    /// "Who am I": the user the stored access token belongs to.
    async fn fetch_current_user(&self) -> Result<User, ApiError>;
}
