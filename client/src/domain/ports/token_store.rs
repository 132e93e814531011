//! Driven port for the persisted session tokens.
//!
//! Two string values under fixed keys: written together after a successful
//! sign-in, read before every outgoing request, cleared together on
//! sign-out.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::TokenPair;

/// Key of the persisted access token.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";
/// Key of the persisted refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

define_port_error! {
    /// Errors surfaced by token storage adapters.
    pub enum TokenStoreError {
        /// The backing storage could not be read or written.
        Io { message: String } =>
            "token storage failed: {message}",
        /// Stored data exists but cannot be parsed.
        Corrupt { message: String } =>
            "stored tokens are corrupt: {message}",
    }
}

/// Port for reading and writing the session tokens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Persisted access token, if any.
    async fn access_token(&self) -> Result<Option<String>, TokenStoreError>;

    /// Persisted refresh token, if any.
    async fn refresh_token(&self) -> Result<Option<String>, TokenStoreError>;

    /// Persist both tokens, replacing anything stored before.
    async fn store(&self, tokens: &TokenPair) -> Result<(), TokenStoreError>;

    /// Remove both tokens. Clearing an empty store succeeds.
    async fn clear(&self) -> Result<(), TokenStoreError>;
}
