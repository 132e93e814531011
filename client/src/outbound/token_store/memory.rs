//! Process-local token storage.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::TokenPair;
use crate::domain::ports::{TokenStore, TokenStoreError};

/// Keeps the token pair in memory; nothing survives the process.
#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    tokens: Mutex<Option<TokenPair>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `tokens`.
    pub fn with_tokens(tokens: TokenPair) -> Self {
        Self {
            tokens: Mutex::new(Some(tokens)),
        }
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn access_token(&self) -> Result<Option<String>, TokenStoreError> {
        Ok(self
            .tokens
            .lock()
            .await
            .as_ref()
            .map(|pair| pair.access().to_owned()))
    }

    async fn refresh_token(&self) -> Result<Option<String>, TokenStoreError> {
        Ok(self
            .tokens
            .lock()
            .await
            .as_ref()
            .map(|pair| pair.refresh().to_owned()))
    }

    async fn store(&self, tokens: &TokenPair) -> Result<(), TokenStoreError> {
        *self.tokens.lock().await = Some(tokens.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), TokenStoreError> {
        *self.tokens.lock().await = None;
        Ok(())
    }
}
