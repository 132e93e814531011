//! Token and identity endpoints.

use async_trait::async_trait;

use super::client::ApiClient;
use super::dto::{AccessTokenDto, CredentialsBody, RefreshBody, TokenPairDto, UserDto};
use crate::domain::ports::{ApiError, AuthApi};
use crate::domain::{LoginCredentials, TokenPair, User};

pub(super) const TOKEN_PATH: &str = "token/";
pub(super) const TOKEN_REFRESH_PATH: &str = "token/refresh/";
pub(super) const CURRENT_USER_PATH: &str = "get-me/";

#[async_trait]
impl AuthApi for ApiClient {
    async fn obtain_tokens(&self, credentials: &LoginCredentials) -> Result<TokenPair, ApiError> {
        let body = CredentialsBody {
            username: credentials.username(),
            password: credentials.password(),
        };
        let tokens: TokenPairDto = self.post_json(TOKEN_PATH, &body).await?;
        Ok(tokens.into_domain())
    }

    async fn refresh_access_token(&self, refresh_token: &str) -> Result<String, ApiError> {
        let body = RefreshBody {
            refresh: refresh_token,
        };
        let token: AccessTokenDto = self.post_json(TOKEN_REFRESH_PATH, &body).await?;
        Ok(token.access)
    }

    async fn fetch_current_user(&self) -> Result<User, ApiError> {
        let user: UserDto = self.get_json(CURRENT_USER_PATH, &[]).await?;
        Ok(user.into_domain())
    }
}
