//! Account creation, profile edits, phone verification and universities.

use async_trait::async_trait;
use reqwest::Method;

use super::client::ApiClient;
use super::dto::{CodeBody, MessageDto, UniversityDto, UserDto};
use super::forms::{account_form, profile_form};
use crate::domain::ports::{AccountsApi, ApiError};
use crate::domain::{AccountSubmission, ProfileSubmission, University, User, UserId};

pub(super) const USERS_PATH: &str = "users/user/";
pub(super) const VERIFICATION_PATH: &str = "verification-code/";
pub(super) const UNIVERSITIES_PATH: &str = "universities/";

fn user_path(id: UserId) -> String {
    format!("{USERS_PATH}{id}/")
}

#[async_trait]
impl AccountsApi for ApiClient {
    async fn create_user(&self, account: &AccountSubmission) -> Result<User, ApiError> {
        let form = account_form(account)?;
        let user: UserDto = self.send_multipart(Method::POST, USERS_PATH, form).await?;
        Ok(user.into_domain())
    }

    async fn update_user(&self, id: UserId, profile: &ProfileSubmission) -> Result<User, ApiError> {
        let form = profile_form(profile)?;
        let user: UserDto = self
            .send_multipart(Method::PUT, &user_path(id), form)
            .await?;
        Ok(user.into_domain())
    }

    async fn send_verification_code(&self) -> Result<String, ApiError> {
        let reply: MessageDto = self.get_json(VERIFICATION_PATH, &[]).await?;
        Ok(reply.message)
    }

    async fn check_verification_code(&self, code: &str) -> Result<String, ApiError> {
        let reply: MessageDto = self
            .post_json(VERIFICATION_PATH, &CodeBody { code })
            .await?;
        Ok(reply.message)
    }

    async fn list_universities(&self) -> Result<Vec<University>, ApiError> {
        let universities: Vec<UniversityDto> = self.get_json(UNIVERSITIES_PATH, &[]).await?;
        Ok(universities
            .into_iter()
            .map(UniversityDto::into_domain)
            .collect())
    }
}
