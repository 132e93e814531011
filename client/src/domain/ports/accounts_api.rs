//! Driven port for account creation, profile edits and phone verification.

use async_trait::async_trait;

use super::ApiError;
use crate::domain::{AccountSubmission, ProfileSubmission, University, User, UserId};

/// Port for the user-account endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountsApi: Send + Sync {
    /// Create an account, uploading the profile picture.
    async fn create_user(&self, account: &AccountSubmission) -> Result<User, ApiError>;

    /// Replace the profile fields of an existing account.
    async fn update_user(&self, id: UserId, profile: &ProfileSubmission) -> Result<User, ApiError>;

    /// Ask the backend to text a verification code to the user's phone.
    /// Returns the backend's confirmation message.
    async fn send_verification_code(&self) -> Result<String, ApiError>;

    /// Check a verification code. Returns the backend's confirmation message.
    async fn check_verification_code(&self, code: &str) -> Result<String, ApiError>;

    /// Reference list of universities, ordered by name.
    async fn list_universities(&self) -> Result<Vec<University>, ApiError>;
}
