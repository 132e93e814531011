//! Session lifecycle: restoring, opening and closing the signed-in session.
//!
//! The service owns the transitions of the current user held in
//! [`AppState`] and keeps the persisted tokens in step with them. Every
//! other caller talks to the API ports directly.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::ports::{AccountsApi, ApiError, AuthApi, TokenStore, TokenStoreError};
use crate::domain::{
    AppState, Destination, Error, FieldErrors, LoginCredentials, NewAccount, ProfileForm, User,
};

/// Message shown when the credential exchange is rejected.
pub const SIGN_IN_FAILED_MESSAGE: &str =
    "Sign in failed. Please check your username and password and try again.";

/// Keys the sign-up form reports from a backend rejection, in order.
pub const ACCOUNT_ERROR_FIELDS: [&str; 3] = ["email", "phone_number", "username"];

/// Keys holding the reason a verification step was refused, in priority order.
const VERIFICATION_ERROR_FIELDS: [&str; 2] = ["error", "code"];

fn map_token_store_error(error: TokenStoreError) -> Error {
    Error::internal(format!("session token storage failed: {error}"))
}

fn verification_error(error: ApiError, fallback: &str) -> Error {
    match error {
        ApiError::Validation { errors } => {
            let message = errors
                .first_of(&VERIFICATION_ERROR_FIELDS)
                .unwrap_or(fallback)
                .to_owned();
            Error::invalid_request(message).with_details(errors.to_json())
        }
        other => Error::from(other),
    }
}

/// Session manager over the auth, accounts and token-store ports.
pub struct SessionService<A, C, T> {
    auth: Arc<A>,
    accounts: Arc<C>,
    tokens: Arc<T>,
    state: AppState,
}

impl<A, C, T> Clone for SessionService<A, C, T> {
    fn clone(&self) -> Self {
        Self {
            auth: Arc::clone(&self.auth),
            accounts: Arc::clone(&self.accounts),
            tokens: Arc::clone(&self.tokens),
            state: self.state.clone(),
        }
    }
}

impl<A, C, T> SessionService<A, C, T> {
    pub fn new(auth: Arc<A>, accounts: Arc<C>, tokens: Arc<T>, state: AppState) -> Self {
        Self {
            auth,
            accounts,
            tokens,
            state,
        }
    }

    /// Shared application state the service writes to.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.current_user()
    }

    /// Replace the signed-in user, e.g. with a record the backend returned.
    pub fn replace_user(&self, user: User) {
        self.state.set_user(user);
    }

    /// Flow the current user belongs in.
    pub fn destination(&self) -> Destination {
        self.state.destination()
    }
}

impl<A, C, T> SessionService<A, C, T>
where
    A: AuthApi,
    C: AccountsApi,
    T: TokenStore,
{
    /// Resume a stored session at start-up.
    ///
    /// Without an access token nothing is requested. With one, the bearer is
    /// resolved through "who am I"; any failure leaves the session signed
    /// out. Expired tokens and unreachable backends are not told apart.
    pub async fn restore_session(&self) -> Option<User> {
        let token = match self.tokens.access_token().await {
            Ok(token) => token,
            Err(error) => {
                warn!(%error, "could not read stored access token; starting signed out");
                None
            }
        };
        if token.is_none() {
            debug!("no stored access token");
            return None;
        }

        match self.auth.fetch_current_user().await {
            Ok(user) => {
                info!(user_id = %user.id, verified = user.is_verified, "session restored");
                self.state.set_user(user.clone());
                Some(user)
            }
            Err(error) => {
                warn!(%error, "stored session could not be resumed");
                None
            }
        }
    }

    /// Exchange credentials for tokens, persist both, then resolve the user.
    ///
    /// Tokens are written only after a successful exchange, and before the
    /// "who am I" request so it carries the new bearer credential.
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<User, Error> {
        let credentials = LoginCredentials::try_from_parts(username, password)
            .map_err(|err| Error::validation(&err.to_field_errors()))?;

        let tokens = self
            .auth
            .obtain_tokens(&credentials)
            .await
            .map_err(|error| match error {
                ApiError::Unauthorized { .. } | ApiError::Validation { .. } => {
                    debug!(%error, "credential exchange rejected");
                    Error::unauthorized(SIGN_IN_FAILED_MESSAGE)
                }
                other => Error::from(other),
            })?;

        self.tokens
            .store(&tokens)
            .await
            .map_err(map_token_store_error)?;

        match self.auth.fetch_current_user().await {
            Ok(user) => {
                info!(user_id = %user.id, verified = user.is_verified, "signed in");
                self.state.set_user(user.clone());
                Ok(user)
            }
            Err(error) => {
                // Do not leave a token behind for a session that never opened.
                if let Err(clear_error) = self.tokens.clear().await {
                    warn!(error = %clear_error, "could not discard tokens after failed sign-in");
                }
                Err(Error::from(error))
            }
        }
    }

    /// Create an account, then sign in with the submitted credentials.
    pub async fn sign_up(&self, account: NewAccount) -> Result<User, Error> {
        let submission = account.validate().map_err(|errors| Error::validation(&errors))?;

        let created = self.accounts.create_user(&submission).await?;
        info!(user_id = %created.id, "account created");

        self.sign_in(&submission.username, submission.password.as_str())
            .await
    }

    /// Forget the signed-in user and delete both stored tokens.
    ///
    /// The backend is not told; issued tokens stay valid until they expire.
    pub async fn sign_out(&self) -> Result<(), Error> {
        self.state.clear_user();
        self.tokens.clear().await.map_err(map_token_store_error)?;
        info!("signed out");
        Ok(())
    }

    /// Submit an edited profile for the signed-in user and adopt the
    /// backend's returned record.
    pub async fn update_profile(&self, form: ProfileForm) -> Result<User, Error> {
        let current = self
            .state
            .current_user()
            .ok_or_else(|| Error::unauthorized("sign in to edit your profile"))?;
        let submission = form.validate().map_err(|errors| Error::validation(&errors))?;

        let updated = self.accounts.update_user(current.id, &submission).await?;
        self.state.set_user(updated.clone());
        Ok(updated)
    }

    /// Text a verification code to the signed-in user's phone.
    pub async fn request_verification_code(&self) -> Result<String, Error> {
        self.accounts
            .send_verification_code()
            .await
            .map_err(|error| verification_error(error, "Could not send a verification code."))
    }

    /// Check a verification code and adopt the backend's updated record.
    pub async fn confirm_verification(&self, code: &str) -> Result<User, Error> {
        let code = code.trim();
        if code.is_empty() {
            let mut errors = FieldErrors::new();
            errors.push("code", "Enter the code you received.");
            return Err(Error::validation(&errors));
        }

        self.accounts
            .check_verification_code(code)
            .await
            .map_err(|error| {
                verification_error(error, "Could not verify phone number, please try again.")
            })?;

        let user = self.auth.fetch_current_user().await?;
        info!(user_id = %user.id, verified = user.is_verified, "verification confirmed");
        self.state.set_user(user.clone());
        Ok(user)
    }
}

#[cfg(test)]
#[path = "session_service_tests.rs"]
mod tests;
