//! Sign-in credentials and the token pair the backend issues for them.

use std::fmt;

use zeroize::Zeroizing;

use super::validation::FieldErrors;

/// Why a sign-in form was refused before any request was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsError {
    #[error("Enter your username.")]
    MissingUsername,
    #[error("Enter your password.")]
    MissingPassword,
}

impl CredentialsError {
    /// Form field the message belongs to.
    pub fn field(self) -> &'static str {
        match self {
            Self::MissingUsername => "username",
            Self::MissingPassword => "password",
        }
    }

    /// Single-entry field errors, ready for [`Error::validation`](super::Error::validation).
    pub fn to_field_errors(self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.push(self.field(), self.to_string());
        errors
    }
}

/// Username and password for the token exchange.
///
/// The username is stored trimmed; the password is kept exactly as typed
/// and wiped on drop.
///
/// # Examples
/// ```
/// use mycollegebook::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" gburdell ", "ramblin").unwrap();
/// assert_eq!(creds.username(), "gburdell");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, CredentialsError> {
        let username = match username.trim() {
            "" => return Err(CredentialsError::MissingUsername),
            trimmed => trimmed.to_owned(),
        };
        if password.is_empty() {
            return Err(CredentialsError::MissingPassword);
        }
        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Access and refresh tokens issued by the backend.
///
/// Both values are wiped from memory when dropped. `Debug` never prints
/// token material.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenPair {
    access: Zeroizing<String>,
    refresh: Zeroizing<String>,
}

impl TokenPair {
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access: Zeroizing::new(access.into()),
            refresh: Zeroizing::new(refresh.into()),
        }
    }

    /// Short-lived bearer credential attached to outgoing requests.
    pub fn access(&self) -> &str {
        &self.access
    }

    /// Long-lived credential used to mint a new access token.
    pub fn refresh(&self) -> &str {
        &self.refresh
    }
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access", &"<redacted>")
            .field("refresh", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::empty_username("", "pw", CredentialsError::MissingUsername)]
    #[case::blank_username(" \t ", "pw", CredentialsError::MissingUsername)]
    #[case::empty_password("gburdell", "", CredentialsError::MissingPassword)]
    fn incomplete_forms_are_refused(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: CredentialsError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("incomplete form");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn refusal_names_the_field() {
        let errors = CredentialsError::MissingPassword.to_field_errors();
        assert_eq!(errors.get("password"), Some(&["Enter your password.".to_owned()][..]));
    }

    #[rstest]
    fn password_whitespace_is_significant() {
        let creds = LoginCredentials::try_from_parts("  alice ", " two words ")
            .expect("complete form");
        assert_eq!(creds.username(), "alice");
        assert_eq!(creds.password(), " two words ");
    }

    #[rstest]
    fn secrets_stay_out_of_debug_output() {
        let creds = LoginCredentials::try_from_parts("alice", "hunter2").expect("complete form");
        let pair = TokenPair::new("access-abc", "refresh-xyz");
        let rendered = format!("{creds:?} {pair:?}");
        assert!(rendered.contains("alice"));
        for secret in ["hunter2", "access-abc", "refresh-xyz"] {
            assert!(!rendered.contains(secret), "{secret} leaked: {rendered}");
        }
        assert_eq!(pair.access(), "access-abc");
        assert_eq!(pair.refresh(), "refresh-xyz");
    }
}
