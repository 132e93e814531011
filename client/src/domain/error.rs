//! Transport-agnostic failures returned by the session service and shown
//! by the CLI.
//!
//! Outbound adapters report [`ApiError`](super::ports::ApiError) and
//! [`TokenStoreError`](super::ports::TokenStoreError); both convert into
//! this shape at the service boundary.

use serde_json::Value;

use super::validation::FieldErrors;

/// Failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Local validation or a 4xx rejection of the submitted fields.
    InvalidRequest,
    /// Missing, rejected or expired credentials.
    Unauthorized,
    NotFound,
    /// Server error or timeout; the action may not have been applied.
    ServiceUnavailable,
    /// The client could not make sense of what it received or stored.
    InternalError,
}

impl ErrorCode {
    /// Snake-case name, used as a log field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::Unauthorized => "unauthorized",
            Self::NotFound => "not_found",
            Self::ServiceUnavailable => "service_unavailable",
            Self::InternalError => "internal_error",
        }
    }

    fn fallback_message(self) -> &'static str {
        match self {
            Self::InvalidRequest => "The submitted form is invalid.",
            Self::Unauthorized => "You need to sign in again.",
            Self::NotFound => "That item no longer exists.",
            Self::ServiceUnavailable => "The marketplace could not be reached.",
            Self::InternalError => "Something went wrong.",
        }
    }
}

/// A categorised failure with a user-facing message and optional
/// structured details (field-grouped messages for validation failures).
///
/// The message is never blank: blank input is replaced by a generic
/// message for the code.
///
/// # Examples
/// ```
/// use mycollegebook::domain::{Error, ErrorCode};
///
/// let err = Error::new(ErrorCode::NotFound, "  ");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.message(), "That item no longer exists.");
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct Error {
    code: ErrorCode,
    message: String,
    details: Option<Value>,
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            code.fallback_message().to_owned()
        } else {
            message
        };
        Self {
            code,
            message,
            details: None,
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// An [`ErrorCode::InvalidRequest`] whose message joins every field
    /// message and whose details keep them grouped by field.
    pub fn validation(errors: &FieldErrors) -> Self {
        Self::new(ErrorCode::InvalidRequest, errors.messages().join("\n"))
            .with_details(errors.to_json())
    }

    /// Field-grouped messages carried in the details, if any.
    pub fn field_errors(&self) -> Option<FieldErrors> {
        self.details.as_ref().and_then(FieldErrors::from_json)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}
