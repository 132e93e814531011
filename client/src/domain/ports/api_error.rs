//! Failure surface shared by every backend API port.
//!
//! Adapters classify HTTP outcomes into these variants; the session service
//! and the CLI decide how each one is shown.

use super::define_port_error;
use crate::domain::{ConnectionFailure, Error, FieldErrors};

define_port_error! {
    /// Errors surfaced while calling the marketplace backend.
    pub enum ApiError {
        /// The backend answered 401: bad credentials or a missing/expired token.
        Unauthorized { message: String } =>
            "authentication failed: {message}",
        /// The backend rejected the submitted fields (any other 4xx).
        Validation { errors: FieldErrors } =>
            "request rejected: {errors}",
        /// The backend answered 404.
        NotFound { message: String } =>
            "resource not found: {message}",
        /// A 5xx answer or a timeout. Published to the application state.
        Connection { failure: ConnectionFailure } =>
            "connection error: {failure}",
        /// The request never reached the backend for another reason.
        Transport { message: String } =>
            "transport failed: {message}",
        /// The response body did not have the expected shape.
        Decode { message: String } =>
            "response decode failed: {message}",
        /// The adapter refused to build the request.
        InvalidRequest { message: String } =>
            "request invalid: {message}",
    }
}

impl ApiError {
    /// Whether the failure is one the connection-error prompt covers.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }

    /// Field-grouped messages for validation failures.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation { errors } => Some(errors),
            _ => None,
        }
    }
}

impl From<ApiError> for Error {
    fn from(value: ApiError) -> Self {
        match value {
            ApiError::Unauthorized { message } => Error::unauthorized(message),
            ApiError::Validation { errors } => Error::validation(&errors),
            ApiError::NotFound { message } => Error::not_found(message),
            ApiError::Connection { failure } => Error::service_unavailable(failure.to_string())
                .with_details(serde_json::json!({ "code": failure.code() })),
            ApiError::Transport { message } => Error::service_unavailable(message),
            ApiError::Decode { message } => {
                Error::internal(format!("unexpected backend response: {message}"))
            }
            ApiError::InvalidRequest { message } => Error::invalid_request(message),
        }
    }
}
