//! Process-wide application state.
//!
//! Exactly two values are shared across the client: the signed-in user and
//! the last classified connection failure. Both live in `watch` channels so
//! a top-level view can observe changes while each user action remains the
//! single writer.

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;

use super::navigation::Destination;
use super::user::User;

/// Failure that implies the backend may not have applied the action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionFailure {
    /// The backend answered with a 5xx status.
    Server { status: u16 },
    /// No response arrived before the request timeout.
    Timeout,
}

impl ConnectionFailure {
    /// Short machine-readable code shown on the retry prompt.
    pub const fn code(self) -> &'static str {
        match self {
            Self::Server { .. } => "ERR_BAD_RESPONSE",
            Self::Timeout => "ECONNABORTED",
        }
    }
}

impl fmt::Display for ConnectionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Server { status } => write!(f, "Request failed with status code {status}"),
            Self::Timeout => write!(f, "timeout exceeded"),
        }
    }
}

/// A published connection failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionError {
    pub failure: ConnectionFailure,
    /// Endpoint path that failed, for the log and the prompt.
    pub endpoint: String,
}

impl ConnectionError {
    pub fn new(failure: ConnectionFailure, endpoint: impl Into<String>) -> Self {
        Self {
            failure,
            endpoint: endpoint.into(),
        }
    }

    pub const fn code(&self) -> &'static str {
        self.failure.code()
    }

    pub fn message(&self) -> String {
        self.failure.to_string()
    }
}

/// Shared container for the current user and the connection-error flag.
///
/// Cloning is cheap; clones observe and mutate the same values.
///
/// # Examples
/// ```
/// use mycollegebook::domain::{AppState, ConnectionError, ConnectionFailure};
///
/// let state = AppState::new();
/// state.set_connection_error(ConnectionError::new(ConnectionFailure::Timeout, "get-me/"));
/// assert!(state.connection_error().is_some());
/// state.clear_connection_error();
/// assert!(state.connection_error().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct AppState {
    user: Arc<watch::Sender<Option<User>>>,
    connection_error: Arc<watch::Sender<Option<ConnectionError>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        let (user, _) = watch::channel(None);
        let (connection_error, _) = watch::channel(None);
        Self {
            user: Arc::new(user),
            connection_error: Arc::new(connection_error),
        }
    }

    /// Snapshot of the signed-in user.
    pub fn current_user(&self) -> Option<User> {
        self.user.borrow().clone()
    }

    pub fn set_user(&self, user: User) {
        self.user.send_replace(Some(user));
    }

    pub fn clear_user(&self) {
        self.user.send_replace(None);
    }

    pub fn subscribe_user(&self) -> watch::Receiver<Option<User>> {
        self.user.subscribe()
    }

    pub fn connection_error(&self) -> Option<ConnectionError> {
        self.connection_error.borrow().clone()
    }

    /// Publish a classified failure. Every call notifies observers, even
    /// when an equal failure is already set.
    pub fn set_connection_error(&self, error: ConnectionError) {
        self.connection_error.send_replace(Some(error));
    }

    /// Reset the flag so the next failure raises the prompt again.
    pub fn clear_connection_error(&self) {
        self.connection_error.send_replace(None);
    }

    pub fn subscribe_connection_error(&self) -> watch::Receiver<Option<ConnectionError>> {
        self.connection_error.subscribe()
    }

    /// Flow the current user belongs in.
    pub fn destination(&self) -> Destination {
        Destination::for_user(self.user.borrow().as_ref())
    }
}
