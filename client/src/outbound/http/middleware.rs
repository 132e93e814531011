//! Ordered request/response middleware for the API client.
//!
//! Request stages run in order on every outgoing request before it is sent.
//! Response stages run in order on every failed outcome; they observe the
//! failure and may publish side effects, but the error itself always
//! reaches the caller unchanged.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Request;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use tracing::{debug, warn};

use crate::domain::ports::{ApiError, TokenStore};
use crate::domain::{AppState, ConnectionError};

/// Transforms a request before it is sent.
#[async_trait]
pub trait RequestStage: Send + Sync {
    async fn apply(&self, request: &mut Request);
}

/// Observes a failed outcome for `endpoint`.
pub trait ResponseStage: Send + Sync {
    fn on_failure(&self, endpoint: &str, error: &ApiError);
}

/// Attaches the stored access token as a bearer credential.
///
/// Requests go out unauthenticated when no token is stored or the store
/// cannot be read.
pub struct BearerAuth {
    tokens: Arc<dyn TokenStore>,
}

impl BearerAuth {
    pub fn new(tokens: Arc<dyn TokenStore>) -> Self {
        Self { tokens }
    }
}

#[async_trait]
impl RequestStage for BearerAuth {
    async fn apply(&self, request: &mut Request) {
        let token = match self.tokens.access_token().await {
            Ok(Some(token)) => token,
            Ok(None) => {
                debug!(url = %request.url(), "no access token; sending unauthenticated");
                return;
            }
            Err(error) => {
                warn!(%error, "could not read access token; sending unauthenticated");
                return;
            }
        };

        match HeaderValue::from_str(&format!("Bearer {token}")) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.headers_mut().insert(AUTHORIZATION, value);
            }
            Err(error) => {
                warn!(%error, "stored access token is not a valid header value");
            }
        }
    }
}

/// Lets 401 responses through to the caller.
///
/// No refresh-token exchange, retry, or forced sign-out happens here.
#[derive(Debug, Default, Clone, Copy)]
pub struct AuthFailurePassThrough;

impl ResponseStage for AuthFailurePassThrough {
    fn on_failure(&self, endpoint: &str, error: &ApiError) {
        if matches!(error, ApiError::Unauthorized { .. }) {
            debug!(endpoint, "authentication failure passed through without refresh");
        }
    }
}

/// Publishes 5xx and timeout failures to the application state.
///
/// Other failures never touch the flag; only an explicit
/// `clear_connection_error` resets it.
pub struct ConnectivityClassifier {
    state: AppState,
}

impl ConnectivityClassifier {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl ResponseStage for ConnectivityClassifier {
    fn on_failure(&self, endpoint: &str, error: &ApiError) {
        if let ApiError::Connection { failure } = error {
            warn!(endpoint, %failure, "connection error");
            self.state
                .set_connection_error(ConnectionError::new(*failure, endpoint));
        }
    }
}

/// Explicit ordered list of middleware stages.
#[derive(Clone, Default)]
pub struct Pipeline {
    request_stages: Vec<Arc<dyn RequestStage>>,
    response_stages: Vec<Arc<dyn ResponseStage>>,
}

impl Pipeline {
    /// Pipeline with no stages.
    pub fn new() -> Self {
        Self::default()
    }

    /// The client's standard chain: bearer credentials on the way out;
    /// auth pass-through then connectivity classification on failure.
    pub fn standard(tokens: Arc<dyn TokenStore>, state: AppState) -> Self {
        Self::new()
            .with_request_stage(BearerAuth::new(tokens))
            .with_response_stage(AuthFailurePassThrough)
            .with_response_stage(ConnectivityClassifier::new(state))
    }

    pub fn with_request_stage(mut self, stage: impl RequestStage + 'static) -> Self {
        self.request_stages.push(Arc::new(stage));
        self
    }

    pub fn with_response_stage(mut self, stage: impl ResponseStage + 'static) -> Self {
        self.response_stages.push(Arc::new(stage));
        self
    }

    /// Run every request stage in order.
    pub async fn prepare(&self, request: &mut Request) {
        for stage in &self.request_stages {
            stage.apply(request).await;
        }
    }

    /// Run every response stage in order.
    pub fn observe_failure(&self, endpoint: &str, error: &ApiError) {
        for stage in &self.response_stages {
            stage.on_failure(endpoint, error);
        }
    }
}
