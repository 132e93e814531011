//! Reqwest-backed API client shared by every backend port adapter.
//!
//! The client owns transport details only: URL resolution, the middleware
//! pipeline, timeout and status mapping, and JSON decoding. Port impls in
//! the sibling modules choose endpoints and map DTOs into domain records.

use std::time::Duration;

use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error_mapping::{map_status_error, map_transport_error};
use super::middleware::Pipeline;
use crate::domain::ports::ApiError;

/// Typed client for the marketplace REST API.
pub struct ApiClient {
    http: Client,
    base_url: Url,
    pipeline: Pipeline,
}

impl ApiClient {
    /// Build a client with an explicit per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration, pipeline: Pipeline) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url,
            pipeline,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL of a relative endpoint path such as `users/user/`.
    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| ApiError::invalid_request(format!("bad endpoint `{path}`: {err}")))
    }

    pub(super) async fn get_json<T>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let mut builder = self.http.get(url);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        self.fetch(path, builder).await
    }

    pub(super) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        self.fetch(path, self.http.post(url).json(body)).await
    }

    pub(super) async fn send_multipart<T>(
        &self,
        method: Method,
        path: &str,
        form: Form,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        self.fetch(path, self.http.request(method, url).multipart(form))
            .await
    }

    /// Send through the pipeline and decode; every failure is shown to the
    /// response stages before it is returned.
    async fn fetch<T>(&self, path: &str, builder: RequestBuilder) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let outcome = match self.send(builder).await {
            Ok(body) => decode(path, &body),
            Err(error) => Err(error),
        };
        if let Err(error) = &outcome {
            debug!(endpoint = path, kind = error.kind(), %error, "request failed");
            self.pipeline.observe_failure(path, error);
        }
        outcome
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let mut request = builder
            .build()
            .map_err(|err| ApiError::invalid_request(err.to_string()))?;
        self.pipeline.prepare(&mut request).await;
        debug!(method = %request.method(), url = %request.url(), "sending request");

        let response = self
            .http
            .execute(request)
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(body.to_vec())
    }
}

fn decode<T: DeserializeOwned>(path: &str, body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body)
        .map_err(|error| ApiError::decode(format!("invalid JSON from `{path}`: {error}")))
}
