//! HTTP adapter for the marketplace REST API.
//!
//! [`ApiClient`] implements every backend port. Requests run through the
//! [`Pipeline`] of middleware stages; statuses and transport failures are
//! classified into `ApiError` before any port sees them.

mod accounts;
mod auth;
mod base_url;
mod book_listings;
mod client;
mod dto;
mod error_mapping;
mod forms;
mod meetups;
mod middleware;
mod payments;

pub use base_url::{ANDROID_EMULATOR_BASE_URL, LOCAL_BASE_URL, base_address, resolve_base_url};
pub use client::ApiClient;
pub use middleware::{
    AuthFailurePassThrough, BearerAuth, ConnectivityClassifier, Pipeline, RequestStage,
    ResponseStage,
};
