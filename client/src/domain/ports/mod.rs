//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Ports describe how the domain reaches the backend and local storage.
//! Each trait exposes strongly typed errors so adapters map their failures
//! into predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod accounts_api;
mod api_error;
mod auth_api;
mod book_listings_api;
mod meetups_api;
mod payments_api;
mod token_store;

pub use accounts_api::AccountsApi;
#[cfg(test)]
pub use accounts_api::MockAccountsApi;
pub use api_error::ApiError;
pub use auth_api::AuthApi;
#[cfg(test)]
pub use auth_api::MockAuthApi;
pub use book_listings_api::BookListingsApi;
#[cfg(test)]
pub use book_listings_api::MockBookListingsApi;
pub use meetups_api::MeetupsApi;
#[cfg(test)]
pub use meetups_api::MockMeetupsApi;
#[cfg(test)]
pub use payments_api::MockPaymentsApi;
pub use payments_api::PaymentsApi;
#[cfg(test)]
pub use token_store::MockTokenStore;
pub use token_store::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, TokenStore, TokenStoreError};
