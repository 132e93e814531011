//! Driven port for book listing queries and edits.

use async_trait::async_trait;

use super::ApiError;
use crate::domain::{BookListing, BookListingId, ListingSearch, ListingSubmission, UserId};

/// Port for the book listing endpoints.
///
/// Empty result sets are `Ok(vec![])`, never an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookListingsApi: Send + Sync {
    /// Listings matching the non-blank filters, in backend order.
    async fn search_listings(&self, search: &ListingSearch) -> Result<Vec<BookListing>, ApiError>;

    async fn get_listing(&self, id: BookListingId) -> Result<BookListing, ApiError>;

    /// Create a listing owned by the bearer, uploading its cover photo.
    async fn create_listing(&self, listing: &ListingSubmission) -> Result<BookListing, ApiError>;

    /// Replace a listing. The returned record is the new source of truth.
    async fn update_listing(
        &self,
        id: BookListingId,
        listing: &ListingSubmission,
    ) -> Result<BookListing, ApiError>;

    /// Listings owned by `owner`.
    async fn owned_listings(&self, owner: UserId) -> Result<Vec<BookListing>, ApiError>;

    /// Listings bought by `buyer`.
    async fn purchased_listings(&self, buyer: UserId) -> Result<Vec<BookListing>, ApiError>;
}
