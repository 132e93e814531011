//! Listing search, detail, create/update and the owner/buyer views.

use async_trait::async_trait;
use reqwest::Method;

use super::client::ApiClient;
use super::dto::{BookListingDto, listings_into_domain};
use super::forms::listing_form;
use crate::domain::ports::{ApiError, BookListingsApi};
use crate::domain::{BookListing, BookListingId, ListingSearch, ListingSubmission, UserId};

pub(super) const LISTINGS_PATH: &str = "book_listings/booklisting/";

fn listing_path(id: BookListingId) -> String {
    format!("{LISTINGS_PATH}{id}/")
}

impl ApiClient {
    async fn list_where(&self, query: &[(&str, &str)]) -> Result<Vec<BookListing>, ApiError> {
        let listings: Vec<BookListingDto> = self.get_json(LISTINGS_PATH, query).await?;
        listings_into_domain(listings).map_err(ApiError::decode)
    }
}

#[async_trait]
impl BookListingsApi for ApiClient {
    async fn search_listings(&self, search: &ListingSearch) -> Result<Vec<BookListing>, ApiError> {
        self.list_where(&search.query_pairs()).await
    }

    async fn get_listing(&self, id: BookListingId) -> Result<BookListing, ApiError> {
        let listing: BookListingDto = self.get_json(&listing_path(id), &[]).await?;
        listing.into_domain().map_err(ApiError::decode)
    }

    async fn create_listing(&self, listing: &ListingSubmission) -> Result<BookListing, ApiError> {
        let form = listing_form(listing)?;
        let created: BookListingDto = self
            .send_multipart(Method::POST, LISTINGS_PATH, form)
            .await?;
        created.into_domain().map_err(ApiError::decode)
    }

    async fn update_listing(
        &self,
        id: BookListingId,
        listing: &ListingSubmission,
    ) -> Result<BookListing, ApiError> {
        let form = listing_form(listing)?;
        let updated: BookListingDto = self
            .send_multipart(Method::PUT, &listing_path(id), form)
            .await?;
        updated.into_domain().map_err(ApiError::decode)
    }

    async fn owned_listings(&self, owner: UserId) -> Result<Vec<BookListing>, ApiError> {
        let owner = owner.to_string();
        self.list_where(&[("owner", owner.as_str())]).await
    }

    async fn purchased_listings(&self, buyer: UserId) -> Result<Vec<BookListing>, ApiError> {
        let buyer = buyer.to_string();
        self.list_where(&[("buyer", buyer.as_str())]).await
    }
}
