//! Book listings offered on the marketplace.
//!
//! Covers the listing record, the search filters sent to the backend, the
//! client-side price sort, and the create/edit form.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::price::Price;
use super::user::{User, UserId};
use super::validation::FieldErrors;

pub const TITLE_REQUIRED_MESSAGE: &str = "Title is required.";
pub const PRICE_REQUIRED_MESSAGE: &str = "Price is required.";
pub const IMAGE_REQUIRED_MESSAGE: &str = "Image is required.";

/// Backend identifier of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookListingId(u64);

impl BookListingId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BookListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle of a listing on the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListingStatus {
    #[default]
    Active,
    Sold,
    Archived,
}

impl ListingStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Sold => "sold",
            Self::Archived => "archived",
        }
    }
}

impl FromStr for ListingStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "active" => Ok(Self::Active),
            "sold" => Ok(Self::Sold),
            "archived" => Ok(Self::Archived),
            other => Err(format!("unknown listing status `{other}`")),
        }
    }
}

/// A textbook offered for sale.
#[derive(Debug, Clone, PartialEq)]
pub struct BookListing {
    pub id: BookListingId,
    pub owner: Option<User>,
    pub buyer: Option<User>,
    /// Book title.
    pub name: String,
    pub author: String,
    /// URL of the cover photo.
    pub image: Option<String>,
    pub price: Price,
    pub edition: u32,
    pub condition: String,
    pub class_number: Option<String>,
    pub professor: Option<String>,
    pub status: ListingStatus,
}

/// What the current user may do with a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingAction {
    Edit,
    RequestMeetup,
}

impl BookListing {
    /// Owners edit their listings; everyone else may request a meetup.
    ///
    /// Only the owner id is compared. A listing without an owner is never
    /// editable.
    pub fn action_for(&self, user_id: UserId) -> ListingAction {
        match &self.owner {
            Some(owner) if owner.id == user_id => ListingAction::Edit,
            _ => ListingAction::RequestMeetup,
        }
    }

    /// Edition rendered as an ordinal, e.g. `3rd Edition`.
    pub fn edition_label(&self) -> String {
        format!("{} Edition", ordinal(self.edition))
    }
}

/// English ordinal for `n`: `1st`, `2nd`, `3rd`, `4th`, `11th`, `21st`.
///
/// # Examples
/// ```
/// use mycollegebook::domain::ordinal;
///
/// assert_eq!(ordinal(2), "2nd");
/// assert_eq!(ordinal(12), "12th");
/// assert_eq!(ordinal(103), "103rd");
/// ```
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// Optional search filters. Blank filters are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingSearch {
    pub name: Option<String>,
    pub edition: Option<String>,
    pub author: Option<String>,
}

impl ListingSearch {
    /// Query pairs in backend order, skipping blank values.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("name", self.name.as_deref()),
            ("edition", self.edition.as_deref()),
            ("author", self.author.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(|value| (key, value))
        })
        .collect()
    }
}

/// Client-side price ordering; the backend has no sort parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceSort {
    /// Most expensive first.
    #[default]
    High,
    /// Cheapest first.
    Low,
}

impl PriceSort {
    /// Sort in place. Equal prices keep their fetch order.
    pub fn apply(self, listings: &mut [BookListing]) {
        match self {
            Self::High => listings.sort_by(|a, b| b.price.cmp(&a.price)),
            Self::Low => listings.sort_by(|a, b| a.price.cmp(&b.price)),
        }
    }
}

impl FromStr for PriceSort {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "low" => Ok(Self::Low),
            other => Err(format!("unknown sort `{other}`; expected `high` or `low`")),
        }
    }
}

/// Raw create/edit form input for a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookListingDraft {
    pub name: String,
    pub edition: u32,
    pub author: String,
    pub condition: String,
    /// Price as typed, e.g. `49.99`.
    pub price: String,
    pub professor: String,
    pub class_number: String,
    /// Local cover photo to upload.
    pub image: Option<PathBuf>,
}

impl Default for BookListingDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            edition: 1,
            author: String::new(),
            condition: String::new(),
            price: String::new(),
            professor: String::new(),
            class_number: String::new(),
            image: None,
        }
    }
}

/// Listing form that passed local validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingSubmission {
    pub name: String,
    pub edition: u32,
    pub author: String,
    pub condition: String,
    pub price: Price,
    pub professor: String,
    pub class_number: String,
    pub image: PathBuf,
}

impl BookListingDraft {
    /// Require a title, a price and an image; every problem is reported.
    pub fn validate(self) -> Result<ListingSubmission, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = self.name.trim().to_owned();
        if name.is_empty() {
            errors.push("name", TITLE_REQUIRED_MESSAGE);
        }

        let price = if self.price.trim().is_empty() {
            errors.push("price", PRICE_REQUIRED_MESSAGE);
            None
        } else {
            match self.price.parse::<Price>() {
                Ok(price) => Some(price),
                Err(err) => {
                    errors.push("price", err.to_string());
                    None
                }
            }
        };

        if self.image.is_none() {
            errors.push("image", IMAGE_REQUIRED_MESSAGE);
        }

        match (price, self.image) {
            (Some(price), Some(image)) if errors.is_empty() => Ok(ListingSubmission {
                name,
                edition: self.edition,
                author: self.author.trim().to_owned(),
                condition: self.condition.trim().to_owned(),
                price,
                professor: self.professor.trim().to_owned(),
                class_number: self.class_number.trim().to_owned(),
                image,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests;
