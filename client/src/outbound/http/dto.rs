//! Wire DTOs for the marketplace backend.
//!
//! Responses decode into these transport shapes first and map into domain
//! records in one pass; request bodies borrow from the domain payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    BookListing, BookListingId, ClientSecret, ListingStatus, MeetupLocation, MeetupRequest,
    MeetupRequestId, MeetupRequests, MeetupStatus, NO_RATINGS_LABEL, PaymentIntentRequest, Price,
    Rating, TokenPair, University, UniversityId, User, UserId,
};

/// Decimal fields arrive as JSON strings or numbers depending on the view.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(super) enum NumberOrText {
    Number(f64),
    Text(String),
}

impl NumberOrText {
    fn into_text(self) -> String {
        match self {
            Self::Number(value) => value.to_string(),
            Self::Text(value) => value,
        }
    }
}

fn rating_from_wire(value: Option<NumberOrText>) -> Rating {
    match value {
        Some(NumberOrText::Number(score)) => Rating::score(score),
        Some(NumberOrText::Text(text)) if text != NO_RATINGS_LABEL => text
            .trim()
            .parse()
            .map(Rating::score)
            .unwrap_or(Rating::NoRatings),
        _ => Rating::NoRatings,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

#[derive(Debug, Deserialize)]
pub(super) struct UniversityDto {
    id: u64,
    name: String,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    alpha_two_code: Option<String>,
}

impl UniversityDto {
    pub(super) fn into_domain(self) -> University {
        University {
            id: UniversityId::new(self.id),
            name: self.name,
            country: non_blank(self.country),
            alpha_two_code: non_blank(self.alpha_two_code),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct UserDto {
    id: u64,
    username: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    is_verified: bool,
    #[serde(default)]
    profile_picture: Option<String>,
    #[serde(default)]
    phone_number: Option<String>,
    #[serde(default)]
    university: Option<UniversityDto>,
    #[serde(default)]
    seller_rating: Option<NumberOrText>,
    #[serde(default)]
    buyer_rating: Option<NumberOrText>,
}

impl UserDto {
    pub(super) fn into_domain(self) -> User {
        let name = non_blank(self.name).unwrap_or_else(|| {
            format!("{} {}", self.first_name, self.last_name)
                .trim()
                .to_owned()
        });
        User {
            id: UserId::new(self.id),
            username: self.username,
            email: self.email,
            name,
            first_name: self.first_name,
            last_name: self.last_name,
            is_verified: self.is_verified,
            profile_picture: non_blank(self.profile_picture),
            phone_number: non_blank(self.phone_number),
            university: self.university.map(UniversityDto::into_domain),
            seller_rating: rating_from_wire(self.seller_rating),
            buyer_rating: rating_from_wire(self.buyer_rating),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct BookListingDto {
    id: u64,
    #[serde(default)]
    owner: Option<UserDto>,
    #[serde(default)]
    buyer: Option<UserDto>,
    name: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    image: Option<String>,
    price: NumberOrText,
    edition: u32,
    #[serde(default)]
    condition: String,
    #[serde(default)]
    class_number: Option<String>,
    #[serde(default)]
    professor: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

impl BookListingDto {
    pub(super) fn into_domain(self) -> Result<BookListing, String> {
        let price = match self.price {
            NumberOrText::Number(value) => Price::from_f64(value),
            NumberOrText::Text(text) => text.parse(),
        }
        .map_err(|err| format!("listing {} has an invalid price: {err}", self.id))?;
        let status = match self.status.as_deref() {
            None | Some("") => ListingStatus::default(),
            Some(value) => value
                .parse()
                .map_err(|err| format!("listing {}: {err}", self.id))?,
        };

        Ok(BookListing {
            id: BookListingId::new(self.id),
            owner: self.owner.map(UserDto::into_domain),
            buyer: self.buyer.map(UserDto::into_domain),
            name: self.name,
            author: self.author,
            image: non_blank(self.image),
            price,
            edition: self.edition,
            condition: self.condition,
            class_number: non_blank(self.class_number),
            professor: non_blank(self.professor),
            status,
        })
    }
}

pub(super) fn listings_into_domain(dtos: Vec<BookListingDto>) -> Result<Vec<BookListing>, String> {
    dtos.into_iter().map(BookListingDto::into_domain).collect()
}

#[derive(Debug, Deserialize)]
pub(super) struct MeetupRequestDto {
    id: u64,
    book_listing: BookListingDto,
    user: UserDto,
    status: String,
    #[serde(default)]
    location_latitude: Option<NumberOrText>,
    #[serde(default)]
    location_longitude: Option<NumberOrText>,
    #[serde(default)]
    meetup_time: Option<DateTime<Utc>>,
    #[serde(default)]
    date_created: Option<DateTime<Utc>>,
}

impl MeetupRequestDto {
    pub(super) fn into_domain(self) -> Result<MeetupRequest, String> {
        Ok(MeetupRequest {
            id: MeetupRequestId::new(self.id),
            book_listing: self.book_listing.into_domain()?,
            user: self.user.into_domain(),
            status: MeetupStatus::parse(&self.status),
            location_latitude: self.location_latitude.map(NumberOrText::into_text),
            location_longitude: self.location_longitude.map(NumberOrText::into_text),
            meetup_time: self.meetup_time,
            date_created: self.date_created,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct MeetupRequestsDto {
    #[serde(default)]
    user_created: Vec<MeetupRequestDto>,
    #[serde(default)]
    for_users_books: Vec<MeetupRequestDto>,
    #[serde(default)]
    scheduled_meetups: Vec<MeetupRequestDto>,
}

impl MeetupRequestsDto {
    pub(super) fn into_domain(self) -> Result<MeetupRequests, String> {
        fn convert(dtos: Vec<MeetupRequestDto>) -> Result<Vec<MeetupRequest>, String> {
            dtos.into_iter().map(MeetupRequestDto::into_domain).collect()
        }

        Ok(MeetupRequests {
            created_by_me: convert(self.user_created)?,
            for_my_listings: convert(self.for_users_books)?,
            scheduled: convert(self.scheduled_meetups)?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct TokenPairDto {
    access: String,
    refresh: String,
}

impl TokenPairDto {
    pub(super) fn into_domain(self) -> TokenPair {
        TokenPair::new(self.access, self.refresh)
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct AccessTokenDto {
    pub(super) access: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct MessageDto {
    #[serde(default)]
    pub(super) message: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct ClientSecretDto {
    #[serde(rename = "clientSecret", default)]
    client_secret: Option<String>,
}

impl ClientSecretDto {
    pub(super) fn into_domain(self) -> Result<ClientSecret, String> {
        non_blank(self.client_secret)
            .map(ClientSecret::new)
            .ok_or_else(|| "No client secret returned".to_owned())
    }
}

#[derive(Debug, Serialize)]
pub(super) struct CredentialsBody<'a> {
    pub(super) username: &'a str,
    pub(super) password: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct RefreshBody<'a> {
    pub(super) refresh: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct CodeBody<'a> {
    pub(super) code: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct LocationBody {
    latitude: f64,
    longitude: f64,
}

impl From<MeetupLocation> for LocationBody {
    fn from(value: MeetupLocation) -> Self {
        Self {
            latitude: value.latitude,
            longitude: value.longitude,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct MeetupRequestBody {
    #[serde(rename = "bookId")]
    book_id: u64,
    location: LocationBody,
    meetup_time: DateTime<Utc>,
}

impl From<&crate::domain::NewMeetupRequest> for MeetupRequestBody {
    fn from(value: &crate::domain::NewMeetupRequest) -> Self {
        Self {
            book_id: value.book_id.get(),
            location: value.location.into(),
            meetup_time: value.meetup_time,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct AcceptMeetupBody {
    #[serde(rename = "meetupRequestId")]
    pub(super) meetup_request_id: u64,
}

#[derive(Debug, Serialize)]
pub(super) struct PaymentIntentBody {
    amount: u64,
    #[serde(rename = "bookID", skip_serializing_if = "Option::is_none")]
    book_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<LocationBody>,
}

impl From<&PaymentIntentRequest> for PaymentIntentBody {
    fn from(value: &PaymentIntentRequest) -> Self {
        Self {
            amount: value.amount_cents,
            book_id: value.book_id.map(BookListingId::get),
            location: value.location.map(LocationBody::from),
        }
    }
}
