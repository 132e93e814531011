//! Domain primitives, application state and the session service.
//!
//! Purpose: define the marketplace entities the client handles, the ports
//! through which it reaches the backend and local storage, and the session
//! lifecycle built on them. Nothing here knows about HTTP, files or the
//! command line.
//!
//! Public surface:
//! - Entities: `User`, `BookListing`, `MeetupRequest`, `University`,
//!   `Rating`, `Price`.
//! - `AppState`: the current user and the connection-error flag.
//! - `SessionService`: restore, sign in/up/out, profile and verification.
//! - `Error` / `ErrorCode`: transport-agnostic failures.

pub mod app_state;
pub mod auth;
pub mod book_listing;
pub mod error;
pub mod meetup;
pub mod navigation;
pub mod payment;
pub mod platform;
pub mod ports;
pub mod price;
pub mod rating;
pub mod session_service;
pub mod university;
pub mod user;
pub mod validation;

pub use self::app_state::{AppState, ConnectionError, ConnectionFailure};
pub use self::auth::{CredentialsError, LoginCredentials, TokenPair};
pub use self::book_listing::{
    BookListing, BookListingDraft, BookListingId, IMAGE_REQUIRED_MESSAGE, ListingAction,
    ListingSearch, ListingStatus, ListingSubmission, PRICE_REQUIRED_MESSAGE, PriceSort,
    TITLE_REQUIRED_MESSAGE, ordinal,
};
pub use self::error::{Error, ErrorCode};
pub use self::meetup::{
    MEETUP_LOCATION_LABEL, MeetupLocation, MeetupRequest, MeetupRequestId, MeetupRequests,
    MeetupStatus, NewMeetupRequest, map_link,
};
pub use self::navigation::Destination;
pub use self::payment::{CONNECTION_FEE_CENTS, ClientSecret, PaymentIntentRequest};
pub use self::platform::{Platform, UnknownPlatform};
pub use self::price::{Price, PriceParseError};
pub use self::rating::{NO_RATINGS_LABEL, Rating, StarBreakdown};
pub use self::session_service::{ACCOUNT_ERROR_FIELDS, SIGN_IN_FAILED_MESSAGE, SessionService};
pub use self::university::{University, UniversityId};
pub use self::user::{
    AccountSubmission, FORM_FIELD, NewAccount, PROFILE_REQUIRED_MESSAGE, ProfileForm,
    ProfileSubmission, User, UserId,
};
pub use self::validation::FieldErrors;
