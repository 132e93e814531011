//! Connection-fee payment intents.
//!
//! Only the client-secret handoff lives here; presenting a payment sheet is
//! left to whatever front end consumes the secret.

use std::fmt;

use zeroize::Zeroizing;

use super::book_listing::BookListingId;
use super::meetup::MeetupLocation;

/// Fee charged before a meetup is requested or accepted, in cents.
pub const CONNECTION_FEE_CENTS: u64 = 100;

/// What the payment intent pays for.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentIntentRequest {
    pub amount_cents: u64,
    pub book_id: Option<BookListingId>,
    pub location: Option<MeetupLocation>,
}

impl PaymentIntentRequest {
    /// Connection fee for meeting about `book_id`.
    pub fn connection_fee(book_id: BookListingId, location: Option<MeetupLocation>) -> Self {
        Self {
            amount_cents: CONNECTION_FEE_CENTS,
            book_id: Some(book_id),
            location,
        }
    }
}

/// Secret handed to the payment provider's client SDK.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientSecret(Zeroizing<String>);

impl ClientSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(Zeroizing::new(secret.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClientSecret(<redacted>)")
    }
}
