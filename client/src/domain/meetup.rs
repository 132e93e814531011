//! Meetup requests: proposals to meet in person and exchange a book.

use std::fmt;

use chrono::{DateTime, Utc};

use super::book_listing::{BookListing, BookListingId};
use super::platform::Platform;
use super::user::User;

/// Label shown on the pin of a meetup location.
pub const MEETUP_LOCATION_LABEL: &str = "Meetup Location";

/// Backend identifier of a meetup request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeetupRequestId(u64);

impl MeetupRequestId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MeetupRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Progress of a meetup request. Unknown backend values are preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeetupStatus {
    Pending,
    Accepted,
    Rejected,
    Other(String),
}

impl MeetupStatus {
    pub fn parse(value: &str) -> Self {
        match value {
            "pending" => Self::Pending,
            "accepted" => Self::Accepted,
            "rejected" => Self::Rejected,
            other => Self::Other(other.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Other(value) => value.as_str(),
        }
    }
}

impl fmt::Display for MeetupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A point on the map where buyer and seller meet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeetupLocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl MeetupLocation {
    /// Tech Green, Georgia Tech; the pin starts here.
    pub const DEFAULT: Self = Self {
        latitude: 33.775_039,
        longitude: -84.397_356,
    };
}

impl Default for MeetupLocation {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A proposal from `user` to meet the owner of `book_listing`.
///
/// Coordinates are kept as the decimal text the backend sends.
#[derive(Debug, Clone, PartialEq)]
pub struct MeetupRequest {
    pub id: MeetupRequestId,
    pub book_listing: BookListing,
    pub user: User,
    pub status: MeetupStatus,
    pub location_latitude: Option<String>,
    pub location_longitude: Option<String>,
    pub meetup_time: Option<DateTime<Utc>>,
    pub date_created: Option<DateTime<Utc>>,
}

impl MeetupRequest {
    /// Parsed coordinates, when both are present and numeric.
    pub fn location(&self) -> Option<MeetupLocation> {
        let latitude = self.location_latitude.as_deref()?.trim().parse().ok()?;
        let longitude = self.location_longitude.as_deref()?.trim().parse().ok()?;
        Some(MeetupLocation {
            latitude,
            longitude,
        })
    }
}

/// The three collections the backend returns for the current user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeetupRequests {
    /// Pending requests the user made.
    pub created_by_me: Vec<MeetupRequest>,
    /// Pending requests against the user's listings.
    pub for_my_listings: Vec<MeetupRequest>,
    /// Accepted requests on either side.
    pub scheduled: Vec<MeetupRequest>,
}

/// Payload for proposing a meetup.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMeetupRequest {
    pub book_id: BookListingId,
    pub location: MeetupLocation,
    pub meetup_time: DateTime<Utc>,
}

/// Link that opens the platform's maps application at `location`.
///
/// # Examples
/// ```
/// use mycollegebook::domain::{map_link, MeetupLocation, Platform};
///
/// let spot = MeetupLocation { latitude: 1.5, longitude: -2.0 };
/// assert_eq!(map_link(Platform::Ios, spot), "maps://0,0?q=Meetup Location@1.5,-2");
/// assert_eq!(map_link(Platform::Android, spot), "geo:0,0?q=1.5,-2(Meetup Location)");
/// ```
pub fn map_link(platform: Platform, location: MeetupLocation) -> String {
    let lat_lng = format!("{},{}", location.latitude, location.longitude);
    match platform {
        Platform::Ios => format!("maps://0,0?q={MEETUP_LOCATION_LABEL}@{lat_lng}"),
        Platform::Android | Platform::Web | Platform::Desktop => {
            format!("geo:0,0?q={lat_lng}({MEETUP_LOCATION_LABEL})")
        }
    }
}
