//! Command-line adapter for the marketplace client.
//!
//! Each subcommand maps onto one session or port operation. Arguments are
//! parsed with `clap`; output is plain text written to any `io::Write`.

mod commands;
mod render;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use zeroize::Zeroizing;

use crate::domain::{
    BookListingDraft, ListingSearch, MeetupLocation, NewAccount, PriceSort, ProfileForm,
    UniversityId,
};

pub use commands::{CliError, Context, run, run_with_retry};
pub use render::{RETRY_HINT, connection_prompt, listing_line, meetup_line, stars_text};

/// Top-level arguments.
#[derive(Debug, Parser)]
#[command(name = "mycollegebook", version, about = "Buy and sell used textbooks")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Sign in and store the session tokens.
    SignIn {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account, then sign in with it.
    SignUp(SignUpArgs),
    /// Forget the session and delete the stored tokens.
    SignOut,
    /// Show the signed-in user.
    Whoami,
    /// Text a verification code to the signed-in user's phone.
    SendCode,
    /// Confirm the phone number with the code received.
    Verify {
        #[arg(long)]
        code: String,
    },
    /// List the universities accounts can belong to.
    Universities,
    /// Search listings by title, edition and author.
    Search(SearchArgs),
    #[command(subcommand)]
    Listing(ListingCommand),
    /// Show pending and scheduled meetup requests.
    Meetups,
    /// Pay the connection fee and propose a meetup for a listing.
    RequestMeetup(RequestMeetupArgs),
    /// Pay the connection fee and accept a request for one of your listings.
    AcceptMeetup { id: u64 },
    #[command(subcommand)]
    Profile(ProfileCommand),
}

/// Listing management.
#[derive(Debug, Clone, Subcommand)]
pub enum ListingCommand {
    Show { id: u64 },
    Create(ListingArgs),
    Update {
        id: u64,
        #[command(flatten)]
        listing: ListingArgs,
    },
    /// Listings you are selling.
    Mine,
    /// Listings you bought.
    Purchased,
}

/// Profile management.
#[derive(Debug, Clone, Subcommand)]
pub enum ProfileCommand {
    Update(ProfileArgs),
}

#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub edition: Option<String>,
    #[arg(long)]
    pub author: Option<String>,
    /// `high` (most expensive first) or `low`.
    #[arg(long, default_value = "high")]
    pub sort: PriceSort,
}

impl SearchArgs {
    pub fn search(&self) -> ListingSearch {
        ListingSearch {
            name: self.name.clone(),
            edition: self.edition.clone(),
            author: self.author.clone(),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ListingArgs {
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long, default_value_t = 1)]
    pub edition: u32,
    #[arg(long, default_value = "")]
    pub author: String,
    #[arg(long, default_value = "")]
    pub condition: String,
    /// Price such as `49.99`.
    #[arg(long, default_value = "")]
    pub price: String,
    #[arg(long, default_value = "")]
    pub professor: String,
    #[arg(long, default_value = "")]
    pub class_number: String,
    /// Cover photo to upload.
    #[arg(long)]
    pub image: Option<PathBuf>,
}

impl From<ListingArgs> for BookListingDraft {
    fn from(value: ListingArgs) -> Self {
        Self {
            name: value.name,
            edition: value.edition,
            author: value.author,
            condition: value.condition,
            price: value.price,
            professor: value.professor,
            class_number: value.class_number,
            image: value.image,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ProfileArgs {
    #[arg(long, default_value = "")]
    pub first_name: String,
    #[arg(long, default_value = "")]
    pub last_name: String,
    /// University id, see `universities`.
    #[arg(long)]
    pub university: Option<u64>,
    #[arg(long, default_value = "")]
    pub phone_number: String,
    #[arg(long)]
    pub profile_image: Option<PathBuf>,
}

impl From<ProfileArgs> for ProfileForm {
    fn from(value: ProfileArgs) -> Self {
        Self {
            first_name: value.first_name,
            last_name: value.last_name,
            university: value.university.map(UniversityId::new),
            phone_number: value.phone_number,
            profile_image: value.profile_image,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct SignUpArgs {
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub username: String,
    #[arg(long, default_value = "")]
    pub password: String,
    #[command(flatten)]
    pub profile: ProfileArgs,
}

impl From<SignUpArgs> for NewAccount {
    fn from(value: SignUpArgs) -> Self {
        Self {
            profile: value.profile.into(),
            email: value.email,
            username: value.username,
            password: Zeroizing::new(value.password),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct RequestMeetupArgs {
    /// Listing to meet about.
    #[arg(long)]
    pub book: u64,
    /// Proposed time, RFC 3339 (e.g. `2024-05-01T15:00:00Z`).
    #[arg(long)]
    pub at: DateTime<Utc>,
    /// Defaults to Tech Green.
    #[arg(long, requires = "longitude")]
    pub latitude: Option<f64>,
    #[arg(long, requires = "latitude")]
    pub longitude: Option<f64>,
}

impl RequestMeetupArgs {
    pub fn location(&self) -> MeetupLocation {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => MeetupLocation {
                latitude,
                longitude,
            },
            _ => MeetupLocation::DEFAULT,
        }
    }
}
