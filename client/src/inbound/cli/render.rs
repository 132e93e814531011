//! Plain-text rendering of marketplace records.

use crate::domain::{
    BookListing, ConnectionError, MeetupRequest, Platform, Rating, University, User, map_link,
};

const FULL_STAR: char = '★';
const HALF_STAR: char = '⯪';
const EMPTY_STAR: char = '☆';

/// Shown under the connection prompt.
pub const RETRY_HINT: &str = "Press Enter to retry, or type q to quit.";

/// Stars followed by the label, or just the "No Ratings" label.
///
/// # Examples
/// ```
/// use mycollegebook::domain::Rating;
/// use mycollegebook::inbound::cli::stars_text;
///
/// assert_eq!(stars_text(&Rating::score(9.0)), "★★★★⯪ 4.50");
/// assert_eq!(stars_text(&Rating::NoRatings), "No Ratings");
/// ```
pub fn stars_text(rating: &Rating) -> String {
    match rating.stars() {
        Some(stars) => {
            let mut text = String::new();
            text.extend(std::iter::repeat_n(FULL_STAR, usize::from(stars.full)));
            text.extend(std::iter::repeat_n(HALF_STAR, usize::from(stars.half)));
            text.extend(std::iter::repeat_n(EMPTY_STAR, usize::from(stars.empty)));
            format!("{text} {}", rating.label())
        }
        None => rating.label(),
    }
}

/// Blocking connection prompt with the failure's code and message.
pub fn connection_prompt(error: &ConnectionError) -> String {
    format!(
        "A Connection Error Has Occured.\nCode: [{}]\nMessage: {}",
        error.code(),
        error.message()
    )
}

/// One-line listing summary, e.g. `#3 Calculus (3rd Edition) by Stewart: $49.99`.
pub fn listing_line(listing: &BookListing) -> String {
    let mut line = format!(
        "#{} {} ({})",
        listing.id,
        listing.name,
        listing.edition_label()
    );
    if !listing.author.is_empty() {
        line.push_str(&format!(" by {}", listing.author));
    }
    line.push_str(&format!(": ${}", listing.price));
    if !listing.condition.is_empty() {
        line.push_str(&format!(" [{}]", listing.condition));
    }
    line
}

pub(super) fn listing_detail(listing: &BookListing) -> String {
    let mut lines = vec![listing_line(listing)];
    if let Some(class_number) = &listing.class_number {
        lines.push(format!("Class: {class_number}"));
    }
    if let Some(professor) = &listing.professor {
        lines.push(format!("Professor: {professor}"));
    }
    if let Some(owner) = &listing.owner {
        lines.push(format!(
            "Seller: {} ({})",
            owner.display_name(),
            stars_text(&owner.seller_rating)
        ));
    }
    lines.push(format!("Status: {}", listing.status.as_str()));
    if let Some(image) = &listing.image {
        lines.push(format!("Image: {image}"));
    }
    lines.join("\n")
}

pub(super) fn user_summary(user: &User) -> String {
    let mut lines = vec![
        format!("{} (@{})", user.display_name(), user.username),
        format!("Email: {}", user.email),
    ];
    if let Some(university) = &user.university {
        lines.push(format!("University: {}", university.name));
    }
    if let Some(phone) = &user.phone_number {
        lines.push(format!("Phone: {phone}"));
    }
    lines.push(format!(
        "Verified: {}",
        if user.is_verified { "yes" } else { "no" }
    ));
    lines.push(format!("Seller rating: {}", stars_text(&user.seller_rating)));
    lines.push(format!("Buyer rating: {}", stars_text(&user.buyer_rating)));
    lines.join("\n")
}

pub(super) fn university_line(university: &University) -> String {
    format!("{}\t{}", university.id, university.name)
}

/// One-line meetup summary with a maps link when a location is set.
pub fn meetup_line(request: &MeetupRequest, platform: Platform) -> String {
    let when = request
        .meetup_time
        .map(|time| time.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "time not set".to_owned());
    let mut line = format!(
        "#{} [{}] {} with {} at {}",
        request.id,
        request.status.as_str(),
        request.book_listing.name,
        request.user.display_name(),
        when
    );
    if let Some(location) = request.location() {
        line.push_str(&format!(" ({})", map_link(platform, location)));
    }
    line
}
