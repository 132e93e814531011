//! Tests for listing search, sorting, ownership and the listing form.

use super::*;
use crate::test_support::{sample_listing, sample_user};
use rstest::{fixture, rstest};

#[fixture]
fn fetched() -> Vec<BookListing> {
    // Ids record fetch order; 2 and 4 share a price.
    [(1, 2500), (2, 4999), (3, 1000), (4, 4999), (5, 0)]
        .into_iter()
        .map(|(id, cents)| sample_listing(id, cents))
        .collect()
}

fn ids(listings: &[BookListing]) -> Vec<u64> {
    listings.iter().map(|listing| listing.id.get()).collect()
}

#[rstest]
fn high_sort_is_non_increasing_and_stable(mut fetched: Vec<BookListing>) {
    PriceSort::High.apply(&mut fetched);

    assert!(fetched.windows(2).all(|pair| pair[0].price >= pair[1].price));
    assert_eq!(ids(&fetched), vec![2, 4, 1, 3, 5]);
}

#[rstest]
fn low_sort_is_non_decreasing_and_stable(mut fetched: Vec<BookListing>) {
    PriceSort::Low.apply(&mut fetched);

    assert!(fetched.windows(2).all(|pair| pair[0].price <= pair[1].price));
    assert_eq!(ids(&fetched), vec![5, 3, 1, 2, 4]);
}

#[rstest]
fn default_sort_is_high() {
    assert_eq!(PriceSort::default(), PriceSort::High);
    assert_eq!("LOW".parse::<PriceSort>(), Ok(PriceSort::Low));
    assert!("cheapest".parse::<PriceSort>().is_err());
}

#[rstest]
fn owner_edits_and_others_request_meetups() {
    let mut listing = sample_listing(9, 1500);
    listing.owner = Some(sample_user(3));

    assert_eq!(listing.action_for(UserId::new(3)), ListingAction::Edit);
    assert_eq!(listing.action_for(UserId::new(4)), ListingAction::RequestMeetup);

    listing.owner = None;
    assert_eq!(listing.action_for(UserId::new(3)), ListingAction::RequestMeetup);
}

#[rstest]
#[case(1, "1st")]
#[case(2, "2nd")]
#[case(3, "3rd")]
#[case(4, "4th")]
#[case(11, "11th")]
#[case(12, "12th")]
#[case(13, "13th")]
#[case(21, "21st")]
#[case(112, "112th")]
#[case(0, "0th")]
fn ordinals_follow_english_rules(#[case] n: u32, #[case] expected: &str) {
    assert_eq!(ordinal(n), expected);
}

#[rstest]
fn blank_filters_are_not_sent() {
    let search = ListingSearch {
        name: Some("Calculus".to_owned()),
        edition: Some("  ".to_owned()),
        author: None,
    };

    assert_eq!(search.query_pairs(), vec![("name", "Calculus")]);
    assert!(ListingSearch::default().query_pairs().is_empty());
}

#[fixture]
fn draft() -> BookListingDraft {
    BookListingDraft {
        name: "Calculus".to_owned(),
        edition: 3,
        condition: "Good".to_owned(),
        price: "49.99".to_owned(),
        image: Some(PathBuf::from("/tmp/cover.jpg")),
        ..BookListingDraft::default()
    }
}

#[rstest]
fn complete_draft_validates(draft: BookListingDraft) {
    let submission = draft.validate().expect("draft is complete");

    assert_eq!(submission.name, "Calculus");
    assert_eq!(submission.price, Price::from_cents(4999));
    assert_eq!(submission.edition, 3);
}

#[rstest]
fn empty_draft_reports_every_required_field() {
    let errors = BookListingDraft::default()
        .validate()
        .expect_err("nothing filled in");

    assert_eq!(
        errors.messages_for(&["name", "price", "image"]),
        vec![TITLE_REQUIRED_MESSAGE, PRICE_REQUIRED_MESSAGE, IMAGE_REQUIRED_MESSAGE]
    );
}

#[rstest]
fn unparseable_price_is_reported_on_the_price_field(mut draft: BookListingDraft) {
    draft.price = "fifty".to_owned();

    let errors = draft.validate().expect_err("price is not a number");

    assert_eq!(
        errors.first_of(&["price"]),
        Some("`fifty` is not a valid price")
    );
}
