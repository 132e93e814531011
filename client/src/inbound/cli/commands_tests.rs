//! Tests for command execution and the connection retry prompt.

use std::io::Cursor;
use std::sync::Arc;

use mockall::Sequence;
use rstest::rstest;

use super::*;
use crate::domain::ports::{
    ApiError, MockAccountsApi, MockAuthApi, MockBookListingsApi, MockMeetupsApi,
    MockPaymentsApi, MockTokenStore,
};
use crate::domain::{
    AppState, ClientSecret, ConnectionError, ConnectionFailure, ErrorCode, FieldErrors, ListingSearch,
    MeetupRequest, MeetupRequests, MeetupStatus, PriceSort, TITLE_REQUIRED_MESSAGE,
};
use crate::inbound::cli::{ListingArgs, SearchArgs};
use crate::test_support::{sample_listing, sample_user};

type TestContext = Context<MockAuthApi, MockAccountsApi, MockTokenStore>;

fn context(
    listings: MockBookListingsApi,
    meetups: MockMeetupsApi,
    payments: MockPaymentsApi,
) -> TestContext {
    context_with_state(AppState::new(), listings, meetups, payments)
}

fn context_with_state(
    state: AppState,
    listings: MockBookListingsApi,
    meetups: MockMeetupsApi,
    payments: MockPaymentsApi,
) -> TestContext {
    let session = SessionService::new(
        Arc::new(MockAuthApi::new()),
        Arc::new(MockAccountsApi::new()),
        Arc::new(MockTokenStore::new()),
        state,
    );
    Context {
        session,
        accounts: Arc::new(MockAccountsApi::new()),
        listings: Arc::new(listings),
        meetups: Arc::new(meetups),
        payments: Arc::new(payments),
        platform: Platform::Android,
    }
}

fn search(sort: PriceSort) -> Command {
    Command::Search(SearchArgs {
        name: Some("calc".to_owned()),
        edition: None,
        author: None,
        sort,
    })
}

fn output(buffer: Vec<u8>) -> String {
    String::from_utf8(buffer).expect("utf-8 output")
}

fn pending_request(id: u64, book_id: u64) -> MeetupRequest {
    MeetupRequest {
        id: MeetupRequestId::new(id),
        book_listing: sample_listing(book_id, 2500),
        user: sample_user(2),
        status: MeetupStatus::Pending,
        location_latitude: Some("33.775039".to_owned()),
        location_longitude: Some("-84.397356".to_owned()),
        meetup_time: None,
        date_created: None,
    }
}

#[rstest]
#[case::low(PriceSort::Low, vec![1, 3, 2])]
#[case::high(PriceSort::High, vec![2, 3, 1])]
#[tokio::test]
async fn search_sorts_results_client_side(#[case] sort: PriceSort, #[case] expected: Vec<u64>) {
    let mut listings = MockBookListingsApi::new();
    listings
        .expect_search_listings()
        .withf(|search: &ListingSearch| search.query_pairs() == vec![("name", "calc")])
        .times(1)
        .return_once(|_| {
            Ok(vec![
                sample_listing(1, 1000),
                sample_listing(2, 3000),
                sample_listing(3, 2000),
            ])
        });
    let ctx = context(listings, MockMeetupsApi::new(), MockPaymentsApi::new());
    let mut out = Vec::new();

    run(&search(sort), &ctx, &mut out).await.expect("search runs");

    let ids: Vec<u64> = output(out)
        .lines()
        .filter_map(|line| line.strip_prefix('#')?.split(' ').next()?.parse().ok())
        .collect();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn connection_errors_prompt_and_retry_after_clearing() {
    let state = AppState::new();
    let publisher = state.clone();
    let mut listings = MockBookListingsApi::new();
    let mut seq = Sequence::new();
    listings
        .expect_search_listings()
        .times(1)
        .in_sequence(&mut seq)
        .return_once(move |_| {
            publisher.set_connection_error(ConnectionError::new(
                ConnectionFailure::Server { status: 503 },
                "book_listings/booklisting/",
            ));
            Err(ApiError::connection(ConnectionFailure::Server { status: 503 }))
        });
    listings
        .expect_search_listings()
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_| Ok(vec![sample_listing(4, 1500)]));
    let ctx = context_with_state(
        state.clone(),
        listings,
        MockMeetupsApi::new(),
        MockPaymentsApi::new(),
    );
    let mut out = Vec::new();
    let mut input = Cursor::new(b"\n".to_vec());

    run_with_retry(&search(PriceSort::High), &ctx, &mut out, &mut input)
        .await
        .expect("second attempt succeeds");

    let text = output(out);
    assert!(text.contains("A Connection Error Has Occured.\nCode: [ERR_BAD_RESPONSE]"));
    assert!(text.contains("#4 Textbook 4"));
    assert!(state.connection_error().is_none());
}

#[tokio::test]
async fn quitting_the_prompt_keeps_the_error() {
    let state = AppState::new();
    let publisher = state.clone();
    let mut listings = MockBookListingsApi::new();
    listings
        .expect_search_listings()
        .times(1)
        .return_once(move |_| {
            publisher.set_connection_error(ConnectionError::new(
                ConnectionFailure::Timeout,
                "book_listings/booklisting/",
            ));
            Err(ApiError::connection(ConnectionFailure::Timeout))
        });
    let ctx = context_with_state(
        state.clone(),
        listings,
        MockMeetupsApi::new(),
        MockPaymentsApi::new(),
    );
    let mut out = Vec::new();
    let mut input = Cursor::new(b"q\n".to_vec());

    let error = run_with_retry(&search(PriceSort::High), &ctx, &mut out, &mut input)
        .await
        .expect_err("user gave up");

    assert!(matches!(error, CliError::Domain(ref err) if err.code() == ErrorCode::ServiceUnavailable));
    assert!(output(out).contains("Code: [ECONNABORTED]"));
    assert!(state.connection_error().is_some());
}

#[tokio::test]
async fn stale_connection_error_does_not_prompt_for_validation_failures() {
    let state = AppState::new();
    state.set_connection_error(ConnectionError::new(
        ConnectionFailure::Server { status: 503 },
        "get-me/",
    ));
    let mut listings = MockBookListingsApi::new();
    listings.expect_search_listings().times(1).return_once(|_| {
        let mut errors = FieldErrors::new();
        errors.push("edition", "A valid integer is required.");
        Err(ApiError::validation(errors))
    });
    let ctx = context_with_state(
        state.clone(),
        listings,
        MockMeetupsApi::new(),
        MockPaymentsApi::new(),
    );
    let mut out = Vec::new();
    let mut input = Cursor::new(b"\n".to_vec());

    let error = run_with_retry(&search(PriceSort::High), &ctx, &mut out, &mut input)
        .await
        .expect_err("validation failure");

    assert!(matches!(error, CliError::Domain(ref err) if err.code() == ErrorCode::InvalidRequest));
    assert!(!output(out).contains("A Connection Error Has Occured."));
    assert_eq!(
        state.connection_error().map(|err| err.endpoint),
        Some("get-me/".to_owned())
    );
}

#[tokio::test]
async fn other_failures_do_not_prompt() {
    let mut listings = MockBookListingsApi::new();
    listings
        .expect_get_listing()
        .times(1)
        .return_once(|_| Err(ApiError::not_found("No BookListing matches the given query.")));
    let ctx = context(listings, MockMeetupsApi::new(), MockPaymentsApi::new());
    let mut out = Vec::new();
    let mut input = Cursor::new(Vec::new());

    let error = run_with_retry(
        &Command::Listing(ListingCommand::Show { id: 99 }),
        &ctx,
        &mut out,
        &mut input,
    )
    .await
    .expect_err("listing missing");

    assert!(matches!(error, CliError::Domain(ref err) if err.code() == ErrorCode::NotFound));
    assert!(out.is_empty());
}

#[tokio::test]
async fn owners_are_offered_the_edit_action() {
    let owner = sample_user(5);
    let mut listing = sample_listing(3, 4999);
    listing.owner = Some(owner.clone());
    let mut listings = MockBookListingsApi::new();
    listings
        .expect_get_listing()
        .times(1)
        .return_once(move |_| Ok(listing));
    let ctx = context(listings, MockMeetupsApi::new(), MockPaymentsApi::new());
    ctx.session.replace_user(owner);
    let mut out = Vec::new();

    run(&Command::Listing(ListingCommand::Show { id: 3 }), &ctx, &mut out)
        .await
        .expect("show runs");

    assert!(output(out).contains("`listing update 3`"));
}

#[tokio::test]
async fn incomplete_listing_is_rejected_before_upload() {
    let mut listings = MockBookListingsApi::new();
    listings.expect_create_listing().times(0);
    let ctx = context(listings, MockMeetupsApi::new(), MockPaymentsApi::new());
    let args = ListingArgs {
        name: String::new(),
        edition: 1,
        author: String::new(),
        condition: String::new(),
        price: "12.00".to_owned(),
        professor: String::new(),
        class_number: String::new(),
        image: Some("/tmp/cover.jpg".into()),
    };
    let mut out = Vec::new();

    let error = run(&Command::Listing(ListingCommand::Create(args)), &ctx, &mut out)
        .await
        .expect_err("title missing");

    let CliError::Domain(error) = error else {
        panic!("expected a domain error");
    };
    assert_eq!(error.message(), TITLE_REQUIRED_MESSAGE);
}

#[tokio::test]
async fn own_listings_require_a_session() {
    let ctx = context(
        MockBookListingsApi::new(),
        MockMeetupsApi::new(),
        MockPaymentsApi::new(),
    );
    let mut out = Vec::new();

    let error = run(&Command::Listing(ListingCommand::Mine), &ctx, &mut out)
        .await
        .expect_err("signed out");

    assert!(matches!(error, CliError::Domain(ref err) if err.code() == ErrorCode::Unauthorized));
}

#[tokio::test]
async fn accepting_pays_the_fee_for_the_requested_book_first() {
    let mut seq = Sequence::new();
    let mut meetups = MockMeetupsApi::new();
    meetups
        .expect_list_meetup_requests()
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|| {
            Ok(MeetupRequests {
                for_my_listings: vec![pending_request(8, 3)],
                ..MeetupRequests::default()
            })
        });
    let mut payments = MockPaymentsApi::new();
    payments
        .expect_create_payment_intent()
        .withf(|request: &PaymentIntentRequest| {
            request.amount_cents == 100 && request.book_id == Some(BookListingId::new(3))
        })
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_| Ok(ClientSecret::new("pi_secret")));
    meetups
        .expect_accept_meetup_request()
        .withf(|id: &MeetupRequestId| *id == MeetupRequestId::new(8))
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_| {
            let mut accepted = pending_request(8, 3);
            accepted.status = MeetupStatus::Accepted;
            Ok(accepted)
        });
    let ctx = context(MockBookListingsApi::new(), meetups, payments);
    ctx.session.replace_user(sample_user(5));
    let mut out = Vec::new();

    run(&Command::AcceptMeetup { id: 8 }, &ctx, &mut out)
        .await
        .expect("accept runs");

    let text = output(out);
    assert!(text.contains("Connection fee of $1.00 authorised."));
    assert!(text.contains("#8 [accepted]"));
    assert!(text.contains("geo:0,0?q=33.775039,-84.397356(Meetup Location)"));
    assert!(!text.contains("pi_secret"));
}

#[tokio::test]
async fn accepting_an_unknown_request_charges_nothing() {
    let mut meetups = MockMeetupsApi::new();
    meetups
        .expect_list_meetup_requests()
        .times(1)
        .return_once(|| Ok(MeetupRequests::default()));
    meetups.expect_accept_meetup_request().times(0);
    let mut payments = MockPaymentsApi::new();
    payments.expect_create_payment_intent().times(0);
    let ctx = context(MockBookListingsApi::new(), meetups, payments);
    ctx.session.replace_user(sample_user(5));
    let mut out = Vec::new();

    let error = run(&Command::AcceptMeetup { id: 42 }, &ctx, &mut out)
        .await
        .expect_err("unknown request");

    assert!(matches!(error, CliError::Domain(ref err) if err.code() == ErrorCode::NotFound));
}
