//! Tests for the session service.

use std::path::PathBuf;
use std::sync::Arc;

use mockall::Sequence;
use rstest::rstest;
use zeroize::Zeroizing;

use super::*;
use crate::domain::ports::{MockAccountsApi, MockAuthApi, MockTokenStore};
use crate::domain::{
    ConnectionFailure, ErrorCode, PROFILE_REQUIRED_MESSAGE, TokenPair, UniversityId,
};
use crate::test_support::{sample_user, unverified_user};

type TestService = SessionService<MockAuthApi, MockAccountsApi, MockTokenStore>;

fn service(auth: MockAuthApi, accounts: MockAccountsApi, tokens: MockTokenStore) -> TestService {
    SessionService::new(
        Arc::new(auth),
        Arc::new(accounts),
        Arc::new(tokens),
        AppState::new(),
    )
}

fn profile_form() -> ProfileForm {
    ProfileForm {
        first_name: "George".to_owned(),
        last_name: "Burdell".to_owned(),
        university: Some(UniversityId::new(1)),
        phone_number: "4045550100".to_owned(),
        profile_image: Some(PathBuf::from("/tmp/george.jpg")),
    }
}

fn new_account() -> NewAccount {
    NewAccount {
        profile: profile_form(),
        email: "gburdell@gatech.edu".to_owned(),
        username: "gburdell".to_owned(),
        password: Zeroizing::new("ramblin".to_owned()),
    }
}

#[tokio::test]
async fn restore_without_token_stays_signed_out() {
    let mut auth = MockAuthApi::new();
    auth.expect_fetch_current_user().times(0);
    let mut tokens = MockTokenStore::new();
    tokens.expect_access_token().times(1).return_once(|| Ok(None));

    let service = service(auth, MockAccountsApi::new(), tokens);

    assert!(service.restore_session().await.is_none());
    assert_eq!(service.destination(), Destination::Authentication);
}

#[tokio::test]
async fn restore_with_token_adopts_the_bearer() {
    let mut auth = MockAuthApi::new();
    auth.expect_fetch_current_user()
        .times(1)
        .return_once(|| Ok(sample_user(7)));
    let mut tokens = MockTokenStore::new();
    tokens
        .expect_access_token()
        .times(1)
        .return_once(|| Ok(Some("stored-access".to_owned())));

    let service = service(auth, MockAccountsApi::new(), tokens);
    let user = service.restore_session().await.expect("session restored");

    assert_eq!(user.id, crate::domain::UserId::new(7));
    assert_eq!(service.current_user(), Some(user));
    assert_eq!(service.destination(), Destination::Marketplace);
}

#[rstest]
#[case::expired(ApiError::unauthorized("Given token not valid for any token type"))]
#[case::unreachable(ApiError::connection(ConnectionFailure::Timeout))]
#[tokio::test]
async fn restore_failure_leaves_session_signed_out(#[case] failure: ApiError) {
    let mut auth = MockAuthApi::new();
    auth.expect_fetch_current_user()
        .times(1)
        .return_once(move || Err(failure));
    let mut tokens = MockTokenStore::new();
    tokens
        .expect_access_token()
        .times(1)
        .return_once(|| Ok(Some("stale".to_owned())));

    let service = service(auth, MockAccountsApi::new(), tokens);

    assert!(service.restore_session().await.is_none());
    assert!(service.current_user().is_none());
}

#[tokio::test]
async fn unreadable_token_store_counts_as_no_token() {
    let mut auth = MockAuthApi::new();
    auth.expect_fetch_current_user().times(0);
    let mut tokens = MockTokenStore::new();
    tokens
        .expect_access_token()
        .times(1)
        .return_once(|| Err(TokenStoreError::io("permission denied")));

    let service = service(auth, MockAccountsApi::new(), tokens);

    assert!(service.restore_session().await.is_none());
}

#[tokio::test]
async fn sign_in_persists_tokens_before_resolving_the_user() {
    let mut seq = Sequence::new();
    let mut auth = MockAuthApi::new();
    let mut tokens = MockTokenStore::new();
    auth.expect_obtain_tokens()
        .withf(|credentials| credentials.username() == "gburdell")
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_| Ok(TokenPair::new("access-1", "refresh-1")));
    tokens
        .expect_store()
        .withf(|pair| pair.access() == "access-1" && pair.refresh() == "refresh-1")
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_| Ok(()));
    auth.expect_fetch_current_user()
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|| Ok(unverified_user(3)));

    let service = service(auth, MockAccountsApi::new(), tokens);
    let user = service
        .sign_in(" gburdell ", "ramblin")
        .await
        .expect("sign in succeeds");

    assert!(!user.is_verified);
    assert_eq!(service.destination(), Destination::Verification);
}

#[rstest]
#[case::bad_password(ApiError::unauthorized("No active account found with the given credentials"))]
#[case::rejected_fields(ApiError::validation(FieldErrors::new()))]
#[tokio::test]
async fn rejected_credentials_store_nothing(#[case] rejection: ApiError) {
    let mut auth = MockAuthApi::new();
    auth.expect_obtain_tokens()
        .times(1)
        .return_once(move |_| Err(rejection));
    auth.expect_fetch_current_user().times(0);
    let mut tokens = MockTokenStore::new();
    tokens.expect_store().times(0);

    let service = service(auth, MockAccountsApi::new(), tokens);
    let error = service
        .sign_in("gburdell", "wrong")
        .await
        .expect_err("credentials rejected");

    assert_eq!(error.code(), ErrorCode::Unauthorized);
    assert_eq!(error.message(), SIGN_IN_FAILED_MESSAGE);
    assert!(service.current_user().is_none());
}

#[rstest]
#[case("", "pw", "username")]
#[case("  ", "pw", "username")]
#[case("gburdell", "", "password")]
#[tokio::test]
async fn blank_credentials_never_reach_the_backend(
    #[case] username: &str,
    #[case] password: &str,
    #[case] field: &str,
) {
    let mut auth = MockAuthApi::new();
    auth.expect_obtain_tokens().times(0);

    let service = service(auth, MockAccountsApi::new(), MockTokenStore::new());
    let error = service
        .sign_in(username, password)
        .await
        .expect_err("blank input");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    let fields = error.field_errors().expect("field-grouped details");
    assert!(fields.get(field).is_some(), "{fields:?}");
}

#[tokio::test]
async fn unreachable_backend_is_not_reported_as_bad_credentials() {
    let mut auth = MockAuthApi::new();
    auth.expect_obtain_tokens()
        .times(1)
        .return_once(|_| Err(ApiError::connection(ConnectionFailure::Server { status: 502 })));

    let service = service(auth, MockAccountsApi::new(), MockTokenStore::new());
    let error = service
        .sign_in("gburdell", "ramblin")
        .await
        .expect_err("backend down");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    assert_ne!(error.message(), SIGN_IN_FAILED_MESSAGE);
}

#[tokio::test]
async fn failed_identity_lookup_discards_fresh_tokens() {
    let mut auth = MockAuthApi::new();
    auth.expect_obtain_tokens()
        .times(1)
        .return_once(|_| Ok(TokenPair::new("a", "r")));
    auth.expect_fetch_current_user()
        .times(1)
        .return_once(|| Err(ApiError::decode("missing field `id`")));
    let mut tokens = MockTokenStore::new();
    tokens.expect_store().times(1).return_once(|_| Ok(()));
    tokens.expect_clear().times(1).return_once(|| Ok(()));

    let service = service(auth, MockAccountsApi::new(), tokens);
    let error = service
        .sign_in("gburdell", "ramblin")
        .await
        .expect_err("lookup failed");

    assert_eq!(error.code(), ErrorCode::InternalError);
    assert!(service.current_user().is_none());
}

#[tokio::test]
async fn sign_out_clears_user_and_tokens() {
    let mut tokens = MockTokenStore::new();
    tokens.expect_clear().times(1).return_once(|| Ok(()));
    let service = service(MockAuthApi::new(), MockAccountsApi::new(), tokens);
    service.replace_user(sample_user(1));

    service.sign_out().await.expect("sign out succeeds");

    assert!(service.current_user().is_none());
    assert_eq!(service.destination(), Destination::Authentication);
}

#[tokio::test]
async fn incomplete_sign_up_is_rejected_locally() {
    let mut accounts = MockAccountsApi::new();
    accounts.expect_create_user().times(0);
    let mut account = new_account();
    account.profile.profile_image = None;

    let service = service(MockAuthApi::new(), accounts, MockTokenStore::new());
    let error = service.sign_up(account).await.expect_err("missing image");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), PROFILE_REQUIRED_MESSAGE);
}

#[tokio::test]
async fn sign_up_creates_the_account_then_signs_in() {
    let mut seq = Sequence::new();
    let mut accounts = MockAccountsApi::new();
    let mut auth = MockAuthApi::new();
    let mut tokens = MockTokenStore::new();
    accounts
        .expect_create_user()
        .withf(|account| account.username == "gburdell" && account.profile.first_name == "George")
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_| Ok(unverified_user(11)));
    auth.expect_obtain_tokens()
        .withf(|credentials| credentials.password() == "ramblin")
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_| Ok(TokenPair::new("a", "r")));
    tokens.expect_store().times(1).in_sequence(&mut seq).return_once(|_| Ok(()));
    auth.expect_fetch_current_user()
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|| Ok(unverified_user(11)));

    let service = service(auth, accounts, tokens);
    let user = service.sign_up(new_account()).await.expect("sign up succeeds");

    assert_eq!(user.id, crate::domain::UserId::new(11));
    assert_eq!(service.destination(), Destination::Verification);
}

#[tokio::test]
async fn backend_rejection_of_sign_up_keeps_field_messages() {
    let mut accounts = MockAccountsApi::new();
    accounts.expect_create_user().times(1).return_once(|_| {
        let mut errors = FieldErrors::new();
        errors.push("username", "A user with that username already exists.");
        Err(ApiError::validation(errors))
    });
    let mut auth = MockAuthApi::new();
    auth.expect_obtain_tokens().times(0);

    let service = service(auth, accounts, MockTokenStore::new());
    let error = service.sign_up(new_account()).await.expect_err("duplicate");

    let fields = error.field_errors().expect("field errors kept");
    assert_eq!(
        fields.messages_for(&ACCOUNT_ERROR_FIELDS),
        vec!["A user with that username already exists."]
    );
}

#[tokio::test]
async fn profile_edits_require_a_session() {
    let mut accounts = MockAccountsApi::new();
    accounts.expect_update_user().times(0);

    let service = service(MockAuthApi::new(), accounts, MockTokenStore::new());
    let error = service
        .update_profile(profile_form())
        .await
        .expect_err("signed out");

    assert_eq!(error.code(), ErrorCode::Unauthorized);
}

#[tokio::test]
async fn profile_edits_adopt_the_server_record() {
    let mut returned = sample_user(4);
    returned.phone_number = Some("4045550199".to_owned());
    let expected = returned.clone();
    let mut accounts = MockAccountsApi::new();
    accounts
        .expect_update_user()
        .withf(|id, profile| id.get() == 4 && profile.last_name == "Burdell")
        .times(1)
        .return_once(move |_, _| Ok(returned));

    let service = service(MockAuthApi::new(), accounts, MockTokenStore::new());
    service.replace_user(sample_user(4));
    let user = service
        .update_profile(profile_form())
        .await
        .expect("profile updated");

    assert_eq!(user, expected);
    assert_eq!(service.current_user(), Some(expected));
}

#[tokio::test]
async fn confirmed_verification_refetches_the_user() {
    let mut accounts = MockAccountsApi::new();
    accounts
        .expect_check_verification_code()
        .withf(|code| code.to_string() == "123456")
        .times(1)
        .return_once(|_| Ok("Successfully verified phone number!".to_owned()));
    let mut auth = MockAuthApi::new();
    auth.expect_fetch_current_user()
        .times(1)
        .return_once(|| Ok(sample_user(2)));

    let service = service(auth, accounts, MockTokenStore::new());
    service.replace_user(unverified_user(2));
    let user = service
        .confirm_verification(" 123456 ")
        .await
        .expect("verified");

    assert!(user.is_verified);
    assert_eq!(service.destination(), Destination::Marketplace);
}

#[rstest]
#[case::error_wins(&[("error", "Could not verify phone number, please try again."), ("code", "A valid integer is required.")], "Could not verify phone number, please try again.")]
#[case::code_only(&[("code", "A valid integer is required.")], "A valid integer is required.")]
#[tokio::test]
async fn refused_verification_reports_error_before_code(
    #[case] fields: &[(&str, &str)],
    #[case] expected: &str,
) {
    let mut errors = FieldErrors::new();
    for (field, message) in fields {
        errors.push(*field, *message);
    }
    let mut accounts = MockAccountsApi::new();
    accounts
        .expect_check_verification_code()
        .times(1)
        .return_once(move |_| Err(ApiError::validation(errors)));
    let mut auth = MockAuthApi::new();
    auth.expect_fetch_current_user().times(0);

    let service = service(auth, accounts, MockTokenStore::new());
    service.replace_user(unverified_user(2));
    let error = service
        .confirm_verification("000000")
        .await
        .expect_err("refused");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), expected);
    assert_eq!(service.destination(), Destination::Verification);
}

#[tokio::test]
async fn blank_verification_code_is_rejected_locally() {
    let mut accounts = MockAccountsApi::new();
    accounts.expect_check_verification_code().times(0);

    let service = service(MockAuthApi::new(), accounts, MockTokenStore::new());
    let error = service
        .confirm_verification("   ")
        .await
        .expect_err("blank code");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn verification_code_request_surfaces_backend_reason() {
    let mut accounts = MockAccountsApi::new();
    accounts.expect_send_verification_code().times(1).return_once(|| {
        let mut errors = FieldErrors::new();
        errors.push("error", "User must have a phone number.");
        Err(ApiError::validation(errors))
    });

    let service = service(MockAuthApi::new(), accounts, MockTokenStore::new());
    let error = service
        .request_verification_code()
        .await
        .expect_err("no phone");

    assert_eq!(error.message(), "User must have a phone number.");
}
