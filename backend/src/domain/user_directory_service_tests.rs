//! Tests for the user directory service.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::MockUserDirectoryRepository;
use crate::domain::UserDraftParts;

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 14, 8, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn make_service(
    repo: MockUserDirectoryRepository,
) -> UserDirectoryService<MockUserDirectoryRepository> {
    UserDirectoryService::new(
        Arc::new(repo),
        Arc::new(FixtureClock {
            utc_now: fixture_timestamp(),
        }),
    )
}

#[fixture]
fn draft() -> UserDraft {
    UserDraft::try_from_parts(UserDraftParts {
        first_name: Some("Ann".into()),
        last_name: Some("Lee".into()),
        email: Some("ann@x.com".into()),
        phone_number: Some("5551234".into()),
        city: Some("Metro".into()),
    })
    .expect("valid draft")
}

fn credentials(email: &str, phone: &str) -> LookupCredentials {
    LookupCredentials::try_from_parts(Some(email), Some(phone)).expect("valid credentials")
}

#[rstest]
#[tokio::test]
async fn register_inserts_new_record_with_clock_timestamp(draft: UserDraft) {
    let mut repo = MockUserDirectoryRepository::new();
    repo.expect_find_by_email_or_phone()
        .withf(|email, phone| email.as_ref() == "ann@x.com" && phone.as_ref() == "5551234")
        .times(1)
        .return_once(|_, _| Ok(None));
    repo.expect_insert()
        .withf(|record| record.email().as_ref() == "ann@x.com")
        .times(1)
        .return_once(|_| Ok(()));

    let record = make_service(repo)
        .register(draft)
        .await
        .expect("registration succeeds");

    assert_eq!(record.first_name(), "Ann");
    assert_eq!(record.city(), "Metro");
    assert_eq!(record.created_at(), fixture_timestamp());
    assert_eq!(record.updated_at(), fixture_timestamp());
}

#[rstest]
#[tokio::test]
async fn register_rejects_existing_email_or_phone_without_insert(draft: UserDraft) {
    let existing = UserRecord::new(UserId::random(), draft.clone(), fixture_timestamp());
    let mut repo = MockUserDirectoryRepository::new();
    repo.expect_find_by_email_or_phone()
        .times(1)
        .return_once(move |_, _| Ok(Some(existing)));
    repo.expect_insert().never();

    let err = make_service(repo)
        .register(draft)
        .await
        .expect_err("duplicate rejected");

    assert_eq!(err.code(), ErrorCode::Duplicate);
    assert_eq!(err.message(), DUPLICATE_USER_MESSAGE);
}

#[rstest]
#[tokio::test]
async fn register_maps_insert_time_unique_violation_to_duplicate(draft: UserDraft) {
    let mut repo = MockUserDirectoryRepository::new();
    repo.expect_find_by_email_or_phone()
        .times(1)
        .return_once(|_, _| Ok(None));
    repo.expect_insert()
        .times(1)
        .return_once(|_| Err(UserDirectoryRepositoryError::duplicate_key("users_email_key")));

    let err = make_service(repo)
        .register(draft)
        .await
        .expect_err("race lost");

    assert_eq!(err.code(), ErrorCode::Duplicate);
    assert_eq!(err.message(), DUPLICATE_USER_MESSAGE);
}

#[rstest]
#[case(UserDirectoryRepositoryError::connection("pool timed out"))]
#[case(UserDirectoryRepositoryError::query("syntax error"))]
#[tokio::test]
async fn register_maps_store_failures_to_internal(
    draft: UserDraft,
    #[case] failure: UserDirectoryRepositoryError,
) {
    let mut repo = MockUserDirectoryRepository::new();
    repo.expect_find_by_email_or_phone()
        .times(1)
        .return_once(move |_, _| Err(failure));
    repo.expect_insert().never();

    let err = make_service(repo)
        .register(draft)
        .await
        .expect_err("store failure");

    assert_eq!(err.code(), ErrorCode::InternalError);
}

#[rstest]
#[tokio::test]
async fn lookup_returns_public_profile(draft: UserDraft) {
    let stored = UserRecord::new(UserId::random(), draft, fixture_timestamp());
    let expected_id = stored.id();
    let mut repo = MockUserDirectoryRepository::new();
    repo.expect_find_by_credentials()
        .withf(|creds| {
            creds.email().as_ref() == "ann@x.com" && creds.phone_number().as_ref() == "5551234"
        })
        .times(1)
        .return_once(move |_| Ok(Some(stored)));

    let profile = make_service(repo)
        .lookup(&credentials("Ann@X.com", "5551234"))
        .await
        .expect("lookup succeeds");

    assert_eq!(profile.id, expected_id);
    assert_eq!(profile.last_name, "Lee");
}

#[rstest]
#[tokio::test]
async fn lookup_without_match_is_not_found() {
    let mut repo = MockUserDirectoryRepository::new();
    repo.expect_find_by_credentials()
        .times(1)
        .return_once(|_| Ok(None));

    let err = make_service(repo)
        .lookup(&credentials("ann@x.com", "9999999"))
        .await
        .expect_err("no match");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), USER_NOT_FOUND_MESSAGE);
}

#[rstest]
#[tokio::test]
async fn lookup_maps_connection_failures_to_internal() {
    let mut repo = MockUserDirectoryRepository::new();
    repo.expect_find_by_credentials()
        .times(1)
        .return_once(|_| Err(UserDirectoryRepositoryError::connection("refused")));

    let err = make_service(repo)
        .lookup(&credentials("ann@x.com", "5551234"))
        .await
        .expect_err("store failure");

    assert_eq!(err.code(), ErrorCode::InternalError);
}
