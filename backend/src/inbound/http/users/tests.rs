//! Tests for user directory HTTP handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use chrono::Utc;
use mockable::DefaultClock;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{MockUserLookup, MockUserRegistration};
use crate::domain::{
    DUPLICATE_USER_MESSAGE, EmailAddress, Error, USER_NOT_FOUND_MESSAGE, UserDirectoryService,
    UserId,
};
use crate::inbound::http::error::INTERNAL_ERROR_MESSAGE;
use crate::inbound::http::validation::{MISSING_CREDENTIALS_MESSAGE, MISSING_FIELDS_MESSAGE};
use crate::test_support::InMemoryUserDirectoryRepository;

fn test_app(
    registration: MockUserRegistration,
    lookup: MockUserLookup,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState::new(Arc::new(registration), Arc::new(lookup));
    App::new()
        .app_data(web::Data::new(state))
        .service(scope())
}

async fn call(
    registration: MockUserRegistration,
    lookup: MockUserLookup,
    request: actix_http::Request,
) -> (StatusCode, Value) {
    let app = actix_test::init_service(test_app(registration, lookup)).await;
    let response = actix_test::call_service(&app, request).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = serde_json::from_slice(&body).expect("JSON response body");
    (status, value)
}

fn registration_echoing_draft() -> MockUserRegistration {
    let mut registration = MockUserRegistration::new();
    registration
        .expect_register()
        .times(1)
        .returning(|draft| Ok(UserRecord::new(UserId::random(), draft, Utc::now())));
    registration
}

fn ann_payload() -> Value {
    json!({
        "Fname": " Ann ",
        "Lname": "Lee",
        "email": "Ann@X.com",
        "phoneNumber": 5551234,
        "city": "Metro"
    })
}

fn ann_profile() -> UserProfile {
    UserProfile {
        id: UserId::random(),
        first_name: "Ann".into(),
        last_name: "Lee".into(),
        email: EmailAddress::new("ann@x.com").expect("valid email"),
        city: "Metro".into(),
    }
}

#[actix_web::test]
async fn register_returns_created_record() {
    let request = actix_test::TestRequest::post()
        .uri("/user/post")
        .set_json(ann_payload())
        .to_request();

    let (status, body) = call(registration_echoing_draft(), MockUserLookup::new(), request).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], REGISTERED_MESSAGE);
    assert!(body["_id"].as_str().is_some_and(|id| !id.is_empty()));
    assert_eq!(body["Fname"], "Ann");
    assert_eq!(body["email"], "ann@x.com");
    assert_eq!(body["phoneNumber"], "5551234");
    assert_eq!(body["city"], "Metro");
}

#[actix_web::test]
async fn register_accepts_numeric_string_phone_numbers() {
    let mut payload = ann_payload();
    payload["phoneNumber"] = json!(" 0771234567 ");
    let request = actix_test::TestRequest::post()
        .uri("/user/post")
        .set_json(payload)
        .to_request();

    let (status, body) = call(registration_echoing_draft(), MockUserLookup::new(), request).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["phoneNumber"], "771234567");
}

#[rstest]
#[case(json!(5_551_234.0))]
#[case(json!("005551234"))]
#[actix_web::test]
async fn register_canonicalises_whole_number_phone_forms(#[case] phone: Value) {
    let mut payload = ann_payload();
    payload["phoneNumber"] = phone;
    let request = actix_test::TestRequest::post()
        .uri("/user/post")
        .set_json(payload)
        .to_request();

    let (status, body) = call(registration_echoing_draft(), MockUserLookup::new(), request).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["phoneNumber"], "5551234");
}

#[rstest]
#[case(json!(5_551_234.5))]
#[case(json!(-5_551_234))]
#[actix_web::test]
async fn register_rejects_fractional_and_negative_phone_numbers(#[case] phone: Value) {
    let mut payload = ann_payload();
    payload["phoneNumber"] = phone;
    let mut registration = MockUserRegistration::new();
    registration.expect_register().never();
    let request = actix_test::TestRequest::post()
        .uri("/user/post")
        .set_json(payload)
        .to_request();

    let (status, body) = call(registration, MockUserLookup::new(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["code"], "invalid_phone_number");
}

#[rstest]
#[case(json!(0))]
#[case(json!("000"))]
#[actix_web::test]
async fn register_treats_zero_phone_number_as_missing(#[case] phone: Value) {
    let mut payload = ann_payload();
    payload["phoneNumber"] = phone;
    let mut registration = MockUserRegistration::new();
    registration.expect_register().never();
    let request = actix_test::TestRequest::post()
        .uri("/user/post")
        .set_json(payload)
        .to_request();

    let (status, body) = call(registration, MockUserLookup::new(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], MISSING_FIELDS_MESSAGE);
    assert_eq!(body["details"]["field"], "phoneNumber");
}

#[actix_web::test]
async fn zero_padded_phone_numbers_collide_with_their_integer_form() {
    let repository = Arc::new(InMemoryUserDirectoryRepository::new());
    let service = Arc::new(UserDirectoryService::new(
        repository.clone(),
        Arc::new(DefaultClock),
    ));
    let state = HttpState::new(service.clone(), service);
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .service(scope()),
    )
    .await;

    let first = actix_test::TestRequest::post()
        .uri("/user/post")
        .set_json(ann_payload())
        .to_request();
    let created = actix_test::call_service(&app, first).await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let created: Value = actix_test::read_body_json(created).await;

    let mut padded = ann_payload();
    padded["email"] = json!("bob@x.com");
    padded["phoneNumber"] = json!("05551234");
    let second = actix_test::TestRequest::post()
        .uri("/user/post")
        .set_json(padded)
        .to_request();
    let duplicate = actix_test::call_service(&app, second).await;
    assert_eq!(duplicate.status(), StatusCode::BAD_REQUEST);
    let duplicate: Value = actix_test::read_body_json(duplicate).await;
    assert_eq!(duplicate["code"], "duplicate");
    assert_eq!(repository.len(), 1);

    let lookup = actix_test::TestRequest::get()
        .uri("/user/get?email=ann%40x.com&phoneNumber=005551234")
        .to_request();
    let found = actix_test::call_service(&app, lookup).await;
    assert_eq!(found.status(), StatusCode::OK);
    let found: Value = actix_test::read_body_json(found).await;
    assert_eq!(found["user"]["id"], created["_id"]);
}

#[rstest]
#[case("Fname")]
#[case("Lname")]
#[case("email")]
#[case("phoneNumber")]
#[case("city")]
#[actix_web::test]
async fn register_rejects_missing_field_without_calling_service(#[case] field: &str) {
    let mut payload = ann_payload();
    payload
        .as_object_mut()
        .expect("payload object")
        .remove(field);
    let mut registration = MockUserRegistration::new();
    registration.expect_register().never();
    let request = actix_test::TestRequest::post()
        .uri("/user/post")
        .set_json(payload)
        .to_request();

    let (status, body) = call(registration, MockUserLookup::new(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["message"], MISSING_FIELDS_MESSAGE);
    assert_eq!(body["details"]["field"], field);
}

#[actix_web::test]
async fn register_rejects_blank_fields() {
    let mut payload = ann_payload();
    payload["city"] = json!("   ");
    let mut registration = MockUserRegistration::new();
    registration.expect_register().never();
    let request = actix_test::TestRequest::post()
        .uri("/user/post")
        .set_json(payload)
        .to_request();

    let (status, body) = call(registration, MockUserLookup::new(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "city");
}

#[actix_web::test]
async fn register_rejects_non_numeric_phone_numbers() {
    let mut payload = ann_payload();
    payload["phoneNumber"] = json!("555-1234");
    let mut registration = MockUserRegistration::new();
    registration.expect_register().never();
    let request = actix_test::TestRequest::post()
        .uri("/user/post")
        .set_json(payload)
        .to_request();

    let (status, body) = call(registration, MockUserLookup::new(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["code"], "invalid_phone_number");
}

#[actix_web::test]
async fn register_reports_duplicates_as_bad_request() {
    let mut registration = MockUserRegistration::new();
    registration
        .expect_register()
        .times(1)
        .return_once(|_| Err(Error::duplicate(DUPLICATE_USER_MESSAGE)));
    let request = actix_test::TestRequest::post()
        .uri("/user/post")
        .set_json(ann_payload())
        .to_request();

    let (status, body) = call(registration, MockUserLookup::new(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "duplicate");
    assert_eq!(body["message"], DUPLICATE_USER_MESSAGE);
}

#[actix_web::test]
async fn register_rejects_malformed_json_with_envelope() {
    let request = actix_test::TestRequest::post()
        .uri("/user/post")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();

    let (status, body) = call(MockUserRegistration::new(), MockUserLookup::new(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["code"], "malformed_body");
}

#[actix_web::test]
async fn get_user_returns_public_profile() {
    let profile = ann_profile();
    let expected_id = profile.id.to_string();
    let mut lookup = MockUserLookup::new();
    lookup
        .expect_lookup()
        .withf(|creds| {
            creds.email().as_ref() == "ann@x.com" && creds.phone_number().as_ref() == "5551234"
        })
        .times(1)
        .return_once(move |_| Ok(profile));
    let request = actix_test::TestRequest::get()
        .uri("/user/get?email=ANN%40x.com&phoneNumber=5551234")
        .to_request();

    let (status, body) = call(MockUserRegistration::new(), lookup, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], SIGNED_IN_MESSAGE);
    assert_eq!(body["user"]["id"], expected_id);
    assert_eq!(body["user"]["Fname"], "Ann");
    assert_eq!(body["user"]["city"], "Metro");
    assert!(body["user"].get("phoneNumber").is_none());
}

#[rstest]
#[case("/user/get?email=ann%40x.com", "phoneNumber")]
#[case("/user/get?phoneNumber=5551234", "email")]
#[case("/user/get?email=&phoneNumber=5551234", "email")]
#[actix_web::test]
async fn get_user_requires_both_parameters(#[case] uri: &str, #[case] field: &str) {
    let mut lookup = MockUserLookup::new();
    lookup.expect_lookup().never();
    let request = actix_test::TestRequest::get().uri(uri).to_request();

    let (status, body) = call(MockUserRegistration::new(), lookup, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], MISSING_CREDENTIALS_MESSAGE);
    assert_eq!(body["details"]["field"], field);
}

#[actix_web::test]
async fn get_user_reports_unknown_pair_as_not_found() {
    let mut lookup = MockUserLookup::new();
    lookup
        .expect_lookup()
        .times(1)
        .return_once(|_| Err(Error::not_found(USER_NOT_FOUND_MESSAGE)));
    let request = actix_test::TestRequest::get()
        .uri("/user/get?email=ann%40x.com&phoneNumber=9999999")
        .to_request();

    let (status, body) = call(MockUserRegistration::new(), lookup, request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
    assert_eq!(body["message"], USER_NOT_FOUND_MESSAGE);
}

#[actix_web::test]
async fn get_user_redacts_internal_failures() {
    let mut lookup = MockUserLookup::new();
    lookup
        .expect_lookup()
        .times(1)
        .return_once(|_| Err(Error::internal("user directory unavailable: refused")));
    let request = actix_test::TestRequest::get()
        .uri("/user/get?email=ann%40x.com&phoneNumber=5551234")
        .to_request();

    let (status, body) = call(MockUserRegistration::new(), lookup, request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "internal_error");
    assert_eq!(body["message"], INTERNAL_ERROR_MESSAGE);
}
