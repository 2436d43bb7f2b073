//! Tests for HTTP error mapping.

use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::rstest;
use rstest_bdd_macros::{given, then, when};
use serde_json::json;

use super::*;
use crate::domain::Error;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[rstest]
#[case::invalid_request(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case::unauthorised(Error::unauthorized("login required"), StatusCode::UNAUTHORIZED)]
#[case::forbidden(Error::forbidden("permission denied"), StatusCode::FORBIDDEN)]
#[case::not_found(Error::not_found("contact not found"), StatusCode::NOT_FOUND)]
#[case::conflict(Error::conflict("contact is already approved"), StatusCode::CONFLICT)]
#[case::service_unavailable(
    Error::service_unavailable("db down"),
    StatusCode::SERVICE_UNAVAILABLE
)]
#[case::internal(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn every_error_code_maps_to_its_status(#[case] error: Error, #[case] expected: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), expected);
}

async fn rendered_payload(
    error: Error,
    expected_status: StatusCode,
    expected_trace_id: Option<&str>,
) -> Error {
    let response = ResponseError::error_response(&error);
    assert_eq!(response.status(), expected_status);

    let header = response.headers().get(TRACE_ID_HEADER);
    match expected_trace_id {
        Some(expected) => {
            let trace_id = header
                .expect("trace-id header is set by error_response")
                .to_str()
                .expect("trace-id header is ascii");
            assert_eq!(trace_id, expected);
        }
        None => assert!(header.is_none(), "trace-id header should be absent"),
    }

    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");

    serde_json::from_slice(&bytes).expect("error payload deserialises")
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted_but_keep_their_trace_id() {
    let error = Error::internal("connection pool exhausted")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"pool": "primary"}));

    let payload = rendered_payload(error, StatusCode::INTERNAL_SERVER_ERROR, Some(TRACE_ID)).await;

    assert_eq!(payload.code(), ErrorCode::InternalError);
    assert_eq!(payload.message(), "Internal server error");
    assert!(payload.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn client_errors_pass_through_with_their_details() {
    let error = Error::invalid_request("name must not be empty")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"field": "name"}));

    let payload = rendered_payload(error, StatusCode::BAD_REQUEST, Some(TRACE_ID)).await;

    assert_eq!(payload.code(), ErrorCode::InvalidRequest);
    assert_eq!(payload.message(), "name must not be empty");
    assert_eq!(payload.details(), Some(&json!({"field": "name"})));
}

#[rstest]
#[actix_web::test]
async fn errors_without_a_trace_id_omit_the_header() {
    let error = Error::forbidden("permission denied");

    let payload = rendered_payload(error, StatusCode::FORBIDDEN, None).await;

    assert_eq!(payload.code(), ErrorCode::Forbidden);
    assert_eq!(payload.trace_id(), None);
}

#[test]
fn promoted_actix_errors_never_leak_detail() {
    let actix_err = actix_web::error::ErrorBadRequest("path parse blew up");
    let err: Error = actix_err.into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert_eq!(err.details(), None);
}

#[given("a moderation conflict from the domain")]
fn a_moderation_conflict() -> Error {
    Error::conflict("contact is already approved")
}

#[when("the adapter renders the HTTP response")]
fn the_adapter_renders_the_http_response(error: &Error) -> HttpResponse {
    ResponseError::error_response(error)
}

#[then("the client sees a conflict with the explanation intact")]
fn the_client_sees_a_conflict(response: &HttpResponse) {
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[rstest]
fn rendering_a_conflict_happy_path() {
    let error = a_moderation_conflict();
    let response = the_adapter_renders_the_http_response(&error);
    the_client_sees_a_conflict(&response);
}

#[given("an internal failure carrying backend detail")]
fn an_internal_failure_carrying_backend_detail() -> Error {
    Error::internal("password hashing failed: bad salt").with_details(json!({"secret": true}))
}

#[then("clients see only the generic message")]
fn clients_see_only_the_generic_message(redacted: &Error) {
    assert_eq!(redacted.message(), "Internal server error");
    assert!(redacted.details().is_none());
}

#[rstest]
fn rendering_an_internal_failure_unhappy_path() {
    let error = an_internal_failure_carrying_backend_detail();
    let redacted = redact_if_internal(&error);
    clients_see_only_the_generic_message(&redacted);
}
