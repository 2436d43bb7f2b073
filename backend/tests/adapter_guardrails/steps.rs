//! BDD-style step definitions for adapter guardrails.
//!
//! The `rstest-bdd` step macros register these functions for feature-based
//! tests, but we also call the functions directly from Rust tests to keep the
//! suite easy to read and refactor.
//
// rstest-bdd generates guard variables with double underscores, which trips
// the non_snake_case lint under -D warnings.
#![allow(non_snake_case)]

use actix_web::http::header;
use rstest_bdd_macros::{given, then, when};
use serde_json::Value;

use crate::doubles::LoginResponse;
use crate::harness::{SharedWorld, with_world_async};
use backend::domain::Error;
use backend::inbound::http::auth::LoginRequest;
use backend::inbound::http::contacts::ContactRequest;

fn perform_login_request(
    world: &SharedWorld,
    username: &str,
    password: &str,
    mock_response: Option<LoginResponse>,
) {
    if let Some(response) = mock_response {
        let login = { world.borrow().login.clone() };
        login.set_response(response);
    }

    let payload = LoginRequest {
        username: username.to_owned(),
        password: password.to_owned(),
    };

    let (status, cookie_header) = with_world_async(world, |base_url| async move {
        let response = awc::Client::default()
            .post(format!("{base_url}/api/v1/login"))
            .send_json(&payload)
            .await
            .expect("login request");

        let status = response.status().as_u16();
        let cookie_header = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_owned());
        (status, cookie_header)
    });

    let mut ctx = world.borrow_mut();
    ctx.last_status = Some(status);
    ctx.session_cookie = cookie_header;
}

fn session_cookie_pair(world: &SharedWorld) -> String {
    let ctx = world.borrow();
    ctx.session_cookie
        .clone()
        .expect("session cookie set")
        .split(';')
        .next()
        .expect("cookie pair")
        .to_owned()
}

#[given("a running server wired with recorded driving ports")]
pub(crate) fn a_running_server_wired_with_recorded_driving_ports(_world: SharedWorld) {}

#[when("the client logs in with valid credentials")]
pub(crate) fn the_client_logs_in_with_valid_credentials(world: SharedWorld) {
    perform_login_request(&world, "admin", "password", None);
}

#[when("the client logs in with invalid credentials")]
pub(crate) fn the_client_logs_in_with_invalid_credentials(world: SharedWorld) {
    let error_response = LoginResponse::Err(Error::unauthorized("invalid credentials"));
    perform_login_request(&world, "admin", "wrong", Some(error_response));
}

#[when("the client requests their profile")]
pub(crate) fn the_client_requests_their_profile(world: SharedWorld) {
    let cookie = session_cookie_pair(&world);

    let (status, json) = with_world_async(&world, |base_url| async move {
        let mut response = awc::Client::default()
            .get(format!("{base_url}/api/v1/users/me"))
            .insert_header((header::COOKIE, cookie))
            .send()
            .await
            .expect("profile request");

        let status = response.status().as_u16();
        let body = response.body().await.expect("profile body");
        let json: Value = serde_json::from_slice(&body).expect("profile json");
        (status, json)
    });

    let mut ctx = world.borrow_mut();
    ctx.last_status = Some(status);
    ctx.last_body = Some(json);
}

#[when("the client requests their profile without a valid session")]
pub(crate) fn the_client_requests_their_profile_without_a_valid_session(world: SharedWorld) {
    let status = with_world_async(&world, |base_url| async move {
        let response = awc::Client::default()
            .get(format!("{base_url}/api/v1/users/me"))
            .send()
            .await
            .expect("profile request");
        response.status().as_u16()
    });

    let mut ctx = world.borrow_mut();
    ctx.last_status = Some(status);
}

#[when("the client submits a new contact")]
pub(crate) fn the_client_submits_a_new_contact(world: SharedWorld) {
    let cookie = session_cookie_pair(&world);

    let payload = ContactRequest {
        name: "Debra Garcia".to_owned(),
        address: "1234 Main St".to_owned(),
        city: "Redmond".to_owned(),
        state: "WA".to_owned(),
        zip: "10999".to_owned(),
        email: "debra@example.com".to_owned(),
    };

    let (status, json) = with_world_async(&world, |base_url| async move {
        let mut response = awc::Client::default()
            .post(format!("{base_url}/api/v1/contacts"))
            .insert_header((header::COOKIE, cookie))
            .send_json(&payload)
            .await
            .expect("contact request");

        let status = response.status().as_u16();
        let body = response.body().await.expect("contact body");
        let json: Value = serde_json::from_slice(&body).expect("contact json");
        (status, json)
    });

    let mut ctx = world.borrow_mut();
    ctx.last_status = Some(status);
    ctx.last_body = Some(json);
}

#[then("the HTTP response is success and a session cookie is set")]
pub(crate) fn the_http_response_is_success_and_a_session_cookie_is_set(world: SharedWorld) {
    let ctx = world.borrow();
    assert_eq!(ctx.last_status, Some(200));
    let cookie = ctx.session_cookie.as_deref().expect("cookie present");
    assert!(
        cookie.starts_with("session="),
        "expected session cookie, got: {cookie}"
    );
}

#[then("the HTTP response is unauthorised")]
pub(crate) fn the_http_response_is_unauthorised(world: SharedWorld) {
    let ctx = world.borrow();
    assert_eq!(ctx.last_status, Some(401));
}

#[then("the HTTP response is unauthorised and no session cookie is set")]
pub(crate) fn the_http_response_is_unauthorised_and_no_session_cookie_is_set(world: SharedWorld) {
    let ctx = world.borrow();
    assert_eq!(ctx.last_status, Some(401));
    assert!(
        ctx.session_cookie.is_none(),
        "expected no Set-Cookie header on unauthorised responses"
    );
}

#[then("the login port was called with the expected credentials")]
pub(crate) fn the_login_port_was_called_with_the_expected_credentials(world: SharedWorld) {
    let ctx = world.borrow();
    assert_eq!(
        ctx.login.calls(),
        vec![("admin".to_owned(), "password".to_owned())]
    );
}

#[then("the profile port was called with the authenticated user id")]
pub(crate) fn the_profile_port_was_called_with_the_authenticated_user_id(world: SharedWorld) {
    let ctx = world.borrow();
    assert_eq!(
        ctx.profile.calls(),
        vec!["11111111-1111-1111-1111-111111111111".to_owned()]
    );
}

#[then("the profile port is not called")]
pub(crate) fn the_profile_port_is_not_called(world: SharedWorld) {
    let ctx = world.borrow();
    assert_eq!(ctx.profile.calls(), Vec::<String>::new());
}

#[then("the profile response includes the expected display name")]
pub(crate) fn the_profile_response_includes_the_expected_display_name(world: SharedWorld) {
    let ctx = world.borrow();
    let body = ctx.last_body.as_ref().expect("profile body present");
    assert_eq!(
        body.get("displayName").and_then(Value::as_str),
        Some("Site Admin")
    );
}

#[then("the create port received the session user")]
pub(crate) fn the_create_port_received_the_session_user(world: SharedWorld) {
    let ctx = world.borrow();
    assert_eq!(
        ctx.contacts.create_calls(),
        vec![(
            "11111111-1111-1111-1111-111111111111".to_owned(),
            "Debra Garcia".to_owned()
        )]
    );
}

#[then("the contact response is created as submitted")]
pub(crate) fn the_contact_response_is_created_as_submitted(world: SharedWorld) {
    let ctx = world.borrow();
    assert_eq!(ctx.last_status, Some(201));
    let body = ctx.last_body.as_ref().expect("contact body present");
    assert_eq!(body.get("status").and_then(Value::as_str), Some("submitted"));
}
