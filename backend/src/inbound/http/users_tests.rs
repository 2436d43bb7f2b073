//! Tests for the current-user endpoint.

use super::*;
use crate::domain::ports::{
    FixtureContactsCommand, FixtureContactsQuery, FixtureLoginService, FixtureRegistrationService,
    FixtureUserProfileQuery,
};
use crate::inbound::http::auth::LoginRequest;
use crate::inbound::http::state::HttpStatePorts;
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use serde_json::Value;
use std::sync::Arc;

fn test_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState::new(HttpStatePorts {
        login: Arc::new(FixtureLoginService),
        registration: Arc::new(FixtureRegistrationService),
        profile: Arc::new(FixtureUserProfileQuery),
        contacts: Arc::new(FixtureContactsCommand),
        contacts_query: Arc::new(FixtureContactsQuery),
    });
    App::new()
        .app_data(web::Data::new(state))
        .wrap(crate::inbound::http::test_utils::test_session_middleware())
        .service(
            web::scope("/api/v1")
                .service(crate::inbound::http::auth::login)
                .service(me),
        )
}

async fn login_and_get_cookie(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
) -> actix_web::cookie::Cookie<'static> {
    let login_req = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(&LoginRequest {
            username: "admin".into(),
            password: "password".into(),
        })
        .to_request();
    let login_res = actix_test::call_service(app, login_req).await;
    assert!(login_res.status().is_success());
    login_res
        .response()
        .cookies()
        .find(|c| c.name() == "session")
        .expect("session cookie")
        .into_owned()
}

#[actix_web::test]
async fn me_returns_the_session_user_profile() {
    let app = actix_test::init_service(test_app()).await;
    let cookie = login_and_get_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/users/me")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let cache_control = response
        .headers()
        .get("Cache-Control")
        .and_then(|value| value.to_str().ok())
        .expect("cache-control header");
    assert_eq!(cache_control, "private, no-cache, must-revalidate");

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("id").and_then(Value::as_str),
        Some(FixtureLoginService::USER_ID)
    );
    assert_eq!(
        body.get("displayName").and_then(Value::as_str),
        Some("Ada Lovelace")
    );
    assert!(body.get("display_name").is_none());
}

#[actix_web::test]
async fn me_rejects_without_session() {
    let app = actix_test::init_service(test_app()).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/users/me")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
