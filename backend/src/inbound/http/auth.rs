//! Authentication and account endpoints.
//!
//! ```text
//! POST /api/v1/register {"username":"ada.lovelace","displayName":"Ada Lovelace","password":"..."}
//! POST /api/v1/login    {"username":"ada.lovelace","password":"..."}
//! POST /api/v1/logout
//! ```
//!
//! Login and registration run through domain ports, so these handlers stay
//! free of persistence concerns. A successful login stores only the user id
//! in the session cookie; role claims are re-read from storage on every
//! later request.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{
    DisplayName, Error, LoginCredentials, LoginValidationError, RegisterDetails,
    RegistrationValidationError, UserValidationError, Username,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::UserResponse;

/// Request body for `POST /api/v1/register`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Unique login name for the new account.
    #[schema(example = "ada.lovelace")]
    pub username: String,
    /// Name shown to other users.
    #[schema(example = "Ada Lovelace")]
    pub display_name: String,
    /// Plaintext password; hashed before storage, never logged.
    #[schema(example = "correct horse battery staple")]
    pub password: String,
}

/// Request body for `POST /api/v1/login`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Login name of the account.
    #[schema(example = "ada.lovelace")]
    pub username: String,
    /// Account password.
    #[schema(example = "correct horse battery staple")]
    pub password: String,
}

/// Create an account.
///
/// Registration never grants roles. The new account can sign in immediately
/// but holds no moderation permissions until an operator assigns them.
///
/// # Errors
/// Returns 400 for payload validation failures, 409 when the username is
/// already taken, and 503 when the user store is unreachable.
#[utoipa::path(
    post,
    path = "/api/v1/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Invalid request", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 409, description = "Username already taken", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 503, description = "Service unavailable", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let RegisterRequest {
        username,
        display_name,
        password,
    } = payload.into_inner();
    let username = Username::new(username).map_err(map_username_error)?;
    let display_name = DisplayName::new(display_name).map_err(map_display_name_error)?;
    let details = RegisterDetails::try_new(username, display_name, &password)
        .map_err(map_password_policy_error)?;

    let user = state.registration.register(&details).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// Authenticate and establish a session.
///
/// On success the response carries the session cookie alongside the profile,
/// so clients can render the signed-in state without a follow-up request.
///
/// # Errors
/// Returns 400 for blank credentials and 401 when they do not match an
/// account; unknown usernames and wrong passwords are indistinguishable.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (
            status = 200,
            description = "Login success",
            body = UserResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))
        ),
        (status = 400, description = "Invalid request", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 401, description = "Invalid credentials", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 503, description = "Service unavailable", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from_parts(&payload.username, &payload.password)
        .map_err(map_login_validation_error)?;

    let user = state.login.authenticate(&credentials).await?;
    session.persist_user(user.id())?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// Close the current session.
///
/// # Errors
/// Returns 401 when no session is established.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses(
        (status = 204, description = "Session closed"),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    session.forget();
    Ok(HttpResponse::NoContent().finish())
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => Error::invalid_request("username must not be empty")
            .with_details(json!({ "field": "username", "code": "empty_username" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

fn map_username_error(err: UserValidationError) -> Error {
    let code = match err {
        UserValidationError::EmptyUsername => "empty_username",
        UserValidationError::UsernameTooShort { .. } => "username_too_short",
        UserValidationError::UsernameTooLong { .. } => "username_too_long",
        UserValidationError::UsernameInvalidCharacters => "username_invalid_characters",
        _ => "invalid_username",
    };
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": "username", "code": code }))
}

fn map_display_name_error(err: UserValidationError) -> Error {
    let code = match err {
        UserValidationError::EmptyDisplayName => "empty_display_name",
        UserValidationError::DisplayNameTooShort { .. } => "display_name_too_short",
        UserValidationError::DisplayNameTooLong { .. } => "display_name_too_long",
        UserValidationError::DisplayNameInvalidCharacters => "display_name_invalid_characters",
        _ => "invalid_display_name",
    };
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": "displayName", "code": code }))
}

fn map_password_policy_error(err: RegistrationValidationError) -> Error {
    let code = match err {
        RegistrationValidationError::PasswordTooShort { .. } => "password_too_short",
        RegistrationValidationError::PasswordTooLong { .. } => "password_too_long",
    };
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": "password", "code": code }))
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
