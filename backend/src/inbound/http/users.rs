//! Current-user endpoint.
//!
//! ```text
//! GET /api/v1/users/me
//! ```
//!
//! The profile is loaded from storage on every request rather than cached in
//! the session, so role changes and deletions take effect immediately.

use actix_web::{HttpResponse, get, web};
use serde::{Deserialize, Serialize};

use crate::domain::User;
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// User profile payload returned by login, registration, and `/users/me`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Stable user identifier.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    /// Unique login name.
    #[schema(example = "ada.lovelace")]
    pub username: String,
    /// Name shown to other users.
    #[schema(example = "Ada Lovelace")]
    pub display_name: String,
    /// Role claims held by the account, lowercase.
    #[schema(example = json!(["manager"]))]
    pub roles: Vec<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().as_ref().to_owned(),
            display_name: user.display_name().as_ref().to_owned(),
            roles: user
                .roles()
                .iter()
                .map(|role| role.as_str().to_owned())
                .collect(),
        }
    }
}

/// Fetch the profile of the session user.
///
/// # Errors
/// Returns 401 when no session is established or the session user no longer
/// exists, and 503 when the user store is unreachable.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user profile", body = UserResponse),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 503, description = "Service unavailable", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn me(state: web::Data<HttpState>, session: SessionContext) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let user = state.profile.fetch_profile(&user_id).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(UserResponse::from(user)))
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
