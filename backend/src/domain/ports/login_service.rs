//! Driving port for login/authentication use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! authenticate credentials without knowing (or importing) the backing
//! infrastructure. This makes HTTP handler tests deterministic because they
//! can substitute a test double instead of wiring persistence.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Role, User};

/// Domain use-case port for authentication.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user with roles.
    ///
    /// Unknown usernames and wrong passwords produce the same unauthorised
    /// error so responses never reveal which half was wrong.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}

/// In-memory authenticator used by handler tests and local bring-up.
///
/// `admin` / `password` authenticates as a fixed administrator account.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

impl FixtureLoginService {
    /// User id produced by a successful fixture login.
    pub const USER_ID: &'static str = "123e4567-e89b-12d3-a456-426614174000";
}

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        if credentials.username() == "admin" && credentials.password() == "password" {
            User::try_from_strings(Self::USER_ID, "admin", "Site Admin")
                .map(|user| user.with_roles([Role::Administrator]))
                .map_err(|err| Error::internal(format!("invalid fixture user: {err}")))
        } else {
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}
