//! Driving port for user profile queries.
//!
//! Inbound adapters use this port to load a user's profile without importing
//! persistence details. Fixture implementations keep HTTP handlers testable
//! before databases are wired.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for reading the current user's profile.
#[async_trait]
pub trait UserProfileQuery: Send + Sync {
    /// Return the profile, including role claims, for the session user.
    ///
    /// A missing user surfaces as unauthorised: only a stale session can
    /// present an id that no longer exists.
    async fn fetch_profile(&self, user_id: &UserId) -> Result<User, Error>;
}

/// Fixture profile query used by handler tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserProfileQuery;

#[async_trait]
impl UserProfileQuery for FixtureUserProfileQuery {
    async fn fetch_profile(&self, user_id: &UserId) -> Result<User, Error> {
        User::try_from_strings(user_id.as_ref(), "ada.lovelace", "Ada Lovelace")
            .map_err(|err| Error::internal(format!("invalid fixture profile: {err}")))
    }
}
