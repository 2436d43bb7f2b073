//! Driving port for resolving request principals.
//!
//! Contact handlers resolve the session's user id into a [`Principal`]
//! before evaluating authorization. Roles are re-read from storage on every
//! request rather than cached in the session, so revoking a role takes
//! effect immediately.

use async_trait::async_trait;

use crate::domain::{Error, Principal, UserId};

/// Domain use-case port resolving a session user id into a principal.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PrincipalQuery: Send + Sync {
    /// Resolve the principal for an authenticated user id.
    ///
    /// A missing user surfaces as unauthorised: only a stale session can
    /// present an id that no longer exists.
    async fn principal_for(&self, user_id: &UserId) -> Result<Principal, Error>;
}

/// Fixture principal query returning a role-less principal for any id.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePrincipalQuery;

#[async_trait]
impl PrincipalQuery for FixturePrincipalQuery {
    async fn principal_for(&self, user_id: &UserId) -> Result<Principal, Error> {
        Ok(Principal::new(user_id.clone(), Vec::new()))
    }
}
