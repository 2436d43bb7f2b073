//! Driving port for account registration.

use async_trait::async_trait;

use crate::domain::{Error, RegisterDetails, User, UserId};

/// Domain use-case port for creating accounts.
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Create an account and return the stored profile.
    ///
    /// A username already held by another account surfaces as a conflict
    /// error rather than a validation failure.
    async fn register(&self, details: &RegisterDetails) -> Result<User, Error>;
}

/// In-memory registration used by handler tests.
///
/// Always succeeds with a freshly generated user id and no roles.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRegistrationService;

#[async_trait]
impl RegistrationService for FixtureRegistrationService {
    async fn register(&self, details: &RegisterDetails) -> Result<User, Error> {
        Ok(User::new(
            UserId::random(),
            details.username().clone(),
            details.display_name().clone(),
            Vec::new(),
        ))
    }
}
