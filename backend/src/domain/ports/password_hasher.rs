//! Port abstraction for password hashing adapters.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHashError {
        /// Hashing or verification machinery failed.
        Hashing { message: String } => "password hashing failed: {message}",
    }
}

/// Domain port for hashing and verifying passwords.
///
/// The trait is async because production hashes are deliberately slow;
/// adapters are expected to move the work off the async runtime.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into a PHC string.
    async fn hash(&self, password: &str) -> Result<String, PasswordHashError>;

    /// Verify a plaintext password against a stored PHC string.
    ///
    /// `Ok(false)` means the password does not match; `Err` means the
    /// machinery itself failed, including an unparseable stored hash.
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError>;
}

/// Transparent stand-in hasher used by tests and fixtures.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePasswordHasher;

#[async_trait]
impl PasswordHasher for FixturePasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        Ok(format!("fixture${password}"))
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError> {
        Ok(hash == format!("fixture${password}"))
    }
}
