//! Identity domain services.
//!
//! This module implements the driving ports for authentication,
//! registration, and session-to-principal resolution over the user
//! repository and password hasher.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    LoginService, NewUserRecord, PasswordHashError, PasswordHasher, PrincipalQuery,
    RegistrationService, UserPersistenceError, UserProfileQuery, UserRepository,
};
use crate::domain::{Error, LoginCredentials, Principal, RegisterDetails, User, UserId, Username};

/// Identity service implementing the driving ports.
///
/// Login failures deliberately collapse into a single unauthorised error so
/// responses never reveal whether the username or the password was wrong.
#[derive(Clone)]
pub struct IdentityService<R, H> {
    users: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> IdentityService<R, H> {
    /// Create a new service over the given repository and hasher.
    pub fn new(users: Arc<R>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

impl<R, H> IdentityService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    fn map_user_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
            UserPersistenceError::DuplicateUsername { username } => {
                Error::conflict(format!("username {username} is already taken"))
            }
        }
    }

    fn map_hasher_error(error: PasswordHashError) -> Error {
        match error {
            PasswordHashError::Hashing { message } => {
                Error::internal(format!("password hashing failed: {message}"))
            }
        }
    }

    fn invalid_credentials() -> Error {
        Error::unauthorized("invalid credentials")
    }

    async fn load_user(&self, user_id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(Self::map_user_error)?
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

#[async_trait]
impl<R, H> LoginService for IdentityService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        // Attempts that do not even parse as a username fail the same way a
        // wrong password does.
        let Ok(username) = Username::new(credentials.username()) else {
            return Err(Self::invalid_credentials());
        };
        let Some(stored) = self
            .users
            .find_credentials(&username)
            .await
            .map_err(Self::map_user_error)?
        else {
            return Err(Self::invalid_credentials());
        };
        let matches = self
            .hasher
            .verify(credentials.password(), &stored.password_hash)
            .await
            .map_err(Self::map_hasher_error)?;
        if !matches {
            return Err(Self::invalid_credentials());
        }
        self.users
            .find_by_id(&stored.user_id)
            .await
            .map_err(Self::map_user_error)?
            .ok_or_else(|| Error::internal("credentials matched a user that no longer exists"))
    }
}

#[async_trait]
impl<R, H> RegistrationService for IdentityService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn register(&self, details: &RegisterDetails) -> Result<User, Error> {
        let password_hash = self
            .hasher
            .hash(details.password())
            .await
            .map_err(Self::map_hasher_error)?;
        // Registration never grants roles; moderation roles arrive through
        // seeding or operator action.
        let record = NewUserRecord {
            id: UserId::random(),
            username: details.username().clone(),
            display_name: details.display_name().clone(),
            password_hash,
            roles: Vec::new(),
        };
        self.users
            .create(&record)
            .await
            .map_err(Self::map_user_error)
    }
}

#[async_trait]
impl<R, H> UserProfileQuery for IdentityService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn fetch_profile(&self, user_id: &UserId) -> Result<User, Error> {
        self.load_user(user_id).await
    }
}

#[async_trait]
impl<R, H> PrincipalQuery for IdentityService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn principal_for(&self, user_id: &UserId) -> Result<Principal, Error> {
        let user = self.load_user(user_id).await?;
        Ok(Principal::from_user(&user))
    }
}

#[cfg(test)]
#[path = "identity_service_tests.rs"]
mod tests;
