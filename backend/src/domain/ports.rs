//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (login, registration, profile, principal resolution) are
//! what inbound adapters call; driven ports (repositories, password
//! hashing, seeding) are what the domain services call out to. Each trait
//! exposes strongly typed errors so adapters map their failures into
//! predictable variants instead of returning `anyhow::Result`.

mod macros;
pub(crate) use macros::define_port_error;

mod contact_repository;
mod contacts_command;
mod contacts_query;
mod example_seed_repository;
mod login_service;
mod password_hasher;
mod principal_query;
mod registration_service;
mod user_profile_query;
mod user_repository;

#[cfg(test)]
pub use contact_repository::MockContactRepository;
pub use contact_repository::{
    ContactListScope, ContactPageKey, ContactPersistenceError, ContactRepository, NewContactRecord,
};
pub use contacts_command::{ContactsCommand, FixtureContactsCommand};
pub use contacts_query::{ContactPage, ContactPageRequest, ContactsQuery, FixtureContactsQuery};
#[cfg(test)]
pub use example_seed_repository::MockExampleSeedRepository;
pub use example_seed_repository::{
    ContactSeedRecord, ContactSeedRequest, ExampleSeedRepository, ExampleSeedRepositoryError,
    SeedingResult,
};
pub use login_service::{FixtureLoginService, LoginService};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{FixturePasswordHasher, PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use principal_query::MockPrincipalQuery;
pub use principal_query::{FixturePrincipalQuery, PrincipalQuery};
pub use registration_service::{FixtureRegistrationService, RegistrationService};
pub use user_profile_query::{FixtureUserProfileQuery, UserProfileQuery};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{NewUserRecord, StoredCredentials, UserPersistenceError, UserRepository};
