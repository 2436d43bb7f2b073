//! Domain types, services, and ports.
//!
//! Purpose: define the strongly typed model for users, contacts, and the
//! authorisation policy, together with the services that implement the
//! driving ports over it. Everything here is framework-free: no HTTP, no
//! SQL, and no I/O beyond the port traits in [`ports`].
//!
//! Serialisation contracts (serde) are documented on each type; inbound and
//! outbound adapters convert at the boundary rather than leaking their own
//! representations into the domain.

pub mod auth;
pub mod authorization;
pub mod contact;
pub mod contacts_service;
pub mod error;
#[cfg(feature = "example-data")]
pub mod example_data;
pub mod identity_service;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::auth::{
    LoginCredentials, LoginValidationError, PASSWORD_MAX, PASSWORD_MIN, RegisterDetails,
    RegistrationValidationError,
};
pub use self::authorization::{
    AdministratorHandler, AuthorizationHandler, Decision, ManagerHandler, Operation,
    OwnershipHandler, PolicyEvaluator, Principal,
};
pub use self::contact::{
    CONTACT_ADDRESS_MAX, CONTACT_CITY_MAX, CONTACT_EMAIL_MAX, CONTACT_NAME_MAX, CONTACT_STATE_MAX,
    CONTACT_ZIP_MAX, Contact, ContactDetails, ContactId, ContactStatus, ContactValidationError,
};
pub use self::contacts_service::ContactService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
#[cfg(feature = "example-data")]
pub use self::example_data::{ExampleContactSeeder, ExampleSeedOutcome, ExampleSeedingError};
pub use self::identity_service::IdentityService;
pub use self::trace_id::TraceId;
pub use self::user::{
    DISPLAY_NAME_MAX, DISPLAY_NAME_MIN, DisplayName, Role, USERNAME_MAX, USERNAME_MIN, User,
    UserId, UserValidationError, Username,
};
