//! Contact data model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::user::UserId;

/// Validation errors returned by the contact constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactValidationError {
    EmptyId,
    InvalidId,
    InvalidOwner,
    EmptyName,
    NameTooLong { max: usize },
    EmptyAddress,
    AddressTooLong { max: usize },
    EmptyCity,
    CityTooLong { max: usize },
    EmptyState,
    StateTooLong { max: usize },
    EmptyZip,
    ZipTooLong { max: usize },
    EmptyEmail,
    EmailTooLong { max: usize },
    InvalidEmail,
    UnknownStatus { status: String },
}

impl fmt::Display for ContactValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "contact id must not be empty"),
            Self::InvalidId => write!(f, "contact id must be a valid UUID"),
            Self::InvalidOwner => write!(f, "contact owner must be a valid user id"),
            Self::EmptyName => write!(f, "contact name must not be empty"),
            Self::NameTooLong { max } => {
                write!(f, "contact name must be at most {max} characters")
            }
            Self::EmptyAddress => write!(f, "address must not be empty"),
            Self::AddressTooLong { max } => {
                write!(f, "address must be at most {max} characters")
            }
            Self::EmptyCity => write!(f, "city must not be empty"),
            Self::CityTooLong { max } => write!(f, "city must be at most {max} characters"),
            Self::EmptyState => write!(f, "state must not be empty"),
            Self::StateTooLong { max } => write!(f, "state must be at most {max} characters"),
            Self::EmptyZip => write!(f, "zip must not be empty"),
            Self::ZipTooLong { max } => write!(f, "zip must be at most {max} characters"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmailTooLong { max } => write!(f, "email must be at most {max} characters"),
            Self::InvalidEmail => write!(f, "email must contain a local part and a dotted domain"),
            Self::UnknownStatus { status } => write!(f, "unknown contact status: {status}"),
        }
    }
}

impl std::error::Error for ContactValidationError {}

/// Stable contact identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContactId(Uuid, String);

impl ContactId {
    /// Validate and construct a [`ContactId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, ContactValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`ContactId`].
    pub fn random() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Construct a [`ContactId`] from an already-parsed UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, ContactValidationError> {
        if id.is_empty() {
            return Err(ContactValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(ContactValidationError::InvalidId);
        }

        let parsed = Uuid::parse_str(&id).map_err(|_| ContactValidationError::InvalidId)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for ContactId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<ContactId> for String {
    fn from(value: ContactId) -> Self {
        let ContactId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for ContactId {
    type Error = ContactValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Workflow state of a contact record.
///
/// New contacts start submitted; moderators move them to approved or
/// rejected, and edits by non-moderators push them back to submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    Submitted,
    Approved,
    Rejected,
}

impl ContactStatus {
    /// Canonical lowercase name for the status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContactStatus {
    type Err = ContactValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "submitted" => Ok(Self::Submitted),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(ContactValidationError::UnknownStatus {
                status: other.to_owned(),
            }),
        }
    }
}

/// Maximum allowed length for a contact name.
pub const CONTACT_NAME_MAX: usize = 100;
/// Maximum allowed length for a postal address line.
pub const CONTACT_ADDRESS_MAX: usize = 200;
/// Maximum allowed length for a city name.
pub const CONTACT_CITY_MAX: usize = 100;
/// Maximum allowed length for a state or region name.
pub const CONTACT_STATE_MAX: usize = 100;
/// Maximum allowed length for a postal code.
pub const CONTACT_ZIP_MAX: usize = 32;
/// Maximum allowed length for an email address.
pub const CONTACT_EMAIL_MAX: usize = 254;

fn require_field(
    value: &str,
    max: usize,
    empty: ContactValidationError,
    too_long: ContactValidationError,
) -> Result<(), ContactValidationError> {
    if value.trim().is_empty() {
        return Err(empty);
    }
    if value.chars().count() > max {
        return Err(too_long);
    }
    Ok(())
}

// Deliberately shallow; the example-data crate applies the same rule when
// generating seed contacts, so the two must stay in step.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        _ => false,
    }
}

/// Validated display fields for a contact card.
///
/// Create and update payloads deserialise straight into this type, so a
/// successfully parsed request body is already valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ContactDetailsDto", into = "ContactDetailsDto")]
pub struct ContactDetails {
    name: String,
    address: String,
    city: String,
    state: String,
    zip: String,
    email: String,
}

impl ContactDetails {
    /// Validate and construct contact display fields.
    pub fn try_new(
        name: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zip: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, ContactValidationError> {
        let name = name.into();
        let address = address.into();
        let city = city.into();
        let state = state.into();
        let zip = zip.into();
        let email = email.into();

        require_field(
            &name,
            CONTACT_NAME_MAX,
            ContactValidationError::EmptyName,
            ContactValidationError::NameTooLong {
                max: CONTACT_NAME_MAX,
            },
        )?;
        require_field(
            &address,
            CONTACT_ADDRESS_MAX,
            ContactValidationError::EmptyAddress,
            ContactValidationError::AddressTooLong {
                max: CONTACT_ADDRESS_MAX,
            },
        )?;
        require_field(
            &city,
            CONTACT_CITY_MAX,
            ContactValidationError::EmptyCity,
            ContactValidationError::CityTooLong {
                max: CONTACT_CITY_MAX,
            },
        )?;
        require_field(
            &state,
            CONTACT_STATE_MAX,
            ContactValidationError::EmptyState,
            ContactValidationError::StateTooLong {
                max: CONTACT_STATE_MAX,
            },
        )?;
        require_field(
            &zip,
            CONTACT_ZIP_MAX,
            ContactValidationError::EmptyZip,
            ContactValidationError::ZipTooLong {
                max: CONTACT_ZIP_MAX,
            },
        )?;
        require_field(
            &email,
            CONTACT_EMAIL_MAX,
            ContactValidationError::EmptyEmail,
            ContactValidationError::EmailTooLong {
                max: CONTACT_EMAIL_MAX,
            },
        )?;
        if !is_valid_email(&email) {
            return Err(ContactValidationError::InvalidEmail);
        }

        Ok(Self {
            name,
            address,
            city,
            state,
            zip,
            email,
        })
    }

    /// Contact name shown on the card.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Street address line.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// City name.
    pub fn city(&self) -> &str {
        &self.city
    }

    /// State or region name.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Postal code.
    pub fn zip(&self) -> &str {
        &self.zip
    }

    /// Email address.
    pub fn email(&self) -> &str {
        &self.email
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
struct ContactDetailsDto {
    name: String,
    address: String,
    city: String,
    state: String,
    zip: String,
    email: String,
}

impl From<ContactDetails> for ContactDetailsDto {
    fn from(value: ContactDetails) -> Self {
        let ContactDetails {
            name,
            address,
            city,
            state,
            zip,
            email,
        } = value;
        Self {
            name,
            address,
            city,
            state,
            zip,
            email,
        }
    }
}

impl TryFrom<ContactDetailsDto> for ContactDetails {
    type Error = ContactValidationError;

    fn try_from(value: ContactDetailsDto) -> Result<Self, Self::Error> {
        ContactDetails::try_new(
            value.name,
            value.address,
            value.city,
            value.state,
            value.zip,
            value.email,
        )
    }
}

/// Contact record owned by a user.
///
/// ## Invariants
/// - `owner_id` is set at creation and never changes afterwards.
/// - New contacts start in [`ContactStatus::Submitted`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ContactDto", into = "ContactDto")]
pub struct Contact {
    id: ContactId,
    owner_id: UserId,
    details: ContactDetails,
    status: ContactStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Contact {
    /// Build a [`Contact`] from validated components.
    pub fn new(
        id: ContactId,
        owner_id: UserId,
        details: ContactDetails,
        status: ContactStatus,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner_id,
            details,
            status,
            created_at,
            updated_at,
        }
    }

    /// Stable contact identifier.
    pub fn id(&self) -> &ContactId {
        &self.id
    }

    /// User who owns the contact.
    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    /// Display fields.
    pub fn details(&self) -> &ContactDetails {
        &self.details
    }

    /// Workflow status.
    pub fn status(&self) -> ContactStatus {
        self.status
    }

    /// When the contact was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the contact was last modified.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replace the display fields, leaving identity and timestamps untouched.
    #[must_use]
    pub fn with_details(mut self, details: ContactDetails) -> Self {
        self.details = details;
        self
    }

    /// Replace the workflow status.
    #[must_use]
    pub fn with_status(mut self, status: ContactStatus) -> Self {
        self.status = status;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
struct ContactDto {
    id: String,
    owner_id: String,
    name: String,
    address: String,
    city: String,
    state: String,
    zip: String,
    email: String,
    status: ContactStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<Contact> for ContactDto {
    fn from(value: Contact) -> Self {
        let Contact {
            id,
            owner_id,
            details,
            status,
            created_at,
            updated_at,
        } = value;
        let ContactDetails {
            name,
            address,
            city,
            state,
            zip,
            email,
        } = details;
        Self {
            id: id.to_string(),
            owner_id: owner_id.to_string(),
            name,
            address,
            city,
            state,
            zip,
            email,
            status,
            created_at,
            updated_at,
        }
    }
}

impl TryFrom<ContactDto> for Contact {
    type Error = ContactValidationError;

    fn try_from(value: ContactDto) -> Result<Self, Self::Error> {
        let id = ContactId::new(value.id)?;
        let owner_id =
            UserId::new(value.owner_id).map_err(|_| ContactValidationError::InvalidOwner)?;
        let details = ContactDetails::try_new(
            value.name,
            value.address,
            value.city,
            value.state,
            value.zip,
            value.email,
        )?;

        Ok(Self::new(
            id,
            owner_id,
            details,
            value.status,
            value.created_at,
            value.updated_at,
        ))
    }
}
