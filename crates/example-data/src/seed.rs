//! Generated contact seed types.
//!
//! This module defines the output types from contact generation. These types
//! are independent of backend domain types to avoid circular dependencies.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Review status for a generated contact.
///
/// Mirrors the backend's `ContactStatus` enum without creating a dependency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatusSeed {
    /// Awaiting moderator review.
    #[default]
    Submitted,
    /// Approved for general visibility.
    Approved,
    /// Rejected by a moderator.
    Rejected,
}

/// A generated example contact record.
///
/// This type contains all the fields needed to create a contact in the
/// backend. It is designed to be converted into backend domain types at the
/// point of use.
///
/// # Example
///
/// ```
/// use example_data::{ContactStatusSeed, ExampleContactSeed};
/// use uuid::Uuid;
///
/// let contact = ExampleContactSeed {
///     id: Uuid::new_v4(),
///     name: "Debra Garcia".to_owned(),
///     address: "1234 Main St".to_owned(),
///     city: "Redmond".to_owned(),
///     state: "WA".to_owned(),
///     zip: "10999".to_owned(),
///     email: "debra.garcia@example.com".to_owned(),
///     status: ContactStatusSeed::Submitted,
/// };
///
/// assert_eq!(contact.name, "Debra Garcia");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleContactSeed {
    /// Unique identifier for the contact.
    pub id: Uuid,
    /// Full contact name.
    pub name: String,
    /// Street address line.
    pub address: String,
    /// City name.
    pub city: String,
    /// State or region abbreviation.
    pub state: String,
    /// Postal code.
    pub zip: String,
    /// Email address derived from the contact name.
    pub email: String,
    /// Review status.
    pub status: ContactStatusSeed,
}
