//! Port abstraction for contact persistence adapters and their errors.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::contact::{Contact, ContactDetails, ContactId, ContactStatus};
use crate::domain::user::UserId;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by contact repository adapters.
    pub enum ContactPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "contact repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "contact repository query failed: {message}",
        /// Target contact does not exist.
        NotFound => "contact not found",
    }
}

/// New contact record awaiting insertion.
///
/// Timestamps are assigned by the store so ordering reflects one clock.
#[derive(Debug, Clone)]
pub struct NewContactRecord {
    pub id: ContactId,
    pub owner_id: UserId,
    pub details: ContactDetails,
    pub status: ContactStatus,
}

/// Which rows a listing may return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactListScope {
    /// Every contact; for principals holding a moderation role.
    All,
    /// Approved contacts plus those owned by the given user.
    ApprovedOrOwned(UserId),
}

/// Keyset continuation point over `(created_at, id)` ascending.
///
/// Both columns together form a total order, so pages stay stable while
/// rows are inserted or deleted between requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactPageKey {
    pub created_at: DateTime<Utc>,
    pub id: ContactId,
}

impl ContactPageKey {
    /// The continuation point immediately after `contact`.
    pub fn after(contact: &Contact) -> Self {
        Self {
            created_at: contact.created_at(),
            id: contact.id().clone(),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Insert a new contact and return the stored row.
    async fn insert(&self, record: &NewContactRecord) -> Result<Contact, ContactPersistenceError>;

    /// Fetch a contact by identifier.
    async fn find_by_id(&self, id: &ContactId)
    -> Result<Option<Contact>, ContactPersistenceError>;

    /// List contacts in `(created_at, id)` ascending order.
    ///
    /// Returns at most `limit` rows strictly after `after`, or from the
    /// start when `after` is `None`.
    async fn list(
        &self,
        scope: &ContactListScope,
        after: Option<ContactPageKey>,
        limit: i64,
    ) -> Result<Vec<Contact>, ContactPersistenceError>;

    /// Replace display fields and status, bumping `updated_at`.
    async fn update(
        &self,
        id: &ContactId,
        details: &ContactDetails,
        status: ContactStatus,
    ) -> Result<Contact, ContactPersistenceError>;

    /// Set only the workflow status, bumping `updated_at`.
    async fn set_status(
        &self,
        id: &ContactId,
        status: ContactStatus,
    ) -> Result<Contact, ContactPersistenceError>;

    /// Delete a contact.
    async fn delete(&self, id: &ContactId) -> Result<(), ContactPersistenceError>;
}
