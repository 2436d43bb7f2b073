//! Driving port for contact read use-cases.
//!
//! Inbound adapters call this port to fetch or page through contacts on
//! behalf of an authenticated user. Visibility rules (approved rows are
//! public to signed-in users, unapproved rows only to their owner or a
//! moderator) are enforced behind the port, so HTTP handlers never need to
//! reason about roles.

use async_trait::async_trait;
use chrono::Utc;

use super::contact_repository::ContactPageKey;
use crate::domain::{Contact, ContactDetails, ContactId, ContactStatus, Error, UserId};

/// One requested slice of the contact listing.
#[derive(Debug, Clone, Default)]
pub struct ContactPageRequest {
    /// Resume strictly after this key; `None` starts from the beginning.
    pub after: Option<ContactPageKey>,
    /// Maximum number of contacts to return.
    pub limit: usize,
}

/// One returned slice of the contact listing.
#[derive(Debug, Clone)]
pub struct ContactPage {
    /// Contacts in `(created_at, id)` ascending order.
    pub contacts: Vec<Contact>,
    /// Continuation key when more rows exist, `None` on the last page.
    pub next: Option<ContactPageKey>,
}

/// Domain use-case port for reading contacts.
#[async_trait]
pub trait ContactsQuery: Send + Sync {
    /// Fetch a single contact the user is allowed to see.
    ///
    /// Unknown identifiers surface as not-found; rows the user may not see
    /// surface as forbidden, so the two cases stay distinguishable.
    async fn fetch_contact(&self, user_id: &UserId, contact_id: &ContactId)
    -> Result<Contact, Error>;

    /// List the contacts visible to the user, one page at a time.
    async fn list_contacts(
        &self,
        user_id: &UserId,
        page: ContactPageRequest,
    ) -> Result<ContactPage, Error>;
}

/// In-memory reader used by handler tests and local bring-up.
///
/// Serves a single approved contact owned by whichever user asks.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureContactsQuery;

impl FixtureContactsQuery {
    /// Identifier of the one contact the fixture serves.
    pub const CONTACT_ID: &'static str = "9b2f1d34-0c4e-4a7b-9c3d-2f6a8e5b7c10";

    fn contact(owner_id: &UserId) -> Result<Contact, Error> {
        let id = ContactId::new(Self::CONTACT_ID)
            .map_err(|err| Error::internal(format!("invalid fixture contact id: {err}")))?;
        let details = ContactDetails::try_new(
            "Jon Orton",
            "3456 Maple St",
            "Redmond",
            "WA",
            "10999",
            "jon@example.com",
        )
        .map_err(|err| Error::internal(format!("invalid fixture contact: {err}")))?;
        let now = Utc::now();
        Ok(Contact::new(
            id,
            owner_id.clone(),
            details,
            ContactStatus::Approved,
            now,
            now,
        ))
    }
}

#[async_trait]
impl ContactsQuery for FixtureContactsQuery {
    async fn fetch_contact(
        &self,
        user_id: &UserId,
        contact_id: &ContactId,
    ) -> Result<Contact, Error> {
        if contact_id.as_ref() == Self::CONTACT_ID {
            Self::contact(user_id)
        } else {
            Err(Error::not_found("contact not found"))
        }
    }

    async fn list_contacts(
        &self,
        user_id: &UserId,
        _page: ContactPageRequest,
    ) -> Result<ContactPage, Error> {
        Ok(ContactPage {
            contacts: vec![Self::contact(user_id)?],
            next: None,
        })
    }
}
