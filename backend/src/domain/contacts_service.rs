//! Contact domain services.
//!
//! This module implements the driving ports for contacts, combining the
//! repository with the authorisation policy so every read and mutation is
//! checked against the caller's ownership and roles before it reaches
//! storage.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{
    ContactListScope, ContactPage, ContactPageKey, ContactPageRequest, ContactPersistenceError,
    ContactRepository, ContactsCommand, ContactsQuery, NewContactRecord, PrincipalQuery,
};
use crate::domain::{
    Contact, ContactDetails, ContactId, ContactStatus, Error, Operation, PolicyEvaluator, UserId,
};

/// Contact service implementing the driving ports.
///
/// The caller's roles are resolved through [`PrincipalQuery`] on every call
/// rather than trusted from the session, so revoking a role takes effect on
/// the next request.
#[derive(Clone)]
pub struct ContactService<R, P> {
    contacts: Arc<R>,
    principals: Arc<P>,
    policy: PolicyEvaluator,
}

impl<R, P> ContactService<R, P> {
    /// Create a new service over the given repository, principal source,
    /// and authorisation policy.
    pub fn new(contacts: Arc<R>, principals: Arc<P>, policy: PolicyEvaluator) -> Self {
        Self {
            contacts,
            principals,
            policy,
        }
    }
}

impl<R, P> ContactService<R, P>
where
    R: ContactRepository,
    P: PrincipalQuery,
{
    fn map_contact_error(error: ContactPersistenceError) -> Error {
        match error {
            ContactPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("contact repository unavailable: {message}"))
            }
            ContactPersistenceError::Query { message } => {
                Error::internal(format!("contact repository error: {message}"))
            }
            ContactPersistenceError::NotFound => Error::not_found("contact not found"),
        }
    }

    async fn load_contact(&self, contact_id: &ContactId) -> Result<Contact, Error> {
        self.contacts
            .find_by_id(contact_id)
            .await
            .map_err(Self::map_contact_error)?
            .ok_or_else(|| Error::not_found("contact not found"))
    }

    /// Authorise `operation` and flip the workflow status.
    ///
    /// Authorisation runs before the state check so callers without the
    /// right role learn nothing about the contact's current status.
    async fn moderate(
        &self,
        user_id: &UserId,
        contact_id: &ContactId,
        operation: Operation,
        status: ContactStatus,
    ) -> Result<Contact, Error> {
        let principal = self.principals.principal_for(user_id).await?;
        let stored = self.load_contact(contact_id).await?;
        self.policy.authorize(&principal, &stored, operation)?;
        if stored.status() == status {
            return Err(Error::conflict(format!("contact is already {status}")));
        }
        self.contacts
            .set_status(contact_id, status)
            .await
            .map_err(Self::map_contact_error)
    }
}

#[async_trait]
impl<R, P> ContactsQuery for ContactService<R, P>
where
    R: ContactRepository,
    P: PrincipalQuery,
{
    async fn fetch_contact(
        &self,
        user_id: &UserId,
        contact_id: &ContactId,
    ) -> Result<Contact, Error> {
        let principal = self.principals.principal_for(user_id).await?;
        let contact = self.load_contact(contact_id).await?;
        if contact.status() == ContactStatus::Approved || principal.is_privileged() {
            return Ok(contact);
        }
        self.policy
            .authorize(&principal, &contact, Operation::Read)?;
        Ok(contact)
    }

    async fn list_contacts(
        &self,
        user_id: &UserId,
        page: ContactPageRequest,
    ) -> Result<ContactPage, Error> {
        let principal = self.principals.principal_for(user_id).await?;
        let scope = if principal.is_privileged() {
            ContactListScope::All
        } else {
            ContactListScope::ApprovedOrOwned(principal.user_id().clone())
        };
        // One spare row tells us whether another page exists.
        let fetch = i64::try_from(page.limit.saturating_add(1)).unwrap_or(i64::MAX);
        let mut contacts = self
            .contacts
            .list(&scope, page.after, fetch)
            .await
            .map_err(Self::map_contact_error)?;
        let next = if contacts.len() > page.limit {
            contacts.truncate(page.limit);
            contacts.last().map(ContactPageKey::after)
        } else {
            None
        };
        Ok(ContactPage { contacts, next })
    }
}

#[async_trait]
impl<R, P> ContactsCommand for ContactService<R, P>
where
    R: ContactRepository,
    P: PrincipalQuery,
{
    async fn create(&self, user_id: &UserId, details: ContactDetails) -> Result<Contact, Error> {
        let principal = self.principals.principal_for(user_id).await?;
        // The store assigns the real timestamps; the candidate only exists
        // so the policy can evaluate ownership before anything persists.
        let now = Utc::now();
        let candidate = Contact::new(
            ContactId::random(),
            principal.user_id().clone(),
            details,
            ContactStatus::Submitted,
            now,
            now,
        );
        self.policy
            .authorize(&principal, &candidate, Operation::Create)?;
        let record = NewContactRecord {
            id: candidate.id().clone(),
            owner_id: candidate.owner_id().clone(),
            details: candidate.details().clone(),
            status: candidate.status(),
        };
        self.contacts
            .insert(&record)
            .await
            .map_err(Self::map_contact_error)
    }

    async fn update(
        &self,
        user_id: &UserId,
        contact_id: &ContactId,
        details: ContactDetails,
    ) -> Result<Contact, Error> {
        let principal = self.principals.principal_for(user_id).await?;
        let stored = self.load_contact(contact_id).await?;
        self.policy
            .authorize(&principal, &stored, Operation::Update)?;
        // Edits withdraw an approval unless the editor could re-approve the
        // contact themselves.
        let status = if stored.status() == ContactStatus::Approved
            && !self
                .policy
                .evaluate(&principal, &stored, Operation::Approve)
                .is_grant()
        {
            ContactStatus::Submitted
        } else {
            stored.status()
        };
        self.contacts
            .update(contact_id, &details, status)
            .await
            .map_err(Self::map_contact_error)
    }

    async fn delete(&self, user_id: &UserId, contact_id: &ContactId) -> Result<(), Error> {
        let principal = self.principals.principal_for(user_id).await?;
        let stored = self.load_contact(contact_id).await?;
        self.policy
            .authorize(&principal, &stored, Operation::Delete)?;
        self.contacts
            .delete(contact_id)
            .await
            .map_err(Self::map_contact_error)
    }

    async fn approve(&self, user_id: &UserId, contact_id: &ContactId) -> Result<Contact, Error> {
        self.moderate(
            user_id,
            contact_id,
            Operation::Approve,
            ContactStatus::Approved,
        )
        .await
    }

    async fn reject(&self, user_id: &UserId, contact_id: &ContactId) -> Result<Contact, Error> {
        self.moderate(
            user_id,
            contact_id,
            Operation::Reject,
            ContactStatus::Rejected,
        )
        .await
    }
}

#[cfg(test)]
#[path = "contacts_service_tests.rs"]
mod tests;
