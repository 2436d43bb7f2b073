//! Driving port for contact mutation use-cases.
//!
//! Inbound adapters call this port to create, edit, moderate, or delete
//! contacts on behalf of an authenticated user. Authorisation happens behind
//! the port: handlers pass the session's user id and receive forbidden
//! errors when no policy grants the operation.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{Contact, ContactDetails, ContactId, ContactStatus, Error, UserId};

/// Domain use-case port for mutating contacts.
#[async_trait]
pub trait ContactsCommand: Send + Sync {
    /// Create a contact owned by the requesting user.
    ///
    /// New contacts always enter the workflow as submitted, whatever the
    /// caller's roles.
    async fn create(&self, user_id: &UserId, details: ContactDetails) -> Result<Contact, Error>;

    /// Replace the display fields of an existing contact.
    ///
    /// Editing an approved contact withdraws the approval unless the editor
    /// could have approved it themselves.
    async fn update(
        &self,
        user_id: &UserId,
        contact_id: &ContactId,
        details: ContactDetails,
    ) -> Result<Contact, Error>;

    /// Delete a contact.
    async fn delete(&self, user_id: &UserId, contact_id: &ContactId) -> Result<(), Error>;

    /// Mark a submitted or rejected contact as approved.
    async fn approve(&self, user_id: &UserId, contact_id: &ContactId) -> Result<Contact, Error>;

    /// Mark a submitted or approved contact as rejected.
    async fn reject(&self, user_id: &UserId, contact_id: &ContactId) -> Result<Contact, Error>;
}

/// In-memory mutator used by handler tests and local bring-up.
///
/// Echoes requests back as stored contacts without retaining anything, so
/// consecutive calls never interfere with each other.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureContactsCommand;

#[async_trait]
impl ContactsCommand for FixtureContactsCommand {
    async fn create(&self, user_id: &UserId, details: ContactDetails) -> Result<Contact, Error> {
        let now = Utc::now();
        Ok(Contact::new(
            ContactId::random(),
            user_id.clone(),
            details,
            ContactStatus::Submitted,
            now,
            now,
        ))
    }

    async fn update(
        &self,
        user_id: &UserId,
        contact_id: &ContactId,
        details: ContactDetails,
    ) -> Result<Contact, Error> {
        let now = Utc::now();
        Ok(Contact::new(
            contact_id.clone(),
            user_id.clone(),
            details,
            ContactStatus::Submitted,
            now,
            now,
        ))
    }

    async fn delete(&self, _user_id: &UserId, _contact_id: &ContactId) -> Result<(), Error> {
        Ok(())
    }

    async fn approve(&self, user_id: &UserId, contact_id: &ContactId) -> Result<Contact, Error> {
        self.moderated(user_id, contact_id, ContactStatus::Approved)
    }

    async fn reject(&self, user_id: &UserId, contact_id: &ContactId) -> Result<Contact, Error> {
        self.moderated(user_id, contact_id, ContactStatus::Rejected)
    }
}

impl FixtureContactsCommand {
    fn moderated(
        &self,
        user_id: &UserId,
        contact_id: &ContactId,
        status: ContactStatus,
    ) -> Result<Contact, Error> {
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
            contact_id.clone(),
            user_id.clone(),
            details,
            status,
            now,
            now,
        ))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    fn details() -> ContactDetails {
        ContactDetails::try_new(
            "Debra Garcia",
            "1234 Main St",
            "Redmond",
            "WA",
            "10999",
            "debra@example.com",
        )
        .expect("valid details")
    }

    #[rstest::rstest]
    #[tokio::test]
    async fn fixture_creates_submitted_contacts_owned_by_the_caller() {
        let user_id = UserId::random();

        let contact = FixtureContactsCommand
            .create(&user_id, details())
            .await
            .expect("fixture create");

        assert_eq!(contact.owner_id(), &user_id);
        assert_eq!(contact.status(), ContactStatus::Submitted);
    }

    #[rstest::rstest]
    #[case(ContactStatus::Approved)]
    #[case(ContactStatus::Rejected)]
    #[tokio::test]
    async fn fixture_moderation_echoes_the_requested_status(#[case] expected: ContactStatus) {
        let contact_id = ContactId::random();
        let moderator_id = UserId::random();

        let contact = match expected {
            ContactStatus::Approved => FixtureContactsCommand.approve(&moderator_id, &contact_id),
            _ => FixtureContactsCommand.reject(&moderator_id, &contact_id),
        }
        .await
        .expect("fixture moderation");

        assert_eq!(contact.id(), &contact_id);
        assert_eq!(contact.status(), expected);
    }
}
