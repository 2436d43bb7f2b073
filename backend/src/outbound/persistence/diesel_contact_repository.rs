//! PostgreSQL-backed contact repository adapter.
//!
//! Implements the `ContactRepository` port with keyset listing over
//! `(created_at, id)`. The adapter only translates between rows and domain
//! types; visibility and workflow rules stay in the domain services.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{
    ContactListScope, ContactPageKey, ContactPersistenceError, ContactRepository, NewContactRecord,
};
use crate::domain::{Contact, ContactDetails, ContactId, ContactStatus, UserId};

use super::diesel_helpers::{DieselFailure, classify_diesel_error, map_pool_error_message};
use super::models::{ContactRow, NewContactRow};
use super::pool::{DbPool, PoolError};
use super::schema::contacts;

/// Diesel-backed implementation of the contact repository.
#[derive(Clone)]
pub struct DieselContactRepository {
    pool: DbPool,
}

impl DieselContactRepository {
    /// Create a new contact repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ContactPersistenceError {
    ContactPersistenceError::connection(map_pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error, operation: &str) -> ContactPersistenceError {
    match classify_diesel_error(error, operation) {
        DieselFailure::NotFound => ContactPersistenceError::NotFound,
        DieselFailure::Connection(message) => ContactPersistenceError::connection(message),
        DieselFailure::UniqueViolation { message, .. } | DieselFailure::Query(message) => {
            ContactPersistenceError::query(message)
        }
    }
}

fn new_contact_row(record: &NewContactRecord) -> NewContactRow<'_> {
    NewContactRow {
        id: *record.id.as_uuid(),
        owner_id: *record.owner_id.as_uuid(),
        name: record.details.name(),
        address: record.details.address(),
        city: record.details.city(),
        state: record.details.state(),
        zip: record.details.zip(),
        email: record.details.email(),
        status: record.status.as_str(),
    }
}

/// Rebuild a domain contact from its stored row.
///
/// Stored rows passed domain validation on the way in, so a failure here
/// means the table was modified outside the application.
fn contact_from_row(row: ContactRow) -> Result<Contact, ContactPersistenceError> {
    let details =
        ContactDetails::try_new(row.name, row.address, row.city, row.state, row.zip, row.email)
            .map_err(|err| {
                ContactPersistenceError::query(format!("stored contact is invalid: {err}"))
            })?;
    let status = row.status.parse::<ContactStatus>().map_err(|err| {
        ContactPersistenceError::query(format!("stored contact is invalid: {err}"))
    })?;

    Ok(Contact::new(
        ContactId::from_uuid(row.id),
        UserId::from_uuid(row.owner_id),
        details,
        status,
        row.created_at,
        row.updated_at,
    ))
}

#[async_trait]
impl ContactRepository for DieselContactRepository {
    async fn insert(&self, record: &NewContactRecord) -> Result<Contact, ContactPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: ContactRow = diesel::insert_into(contacts::table)
            .values(new_contact_row(record))
            .returning(ContactRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "insert contact"))?;

        contact_from_row(row)
    }

    async fn find_by_id(
        &self,
        id: &ContactId,
    ) -> Result<Option<Contact>, ContactPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ContactRow> = contacts::table
            .filter(contacts::id.eq(*id.as_uuid()))
            .select(ContactRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find contact"))?;

        row.map(contact_from_row).transpose()
    }

    async fn list(
        &self,
        scope: &ContactListScope,
        after: Option<ContactPageKey>,
        limit: i64,
    ) -> Result<Vec<Contact>, ContactPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = contacts::table
            .select(ContactRow::as_select())
            .into_boxed();

        match scope {
            ContactListScope::All => {}
            ContactListScope::ApprovedOrOwned(owner) => {
                query = query.filter(
                    contacts::status
                        .eq(ContactStatus::Approved.as_str())
                        .or(contacts::owner_id.eq(*owner.as_uuid())),
                );
            }
        }

        if let Some(key) = after {
            // Strictly after (created_at, id): rows in a later instant, or
            // the same instant with a larger id.
            query = query.filter(
                contacts::created_at.gt(key.created_at).or(contacts::created_at
                    .eq(key.created_at)
                    .and(contacts::id.gt(*key.id.as_uuid()))),
            );
        }

        let rows: Vec<ContactRow> = query
            .order((contacts::created_at.asc(), contacts::id.asc()))
            .limit(limit)
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list contacts"))?;

        rows.into_iter().map(contact_from_row).collect()
    }

    async fn update(
        &self,
        id: &ContactId,
        details: &ContactDetails,
        status: ContactStatus,
    ) -> Result<Contact, ContactPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: ContactRow = diesel::update(contacts::table.filter(contacts::id.eq(*id.as_uuid())))
            .set((
                contacts::name.eq(details.name()),
                contacts::address.eq(details.address()),
                contacts::city.eq(details.city()),
                contacts::state.eq(details.state()),
                contacts::zip.eq(details.zip()),
                contacts::email.eq(details.email()),
                contacts::status.eq(status.as_str()),
                contacts::updated_at.eq(diesel::dsl::now),
            ))
            .returning(ContactRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "update contact"))?;

        contact_from_row(row)
    }

    async fn set_status(
        &self,
        id: &ContactId,
        status: ContactStatus,
    ) -> Result<Contact, ContactPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: ContactRow = diesel::update(contacts::table.filter(contacts::id.eq(*id.as_uuid())))
            .set((
                contacts::status.eq(status.as_str()),
                contacts::updated_at.eq(diesel::dsl::now),
            ))
            .returning(ContactRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "set contact status"))?;

        contact_from_row(row)
    }

    async fn delete(&self, id: &ContactId) -> Result<(), ContactPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::delete(contacts::table.filter(contacts::id.eq(*id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "delete contact"))?;

        if affected == 0 {
            return Err(ContactPersistenceError::NotFound);
        }
        Ok(())
    }
}
