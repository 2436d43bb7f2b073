//! PostgreSQL-backed example data seeding adapter.
//!
//! Implements the `ExampleSeedRepository` port, applying a seed within a
//! single transaction. The seed run record and the generated contacts land
//! together or not at all, and a rerun of a recorded seed changes nothing.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{
    ContactSeedRecord, ContactSeedRequest, ExampleSeedRepository, ExampleSeedRepositoryError,
    SeedingResult,
};

use super::diesel_helpers::{DieselFailure, classify_diesel_error, map_pool_error_message};
use super::models::{NewContactRow, NewSeedRunRow};
use super::pool::{DbPool, PoolError};
use super::schema::{contacts, seed_runs};

/// Diesel-backed implementation of the example seeding repository.
#[derive(Clone)]
pub struct DieselExampleSeedRepository {
    pool: DbPool,
}

impl DieselExampleSeedRepository {
    /// Create a new seeding repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ExampleSeedRepositoryError {
    ExampleSeedRepositoryError::connection(map_pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> ExampleSeedRepositoryError {
    match classify_diesel_error(error, "seed contacts") {
        DieselFailure::Connection(message) => ExampleSeedRepositoryError::connection(message),
        DieselFailure::NotFound => ExampleSeedRepositoryError::query("record not found"),
        DieselFailure::UniqueViolation { message, .. } | DieselFailure::Query(message) => {
            ExampleSeedRepositoryError::query(message)
        }
    }
}

fn contact_rows(records: &[ContactSeedRecord]) -> Vec<NewContactRow<'_>> {
    records
        .iter()
        .map(|record| NewContactRow {
            id: *record.id.as_uuid(),
            owner_id: *record.owner_id.as_uuid(),
            name: record.details.name(),
            address: record.details.address(),
            city: record.details.city(),
            state: record.details.state(),
            zip: record.details.zip(),
            email: record.details.email(),
            status: record.status.as_str(),
        })
        .collect()
}

#[async_trait]
impl ExampleSeedRepository for DieselExampleSeedRepository {
    async fn seed_contacts(
        &self,
        request: ContactSeedRequest,
    ) -> Result<SeedingResult, ExampleSeedRepositoryError> {
        let ContactSeedRequest {
            seed_key,
            contact_count,
            seed,
            contacts: records,
        } = request;
        let rows = contact_rows(&records);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let result = conn
            .transaction(|conn| {
                async move {
                    let new_run = NewSeedRunRow {
                        seed_key: seed_key.as_str(),
                        contact_count,
                        seed,
                    };

                    let rows_affected = diesel::insert_into(seed_runs::table)
                        .values(&new_run)
                        .on_conflict(seed_runs::seed_key)
                        .do_nothing()
                        .execute(conn)
                        .await?;

                    if rows_affected == 0 {
                        return Ok(SeedingResult::AlreadySeeded);
                    }

                    if rows.is_empty() {
                        return Ok(SeedingResult::Applied);
                    }

                    // Re-seeding under a fresh key refreshes display fields
                    // but never reassigns ownership.
                    diesel::insert_into(contacts::table)
                        .values(&rows)
                        .on_conflict(contacts::id)
                        .do_update()
                        .set((
                            contacts::name.eq(excluded(contacts::name)),
                            contacts::address.eq(excluded(contacts::address)),
                            contacts::city.eq(excluded(contacts::city)),
                            contacts::state.eq(excluded(contacts::state)),
                            contacts::zip.eq(excluded(contacts::zip)),
                            contacts::email.eq(excluded(contacts::email)),
                            contacts::status.eq(excluded(contacts::status)),
                        ))
                        .execute(conn)
                        .await?;

                    Ok(SeedingResult::Applied)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(result)
    }
}
