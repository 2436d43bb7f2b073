//! Port abstraction for applying example contact seeds.
//!
//! This port encapsulates the transactional persistence needed to seed
//! example contacts while recording the seed run. Adapters must apply the
//! run record and the contact inserts atomically so a failed seed leaves no
//! partial data behind.

use async_trait::async_trait;

use crate::domain::contact::{ContactDetails, ContactId, ContactStatus};
use crate::domain::user::UserId;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by example seed repository adapters.
    pub enum ExampleSeedRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "example seeding connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "example seeding query failed: {message}",
    }
}

/// Result of attempting to apply a seed.
///
/// Distinguishes a newly applied seed from one already recorded, so callers
/// can skip quietly instead of treating a re-run as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedingResult {
    /// Seed was newly recorded and its contacts inserted.
    Applied,
    /// Seed key was already recorded; nothing changed.
    AlreadySeeded,
}

/// A single generated contact to insert during seeding.
#[derive(Debug, Clone)]
pub struct ContactSeedRecord {
    pub id: ContactId,
    pub owner_id: UserId,
    pub details: ContactDetails,
    pub status: ContactStatus,
}

/// Request payload for applying a seed run.
pub struct ContactSeedRequest {
    /// Seed name recorded in the seed runs table.
    pub seed_key: String,
    /// Number of contacts generated for the seed.
    pub contact_count: i32,
    /// RNG seed value used for deterministic generation.
    pub seed: i64,
    /// Generated contacts to persist.
    pub contacts: Vec<ContactSeedRecord>,
}

/// Port for applying example contact seeds in a single transaction.
///
/// Implementations must:
/// - Insert a seed run record guarded by `ON CONFLICT DO NOTHING`.
/// - Upsert the generated contact rows.
/// - Roll back all changes if any step fails.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExampleSeedRepository: Send + Sync {
    /// Apply a seed run and persist the generated contacts.
    ///
    /// Returns `Applied` when the run is recorded and contacts are inserted,
    /// or `AlreadySeeded` when the seed key already exists.
    async fn seed_contacts(
        &self,
        request: ContactSeedRequest,
    ) -> Result<SeedingResult, ExampleSeedRepositoryError>;
}
