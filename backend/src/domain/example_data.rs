//! Example data seeding orchestration.
//!
//! Converts deterministic example-data registry outputs into domain contact
//! records, then delegates persistence to the seeding repository port.

use std::sync::Arc;

use example_data::{
    ContactStatusSeed, ExampleContactSeed, GenerationError, RegistryError, SeedDefinition,
    SeedRegistry, generate_example_contacts,
};
use thiserror::Error;

use crate::domain::ports::{
    ContactSeedRecord, ContactSeedRequest, ExampleSeedRepository, ExampleSeedRepositoryError,
    SeedingResult,
};
use crate::domain::{ContactDetails, ContactId, ContactStatus, ContactValidationError, UserId};

/// Result of attempting to apply example data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleSeedOutcome {
    /// Seed key used to record the run.
    pub seed_key: String,
    /// Number of contacts generated and persisted.
    pub contact_count: usize,
    /// Persistence outcome for the seed run.
    pub result: SeedingResult,
}

/// Errors raised while preparing or applying example data.
#[derive(Debug, Error)]
pub enum ExampleSeedingError {
    /// Seed registry lookups failed.
    #[error("seed registry error: {0}")]
    Registry(#[from] RegistryError),
    /// Contact generation failed.
    #[error("example data generation failed: {0}")]
    Generation(#[from] GenerationError),
    /// A generated contact failed backend validation.
    #[error("generated contact failed validation: {0}")]
    ContactInvalid(#[from] ContactValidationError),
    /// Seed value cannot be represented in the database.
    #[error("seed value {seed} exceeds maximum representable value")]
    SeedOverflow { seed: u64 },
    /// Contact count cannot be represented in the database.
    #[error("contact count {count} exceeds maximum representable value")]
    ContactCountOverflow { count: usize },
    /// Persistence adapter failed while seeding.
    #[error("example data persistence error: {0}")]
    Persistence(#[from] ExampleSeedRepositoryError),
}

/// Service that orchestrates example contact seeding.
#[derive(Clone)]
pub struct ExampleContactSeeder<R> {
    repository: Arc<R>,
}

impl<R> ExampleContactSeeder<R> {
    /// Create a new seeder with the given persistence adapter.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> ExampleContactSeeder<R>
where
    R: ExampleSeedRepository,
{
    /// Apply example contacts for a named seed within the registry.
    ///
    /// All generated contacts are owned by `owner_id`, the designated
    /// example-data account.
    ///
    /// # Errors
    ///
    /// Returns [`ExampleSeedingError`] if registry lookup, generation,
    /// validation, or persistence fails.
    pub async fn seed_from_registry(
        &self,
        registry: &SeedRegistry,
        seed_name: &str,
        owner_id: &UserId,
        contact_count_override: Option<usize>,
    ) -> Result<ExampleSeedOutcome, ExampleSeedingError> {
        let seed_def = registry.find_seed(seed_name)?;
        let seed_key = seed_def.name().to_owned();
        let seed_value = seed_def.seed();
        let contact_count = contact_count_override.unwrap_or(seed_def.contact_count());
        let contact_count_i32 = i32::try_from(contact_count).map_err(|_| {
            ExampleSeedingError::ContactCountOverflow {
                count: contact_count,
            }
        })?;

        let seed_value_i64 = i64::try_from(seed_value)
            .map_err(|_| ExampleSeedingError::SeedOverflow { seed: seed_value })?;

        let seed_def = SeedDefinition::new(seed_key.clone(), seed_value, contact_count);
        let example_contacts = generate_example_contacts(&seed_def)?;
        let mut contacts = Vec::with_capacity(example_contacts.len());
        for seed_contact in example_contacts {
            contacts.push(convert_seed_contact(seed_contact, owner_id)?);
        }

        let request = ContactSeedRequest {
            seed_key: seed_key.clone(),
            contact_count: contact_count_i32,
            seed: seed_value_i64,
            contacts,
        };
        let result = self.repository.seed_contacts(request).await?;

        Ok(ExampleSeedOutcome {
            seed_key,
            contact_count,
            result,
        })
    }
}

fn convert_seed_contact(
    seed_contact: ExampleContactSeed,
    owner_id: &UserId,
) -> Result<ContactSeedRecord, ContactValidationError> {
    let details = ContactDetails::try_new(
        seed_contact.name,
        seed_contact.address,
        seed_contact.city,
        seed_contact.state,
        seed_contact.zip,
        seed_contact.email,
    )?;

    Ok(ContactSeedRecord {
        id: ContactId::from_uuid(seed_contact.id),
        owner_id: owner_id.clone(),
        details,
        status: map_status(seed_contact.status),
    })
}

fn map_status(status: ContactStatusSeed) -> ContactStatus {
    match status {
        ContactStatusSeed::Submitted => ContactStatus::Submitted,
        ContactStatusSeed::Approved => ContactStatus::Approved,
        ContactStatusSeed::Rejected => ContactStatus::Rejected,
    }
}
