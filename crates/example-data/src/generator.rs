//! Deterministic contact generation from seed definitions.
//!
//! This module provides the core generation function that produces
//! reproducible contact data from a seed definition. The same seed value
//! always produces identical output.

use fake::Fake;
use fake::faker::address::raw::{BuildingNumber, CityName, StateAbbr, StreetName, StreetSuffix, ZipCode};
use fake::faker::name::raw::{FirstName, LastName};
use fake::locales::EN;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

use crate::error::GenerationError;
use crate::registry::SeedDefinition;
use crate::seed::{ContactStatusSeed, ExampleContactSeed};
use crate::validation::{CONTACT_NAME_MAX, email_local_from_name, is_valid_contact_name};

/// Maximum number of attempts to generate a valid contact name.
const MAX_NAME_ATTEMPTS: usize = 100;

/// Probability of a contact being submitted (60%).
const SUBMITTED_PROBABILITY_NUMERATOR: u32 = 6;

/// Probability denominator for status selection.
const STATUS_PROBABILITY_DENOMINATOR: u32 = 10;

/// Probability of approving a non-submitted contact (75%, i.e. 30% overall).
const APPROVED_REMAINDER_NUMERATOR: u32 = 3;

/// Probability denominator for the approved/rejected split.
const APPROVED_REMAINDER_DENOMINATOR: u32 = 4;

/// Generates example contacts from a seed definition.
///
/// Uses the seed's `seed` value to initialise a deterministic RNG, ensuring
/// identical output for the same seed definition. The generated contacts
/// have:
///
/// - Unique UUIDs (deterministically generated)
/// - Valid names and addresses built from locale fakers
/// - Emails derived from the contact name (`first.last@example.com`)
/// - A status distribution of roughly 60% submitted, 30% approved,
///   10% rejected
///
/// # Errors
///
/// Returns [`GenerationError`] if a valid contact name cannot be produced
/// after the maximum number of retries.
///
/// # Example
///
/// ```
/// use example_data::{SeedRegistry, generate_example_contacts};
///
/// let json = r#"{
///     "version": 1,
///     "seeds": [{"name": "test", "seed": 42, "contactCount": 3}]
/// }"#;
///
/// let registry = SeedRegistry::from_json(json).expect("valid");
/// let seed_def = registry.find_seed("test").expect("found");
/// let contacts = generate_example_contacts(seed_def).expect("generated");
///
/// assert_eq!(contacts.len(), 3);
/// // Same seed produces identical contacts
/// let contacts2 = generate_example_contacts(seed_def).expect("generated");
/// assert_eq!(contacts, contacts2);
/// ```
pub fn generate_example_contacts(
    seed_def: &SeedDefinition,
) -> Result<Vec<ExampleContactSeed>, GenerationError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed_def.seed());
    let mut contacts = Vec::with_capacity(seed_def.contact_count());

    for _ in 0..seed_def.contact_count() {
        let contact = generate_single_contact(&mut rng)?;
        contacts.push(contact);
    }

    Ok(contacts)
}

/// Generates a single contact with the provided RNG.
fn generate_single_contact(rng: &mut ChaCha8Rng) -> Result<ExampleContactSeed, GenerationError> {
    // Generate deterministic UUID from RNG
    let id = Uuid::from_u128(rng.random());

    let (name, email) = generate_name_and_email(rng)?;

    let building: String = BuildingNumber(EN).fake_with_rng(rng);
    let street: String = StreetName(EN).fake_with_rng(rng);
    let suffix: String = StreetSuffix(EN).fake_with_rng(rng);
    let address = format!("{building} {street} {suffix}");

    let city: String = CityName(EN).fake_with_rng(rng);
    let state: String = StateAbbr(EN).fake_with_rng(rng);
    let zip: String = ZipCode(EN).fake_with_rng(rng);

    let status = select_status(rng);

    Ok(ExampleContactSeed {
        id,
        name,
        address,
        city,
        state,
        zip,
        email,
        status,
    })
}

/// Generates a valid contact name and its derived email.
///
/// Retries up to `MAX_NAME_ATTEMPTS` times if the generated name fails
/// validation or yields an empty email local part. Names are constructed as
/// first name followed by last name and truncated if they exceed the maximum
/// length.
fn generate_name_and_email(
    rng: &mut ChaCha8Rng,
) -> Result<(String, String), GenerationError> {
    for _ in 0..MAX_NAME_ATTEMPTS {
        let first: String = FirstName(EN).fake_with_rng(rng);
        let last: String = LastName(EN).fake_with_rng(rng);

        // Combine with space, truncated preserving whole characters
        let candidate: String = format!("{first} {last}")
            .chars()
            .take(CONTACT_NAME_MAX)
            .collect();

        let local = email_local_from_name(&candidate);
        if is_valid_contact_name(&candidate) && !local.is_empty() {
            return Ok((candidate, format!("{local}@example.com")));
        }
    }

    Err(GenerationError::NameGenerationFailed {
        max_attempts: MAX_NAME_ATTEMPTS,
    })
}

/// Selects a status with a ~60/30/10 submitted/approved/rejected split.
fn select_status(rng: &mut ChaCha8Rng) -> ContactStatusSeed {
    if rng.random_ratio(
        SUBMITTED_PROBABILITY_NUMERATOR,
        STATUS_PROBABILITY_DENOMINATOR,
    ) {
        ContactStatusSeed::Submitted
    } else if rng.random_ratio(APPROVED_REMAINDER_NUMERATOR, APPROVED_REMAINDER_DENOMINATOR) {
        ContactStatusSeed::Approved
    } else {
        ContactStatusSeed::Rejected
    }
}
