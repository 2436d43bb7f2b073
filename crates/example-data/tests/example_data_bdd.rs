//! Behavioural tests for the example-data crate.
//!
//! These tests walk the registry parsing and contact generation flows as
//! given/when/then steps covering parsing, determinism, and validation.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::collections::HashSet;

use example_data::{
    ExampleContactSeed, RegistryError, SeedDefinition, SeedRegistry, generate_example_contacts,
    is_valid_contact_name, is_valid_email,
};
use rstest::rstest;
use rstest_bdd_macros::{given, then, when};

/// Base valid registry JSON used by multiple Given steps.
const VALID_REGISTRY_JSON: &str = r#"{
    "version": 1,
    "seeds": [
        {"name": "test-seed", "seed": 42, "contactCount": 5}
    ]
}"#;

#[given("a valid seed registry JSON")]
fn a_valid_seed_registry_json() -> String {
    VALID_REGISTRY_JSON.to_owned()
}

#[given("a seed definition from the registry")]
fn a_seed_definition_from_the_registry() -> SeedDefinition {
    let registry = SeedRegistry::from_json(VALID_REGISTRY_JSON).expect("valid test registry");
    registry
        .find_seed("test-seed")
        .expect("seed exists")
        .clone()
}

#[given("malformed JSON")]
fn malformed_json() -> String {
    "not valid json".to_owned()
}

#[given("registry JSON with empty seeds array")]
fn registry_json_with_empty_seeds_array() -> String {
    r#"{"version": 1, "seeds": []}"#.to_owned()
}

#[when("the registry is parsed")]
fn the_registry_is_parsed(json: &str) -> Result<SeedRegistry, RegistryError> {
    SeedRegistry::from_json(json)
}

#[when("contacts are generated")]
fn contacts_are_generated(seed_def: &SeedDefinition) -> Vec<ExampleContactSeed> {
    generate_example_contacts(seed_def).expect("generation succeeds")
}

#[then("parsing succeeds with the expected seed definitions")]
fn parsing_succeeds_with_the_expected_seed_definitions(
    result: Result<SeedRegistry, RegistryError>,
) {
    let registry = result.expect("parsing should succeed");
    assert_eq!(registry.seeds().len(), 1);
    let seed = registry.find_seed("test-seed").expect("seed should exist");
    assert_eq!(seed.name(), "test-seed");
    assert_eq!(seed.seed(), 42);
    assert_eq!(seed.contact_count(), 5);
}

#[then("both generations produce identical contacts")]
fn both_generations_produce_identical_contacts(
    first: &[ExampleContactSeed],
    second: &[ExampleContactSeed],
) {
    assert_eq!(first, second, "generation should be deterministic");
}

#[then("all contact names satisfy backend constraints")]
fn all_contact_names_satisfy_backend_constraints(contacts: &[ExampleContactSeed]) {
    for contact in contacts {
        assert!(
            is_valid_contact_name(&contact.name),
            "invalid contact name: {}",
            contact.name
        );
    }
}

#[then("all contact emails are well formed")]
fn all_contact_emails_are_well_formed(contacts: &[ExampleContactSeed]) {
    for contact in contacts {
        assert!(
            is_valid_email(&contact.email),
            "invalid contact email: {}",
            contact.email
        );
    }
}

#[then("all contact ids are unique")]
fn all_contact_ids_are_unique(contacts: &[ExampleContactSeed]) {
    let ids: HashSet<_> = contacts.iter().map(|contact| contact.id).collect();
    assert_eq!(ids.len(), contacts.len(), "contact ids should not collide");
}

#[then("parsing fails with a parse error")]
fn parsing_fails_with_a_parse_error(result: Result<SeedRegistry, RegistryError>) {
    match result {
        Err(RegistryError::ParseError { .. }) => {}
        other => panic!("expected ParseError, got: {other:?}"),
    }
}

#[then("parsing fails with empty seeds error")]
fn parsing_fails_with_empty_seeds_error(result: Result<SeedRegistry, RegistryError>) {
    match result {
        Err(RegistryError::EmptySeeds) => {}
        other => panic!("expected EmptySeeds, got: {other:?}"),
    }
}

#[rstest]
fn valid_registry_parses_successfully() {
    let json = a_valid_seed_registry_json();
    let result = the_registry_is_parsed(&json);
    parsing_succeeds_with_the_expected_seed_definitions(result);
}

#[rstest]
fn deterministic_generation_produces_identical_contacts() {
    let seed_def = a_seed_definition_from_the_registry();
    let first = contacts_are_generated(&seed_def);
    let second = contacts_are_generated(&seed_def);
    both_generations_produce_identical_contacts(&first, &second);
}

#[rstest]
fn generated_contact_names_are_valid() {
    let seed_def = a_seed_definition_from_the_registry();
    let contacts = contacts_are_generated(&seed_def);
    all_contact_names_satisfy_backend_constraints(&contacts);
}

#[rstest]
fn generated_contact_emails_are_valid() {
    let seed_def = a_seed_definition_from_the_registry();
    let contacts = contacts_are_generated(&seed_def);
    all_contact_emails_are_well_formed(&contacts);
}

#[rstest]
fn generated_contact_ids_do_not_collide() {
    let seed_def = a_seed_definition_from_the_registry();
    let contacts = contacts_are_generated(&seed_def);
    all_contact_ids_are_unique(&contacts);
}

#[rstest]
fn invalid_json_fails_parsing() {
    let json = malformed_json();
    let result = the_registry_is_parsed(&json);
    parsing_fails_with_a_parse_error(result);
}

#[rstest]
fn empty_seeds_array_fails_parsing() {
    let json = registry_json_with_empty_seeds_array();
    let result = the_registry_is_parsed(&json);
    parsing_fails_with_empty_seeds_error(result);
}
