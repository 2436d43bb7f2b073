//! Integration tests for seed registry file I/O.
//!
//! These tests exercise the public registry API end to end: loading from
//! disk, reporting I/O failures, and atomically persisting updates.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use example_data::{RegistryError, SeedDefinition, SeedRegistry};

const VALID_JSON: &str = r#"{
    "version": 1,
    "seeds": [
        {"name": "mossy-owl", "seed": 2026, "contactCount": 12},
        {"name": "snowy-penguin", "seed": 1234, "contactCount": 5}
    ]
}"#;

#[test]
fn loads_registry_from_file() {
    let path = unique_temp_path("seeds.json");
    fs::write(&path, VALID_JSON).expect("write registry file");

    let registry = SeedRegistry::from_file(&path).expect("load registry");

    assert_eq!(registry.version(), 1);
    assert_eq!(registry.seeds().len(), 2);
    let seed = registry.find_seed("mossy-owl").expect("seed found");
    assert_eq!(seed.seed(), 2026);
    assert_eq!(seed.contact_count(), 12);

    cleanup(&path);
}

#[test]
fn reports_io_error_for_missing_file() {
    let path = unique_temp_path("absent.json");

    let result = SeedRegistry::from_file(&path);

    match result {
        Err(RegistryError::IoError {
            path: err_path,
            message,
        }) => {
            assert_eq!(err_path, path);
            assert!(!message.is_empty());
        }
        other => panic!("expected IoError, got: {other:?}"),
    }

    cleanup(&path);
}

#[test]
fn writes_registry_to_file() {
    let registry = SeedRegistry::from_json(VALID_JSON).expect("valid registry");
    let path = unique_temp_path("seeds.json");

    registry.write_to_file(&path).expect("write registry file");

    let round_trip = SeedRegistry::from_file(&path).expect("load registry");
    assert_eq!(registry, round_trip);

    cleanup(&path);
}

#[test]
fn written_registry_uses_camel_case_keys() {
    let registry = SeedRegistry::from_json(VALID_JSON).expect("valid registry");
    let path = unique_temp_path("seeds.json");

    registry.write_to_file(&path).expect("write registry file");

    let contents = fs::read_to_string(&path).expect("read registry file");
    assert!(contents.contains("contactCount"));
    assert!(!contents.contains("contact_count"));

    cleanup(&path);
}

#[test]
fn write_replaces_existing_registry() {
    let registry = SeedRegistry::from_json(VALID_JSON).expect("valid registry");
    let path = unique_temp_path("seeds.json");
    fs::write(&path, "stale contents").expect("write stale file");

    let appended = registry
        .append_seed(SeedDefinition::new("autumn-breeze".to_owned(), 77, 4))
        .expect("append seed");
    appended.write_to_file(&path).expect("write registry file");

    let round_trip = SeedRegistry::from_file(&path).expect("load registry");
    assert_eq!(round_trip.seeds().len(), 3);
    assert!(round_trip.find_seed("autumn-breeze").is_ok());

    cleanup(&path);
}

#[test]
fn write_reports_missing_parent_directory() {
    let registry = SeedRegistry::from_json(VALID_JSON).expect("valid registry");
    let base = unique_temp_path("seeds.json");
    let path = base
        .parent()
        .expect("temp path has a parent")
        .join("nested")
        .join("out.json");

    let result = registry.write_to_file(&path);

    assert!(matches!(result, Err(RegistryError::WriteError { .. })));

    cleanup(&base);
}

fn unique_temp_path(file_name: &str) -> PathBuf {
    static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or(0);
    let dir = std::env::temp_dir()
        .join("example-data-tests")
        .join(format!("seed-registry-{suffix}-{counter}"));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir.join(file_name)
}

fn cleanup(path: &std::path::Path) {
    if let Some(parent) = path.parent() {
        #[expect(
            clippy::let_underscore_must_use,
            reason = "explicitly ignore cleanup failures in test teardown"
        )]
        let _ = fs::remove_dir_all(parent);
    }
}
