//! Behavioural tests for the seed registry CLI.
//!
//! These scenarios validate that the CLI updates seed registries safely and
//! reports failures for invalid inputs.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]


use std::path::{Path, PathBuf};

use test_support::unique_temp_path;

use example_data::SeedRegistry;
use example_data::seed_registry_cli::{
    ParseOutcome, Update, apply_update, parse_args, seed_name_for_seed, success_message,
};
use rstest::rstest;
use rstest_bdd_macros::{given, then, when};

const VALID_REGISTRY_JSON: &str = r#"{
    "version": 1,
    "seeds": [
        {"name": "mossy-owl", "seed": 2026, "contactCount": 12}
    ]
}"#;

#[derive(Debug, Clone)]
struct CommandResult {
    is_success: bool,
    stdout: String,
    stderr: String,
    update: Option<Update>,
}

#[given("a seed registry file")]
fn a_seed_registry_file() -> PathBuf {
    write_registry(VALID_REGISTRY_JSON)
}

#[given("an invalid seed registry file")]
fn an_invalid_seed_registry_file() -> PathBuf {
    write_registry("not json")
}

#[when("the seed registry CLI adds a seed using an RNG value")]
fn the_cli_adds_a_seed_using_rng_value(path: &PathBuf, seed: u64) -> CommandResult {
    run_cli(path, &["--seed", &seed.to_string()])
}

#[when("the seed registry CLI adds a named seed")]
fn the_cli_adds_a_named_seed(path: &PathBuf, name: &str) -> CommandResult {
    run_cli(path, &["--name", name])
}

#[then("the registry contains the generated seed name")]
fn the_registry_contains_the_generated_seed_name(path: &PathBuf, seed: u64) {
    let expected = seed_name_for_seed(seed).expect("seed name should be generated");
    let registry = SeedRegistry::from_file(path).expect("registry should load");

    assert!(registry.find_seed(&expected).is_ok());
}

#[then("the registry contains the named seed")]
fn the_registry_contains_the_named_seed(path: &PathBuf, name: &str) {
    let registry = SeedRegistry::from_file(path).expect("registry should load");

    assert!(registry.find_seed(name).is_ok());
}

#[then("the CLI reports success")]
fn the_cli_reports_success(path: &PathBuf, result: &CommandResult) {
    assert!(result.is_success, "stderr was: {}", result.stderr);
    let update = result.update.as_ref().expect("update should be recorded");
    let expected = success_message(update, path);

    assert_eq!(
        result.stdout.trim_end(),
        expected,
        "stdout mismatch: {}",
        result.stdout
    );

    let registry = SeedRegistry::from_file(path).expect("registry should load");
    let seed = registry
        .find_seed(&update.name)
        .expect("registry should contain the new seed");
    assert_eq!(seed.seed(), update.seed);
    assert_eq!(seed.contact_count(), update.contact_count);
}

#[then("the CLI reports a duplicate seed error")]
fn the_cli_reports_a_duplicate_seed_error(result: &CommandResult) {
    assert!(!result.is_success);
    assert!(
        result.stderr.contains("already exists in registry"),
        "stderr did not mention a duplicate seed: {}",
        result.stderr
    );
    assert!(
        result.stderr.contains("mossy-owl"),
        "stderr did not include the duplicate seed name: {}",
        result.stderr
    );
}

#[then("the registry remains unchanged")]
fn the_registry_remains_unchanged(path: &PathBuf) {
    let registry = SeedRegistry::from_file(path).expect("registry should load");

    assert_eq!(registry.seeds().len(), 1);
    assert!(registry.find_seed("mossy-owl").is_ok());
}

#[then("the CLI reports a registry parse error")]
fn the_cli_reports_a_registry_parse_error(result: &CommandResult) {
    assert!(!result.is_success);
    assert!(result.stderr.contains("invalid registry JSON"));
}

#[rstest]
fn add_seed_with_generated_name() {
    let path = a_seed_registry_file();
    let result = the_cli_adds_a_seed_using_rng_value(&path, 404);
    the_cli_reports_success(&path, &result);
    the_registry_contains_the_generated_seed_name(&path, 404);
    cleanup_path(&path);
}

#[rstest]
fn add_seed_with_explicit_name() {
    let path = a_seed_registry_file();
    let result = the_cli_adds_a_named_seed(&path, "river-stone");
    the_cli_reports_success(&path, &result);
    the_registry_contains_the_named_seed(&path, "river-stone");
    cleanup_path(&path);
}

#[rstest]
fn reject_duplicate_seed_name() {
    let path = a_seed_registry_file();
    let result = the_cli_adds_a_named_seed(&path, "mossy-owl");
    the_cli_reports_a_duplicate_seed_error(&result);
    the_registry_remains_unchanged(&path);
    cleanup_path(&path);
}

#[rstest]
fn reject_invalid_registry_json() {
    let path = an_invalid_seed_registry_file();
    let result = the_cli_adds_a_named_seed(&path, "river-stone");
    the_cli_reports_a_registry_parse_error(&result);
    cleanup_path(&path);
}

fn run_cli(registry_path: &Path, extra_args: &[&str]) -> CommandResult {
    let mut args = vec![
        "--registry".to_owned(),
        registry_path.to_string_lossy().into_owned(),
    ];
    args.extend(extra_args.iter().map(std::string::ToString::to_string));

    let parse_result = match parse_args(args.into_iter()) {
        Ok(outcome) => outcome,
        Err(err) => {
            return CommandResult {
                is_success: false,
                stdout: String::new(),
                stderr: err.to_string(),
                update: None,
            };
        }
    };

    let ParseOutcome::Options(options) = parse_result else {
        return CommandResult {
            is_success: false,
            stdout: String::new(),
            stderr: "unexpected help output".to_owned(),
            update: None,
        };
    };

    match apply_update(&options) {
        Ok(update) => CommandResult {
            is_success: true,
            stdout: success_message(&update, options.registry_path()),
            stderr: String::new(),
            update: Some(update),
        },
        Err(err) => CommandResult {
            is_success: false,
            stdout: String::new(),
            stderr: err.to_string(),
            update: None,
        },
    }
}

fn write_registry(contents: &str) -> PathBuf {
    let path =
        unique_temp_path("seed-registry-cli", "seeds.json").expect("create temp registry path");
    std::fs::write(&path, contents).expect("write registry file");
    path
}

fn cleanup_path(path: &Path) {
    if let Some(parent) = path.parent() {
        drop(std::fs::remove_dir_all(parent));
    }
}
