//! Seed registry types and JSON parsing.
//!
//! This module defines the seed registry structure that holds named seed
//! definitions. The registry is loaded from JSON, provides deterministic
//! seed lookups, and supports atomic updates via the seed registry CLI.

use std::fs;
use std::path::Path;

use camino::Utf8Path;
use cap_std::{ambient_authority, fs::Dir};
use serde::{Deserialize, Serialize};

use crate::atomic_io::write_atomic;
use crate::error::RegistryError;

/// Current supported registry version.
const SUPPORTED_VERSION: u32 = 1;

/// A seed registry containing named seed definitions.
///
/// The registry is loaded from a JSON file and provides access to seed
/// definitions for deterministic contact generation.
///
/// # Example
///
/// ```
/// use example_data::SeedRegistry;
///
/// let json = r#"{
///     "version": 1,
///     "seeds": [{"name": "test", "seed": 42, "contactCount": 5}]
/// }"#;
///
/// let registry = SeedRegistry::from_json(json).expect("valid registry");
/// assert_eq!(registry.seeds().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedRegistry {
    version: u32,
    seeds: Vec<SeedDefinition>,
}

impl SeedRegistry {
    /// Parses a seed registry from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if:
    /// - The JSON is malformed
    /// - Required fields are missing
    /// - The version is unsupported
    /// - The seeds array is empty
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let raw: RawSeedRegistry =
            serde_json::from_str(json).map_err(|e| RegistryError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// Loads a seed registry from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, RegistryError> {
        let contents = fs::read_to_string(path).map_err(|e| RegistryError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_json(&contents)
    }

    fn from_raw(raw: RawSeedRegistry) -> Result<Self, RegistryError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(RegistryError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        if raw.seeds.is_empty() {
            return Err(RegistryError::EmptySeeds);
        }

        let seeds = raw
            .seeds
            .into_iter()
            .map(|s| SeedDefinition {
                name: s.name,
                seed: s.seed,
                contact_count: s.contact_count,
            })
            .collect();

        Ok(Self {
            version: raw.version,
            seeds,
        })
    }

    fn to_raw(&self) -> RawSeedRegistry {
        RawSeedRegistry {
            version: self.version,
            seeds: self
                .seeds
                .iter()
                .map(|s| RawSeedDefinition {
                    name: s.name.clone(),
                    seed: s.seed,
                    contact_count: s.contact_count,
                })
                .collect(),
        }
    }

    /// Returns the registry version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns all seed definitions.
    #[must_use]
    pub fn seeds(&self) -> &[SeedDefinition] {
        &self.seeds
    }

    /// Finds a seed definition by name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::SeedNotFound`] if no seed with the given name
    /// exists.
    pub fn find_seed(&self, name: &str) -> Result<&SeedDefinition, RegistryError> {
        self.seeds
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| RegistryError::SeedNotFound {
                name: name.to_owned(),
            })
    }

    /// Returns a copy of the registry with the seed appended.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateSeedName`] if a seed with the same
    /// name already exists.
    pub fn append_seed(&self, seed: SeedDefinition) -> Result<Self, RegistryError> {
        if self.seeds.iter().any(|existing| existing.name == seed.name) {
            return Err(RegistryError::DuplicateSeedName { name: seed.name });
        }

        let mut updated = self.clone();
        updated.seeds.push(seed);
        Ok(updated)
    }

    /// Serializes the registry to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::SerializeError`] if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, RegistryError> {
        serde_json::to_string_pretty(&self.to_raw()).map_err(|e| RegistryError::SerializeError {
            message: e.to_string(),
        })
    }

    /// Writes the registry to a file atomically.
    ///
    /// The write goes through a temporary file in the target directory so a
    /// crash never leaves a partially written registry behind.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if serialization or the write fails.
    pub fn write_to_file(&self, path: &Path) -> Result<(), RegistryError> {
        let json = self.to_json_pretty()?;
        let utf8_path = Utf8Path::from_path(path).ok_or_else(|| RegistryError::WriteError {
            path: path.to_path_buf(),
            message: "registry path must be valid UTF-8".to_owned(),
        })?;
        let parent = match utf8_path.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent,
            _ => Utf8Path::new("."),
        };
        let file_name = utf8_path
            .file_name()
            .ok_or_else(|| RegistryError::WriteError {
                path: path.to_path_buf(),
                message: "registry path must be a file".to_owned(),
            })?;
        let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|e| {
            RegistryError::WriteError {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?;

        write_atomic(&dir, Utf8Path::new(file_name), &json)
    }
}

/// A named seed definition for deterministic contact generation.
///
/// Each seed has a unique name, an RNG seed value, and a contact count that
/// determines how many contacts to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedDefinition {
    name: String,
    seed: u64,
    contact_count: usize,
}

impl SeedDefinition {
    /// Creates a seed definition from its parts.
    #[must_use]
    pub const fn new(name: String, seed: u64, contact_count: usize) -> Self {
        Self {
            name,
            seed,
            contact_count,
        }
    }

    /// Returns the seed name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the RNG seed value.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the number of contacts to generate.
    #[must_use]
    pub const fn contact_count(&self) -> usize {
        self.contact_count
    }
}

/// Raw JSON representation for serialization.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeedRegistry {
    version: u32,
    seeds: Vec<RawSeedDefinition>,
}

/// Raw JSON representation of a seed definition.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeedDefinition {
    name: String,
    seed: u64,
    contact_count: usize,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const VALID_JSON: &str = r#"{
        "version": 1,
        "seeds": [
            {"name": "mossy-owl", "seed": 2026, "contactCount": 12},
            {"name": "snowy-penguin", "seed": 1234, "contactCount": 5}
        ]
    }"#;

    #[test]
    fn parses_valid_registry() {
        let registry = SeedRegistry::from_json(VALID_JSON).expect("valid registry");

        assert_eq!(registry.version(), 1);
        assert_eq!(registry.seeds().len(), 2);
    }

    #[test]
    fn finds_seed_by_name() {
        let registry = SeedRegistry::from_json(VALID_JSON).expect("valid registry");
        let seed = registry.find_seed("mossy-owl").expect("seed found");

        assert_eq!(seed.name(), "mossy-owl");
        assert_eq!(seed.seed(), 2026);
        assert_eq!(seed.contact_count(), 12);
    }

    #[test]
    fn returns_error_for_unknown_seed() {
        let registry = SeedRegistry::from_json(VALID_JSON).expect("valid registry");
        let result = registry.find_seed("unknown");

        assert_eq!(
            result,
            Err(RegistryError::SeedNotFound {
                name: "unknown".to_owned()
            })
        );
    }

    /// Tests that use pattern matching for parse errors (message content varies).
    #[rstest]
    #[case::malformed_json("not valid json")]
    #[case::missing_version(r#"{"seeds": [{"name": "a", "seed": 1, "contactCount": 1}]}"#)]
    #[case::missing_contact_count(r#"{"version": 1, "seeds": [{"name": "a", "seed": 1}]}"#)]
    fn rejects_json_with_parse_error(#[case] json: &str) {
        let result = SeedRegistry::from_json(json);
        assert!(matches!(result, Err(RegistryError::ParseError { .. })));
    }

    /// Tests that check exact error variants.
    #[rstest]
    #[case::unsupported_version(
        r#"{"version": 99, "seeds": [{"name": "a", "seed": 1, "contactCount": 1}]}"#,
        RegistryError::UnsupportedVersion { expected: 1, actual: 99 }
    )]
    #[case::empty_seeds(
        r#"{"version": 1, "seeds": []}"#,
        RegistryError::EmptySeeds
    )]
    fn rejects_invalid_registry(#[case] json: &str, #[case] expected: RegistryError) {
        let result = SeedRegistry::from_json(json);
        assert_eq!(result, Err(expected));
    }

    #[test]
    fn seed_definition_getters_work() {
        let registry = SeedRegistry::from_json(VALID_JSON).expect("valid registry");
        let seed = registry.find_seed("snowy-penguin").expect("seed found");

        assert_eq!(seed.name(), "snowy-penguin");
        assert_eq!(seed.seed(), 1234);
        assert_eq!(seed.contact_count(), 5);
    }

    #[test]
    fn append_seed_adds_new_definition() {
        let registry = SeedRegistry::from_json(VALID_JSON).expect("valid registry");
        let new_seed = SeedDefinition::new("autumn-breeze".to_owned(), 77, 4);

        let updated = registry.append_seed(new_seed).expect("append seed");

        assert_eq!(updated.seeds().len(), 3);
        assert!(updated.find_seed("autumn-breeze").is_ok());
        // Original is untouched.
        assert_eq!(registry.seeds().len(), 2);
    }

    #[test]
    fn append_seed_rejects_duplicate_name() {
        let registry = SeedRegistry::from_json(VALID_JSON).expect("valid registry");
        let duplicate = SeedDefinition::new("mossy-owl".to_owned(), 77, 4);

        let result = registry.append_seed(duplicate);

        assert_eq!(
            result,
            Err(RegistryError::DuplicateSeedName {
                name: "mossy-owl".to_owned()
            })
        );
    }

    #[test]
    fn round_trips_through_pretty_json() {
        let registry = SeedRegistry::from_json(VALID_JSON).expect("valid registry");

        let json = registry.to_json_pretty().expect("serialize registry");
        let round_trip = SeedRegistry::from_json(&json).expect("round trip");

        assert_eq!(registry, round_trip);
        assert!(json.contains("contactCount"));
    }
}
