//! Deterministic example contact data generation for demonstration purposes.
//!
//! This crate provides tools for generating believable, reproducible contact
//! records from a JSON seed registry. It is designed to be independent of
//! backend domain types to avoid circular dependencies.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Loading seed registries from JSON files
//! - Deterministic contact generation using named seeds
//! - Contact field validation matching backend constraints
//! - Atomic registry updates driven by a small CLI
//!
//! # Example
//!
//! ```
//! use example_data::{SeedRegistry, generate_example_contacts};
//!
//! let json = r#"{
//!     "version": 1,
//!     "seeds": [{"name": "test-seed", "seed": 42, "contactCount": 3}]
//! }"#;
//!
//! let registry = SeedRegistry::from_json(json).expect("valid registry");
//! let seed_def = registry.find_seed("test-seed").expect("seed exists");
//! let contacts = generate_example_contacts(seed_def).expect("generation succeeds");
//!
//! assert_eq!(contacts.len(), 3);
//! ```

mod atomic_io;
mod error;
mod generator;
mod registry;
mod seed;
pub mod seed_registry_cli;
mod validation;

pub use error::{GenerationError, RegistryError};
pub use generator::generate_example_contacts;
pub use registry::{SeedDefinition, SeedRegistry};
pub use seed::{ContactStatusSeed, ExampleContactSeed};
pub use validation::{CONTACT_NAME_MAX, is_valid_contact_name, is_valid_email};
