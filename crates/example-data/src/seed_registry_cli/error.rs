//! Error types for the seed registry CLI.

use thiserror::Error;

use crate::error::RegistryError;

/// Errors produced while parsing CLI arguments or applying a registry update.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliError {
    /// The registry path flag was absent.
    #[error("missing required flag: --registry")]
    MissingRegistryPath,
    /// A flag expected a value but the argument list ended.
    #[error("missing value for {flag}")]
    MissingValue {
        /// Flag whose value was missing.
        flag: &'static str,
    },
    /// An argument was supplied that the CLI does not recognize.
    #[error("unknown argument: {value}")]
    UnknownArgument {
        /// The unrecognized argument.
        value: String,
    },
    /// A numeric flag value failed to parse.
    #[error("invalid number for {flag}: '{value}' ({message})")]
    InvalidNumber {
        /// Flag the invalid number was supplied for.
        flag: &'static str,
        /// Raw value that failed to parse.
        value: String,
        /// Parser error message.
        message: String,
    },
    /// The EFF word list could not be built.
    #[error("word list error: {message}")]
    WordListError {
        /// Description of the word list failure.
        message: String,
    },
    /// The name derived from a supplied seed already exists in the registry.
    #[error("generated seed name '{name}' already exists; supply --name")]
    DuplicateGeneratedName {
        /// Name that collided with an existing seed.
        name: String,
    },
    /// Random name generation exhausted its retry budget.
    #[error("failed to generate a unique seed name after {attempts} attempts")]
    NameGenerationExhausted {
        /// Number of attempts made before giving up.
        attempts: usize,
    },
    /// Reading or writing the registry failed.
    #[error("registry error: {source}")]
    RegistryError {
        /// Underlying registry error.
        #[from]
        #[source]
        source: RegistryError,
    },
}
