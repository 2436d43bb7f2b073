//! Session configuration parsing and validation.
//!
//! Centralises the environment-driven session settings so they are validated
//! consistently and can be tested in isolation. Release builds demand
//! explicit, valid toggles and a real signing key; debug builds warn and fall
//! back to safe defaults so local development works without ceremony.

use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use std::path::PathBuf;
use tracing::warn;
use zeroize::Zeroize;

use parsing::BoolEnvConfig;

pub mod fingerprint;
mod parsing;
#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;

const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
/// Minimum length, in bytes, for the session signing key file.
pub const SESSION_KEY_MIN_LEN: usize = 64;
/// Environment variable controlling the `Secure` cookie attribute.
pub const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
/// Environment variable controlling the cookie `SameSite` attribute.
pub const SAMESITE_ENV: &str = "SESSION_SAMESITE";
/// Environment variable permitting an ephemeral generated key.
pub const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";
/// Environment variable naming the session key file.
pub const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
/// Environment variable overriding the session cookie name.
pub const COOKIE_NAME_ENV: &str = "SESSION_COOKIE_NAME";
/// Environment variable overriding the session time to live in seconds.
pub const TTL_ENV: &str = "SESSION_TTL_SECONDS";
const DEFAULT_COOKIE_NAME: &str = "session";
const DEFAULT_TTL_SECONDS: i64 = 7200;
const TTL_EXPECTED: &str = "positive integer seconds";
const COOKIE_NAME_EXPECTED: &str = "non-empty cookie name";

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate defaults and emit warnings for missing toggles.
    Debug,
    /// Release builds require explicit, valid session toggles.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use backend::inbound::http::session_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Session settings derived from configuration toggles.
#[derive(Clone)]
pub struct SessionSettings {
    /// Signing key for cookie sessions.
    pub key: Key,
    /// Whether session cookies are marked `Secure`.
    pub cookie_secure: bool,
    /// Configured `SameSite` policy for session cookies.
    pub same_site: SameSite,
    /// Name of the session cookie.
    pub cookie_name: String,
    /// Session lifetime in seconds.
    pub ttl_seconds: i64,
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Reading the session key file failed.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The session key file exists but is too short for release builds.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    /// `SameSite=None` requires a secure cookie setting in release builds.
    #[error("SESSION_SAMESITE=None requires SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    /// Release builds must not allow ephemeral session keys.
    #[error("SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Build session settings from environment variables and build mode.
///
/// # Examples
///
/// ```rust
/// use backend::inbound::http::session_config::{
///     BuildMode, session_settings_from_env, test_utils::TempKeyFile,
/// };
/// use mockable::MockEnv;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let key_file = TempKeyFile::new(64)?;
/// let key_path = key_file.path_str();
/// let mut env = MockEnv::new();
/// env.expect_string().returning(move |name| match name {
///     "SESSION_KEY_FILE" => Some(key_path.clone()),
///     "SESSION_COOKIE_SECURE" => Some("1".to_string()),
///     "SESSION_SAMESITE" => Some("Strict".to_string()),
///     "SESSION_ALLOW_EPHEMERAL" => Some("0".to_string()),
///     _ => None,
/// });
///
/// let settings = session_settings_from_env(&env, BuildMode::Release)?;
/// assert!(settings.cookie_secure);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
/// Returns a [`SessionConfigError`] when a toggle is missing or invalid for
/// the given build mode, or when the signing key cannot be loaded.
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = cookie_secure_from_env(env, mode)?;
    let same_site = same_site_from_env(env, mode, cookie_secure)?;
    let allow_ephemeral = allow_ephemeral_from_env(env, mode)?;
    let key = session_key_from_env(env, mode, allow_ephemeral)?;
    let cookie_name = cookie_name_from_env(env, mode)?;
    let ttl_seconds = ttl_from_env(env, mode)?;

    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
        cookie_name,
        ttl_seconds,
    })
}

fn cookie_name_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<String, SessionConfigError> {
    match env.string(COOKIE_NAME_ENV) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        Some(value) => parsing::debug_warn_or_error(
            mode,
            DEFAULT_COOKIE_NAME.to_string(),
            SessionConfigError::InvalidEnv {
                name: COOKIE_NAME_ENV,
                value,
                expected: COOKIE_NAME_EXPECTED,
            },
            || warn!("SESSION_COOKIE_NAME is blank; using default"),
        ),
        // Missing is fine in every mode; the name is not security sensitive.
        None => Ok(DEFAULT_COOKIE_NAME.to_string()),
    }
}

fn ttl_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<i64, SessionConfigError> {
    match env.string(TTL_ENV) {
        Some(value) => match value.parse::<i64>() {
            Ok(seconds) if seconds > 0 => Ok(seconds),
            _ => {
                let value_clone = value.clone();
                parsing::debug_warn_or_error(
                    mode,
                    DEFAULT_TTL_SECONDS,
                    SessionConfigError::InvalidEnv {
                        name: TTL_ENV,
                        value: value_clone,
                        expected: TTL_EXPECTED,
                    },
                    || warn!(value = %value, "invalid SESSION_TTL_SECONDS; using default"),
                )
            }
        },
        None => Ok(DEFAULT_TTL_SECONDS),
    }
}

fn cookie_secure_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<bool, SessionConfigError> {
    parsing::parse_bool_env(
        env,
        mode,
        BoolEnvConfig::new(COOKIE_SECURE_ENV, true),
        |flag, _| Ok(flag),
    )
}

fn same_site_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    let default_same_site = if mode.is_debug() {
        SameSite::Lax
    } else {
        SameSite::Strict
    };

    match env.string(SAMESITE_ENV) {
        Some(value) => parsing::parse_same_site_value(value, mode, cookie_secure, default_same_site),
        None => parsing::debug_warn_or_error(
            mode,
            default_same_site,
            SessionConfigError::MissingEnv { name: SAMESITE_ENV },
            || warn!("SESSION_SAMESITE not set; using default"),
        ),
    }
}

fn allow_ephemeral_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<bool, SessionConfigError> {
    parsing::parse_bool_env(
        env,
        mode,
        BoolEnvConfig::new(ALLOW_EPHEMERAL_ENV, false),
        |flag, mode| {
            if flag && !mode.is_debug() {
                Err(SessionConfigError::EphemeralNotAllowed)
            } else {
                Ok(flag)
            }
        },
    )
}

fn session_key_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    let key_path = env
        .string(KEY_FILE_ENV)
        .unwrap_or_else(|| SESSION_KEY_DEFAULT_PATH.to_string());
    let path = PathBuf::from(key_path);

    match std::fs::read(&path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            if mode == BuildMode::Release && length < SESSION_KEY_MIN_LEN {
                bytes.zeroize();
                return Err(SessionConfigError::KeyTooShort {
                    path,
                    length,
                    min_len: SESSION_KEY_MIN_LEN,
                });
            }
            let key = Key::derive_from(&bytes);
            bytes.zeroize();
            Ok(key)
        }
        Err(error) => {
            if mode.is_debug() || allow_ephemeral {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "using temporary session key (dev only)"
                );
                Ok(Key::generate())
            } else {
                Err(SessionConfigError::KeyRead {
                    path,
                    source: error,
                })
            }
        }
    }
}
