//! Startup seeding orchestration.
//!
//! Bootstraps the privileged accounts and applies the configured example
//! contact seed once a database pool is available.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use cap_std::{ambient_authority, fs::Dir};
use example_data::{RegistryError, SeedRegistry};
use mockable::Env;
use thiserror::Error;
use tracing::{info, warn};
use zeroize::Zeroizing;

use crate::domain::ports::{
    NewUserRecord, PasswordHashError, PasswordHasher, SeedingResult, UserPersistenceError,
    UserRepository,
};
use crate::domain::{
    DisplayName, ExampleContactSeeder, ExampleSeedOutcome, ExampleSeedingError, Role, UserId,
    UserValidationError, Username,
};
use crate::example_data::config::ExampleDataSettings;
use crate::outbound::persistence::{DbPool, DieselExampleSeedRepository, DieselUserRepository};
use crate::outbound::security::Argon2PasswordHasher;

const OWNER_USERNAME: &str = "example-owner";
const OWNER_DISPLAY_NAME: &str = "Example Owner";
const ADMIN_USERNAME: &str = "admin";
const ADMIN_DISPLAY_NAME: &str = "Administrator";
const MANAGER_USERNAME: &str = "manager";
const MANAGER_DISPLAY_NAME: &str = "Manager";
const ADMIN_PASSWORD_ENV: &str = "ROLODEX_SEED_ADMIN_PASSWORD";
const MANAGER_PASSWORD_ENV: &str = "ROLODEX_SEED_MANAGER_PASSWORD";

/// Errors returned while executing startup seeding.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    /// Registry file could not be read.
    #[error("failed to read registry at {path}: {source}")]
    RegistryRead {
        /// Path to the registry file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Registry parsing failed.
    #[error("registry parse error: {0}")]
    Registry(#[from] RegistryError),
    /// Seed generation or persistence failed.
    #[error("example contact seeding error: {0}")]
    Seeding(#[from] ExampleSeedingError),
    /// Seed name must not be empty.
    #[error("seed name must not be empty")]
    EmptySeedName,
    /// A bootstrap account definition failed domain validation.
    #[error("seed account details invalid: {0}")]
    AccountInvalid(#[from] UserValidationError),
    /// Hashing a bootstrap account password failed.
    #[error("seed account password hashing failed: {0}")]
    AccountPassword(#[from] PasswordHashError),
    /// Persisting a bootstrap account failed.
    #[error("seed account persistence failed: {0}")]
    AccountPersistence(#[from] UserPersistenceError),
}

/// Passwords for the privileged bootstrap accounts.
///
/// A missing password skips the corresponding account rather than failing
/// startup; existing accounts are never modified.
#[derive(Default)]
pub struct SeedAccountPasswords {
    admin: Option<Zeroizing<String>>,
    manager: Option<Zeroizing<String>>,
}

impl SeedAccountPasswords {
    /// Read bootstrap account passwords from the process environment.
    pub fn from_env<E: Env>(env: &E) -> Self {
        Self {
            admin: env.string(ADMIN_PASSWORD_ENV).map(Zeroizing::new),
            manager: env.string(MANAGER_PASSWORD_ENV).map(Zeroizing::new),
        }
    }
}

/// Apply example data on startup when enabled.
///
/// The privileged accounts are ensured whenever a pool is available, even
/// with contact seeding disabled, so operators can always sign in.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::PathBuf;
///
/// use backend::example_data::{
///     ExampleDataSettings, SeedAccountPasswords, seed_example_data_on_startup,
/// };
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let settings = ExampleDataSettings {
///     enabled: false,
///     seed_name: Some("mossy-owl".to_string()),
///     count: None,
///     registry_path: Some(PathBuf::from("fixtures/example-data/seeds.json")),
/// };
/// let outcome =
///     seed_example_data_on_startup(&settings, &SeedAccountPasswords::default(), None).await?;
/// assert!(outcome.is_none());
/// # Ok(())
/// # }
/// ```
pub async fn seed_example_data_on_startup(
    settings: &ExampleDataSettings,
    accounts: &SeedAccountPasswords,
    db_pool: Option<&DbPool>,
) -> Result<Option<ExampleSeedOutcome>, StartupSeedingError> {
    let Some(db_pool) = db_pool else {
        if settings.enabled {
            warn!("example data seeding enabled but DATABASE_URL is missing; skipping");
        }
        return Ok(None);
    };

    let users = DieselUserRepository::new(db_pool.clone());
    let hasher = Argon2PasswordHasher;
    ensure_privileged_accounts(&users, &hasher, accounts).await?;

    if !settings.enabled {
        info!(reason = "disabled", "example contact seeding skipped");
        return Ok(None);
    }

    let seed_name = settings.seed_name().trim();
    if seed_name.is_empty() {
        return Err(StartupSeedingError::EmptySeedName);
    }

    let registry_path = settings.registry_path();
    let registry = load_registry(&registry_path)?;

    let owner_id = ensure_owner_account(&users, &hasher).await?;

    let repository = DieselExampleSeedRepository::new(db_pool.clone());
    let seeder = ExampleContactSeeder::new(Arc::new(repository));
    let outcome = seeder
        .seed_from_registry(&registry, seed_name, &owner_id, settings.count)
        .await?;

    match outcome.result {
        SeedingResult::Applied => {
            info!(
                seed_key = %outcome.seed_key,
                contact_count = outcome.contact_count,
                "example contact seeding applied"
            );
        }
        SeedingResult::AlreadySeeded => {
            info!(
                seed_key = %outcome.seed_key,
                contact_count = outcome.contact_count,
                "example contact seed already applied; skipping"
            );
        }
    }

    Ok(Some(outcome))
}

struct AccountSpec<'a> {
    username: &'a str,
    display_name: &'a str,
    password: &'a str,
    roles: Vec<Role>,
}

async fn ensure_privileged_accounts(
    users: &dyn UserRepository,
    hasher: &dyn PasswordHasher,
    accounts: &SeedAccountPasswords,
) -> Result<(), StartupSeedingError> {
    let specs = [
        (
            ADMIN_USERNAME,
            ADMIN_DISPLAY_NAME,
            Role::Administrator,
            accounts.admin.as_ref(),
            ADMIN_PASSWORD_ENV,
        ),
        (
            MANAGER_USERNAME,
            MANAGER_DISPLAY_NAME,
            Role::Manager,
            accounts.manager.as_ref(),
            MANAGER_PASSWORD_ENV,
        ),
    ];

    for (username, display_name, role, password, env_name) in specs {
        let Some(password) = password else {
            info!(
                username,
                env = env_name,
                "seed account skipped; password not configured"
            );
            continue;
        };

        ensure_account(
            users,
            hasher,
            AccountSpec {
                username,
                display_name,
                password: password.as_str(),
                roles: vec![role],
            },
        )
        .await?;
    }

    Ok(())
}

async fn ensure_owner_account(
    users: &dyn UserRepository,
    hasher: &dyn PasswordHasher,
) -> Result<UserId, StartupSeedingError> {
    // Random password: the account exists to own example contacts, not to log in.
    let password = Zeroizing::new(uuid::Uuid::new_v4().to_string());
    ensure_account(
        users,
        hasher,
        AccountSpec {
            username: OWNER_USERNAME,
            display_name: OWNER_DISPLAY_NAME,
            password: password.as_str(),
            roles: Vec::new(),
        },
    )
    .await
}

async fn ensure_account(
    users: &dyn UserRepository,
    hasher: &dyn PasswordHasher,
    spec: AccountSpec<'_>,
) -> Result<UserId, StartupSeedingError> {
    let username = Username::new(spec.username)?;
    if let Some(existing) = users.find_by_username(&username).await? {
        return Ok(existing.id().clone());
    }

    let record = NewUserRecord {
        id: UserId::random(),
        username: username.clone(),
        display_name: DisplayName::new(spec.display_name)?,
        password_hash: hasher.hash(spec.password).await?,
        roles: spec.roles,
    };

    match users.create(&record).await {
        Ok(user) => {
            info!(username = %user.username(), "seed account created");
            Ok(user.id().clone())
        }
        // Lost a creation race; the account exists now.
        Err(UserPersistenceError::DuplicateUsername { .. }) => users
            .find_by_username(&username)
            .await?
            .map(|user| user.id().clone())
            .ok_or_else(|| {
                UserPersistenceError::query(format!(
                    "account {username} missing after duplicate username"
                ))
                .into()
            }),
        Err(error) => Err(error.into()),
    }
}

fn load_registry(path: &Path) -> Result<SeedRegistry, StartupSeedingError> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let parent = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| StartupSeedingError::RegistryRead {
            path: path.to_path_buf(),
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "registry path must be a file",
            ),
        })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|source| {
        StartupSeedingError::RegistryRead {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let payload =
        dir.read(Path::new(file_name))
            .map_err(|source| StartupSeedingError::RegistryRead {
                path: path.to_path_buf(),
                source,
            })?;
    let contents =
        String::from_utf8(payload).map_err(|source| StartupSeedingError::RegistryRead {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, source),
        })?;
    Ok(SeedRegistry::from_json(&contents)?)
}
