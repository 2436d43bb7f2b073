//! Builders assembling HTTP handler state from configured ports.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use backend::domain::ports::{
    FixtureContactsCommand, FixtureContactsQuery, FixtureLoginService, FixtureRegistrationService,
    FixtureUserProfileQuery,
};
use backend::domain::{ContactService, IdentityService, PolicyEvaluator};
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::outbound::persistence::{DbPool, DieselContactRepository, DieselUserRepository};
use backend::outbound::security::Argon2PasswordHasher;

use super::ServerConfig;

/// Ports backed by the SQL repositories.
///
/// One identity service answers login, registration, profile, and principal
/// lookups; one contact service answers both contact ports so authorisation
/// checks and persistence share a single wiring.
fn diesel_ports(pool: DbPool) -> HttpStatePorts {
    let identity = Arc::new(IdentityService::new(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(Argon2PasswordHasher),
    ));
    let contacts = Arc::new(ContactService::new(
        Arc::new(DieselContactRepository::new(pool)),
        Arc::clone(&identity),
        PolicyEvaluator::contact_policy(),
    ));
    HttpStatePorts {
        login: identity.clone(),
        registration: identity.clone(),
        profile: identity,
        contacts: contacts.clone(),
        contacts_query: contacts,
    }
}

/// Fixture ports for running without a database.
fn fixture_ports() -> HttpStatePorts {
    HttpStatePorts {
        login: Arc::new(FixtureLoginService),
        registration: Arc::new(FixtureRegistrationService),
        profile: Arc::new(FixtureUserProfileQuery),
        contacts: Arc::new(FixtureContactsCommand),
        contacts_query: Arc::new(FixtureContactsQuery),
    }
}

/// Build the shared HTTP state from the server configuration.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let ports = match config.db_pool.clone() {
        Some(pool) => diesel_ports(pool),
        None => {
            info!("no database pool configured; serving fixture ports");
            fixture_ports()
        }
    };
    web::Data::new(HttpState::new(ports))
}
