//! Backend entry-point: wires configuration, persistence, and the HTTP API.

mod server;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetricsBuilder;
use color_eyre::eyre::{Context, Result};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

#[cfg(feature = "example-data")]
use backend::example_data::{
    ExampleDataSettings, SeedAccountPasswords, seed_example_data_on_startup,
};
use backend::inbound::http::health::HealthState;
use backend::inbound::http::session_config::fingerprint::key_fingerprint;
use backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
use backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

use server::{AppSettings, ServerConfig};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().wrap_err("failed to load application settings")?;
    let bind_addr = settings
        .socket_addr()
        .wrap_err("invalid bind address configuration")?;

    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .wrap_err("invalid session configuration")?;
    info!(
        key_fingerprint = %key_fingerprint(&session.key),
        "session signing key loaded"
    );

    let db_pool = match settings.database_url.as_deref() {
        Some(url) => {
            let applied = run_pending_migrations(url)
                .await
                .wrap_err("failed to run database migrations")?;
            info!(applied, "database migrations checked");

            let mut pool_config = PoolConfig::new(url);
            if let Some(max_size) = settings.db_pool_max_size {
                pool_config = pool_config.with_max_size(max_size);
            }
            let pool = DbPool::new(pool_config)
                .await
                .wrap_err("failed to build database pool")?;
            Some(pool)
        }
        None => {
            warn!("ROLODEX_DATABASE_URL not set; serving fixture data without persistence");
            None
        }
    };

    #[cfg(feature = "example-data")]
    {
        let seeding =
            ExampleDataSettings::load().wrap_err("failed to load example data settings")?;
        let passwords = SeedAccountPasswords::from_env(&DefaultEnv::new());
        seed_example_data_on_startup(&seeding, &passwords, db_pool.as_ref())
            .await
            .wrap_err("example data seeding failed")?;
    }

    let mut config = ServerConfig::new(session, bind_addr);
    if let Some(pool) = db_pool {
        config = config.with_db_pool(pool);
    }

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(
        PrometheusMetricsBuilder::new("rolodex")
            .endpoint("/metrics")
            .build()
            .map_err(|e| color_eyre::eyre::eyre!("configure Prometheus metrics: {e}"))?,
    ));

    let health_state = web::Data::new(HealthState::new());
    let server =
        server::create_server(health_state, config).wrap_err("failed to start HTTP server")?;
    info!(%bind_addr, "listening");
    server.await.wrap_err("server terminated abnormally")
}
