//! Recipe service entry-point: loads configuration, prepares the database
//! and serves the REST API.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use recipe_service::inbound::http::health::HealthState;
use recipe_service::inbound::http::session_config::{BuildMode, session_settings_from_env};
use recipe_service::outbound::persistence::{DbPool, PoolConfig, run_migrations};
#[cfg(feature = "metrics")]
use server::make_metrics;
use server::{ServerConfig, ServerSettings, create_server, drain};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let database_url = settings.database_url().map_err(std::io::Error::other)?;

    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    info!(fingerprint = %session.key_fingerprint(), "session key loaded");

    run_migrations(database_url)
        .await
        .map_err(std::io::Error::other)?;

    let pool = DbPool::new(
        PoolConfig::new(database_url).with_max_size(settings.db_max_connections),
    )
    .await
    .map_err(std::io::Error::other)?;
    pool.ping().await.map_err(std::io::Error::other)?;

    let config = ServerConfig::new(session, settings.bind_addr(), pool);
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(make_metrics());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let handle = server.handle();
    actix_web::rt::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown requested, draining");
            drain(&health_state, handle).await;
        }
    });
    info!(addr = %settings.bind_addr(), "recipe service listening");
    server.await
}
