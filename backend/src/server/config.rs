//! Server settings loaded via OrthoConfig, and the runtime configuration
//! assembled from them.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;
use ortho_config::OrthoConfig;
use serde::Deserialize;

use recipe_service::inbound::http::session_config::SessionSettings;
use recipe_service::outbound::persistence::DbPool;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Process settings read from `RECIPES_*` variables or the command line.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RECIPES")]
pub struct ServerSettings {
    /// PostgreSQL connection string. Required.
    pub database_url: Option<String>,
    /// Listen address, `0.0.0.0` when unset.
    pub host: Option<IpAddr>,
    /// Listen port, 8000 when unset.
    #[ortho_config(default = 8000)]
    pub port: u16,
    /// Upper bound on pooled database connections, ten when unset.
    #[ortho_config(default = 10)]
    pub db_max_connections: u32,
}

/// Settings that cannot be used to start the server.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// `RECIPES_DATABASE_URL` was not supplied.
    #[error("RECIPES_DATABASE_URL must be set")]
    MissingDatabaseUrl,
}

impl ServerSettings {
    /// Database URL, which has no default.
    ///
    /// # Errors
    /// Returns [`SettingsError::MissingDatabaseUrl`] when unset or blank.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// Socket address to bind, defaulting to `0.0.0.0:8000`.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host.unwrap_or(DEFAULT_HOST), self.port)
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Construct a server configuration from validated parts.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr, db_pool: DbPool) -> Self {
        Self {
            session,
            bind_addr,
            db_pool,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
