//! Server settings loaded via OrthoConfig and validated into a `ServerConfig`.

use std::net::{IpAddr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use tidewatch::middleware::{CorsOriginError, CorsPolicy};
use tidewatch::outbound::persistence::PoolConfig;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_CORS_ALLOW_ORIGIN: &str = "*";

/// Raw settings from CLI flags, `TIDEWATCH_*` environment variables and
/// configuration files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TIDEWATCH")]
pub struct ServerSettings {
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Address to bind to.
    pub host: Option<String>,
    /// Port to listen on.
    pub port: Option<u16>,
    /// Maximum number of pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Value of `Access-Control-Allow-Origin`.
    pub cors_allow_origin: Option<String>,
    /// Apply pending schema migrations before serving.
    pub run_migrations: Option<bool>,
}

/// Reasons a [`ServerSettings`] value cannot be turned into a [`ServerConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("TIDEWATCH_DATABASE_URL must be set")]
    MissingDatabaseUrl,
    #[error("invalid bind address {host:?}: {source}")]
    InvalidBindAddress {
        host: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("pool size must be at least 1")]
    InvalidPoolSize,
    #[error(transparent)]
    InvalidCorsOrigin(#[from] CorsOriginError),
}

impl ServerSettings {
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn cors_allow_origin(&self) -> &str {
        self.cors_allow_origin
            .as_deref()
            .unwrap_or(DEFAULT_CORS_ALLOW_ORIGIN)
    }

    /// Migrations run unless explicitly disabled.
    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }

    /// Validate the settings.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the database URL is missing or blank, the
    /// host is not an IP address, the pool size is zero, or the CORS origin
    /// is not a valid header value.
    pub fn into_server_config(self) -> Result<ServerConfig, ConfigError> {
        let host = self.host();
        let ip: IpAddr = host
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddress {
                host: host.to_owned(),
                source,
            })?;
        let bind_addr = SocketAddr::new(ip, self.port());
        let cors = CorsPolicy::new(self.cors_allow_origin())?;
        let run_migrations = self.run_migrations();

        let database_url = self
            .database_url
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::MissingDatabaseUrl)?;
        let mut pool = PoolConfig::new(database_url);
        if let Some(max_size) = self.pool_max_size {
            if max_size == 0 {
                return Err(ConfigError::InvalidPoolSize);
            }
            pool = pool.with_max_size(max_size);
        }

        Ok(ServerConfig {
            bind_addr,
            pool,
            cors,
            run_migrations,
        })
    }
}

/// Validated configuration used to build the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) pool: PoolConfig,
    pub(crate) cors: CorsPolicy,
    pub(crate) run_migrations: bool,
}

impl ServerConfig {
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    #[must_use]
    pub fn pool(&self) -> &PoolConfig {
        &self.pool
    }

    #[must_use]
    pub fn run_migrations(&self) -> bool {
        self.run_migrations
    }
}
