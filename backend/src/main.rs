//! Tidewatch entry-point: loads settings, prepares the database and serves
//! the user directory API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerSettings, create_server};
use tidewatch::inbound::http::health::HealthState;
use tidewatch::outbound::persistence::{DbPool, apply_pending_migrations};

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
    let config = settings
        .into_server_config()
        .map_err(|e| std::io::Error::other(format!("invalid settings: {e}")))?;

    if config.run_migrations() {
        let applied = apply_pending_migrations(config.pool().database_url().to_owned())
            .await
            .map_err(|e| std::io::Error::other(format!("database migration failed: {e}")))?;
        info!(applied, "database schema up to date");
    }

    let pool = DbPool::new(config.pool().clone())
        .await
        .map_err(|e| std::io::Error::other(format!("database pool unavailable: {e}")))?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), &config, pool)?;
    info!(bind_addr = %config.bind_addr(), "server listening");
    health_state.mark_ready();

    let result = server.await;
    health_state.mark_unhealthy();
    if let Err(e) = &result {
        error!(error = %e, "server stopped with error");
    } else {
        info!("server stopped");
    }
    result
}
