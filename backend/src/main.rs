//! Backend entry-point: loads settings, builds the stores and serves the API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use bookshelf::inbound::http::health::HealthState;
use bookshelf::outbound::persistence::DbPool;
use server::{AppSettings, ServerConfig, create_server};

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

    let settings = AppSettings::load().map_err(|err| eyre!("failed to load settings: {err}"))?;
    let mut config = ServerConfig::new(settings.bind_addr()?);
    if settings.in_memory {
        info!("serving from in-memory stores");
    } else {
        let pool = DbPool::new(settings.pool_config()).await?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await?;
    Ok(())
}
