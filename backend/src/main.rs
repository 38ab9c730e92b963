//! Vote service entry point: loads settings, applies migrations, and serves
//! `POST /vote`.

use std::ffi::OsString;

use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use vote_backend::outbound::persistence::{DbPool, run_pending_migrations};
use vote_backend::server::{ServerConfig, ServerSettings, create_server};

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

    let settings = ServerSettings::load_from_iter(std::env::args_os().collect::<Vec<OsString>>())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let pool_config = settings.pool_config().map_err(std::io::Error::other)?;

    if settings.skip_migrations {
        info!("skipping database migrations");
    } else {
        run_pending_migrations(pool_config.database_url())
            .await
            .map_err(std::io::Error::other)?;
    }

    let pool = DbPool::new(pool_config)
        .await
        .map_err(std::io::Error::other)?;

    create_server(ServerConfig::new(bind_addr, pool))?.await
}
