//! tinyircd - a small multi-client IRC server.
//!
//! One accept loop, one task per connection, and a single actor task that
//! owns all server state.

mod config;
mod error;
mod handlers;
mod network;
mod state;

use crate::config::Config;
use crate::handlers::Registry;
use crate::network::Gateway;
use crate::state::{Matrix, MatrixActor, ServerInfo};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load configuration
    let config_path = std::env::args().nth(1);
    let config = Config::load_or_default(config_path.as_deref()).map_err(|e| {
        error!(path = ?config_path, error = %e, "Failed to load config");
        e
    })?;

    info!(
        server = %config.server.name,
        network = %config.server.network,
        password = config.server.required_password().is_some(),
        plain_text = config.server.plain_text,
        "Starting tinyircd"
    );

    // The actor owns all state from here on.
    let matrix = Matrix::new(ServerInfo::from_config(&config));
    let events = MatrixActor::new(matrix, Registry::new()).spawn();

    let addr = config.listen.socket_addr();
    let gateway = Gateway::bind(addr, events, config.limits.clone())
        .await
        .map_err(|e| {
            error!(%addr, error = %e, "Failed to bind listener");
            e
        })?;

    tokio::select! {
        result = gateway.run() => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown requested");
        }
    }

    Ok(())
}
