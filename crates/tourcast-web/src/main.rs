//! Tourcast Web Server
//!
//! Run with: cargo run -p tourcast-web

use std::net::SocketAddr;

use anyhow::Context;
use tourcast_config::Config;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; RUST_LOG overrides the default level
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Tourcast Web Server...");

    let config = Config::load()?;

    // Create app state
    let state = tourcast_web::state::AppState::from_config(&config)?;

    // Build router
    let app = tourcast_web::router::build_router(state);

    // Bind to port
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", config.server.host, config.server.port))?;
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
