//! MediRank Web Server
//!
//! Run with: cargo run -p medirank-web
//!
//! `MEDIRANK_CONFIG` points at a YAML/JSON/TOML config file (defaults are
//! used when unset); `MEDIRANK_BIND` overrides the listen address.

use std::net::SocketAddr;

use anyhow::Context;
use medirank_common::MedirankConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn load_config() -> anyhow::Result<MedirankConfig> {
    let mut config = match std::env::var("MEDIRANK_CONFIG") {
        Ok(path) => MedirankConfig::load(&path)
            .with_context(|| format!("failed to load config from {path}"))?,
        Err(_) => {
            info!("MEDIRANK_CONFIG not set, using built-in reference table");
            MedirankConfig::default()
        }
    };
    if let Ok(bind) = std::env::var("MEDIRANK_BIND") {
        config.server.bind = bind;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,medirank=debug")),
        )
        .init();

    info!("Starting MediRank Web Server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = load_config()?;
    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("invalid bind address {:?}", config.server.bind))?;

    // Create app state
    let state = medirank_web::state::AppState::from_config(config)?;

    // Build router
    let app = medirank_web::router::build_router(state);

    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
