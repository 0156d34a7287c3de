//! `FridgeLedger` - household refrigerator inventory tracker
//!
//! Serves the item list, registration forms and shopping list over HTTP.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

use anyhow::Context;
use fridgeledger::{AppState, build_router};
use fridgeledger_core::{Config, DatabaseBackend, FridgeService, connect};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fridgeledger=debug,fridgeledger_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting FridgeLedger");

    let config = Config::from_env().context("invalid configuration")?;
    match &config.database {
        DatabaseBackend::Sqlite { path } => info!("Using SQLite database {}", path.display()),
        DatabaseBackend::Postgres { .. } => info!("Using PostgreSQL database (production)"),
    }

    let store = connect(&config.database, config.max_connections)
        .await
        .context("failed to open database")?;
    let service = FridgeService::new(store, config.fridge_id);
    service
        .bootstrap()
        .await
        .context("failed to seed default category")?;

    let app = build_router(AppState::new(service));

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!("Listening on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server failed")?;

    info!("FridgeLedger stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
