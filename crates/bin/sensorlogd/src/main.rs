//! # sensorlogd: sensorlog daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Install the `tracing` subscriber
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct repository implementations (adapters)
//! - Construct application services, injecting repositories via port traits
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use sensorlog_adapter_http_axum::state::AppState;
use sensorlog_adapter_password_argon2::Argon2Hasher;
use sensorlog_adapter_storage_sqlite_sqlx::{
    SqliteDeviceRepository, SqliteHistoryRepository, SqliteRoleRepository,
};
use sensorlog_app::services::device_service::DeviceService;
use sensorlog_app::services::history_service::HistoryService;
use sensorlog_app::services::role_service::RoleService;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.log.filter).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Database
    let db = sensorlog_adapter_storage_sqlite_sqlx::Config {
        database_url: config.storage.database_url.clone(),
    }
    .build()
    .await?;
    let pool = db.pool().clone();

    // Repositories
    let device_repo = SqliteDeviceRepository::new(pool.clone());
    let history_repo = SqliteHistoryRepository::new(pool.clone());
    let role_repo = SqliteRoleRepository::new(pool.clone());

    // Services
    let device_service = DeviceService::new(device_repo);
    let history_service = HistoryService::new(history_repo, SqliteDeviceRepository::new(pool));
    let role_service = RoleService::new(role_repo, Argon2Hasher::new());

    // HTTP
    let state = AppState::new(device_service, history_service, role_service);
    let app = sensorlog_adapter_http_axum::router::build(state);

    let listener = tokio::net::TcpListener::bind(config.http.bind).await?;
    tracing::info!(address = %config.http.bind, "sensorlogd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("sensorlogd stopped");
    Ok(())
}

/// Resolve on the first of SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
