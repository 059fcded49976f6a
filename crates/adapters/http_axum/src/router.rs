//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use sensorlog_app::ports::{DeviceRepository, HistoryRepository, PasswordHasher, RoleRepository};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Serves the JSON API from the root plus a `/health` probe. Cross-origin
/// requests are accepted from any origin, with any method and header.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<DR, HR, RR, PH>(state: AppState<DR, HR, RR, PH>) -> Router
where
    DR: DeviceRepository + Send + Sync + 'static,
    HR: HistoryRepository + Send + Sync + 'static,
    RR: RoleRepository + Send + Sync + 'static,
    PH: PasswordHasher + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .merge(crate::api::routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
