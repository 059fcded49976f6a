//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod auth;
#[allow(clippy::missing_errors_doc)]
pub mod devices;
#[allow(clippy::missing_errors_doc)]
pub mod history;

use axum::Router;
use axum::routing::{get, post};

use sensorlog_app::ports::{DeviceRepository, HistoryRepository, PasswordHasher, RoleRepository};

use crate::state::AppState;

/// Build the API router. Paths are served from the root.
pub fn routes<DR, HR, RR, PH>() -> Router<AppState<DR, HR, RR, PH>>
where
    DR: DeviceRepository + Send + Sync + 'static,
    HR: HistoryRepository + Send + Sync + 'static,
    RR: RoleRepository + Send + Sync + 'static,
    PH: PasswordHasher + Send + Sync + 'static,
{
    Router::new()
        // Devices
        .route("/device/", post(devices::create::<DR, HR, RR, PH>))
        .route("/device", get(devices::list::<DR, HR, RR, PH>))
        .route("/device/{id}", get(devices::get::<DR, HR, RR, PH>))
        .route("/device-types", get(devices::types::<DR, HR, RR, PH>))
        .route(
            "/devices-by-type/",
            post(devices::by_type::<DR, HR, RR, PH>),
        )
        // History
        .route("/hist/", post(history::query::<DR, HR, RR, PH>))
        .route("/recent-hist/", get(history::recent::<DR, HR, RR, PH>))
        .route("/reading/", post(history::record::<DR, HR, RR, PH>))
        .route(
            "/device/{id}/hist",
            get(history::for_device::<DR, HR, RR, PH>),
        )
        // Roles
        .route("/auth/", post(auth::authenticate::<DR, HR, RR, PH>))
        .route("/create-role/", post(auth::create_role::<DR, HR, RR, PH>))
}
