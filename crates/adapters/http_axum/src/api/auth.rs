//! JSON handlers for role authentication and creation.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use sensorlog_app::ports::{DeviceRepository, HistoryRepository, PasswordHasher, RoleRepository};
use sensorlog_domain::role::Credentials;

use crate::error::ApiError;
use crate::state::AppState;

/// Body returned by successful role operations.
#[derive(Debug, Serialize)]
pub struct RoleMessage {
    pub role: String,
    pub message: &'static str,
}

/// Possible responses from the role endpoints.
pub enum RoleResponse {
    Ok(Json<RoleMessage>),
}

impl IntoResponse for RoleResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /auth/`
pub async fn authenticate<DR, HR, RR, PH>(
    State(state): State<AppState<DR, HR, RR, PH>>,
    Json(credentials): Json<Credentials>,
) -> Result<RoleResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    HR: HistoryRepository + Send + Sync + 'static,
    RR: RoleRepository + Send + Sync + 'static,
    PH: PasswordHasher + Send + Sync + 'static,
{
    let role = state.role_service.authenticate(&credentials).await?;
    Ok(RoleResponse::Ok(Json(RoleMessage {
        role: role.role_name,
        message: "Authenticated successfully",
    })))
}

/// `POST /create-role/`
pub async fn create_role<DR, HR, RR, PH>(
    State(state): State<AppState<DR, HR, RR, PH>>,
    Json(credentials): Json<Credentials>,
) -> Result<RoleResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    HR: HistoryRepository + Send + Sync + 'static,
    RR: RoleRepository + Send + Sync + 'static,
    PH: PasswordHasher + Send + Sync + 'static,
{
    let role = state.role_service.create_role(&credentials).await?;
    Ok(RoleResponse::Ok(Json(RoleMessage {
        role: role.role_name,
        message: "Role created successfully",
    })))
}
