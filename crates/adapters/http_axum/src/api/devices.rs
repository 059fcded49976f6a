//! JSON handlers for the device registry.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use sensorlog_app::ports::{DeviceRepository, HistoryRepository, PasswordHasher, RoleRepository};
use sensorlog_domain::device::{Device, DeviceSummary};
use sensorlog_domain::id::DeviceId;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating a device.
#[derive(Deserialize)]
pub struct CreateDeviceRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: String,
}

/// Request body for filtering devices by type. `types` is required.
#[derive(Deserialize)]
pub struct DevicesByTypeRequest {
    pub types: Vec<String>,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Device>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<Device>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Device>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the types endpoint.
pub enum TypesResponse {
    Ok(Json<Vec<String>>),
}

impl IntoResponse for TypesResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the by-type endpoint.
pub enum ByTypeResponse {
    Ok(Json<Vec<DeviceSummary>>),
}

impl IntoResponse for ByTypeResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /device/`
pub async fn create<DR, HR, RR, PH>(
    State(state): State<AppState<DR, HR, RR, PH>>,
    Json(req): Json<CreateDeviceRequest>,
) -> Result<CreateResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    HR: HistoryRepository + Send + Sync + 'static,
    RR: RoleRepository + Send + Sync + 'static,
    PH: PasswordHasher + Send + Sync + 'static,
{
    let device = Device::builder()
        .name(req.name)
        .device_type(req.device_type)
        .build()?;
    let created = state.device_service.create_device(device).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `GET /device`
pub async fn list<DR, HR, RR, PH>(
    State(state): State<AppState<DR, HR, RR, PH>>,
) -> Result<ListResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    HR: HistoryRepository + Send + Sync + 'static,
    RR: RoleRepository + Send + Sync + 'static,
    PH: PasswordHasher + Send + Sync + 'static,
{
    let devices = state.device_service.list_devices().await?;
    Ok(ListResponse::Ok(Json(devices)))
}

/// `GET /device/{id}`
pub async fn get<DR, HR, RR, PH>(
    State(state): State<AppState<DR, HR, RR, PH>>,
    Path(id): Path<DeviceId>,
) -> Result<GetResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    HR: HistoryRepository + Send + Sync + 'static,
    RR: RoleRepository + Send + Sync + 'static,
    PH: PasswordHasher + Send + Sync + 'static,
{
    let device = state.device_service.get_device(id).await?;
    Ok(GetResponse::Ok(Json(device)))
}

/// `GET /device-types`
pub async fn types<DR, HR, RR, PH>(
    State(state): State<AppState<DR, HR, RR, PH>>,
) -> Result<TypesResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    HR: HistoryRepository + Send + Sync + 'static,
    RR: RoleRepository + Send + Sync + 'static,
    PH: PasswordHasher + Send + Sync + 'static,
{
    let types = state.device_service.list_device_types().await?;
    Ok(TypesResponse::Ok(Json(types)))
}

/// `POST /devices-by-type/`
///
/// An empty `types` list returns every device.
pub async fn by_type<DR, HR, RR, PH>(
    State(state): State<AppState<DR, HR, RR, PH>>,
    Json(req): Json<DevicesByTypeRequest>,
) -> Result<ByTypeResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    HR: HistoryRepository + Send + Sync + 'static,
    RR: RoleRepository + Send + Sync + 'static,
    PH: PasswordHasher + Send + Sync + 'static,
{
    let devices = state.device_service.list_devices_by_type(&req.types).await?;
    Ok(ByTypeResponse::Ok(Json(devices)))
}
