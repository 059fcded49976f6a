//! JSON handlers for the history log.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use sensorlog_app::ports::{DeviceRepository, HistoryRepository, PasswordHasher, RoleRepository};
use sensorlog_domain::error::SensorLogError;
use sensorlog_domain::history::{HistoryFilter, HistoryRecord, NewReading, RecentReading};
use sensorlog_domain::id::DeviceId;
use sensorlog_domain::time::{Timestamp, parse_timestamp};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for the filtered history query.
///
/// `id_device` is required; an empty list matches every device. Empty or
/// missing dates leave that side of the range open.
#[derive(Deserialize)]
pub struct HistRequest {
    pub id_device: Vec<DeviceId>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Request body for appending a reading.
#[derive(Deserialize)]
pub struct RecordReadingRequest {
    pub id_device: DeviceId,
    pub value: f64,
    pub date_time: Option<String>,
}

/// Query parameters accepted by the recent-history feed.
#[derive(Deserialize)]
pub struct RecentParams {
    pub limit: Option<usize>,
}

/// Possible responses from the history query endpoints.
pub enum HistoryResponse {
    Ok(Json<Vec<HistoryRecord>>),
}

impl IntoResponse for HistoryResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the recent-history endpoint.
pub enum RecentResponse {
    Ok(Json<Vec<RecentReading>>),
}

impl IntoResponse for RecentResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the record endpoint.
pub enum RecordResponse {
    Created(Json<HistoryRecord>),
}

impl IntoResponse for RecordResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

fn parse_optional(value: Option<&str>) -> Result<Option<Timestamp>, SensorLogError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => Ok(Some(parse_timestamp(raw)?)),
    }
}

/// `POST /hist/`
pub async fn query<DR, HR, RR, PH>(
    State(state): State<AppState<DR, HR, RR, PH>>,
    Json(req): Json<HistRequest>,
) -> Result<HistoryResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    HR: HistoryRepository + Send + Sync + 'static,
    RR: RoleRepository + Send + Sync + 'static,
    PH: PasswordHasher + Send + Sync + 'static,
{
    let filter = HistoryFilter {
        device_ids: req.id_device,
        start: parse_optional(req.start_date.as_deref())?,
        end: parse_optional(req.end_date.as_deref())?,
    };
    let records = state.history_service.query_history(&filter).await?;
    Ok(HistoryResponse::Ok(Json(records)))
}

/// `GET /recent-hist/?limit=N`
pub async fn recent<DR, HR, RR, PH>(
    State(state): State<AppState<DR, HR, RR, PH>>,
    Query(params): Query<RecentParams>,
) -> Result<RecentResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    HR: HistoryRepository + Send + Sync + 'static,
    RR: RoleRepository + Send + Sync + 'static,
    PH: PasswordHasher + Send + Sync + 'static,
{
    let readings = state.history_service.recent_history(params.limit).await?;
    Ok(RecentResponse::Ok(Json(readings)))
}

/// `POST /reading/`
pub async fn record<DR, HR, RR, PH>(
    State(state): State<AppState<DR, HR, RR, PH>>,
    Json(req): Json<RecordReadingRequest>,
) -> Result<RecordResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    HR: HistoryRepository + Send + Sync + 'static,
    RR: RoleRepository + Send + Sync + 'static,
    PH: PasswordHasher + Send + Sync + 'static,
{
    let reading = NewReading::builder(req.id_device, req.value)
        .maybe_timestamp(parse_optional(req.date_time.as_deref())?)
        .build();
    let record = state.history_service.record_reading(reading).await?;
    Ok(RecordResponse::Created(Json(record)))
}

/// `GET /device/{id}/hist`
pub async fn for_device<DR, HR, RR, PH>(
    State(state): State<AppState<DR, HR, RR, PH>>,
    Path(id): Path<DeviceId>,
) -> Result<HistoryResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    HR: HistoryRepository + Send + Sync + 'static,
    RR: RoleRepository + Send + Sync + 'static,
    PH: PasswordHasher + Send + Sync + 'static,
{
    let records = state.history_service.device_history(id).await?;
    Ok(HistoryResponse::Ok(Json(records)))
}
