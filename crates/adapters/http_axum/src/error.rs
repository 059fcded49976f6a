//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use sensorlog_domain::error::{CredentialError, SensorLogError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`SensorLogError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(SensorLogError);

impl From<SensorLogError> for ApiError {
    fn from(err: SensorLogError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            SensorLogError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            SensorLogError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            SensorLogError::Credential(err) => {
                let status = match err {
                    CredentialError::RoleNotFound { .. } => StatusCode::NOT_FOUND,
                    CredentialError::InvalidPassword => StatusCode::UNAUTHORIZED,
                    CredentialError::DuplicateRole { .. } => StatusCode::BAD_REQUEST,
                };
                (status, err.to_string())
            }
            SensorLogError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            SensorLogError::Hashing(err) => {
                tracing::error!(error = %err, "password hashing error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
