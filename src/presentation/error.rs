// API error type and its HTTP mapping
use crate::domain::error::ChartError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Input was well-formed JSON but cannot be charted
    #[error("Chart error: {0}")]
    Chart(#[from] ChartError),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensor_id: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, sensor_id) = match &self {
            ApiError::Chart(e @ ChartError::InvalidTimestamp { .. }) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "INVALID_TIMESTAMP",
                Some(e.sensor_id().to_string()),
            ),
            ApiError::Chart(e @ ChartError::InvalidColor { .. }) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "INVALID_COLOR",
                Some(e.sensor_id().to_string()),
            ),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", None),
        };

        tracing::warn!(error_code = %code, error_message = %self, "API error");

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
                sensor_id,
            },
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
