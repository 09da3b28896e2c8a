//! Error types for the dashboard API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::metrics::MetricsError;
use crate::store::StoreError;

/// API error types
#[derive(Debug)]
pub enum ApiError {
    /// One or more source files are absent; every data endpoint blocks on it
    MissingInputData(String),
    /// Invalid parameter in request
    InvalidParameter(String),
    /// Invalid date or date range
    InvalidDate(String),
    /// The filtered dataset has no rows where at least one is required
    NoData,
    /// Internal server error
    InternalError(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::MissingInputData(msg) => write!(f, "Missing input data: {}", msg),
            ApiError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            ApiError::InvalidDate(msg) => write!(f, "Invalid date: {}", msg),
            ApiError::NoData => write!(f, "No data for the requested interval"),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::MissingInputData(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "MissingInputData",
                format!(
                    "Data files not found ({}). Run the generate-data binary first.",
                    msg
                ),
            ),
            ApiError::InvalidParameter(msg) => {
                (StatusCode::BAD_REQUEST, "InvalidParameter", msg.clone())
            }
            ApiError::InvalidDate(msg) => (StatusCode::BAD_REQUEST, "InvalidDate", msg.clone()),
            ApiError::NoData => (
                StatusCode::NOT_FOUND,
                "NoData",
                "No rows fall inside the requested interval".to_string(),
            ),
            ApiError::InternalError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "InternalError",
                msg.clone(),
            ),
        };

        let body = Json(json!({
            "error": error_type,
            "message": message,
        }));

        (status, body).into_response()
    }
}

// Conversions from other error types

impl From<MetricsError> for ApiError {
    fn from(err: MetricsError) -> Self {
        match err {
            MetricsError::NoData => ApiError::NoData,
            MetricsError::UnknownMetric(name) => {
                ApiError::InvalidParameter(format!("Unknown metric: {}", name))
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::MissingInput(path) => {
                ApiError::MissingInputData(path.display().to_string())
            }
            other => ApiError::InternalError(other.to_string()),
        }
    }
}

impl From<chrono::ParseError> for ApiError {
    fn from(err: chrono::ParseError) -> Self {
        ApiError::InvalidDate(format!("Date parse error: {}", err))
    }
}
