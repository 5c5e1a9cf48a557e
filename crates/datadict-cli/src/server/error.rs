//! API error types and handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use datadict::DictError;
use serde::Serialize;

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Error from the datadict library.
    Dict(DictError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::Dict(e @ DictError::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, "not_found", e.to_string())
            }
            ApiError::Dict(e) => (StatusCode::INTERNAL_SERVER_ERROR, "datadict_error", e.to_string()),
        };

        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

impl From<DictError> for ApiError {
    fn from(err: DictError) -> Self {
        ApiError::Dict(err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Dict(e) => write!(f, "Datadict error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let missing = ApiError::NotFound("orders".to_string()).into_response();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let config = ApiError::from(DictError::Config("bad".to_string())).into_response();
        assert_eq!(config.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
