use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Errors that cross the HTTP boundary.
///
/// Upstream fetch failures never appear here; the paginator absorbs them
/// into its stopping heuristic. Only failures detected before the pagination
/// loop starts (auth, routing, validation, missing credential) reach callers.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Auth(String),

    #[error("{0}")]
    Config(String),

    #[error("{0}")]
    Validation(String),

    #[error("Invalid endpoint")]
    InvalidEndpoint,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::Config(_) => StatusCode::BAD_REQUEST,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidEndpoint => StatusCode::BAD_REQUEST,
        };

        // 400s carry a diagnostic `details` field; the 401 body is fixed.
        let body = match &self {
            AppError::Auth(msg) => json!({ "error": msg }),
            _ => json!({ "error": self.to_string(), "details": format!("{self:?}") }),
        };

        (status, Json(body)).into_response()
    }
}
