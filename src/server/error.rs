use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Error type for the JSON API surface
///
/// The landing page does not use this: it degrades to an inline error
/// message instead of an error status.
#[derive(Error, Debug)]
pub enum AppError {
    /// Unknown regulation id
    #[error("not found: {0}")]
    NotFound(String),

    /// Request validation failed
    #[error("validation error: {0}")]
    Validation(String),

    /// The text-generation service failed
    #[error("upstream error: {0}")]
    Upstream(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
        };
        let body = serde_json::json!({
            "error": {
                "code": status.as_u16(),
                "message": self.to_string(),
            }
        });
        (status, axum::Json(body)).into_response()
    }
}
