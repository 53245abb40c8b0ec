pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Body of every error response.
///
/// - `code`: integer error code for logs and dashboards (e.g. 1001)
/// - `error`: machine-readable identifier (e.g. "VALIDATION_ERROR")
/// - `message`: human-readable summary
/// - `details`: optional structured detail, such as per-field validation errors
///
/// ```json
/// {
///   "code": 1001,
///   "error": "VALIDATION_ERROR",
///   "message": "Request validation failed",
///   "details": { "price": [{ "code": "range", "message": null, "params": { "min": 0.0, "value": -1.0 } }] }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub code: i32,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application error type rendered as an [`ErrorResponse`].
///
/// Domain crates convert their own errors into this at the HTTP edge.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::JsonExtractorRejection(e) => e.status(),
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Database(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            AppError::JsonExtractorRejection(_) => ErrorCode::JsonExtraction,
            AppError::ValidationError(_) => ErrorCode::ValidationError,
            AppError::Database(_) => ErrorCode::DatabaseError,
            AppError::InternalServerError(_) => ErrorCode::InternalError,
            AppError::ServiceUnavailable(_) => ErrorCode::ServiceUnavailable,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.error_code();

        let (message, details) = match self {
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(error_code = code.code(), "JSON extraction error: {}", e);
                (e.body_text(), None)
            }
            AppError::ValidationError(e) => {
                tracing::info!(error_code = code.code(), "Validation error: {}", e);
                let details = serde_json::to_value(&e).unwrap_or(serde_json::Value::Null);
                (code.default_message().to_string(), Some(details))
            }
            AppError::Database(msg) => {
                // Driver text can carry hostnames; keep it in the logs only.
                tracing::error!(error_code = code.code(), "Database error: {}", msg);
                (code.default_message().to_string(), None)
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(error_code = code.code(), "Internal server error: {}", msg);
                (code.default_message().to_string(), None)
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!(error_code = code.code(), "Service unavailable: {}", msg);
                (msg, None)
            }
        };

        let body = Json(ErrorResponse {
            code: code.code(),
            error: code.as_str().to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Error response with the default message for `error_code`.
pub fn error_response(status: StatusCode, error_code: ErrorCode) -> Response {
    let body = Json(ErrorResponse {
        code: error_code.code(),
        error: error_code.as_str().to_string(),
        message: error_code.default_message().to_string(),
        details: None,
    });

    (status, body).into_response()
}
