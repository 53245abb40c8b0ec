use axum::{http::StatusCode, response::Response};

use super::{ErrorCode, error_response};

/// Fallback for unknown paths.
pub async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, ErrorCode::NotFound)
}

/// Fallback for known paths hit with an unsupported method.
pub async fn method_not_allowed() -> Response {
    error_response(StatusCode::METHOD_NOT_ALLOWED, ErrorCode::MethodNotAllowed)
}
