//! Type-safe error codes for API responses.
//!
//! Each code has a client-facing string (e.g. "VALIDATION_ERROR"), an
//! integer for logs and monitoring (e.g. 1001) and a default message.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.code(), 1001);
//! assert_eq!(code.default_message(), "Request validation failed");
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request body parsed but violated field constraints
    ValidationError,

    /// JSON extraction from request body failed
    JsonExtraction,

    /// Requested resource was not found
    NotFound,

    /// HTTP method is not supported by the route
    MethodNotAllowed,

    // Server errors
    /// An unexpected internal server error occurred
    InternalError,

    /// Service is temporarily unavailable
    ServiceUnavailable,

    // Database errors (2000-2999)
    /// Database connection or query error
    DatabaseError,
}

impl ErrorCode {
    /// SCREAMING_SNAKE_CASE identifier for clients.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::DatabaseError => "DATABASE_ERROR",
        }
    }

    /// Integer code used in structured logs.
    ///
    /// - 1000-1999: client and generic server errors
    /// - 2000-2999: database errors
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::ServiceUnavailable => 1011,
            Self::MethodNotAllowed => 1012,

            Self::DatabaseError => 2003,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::JsonExtraction => "Failed to parse request body",
            Self::NotFound => "Resource not found",
            Self::MethodNotAllowed => "Method not allowed for this resource",
            Self::InternalError => "An internal server error occurred",
            Self::ServiceUnavailable => "Service is temporarily unavailable",
            Self::DatabaseError => "Database error occurred",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
