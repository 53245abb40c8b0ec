use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use mongodb::bson;
use thiserror::Error;
use validator::ValidationErrors;

/// Failures of the document store.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Database is not configured")]
    NotConfigured,

    #[error("Store error: {0}")]
    Store(String),

    #[error("Failed to encode document: {0}")]
    Encode(String),

    #[error("Failed to decode document: {0}")]
    Decode(String),
}

impl From<mongodb::error::Error> for PersistenceError {
    fn from(err: mongodb::error::Error) -> Self {
        PersistenceError::Store(err.to_string())
    }
}

impl From<bson::ser::Error> for PersistenceError {
    fn from(err: bson::ser::Error) -> Self {
        PersistenceError::Encode(err.to_string())
    }
}

impl From<bson::de::Error> for PersistenceError {
    fn from(err: bson::de::Error) -> Self {
        PersistenceError::Decode(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

pub type StorefrontResult<T> = Result<T, StorefrontError>;

impl From<StorefrontError> for AppError {
    fn from(err: StorefrontError) -> Self {
        match err {
            StorefrontError::Validation(errors) => AppError::ValidationError(errors),
            StorefrontError::Persistence(PersistenceError::NotConfigured) => {
                AppError::ServiceUnavailable("Database is not configured".to_string())
            }
            StorefrontError::Persistence(PersistenceError::Store(msg)) => AppError::Database(msg),
            StorefrontError::Persistence(e @ PersistenceError::Encode(_))
            | StorefrontError::Persistence(e @ PersistenceError::Decode(_)) => {
                AppError::InternalServerError(e.to_string())
            }
        }
    }
}

impl IntoResponse for StorefrontError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
