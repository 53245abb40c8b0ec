//! Custom extractors for Axum handlers.

mod fields;
pub mod validated_json;

pub use validated_json::ValidatedJson;
