//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "code": 2003,
        "error": "DATABASE_ERROR",
        "message": "Database error occurred"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Malformed JSON body",
    content_type = "application/json",
    example = json!({
        "code": 1003,
        "error": "JSON_EXTRACTION",
        "message": "Failed to parse the request body as JSON: expected `,` or `}` at line 1 column 18"
    })
)]
pub struct BadRequestJsonResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Unprocessable Entity - Validation Error",
    content_type = "application/json",
    example = json!({
        "code": 1001,
        "error": "VALIDATION_ERROR",
        "message": "Request validation failed",
        "details": {
            "price": [{
                "code": "range",
                "message": null,
                "params": {"min": 0.0, "value": -5.0}
            }]
        }
    })
)]
pub struct ValidationErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Service Unavailable",
    content_type = "application/json",
    example = json!({
        "code": 1011,
        "error": "SERVICE_UNAVAILABLE",
        "message": "Database is not configured"
    })
)]
pub struct ServiceUnavailableResponse(pub ErrorResponse);
