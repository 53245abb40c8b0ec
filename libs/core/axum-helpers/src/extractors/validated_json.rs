//! JSON extractor with automatic validation using the validator crate.

use super::fields::decode;
use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::Validate;

/// JSON extractor that decodes the body field by field and runs `Validate`.
///
/// - Body that is not JSON, or sent without a JSON content type:
///   `AppError::JsonExtractorRejection`, keeping axum's status (400 / 415).
/// - Anything else wrong with the body: `AppError::ValidationError` (422)
///   listing every failing field. Wrong types (`"type"`) and missing required
///   fields (`"required"`) are reported alongside the constraint violations
///   of the fields that did decode.
///
/// The handler only runs with a fully valid value.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct SubscribeRequest {
///     #[validate(email)]
///     email: String,
/// }
///
/// async fn subscribe(ValidatedJson(body): ValidatedJson<SubscribeRequest>) -> StatusCode {
///     StatusCode::CREATED
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state).await?;
        let (data, mut errors) = decode::<T>(&body)?;

        // A field stood in for by `decode` is already reported; its
        // constraint result is meaningless.
        if let Err(violations) = data.validate() {
            for (field, kind) in violations.into_errors() {
                errors.errors_mut().entry(field).or_insert(kind);
            }
        }

        if !errors.is_empty() {
            return Err(errors.into());
        }
        Ok(ValidatedJson(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        routing::post,
    };
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct Signup {
        #[validate(email)]
        email: String,
        #[validate(range(min = 1))]
        seats: i64,
    }

    async fn signup(ValidatedJson(body): ValidatedJson<Signup>) -> String {
        format!("{}:{}", body.email, body.seats)
    }

    fn app() -> Router {
        Router::new().route("/", post(signup))
    }

    fn json_request(body: &str) -> HttpRequest<Body> {
        HttpRequest::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_valid_body_reaches_handler() {
        let response = app()
            .oneshot(json_request(r#"{"email":"a@b.co","seats":2}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_constraint_violations_are_all_reported() {
        let response = app()
            .oneshot(json_request(r#"{"email":"nope","seats":0}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(response).await;
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert!(body["details"].get("email").is_some());
        assert!(body["details"].get("seats").is_some());
    }

    #[tokio::test]
    async fn test_type_and_constraint_violations_are_reported_together() {
        let response = app()
            .oneshot(json_request(r#"{"email":"nope","seats":"two"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(response).await;
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert_eq!(body["details"]["email"][0]["code"], "email");
        assert_eq!(body["details"]["seats"][0]["code"], "type");
    }

    #[tokio::test]
    async fn test_missing_field_is_reported_with_constraint_violations() {
        let response = app()
            .oneshot(json_request(r#"{"seats":0}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(response).await;
        assert_eq!(body["details"]["email"][0]["code"], "required");
        assert_eq!(body["details"]["seats"][0]["code"], "range");
    }

    #[tokio::test]
    async fn test_non_object_body_is_422() {
        let response = app().oneshot(json_request("[1, 2]")).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(response).await["details"]["body"][0]["code"], "type");
    }

    #[tokio::test]
    async fn test_malformed_json_is_400() {
        let response = app().oneshot(json_request("{not json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_content_type_is_415() {
        let request = HttpRequest::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(r#"{"email":"a@b.co","seats":2}"#))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }
}
