//! API routes module

pub mod status;

use axum::{routing::get, Router};
use axum_helpers::server::health_router;
use domain_storefront::handlers;

use crate::state::AppState;

/// Routes nested under `/api`
pub fn routes(state: &AppState) -> Router {
    handlers::router(state.service.clone())
}

/// Routes served at the root: banner, diagnostics, liveness and readiness
pub fn root(state: &AppState) -> Router {
    Router::new()
        .route("/", get(status::index))
        .route("/test", get(status::diagnostics))
        .route("/ready", get(status::ready))
        .with_state(state.clone())
        .merge(health_router(state.config.app))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use crate::openapi::ApiDoc;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use axum_helpers::server::create_router;
    use core_config::{app_info, server::ServerConfig};
    use domain_storefront::{ConfigPresence, StorefrontService};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app() -> Router {
        let state = AppState {
            config: Config {
                app: app_info!(),
                mongodb: None,
                server: ServerConfig::default(),
                environment: Environment::Development,
                presence: ConfigPresence::default(),
            },
            mongo_client: None,
            service: StorefrontService::unconfigured(),
        };
        create_router::<ApiDoc>(routes(&state), root(&state))
    }

    #[tokio::test]
    async fn test_catalog_without_database_is_503() {
        let response = app()
            .oneshot(Request::get("/api/products").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_validation_runs_before_store_lookup() {
        let request = Request::post("/api/subscribe")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"email": "nope"}"#))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_cors_preflight_allows_any_origin() {
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/api/orders")
            .header(header::ORIGIN, "https://shop.example.com")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();

        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }

    #[tokio::test]
    async fn test_openapi_lists_storefront_paths() {
        let response = app()
            .oneshot(
                Request::get("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let doc: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(doc["paths"].get("/api/products").is_some());
        assert!(doc["paths"].get("/api/orders").is_some());
        assert!(doc["paths"].get("/api/subscribe").is_some());
    }
}
