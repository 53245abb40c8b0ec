use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::{method_not_allowed, not_found};
use crate::http::{create_permissive_cors_layer, security_headers};
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::io;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;

/// Assembles the public router.
///
/// - `apis` is nested under `/api`
/// - `root` routes (health, diagnostics) are mounted as-is
/// - OpenAPI JSON at `/api-docs/openapi.json`, viewers at `/swagger-ui`,
///   `/redoc`, `/rapidoc` and `/scalar`
/// - JSON 404 and 405 fallbacks
/// - request tracing, security headers, permissive CORS, compression
///
/// Routers passed in must already have their state applied.
///
/// ```ignore
/// let api_routes = Router::new().nest("/products", products_router);
/// let root = Router::new().route("/", get(index)).merge(health_router(app_info!()));
/// let router = create_router::<ApiDoc>(api_routes, root);
/// ```
pub fn create_router<T>(apis: Router, root: Router) -> Router
where
    T: OpenApi + 'static,
{
    use utoipa_rapidoc::RapiDoc;
    use utoipa_redoc::{Redoc, Servable as RedocServable};
    use utoipa_scalar::{Scalar, Servable as ScalarServable};
    use utoipa_swagger_ui::SwaggerUi;

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .merge(Redoc::with_url("/redoc", T::openapi()))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
        .merge(Scalar::with_url("/scalar", T::openapi()))
        .nest("/api", apis)
        .merge(root)
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(create_permissive_cors_layer())
        .layer(CompressionLayer::new())
}

/// Serves `router` until SIGINT/SIGTERM, then runs `cleanup`.
///
/// In-flight requests drain first; `cleanup` (closing database clients and
/// the like) gets at most `shutdown_timeout`.
///
/// ```ignore
/// create_production_app(router, &config.server, Duration::from_secs(30), async move {
///     client.shutdown().await;
/// })
/// .await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let (coordinator, _rx) = ShutdownCoordinator::new();
    let shutdown_handle = coordinator.clone();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let cleanup_handle = tokio::spawn(async move {
        shutdown_handle.wait_for_signal().await;

        info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
        match tokio::time::timeout(shutdown_timeout, cleanup).await {
            Ok(_) => info!("Cleanup completed successfully"),
            Err(_) => tracing::warn!(
                "Cleanup exceeded timeout of {:?}, forcing shutdown",
                shutdown_timeout
            ),
        }
    });

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { coordinator.wait_for_signal().await })
        .await
        .inspect_err(|e| tracing::error!("Server encountered an error: {:?}", e));

    cleanup_handle.await.ok();

    serve_result
}
