//! # Axum Helpers
//!
//! Shared building blocks for the workspace's Axum services.
//!
//! - **[`server`]**: router assembly with OpenAPI viewers, health checks, graceful shutdown
//! - **[`http`]**: CORS and security-header middleware
//! - **[`errors`]**: [`AppError`] and the JSON error envelope
//! - **[`extractors`]**: [`ValidatedJson`]
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//!
//! let router = create_router::<ApiDoc>(api_routes, health_router(app_info!()));
//! create_production_app(router, &config.server, Duration::from_secs(30), async {}).await?;
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app,
    create_router, health_router, run_health_checks, shutdown_signal,
};

pub use http::{create_permissive_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::ValidatedJson;
