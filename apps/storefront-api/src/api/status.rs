//! Banner, connectivity probe and readiness endpoints

use axum::{extract::State, response::IntoResponse, Json};
use axum_helpers::server::{run_health_checks, HealthCheckFuture};
use database::mongodb::check_health_detailed;
use domain_storefront::DiagnosticReport;
use serde_json::{json, Value};

use crate::state::AppState;

pub async fn index() -> Json<Value> {
    Json(json!({ "message": "Beast Hustle API is running" }))
}

/// Always 200; store trouble is described in the body.
pub async fn diagnostics(State(state): State<AppState>) -> Json<DiagnosticReport> {
    Json(state.service.diagnostics(state.config.presence).await)
}

pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let mongodb: HealthCheckFuture<'_> = Box::pin(async {
        let Some(client) = state.mongo_client.as_ref() else {
            return Err("Database is not configured".to_string());
        };
        let status = check_health_detailed(client).await;
        if status.healthy {
            Ok(())
        } else {
            Err(status.message.unwrap_or_default())
        }
    });

    run_health_checks(vec![("mongodb", mongodb)]).await
}
