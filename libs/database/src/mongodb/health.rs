use mongodb::{Client, bson::doc};

/// Result of a MongoDB health probe
#[derive(Debug, Clone)]
pub struct HealthStatus {
    pub healthy: bool,
    /// Driver error text when unhealthy
    pub message: Option<String>,
}

/// Ping the server, keeping the error text on failure.
///
/// ```ignore
/// let status = check_health_detailed(&client).await;
/// if !status.healthy {
///     tracing::warn!(error = ?status.message, "MongoDB unhealthy");
/// }
/// ```
pub async fn check_health_detailed(client: &Client) -> HealthStatus {
    let result = client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await;

    match result {
        Ok(_) => HealthStatus {
            healthy: true,
            message: None,
        },
        Err(e) => HealthStatus {
            healthy: false,
            message: Some(e.to_string()),
        },
    }
}
