use mongodb::{Client, options::ClientOptions};
use std::future::IntoFuture;
use std::time::Duration;
use tracing::{info, instrument};

use super::MongoConfig;

/// Error type for MongoDB operations
#[derive(Debug, thiserror::Error)]
pub enum MongoError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
}

async fn client_options(config: &MongoConfig) -> Result<ClientOptions, MongoError> {
    let mut options = ClientOptions::parse(&config.url).await?;

    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));

    if let Some(ref app_name) = config.app_name {
        options.app_name = Some(app_name.clone());
    }

    Ok(options)
}

/// Build a client without contacting the server.
///
/// The driver connects lazily, so the returned client is usable even while
/// MongoDB is down; operations fail until it comes back.
pub async fn client_from_config(config: &MongoConfig) -> Result<Client, MongoError> {
    let options = client_options(config).await?;
    Ok(Client::with_options(options)?)
}

/// Build a client and give the server `budget` to answer.
///
/// One attempt, no retries. On failure the caller can still fall back to
/// [`client_from_config`] and let requests fail until MongoDB is back.
///
/// ```ignore
/// use database::mongodb::{MongoConfig, connect_from_config};
///
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "storefront");
/// let client = connect_from_config(&config, Duration::from_secs(3)).await?;
/// ```
#[instrument(skip(config), fields(url = %config.redacted_url()))]
pub async fn connect_from_config(
    config: &MongoConfig,
    budget: Duration,
) -> Result<Client, MongoError> {
    info!("Connecting to MongoDB");

    let client = client_from_config(config).await?;

    match tokio::time::timeout(budget, client.list_database_names().into_future()).await {
        Ok(Ok(_)) => {}
        Ok(Err(e)) => return Err(MongoError::ConnectionFailed(e.to_string())),
        Err(_) => {
            return Err(MongoError::ConnectionFailed(format!(
                "no answer within {budget:?}"
            )));
        }
    }

    info!("Connected to MongoDB");
    Ok(client)
}
