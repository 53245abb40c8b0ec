//! Application state management

use database::mongodb::{client_from_config, connect_from_config};
use domain_storefront::{seed, MongoDocumentStore, StorefrontService};
use mongodb::Client;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::Config;

/// How long startup waits for MongoDB to answer before serving anyway.
const CONNECT_BUDGET: Duration = Duration::from_secs(3);

/// Upper bound on the demo seed at startup.
const SEED_BUDGET: Duration = Duration::from_secs(5);

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// `None` when the database is not configured
    pub mongo_client: Option<Client>,
    pub service: StorefrontService<MongoDocumentStore>,
}

impl AppState {
    /// Connect to MongoDB when configured and seed the demo product.
    ///
    /// An unreachable store does not hold startup back: the client connects
    /// lazily and requests fail until MongoDB answers.
    pub async fn build(config: Config) -> eyre::Result<Self> {
        let (mongo_client, service) = match &config.mongodb {
            Some(mongodb) => {
                info!("Connecting to MongoDB at {}", mongodb.redacted_url());

                let client = match connect_from_config(mongodb, CONNECT_BUDGET).await {
                    Ok(client) => client,
                    Err(e) => {
                        warn!(error = %e, "MongoDB unreachable, continuing with a lazy client");
                        client_from_config(mongodb).await?
                    }
                };

                let db = client.database(mongodb.database());
                let service = StorefrontService::new(MongoDocumentStore::new(&db));
                (Some(client), service)
            }
            None => {
                warn!(
                    database_url = config.presence.database_url,
                    database_name = config.presence.database_name,
                    "DATABASE_URL or DATABASE_NAME not set; starting without a database"
                );
                (None, StorefrontService::unconfigured())
            }
        };

        seed::run_startup_seed(&service, SEED_BUDGET).await;

        Ok(Self {
            config,
            mongo_client,
            service,
        })
    }
}

/// Close the MongoDB pool.
///
/// Waits for open cursors and sessions to be released first.
pub async fn close_store(client: Option<Client>) {
    let Some(client) = client else {
        return;
    };

    info!("Shutting down: closing MongoDB connections");
    client.shutdown().await;
    info!("MongoDB connection closed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;
    use core_config::{app_info, server::ServerConfig};
    use database::mongodb::MongoConfig;
    use domain_storefront::ConfigPresence;
    use std::time::Instant;

    fn config(mongodb: Option<MongoConfig>) -> Config {
        let presence = ConfigPresence {
            database_url: mongodb.is_some(),
            database_name: mongodb.is_some(),
        };
        Config {
            app: app_info!(),
            mongodb,
            server: ServerConfig::default(),
            environment: Environment::Development,
            presence,
        }
    }

    #[tokio::test]
    async fn test_build_without_database() {
        let state = AppState::build(config(None)).await.unwrap();

        assert!(state.mongo_client.is_none());
        assert!(!state.service.is_configured());
    }

    #[tokio::test]
    async fn test_build_with_unreachable_database_does_not_stall() {
        // Default 30s server selection; startup must not wait it out.
        let mongodb = MongoConfig::with_database("mongodb://127.0.0.1:1", "beast_hustle");

        let started = Instant::now();
        let state = AppState::build(config(Some(mongodb))).await.unwrap();

        assert!(started.elapsed() < CONNECT_BUDGET + SEED_BUDGET + Duration::from_secs(5));
        assert!(state.mongo_client.is_some());
        assert!(state.service.is_configured());
    }

    #[tokio::test]
    async fn test_close_store_shuts_client_down() {
        let mongodb = MongoConfig::new("mongodb://127.0.0.1:1");
        let client = client_from_config(&mongodb).await.unwrap();

        let closed = tokio::time::timeout(Duration::from_secs(5), close_store(Some(client))).await;
        assert!(closed.is_ok());

        close_store(None).await;
    }
}
