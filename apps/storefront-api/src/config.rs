//! Configuration for Storefront API

use core_config::{app_info, server::ServerConfig, AppInfo, FromEnv};
use database::mongodb::{MongoConfig, DATABASE_ENV_KEYS, URL_ENV_KEYS};
use domain_storefront::ConfigPresence;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    /// `None` when no connection string or database name is set
    pub mongodb: Option<MongoConfig>,
    pub server: ServerConfig,
    pub environment: Environment,
    pub presence: ConfigPresence,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;

        let mongodb = match MongoConfig::from_env() {
            Ok(mongodb) if mongodb.app_name.is_none() => {
                Some(mongodb.with_app_name(env!("CARGO_PKG_NAME")))
            }
            Ok(mongodb) => Some(mongodb),
            // Reported once tracing is up; see `AppState::build`.
            Err(e) if e.is_missing() => None,
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            environment,
            presence: ConfigPresence {
                database_url: any_set(URL_ENV_KEYS),
                database_name: any_set(DATABASE_ENV_KEYS),
            },
        })
    }
}

fn any_set(keys: &[&str]) -> bool {
    keys.iter().any(|key| std::env::var_os(key).is_some())
}
