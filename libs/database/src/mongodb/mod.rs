//! MongoDB connection management and health probes.

mod config;
mod connector;
mod health;

pub use config::{DATABASE_ENV_KEYS, MongoConfig, URL_ENV_KEYS};
pub use connector::{MongoError, client_from_config, connect_from_config};
pub use health::{HealthStatus, check_health_detailed};

pub use mongodb::{Client, Collection, Database};
