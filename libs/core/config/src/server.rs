use crate::{env_or_default, env_parse_or, ConfigError, FromEnv};
use std::net::Ipv4Addr;

/// Port the storefront listens on when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 8000;

/// Server configuration for HTTP APIs
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn new(host: String, port: u16) -> Self {
        Self { host, port }
    }

    /// Get the server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl FromEnv for ServerConfig {
    /// - HOST: defaults to 0.0.0.0 (all interfaces)
    /// - PORT: defaults to 8000
    fn from_env() -> Result<Self, ConfigError> {
        let host = env_or_default("HOST", &Ipv4Addr::UNSPECIFIED.to_string());
        let port = env_parse_or("PORT", DEFAULT_PORT)?;

        Ok(Self { host, port })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::UNSPECIFIED.to_string(),
            port: DEFAULT_PORT,
        }
    }
}
