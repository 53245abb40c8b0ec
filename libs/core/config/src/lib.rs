pub mod server;
pub mod tracing;

use std::env;
use thiserror::Error;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable '{0}' is required but not set")]
    MissingEnvVar(String),

    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },
}

impl ConfigError {
    /// True when the error only reports an absent variable.
    ///
    /// Services that can start in a degraded mode use this to tell
    /// "not configured" apart from "configured wrong".
    pub fn is_missing(&self) -> bool {
        matches!(self, ConfigError::MissingEnvVar(_))
    }
}

/// Application environment
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn from_env() -> Self {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        if app_env.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// Static name and version of the running binary, reported by `/health`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppInfo {
    pub name: &'static str,
    pub version: &'static str,
}

/// Builds an [`AppInfo`] from the calling crate's Cargo metadata.
#[macro_export]
macro_rules! app_info {
    () => {
        $crate::AppInfo {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    };
}

/// Trait for configuration that can be loaded from environment variables
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

/// Helper to load and parse environment variable with a default value
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Reads the first variable in `keys` that is set.
///
/// The error names every key so operators see all accepted spellings.
pub fn env_first_of(keys: &[&str]) -> Result<String, ConfigError> {
    keys.iter()
        .find_map(|key| env::var(key).ok())
        .ok_or_else(|| ConfigError::MissingEnvVar(keys.join(" or ")))
}

/// Parses an optional variable, falling back to `default` when unset.
pub fn env_parse_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.parse().map_err(|e: T::Err| ConfigError::ParseError {
            key: key.to_string(),
            details: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_defaults_to_development() {
        temp_env::with_var_unset("APP_ENV", || {
            let env = Environment::from_env();
            assert_eq!(env, Environment::Development);
            assert!(!env.is_production());
        });
    }

    #[test]
    fn test_environment_production_case_insensitive() {
        for value in ["production", "PRODUCTION", "Production"] {
            temp_env::with_var("APP_ENV", Some(value), || {
                assert_eq!(Environment::from_env(), Environment::Production);
            });
        }
    }

    #[test]
    fn test_environment_unknown_defaults_to_development() {
        temp_env::with_var("APP_ENV", Some("staging"), || {
            assert_eq!(Environment::from_env(), Environment::Development);
        });
    }

    #[test]
    fn test_app_info_uses_crate_metadata() {
        let info = app_info!();
        assert_eq!(info.name, "core_config");
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_env_or_default() {
        temp_env::with_var("TEST_VAR", Some("test_value"), || {
            assert_eq!(env_or_default("TEST_VAR", "default"), "test_value");
        });
        temp_env::with_var_unset("MISSING_VAR", || {
            assert_eq!(env_or_default("MISSING_VAR", "default_value"), "default_value");
        });
    }

    #[test]
    fn test_env_first_of_prefers_earlier_keys() {
        temp_env::with_vars(
            [("PRIMARY_KEY", Some("primary")), ("FALLBACK_KEY", Some("fallback"))],
            || {
                let value = env_first_of(&["PRIMARY_KEY", "FALLBACK_KEY"]).unwrap();
                assert_eq!(value, "primary");
            },
        );
    }

    #[test]
    fn test_env_first_of_falls_back() {
        temp_env::with_vars(
            [("PRIMARY_KEY", None), ("FALLBACK_KEY", Some("fallback"))],
            || {
                let value = env_first_of(&["PRIMARY_KEY", "FALLBACK_KEY"]).unwrap();
                assert_eq!(value, "fallback");
            },
        );
    }

    #[test]
    fn test_env_first_of_names_all_keys() {
        temp_env::with_vars_unset(["PRIMARY_KEY", "FALLBACK_KEY"], || {
            let err = env_first_of(&["PRIMARY_KEY", "FALLBACK_KEY"]).unwrap_err();
            assert!(err.is_missing());
            assert!(err.to_string().contains("PRIMARY_KEY or FALLBACK_KEY"));
        });
    }

    #[test]
    fn test_env_parse_or() {
        temp_env::with_var_unset("POOL_SIZE", || {
            assert_eq!(env_parse_or("POOL_SIZE", 7u32).unwrap(), 7);
        });
        temp_env::with_var("POOL_SIZE", Some("12"), || {
            assert_eq!(env_parse_or("POOL_SIZE", 7u32).unwrap(), 12);
        });
        temp_env::with_var("POOL_SIZE", Some("lots"), || {
            let err = env_parse_or("POOL_SIZE", 7u32).unwrap_err();
            assert!(!err.is_missing());
            assert!(err.to_string().contains("POOL_SIZE"));
        });
    }
}
