#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_first_of, env_parse_or};

/// Variables consulted, in order, for the connection string.
pub const URL_ENV_KEYS: &[&str] = &["DATABASE_URL", "MONGODB_URL", "MONGO_URL"];

/// Variables consulted, in order, for the database name.
pub const DATABASE_ENV_KEYS: &[&str] = &["DATABASE_NAME", "MONGODB_DATABASE", "MONGO_DATABASE"];

const DEFAULT_MAX_POOL_SIZE: u32 = 100;
const DEFAULT_MIN_POOL_SIZE: u32 = 5;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_SERVER_SELECTION_TIMEOUT_SECS: u64 = 30;

/// MongoDB connection settings.
///
/// Built by hand in tests or loaded with `MongoConfig::from_env()` (with the
/// `config` feature).
///
/// ```ignore
/// use database::mongodb::MongoConfig;
///
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "storefront")
///     .with_app_name("storefront-api");
/// ```
#[derive(Clone, Debug)]
pub struct MongoConfig {
    /// Format: mongodb://[username:password@]host[:port][/database][?options]
    pub url: String,

    pub database: String,

    /// Reported to the server in its connection logs
    pub app_name: Option<String>,

    pub max_pool_size: u32,

    pub min_pool_size: u32,

    pub connect_timeout_secs: u64,

    pub server_selection_timeout_secs: u64,
}

impl MongoConfig {
    /// Settings for `url` using the `default` database.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_database(url, "default")
    }

    pub fn with_database(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            app_name: None,
            max_pool_size: DEFAULT_MAX_POOL_SIZE,
            min_pool_size: DEFAULT_MIN_POOL_SIZE,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            server_selection_timeout_secs: DEFAULT_SERVER_SELECTION_TIMEOUT_SECS,
        }
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    /// Shorter server selection window, for probes that must answer quickly.
    pub fn with_server_selection_timeout(mut self, secs: u64) -> Self {
        self.server_selection_timeout_secs = secs;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    /// Connection string with any `user:password@` section masked, for logs.
    pub fn redacted_url(&self) -> String {
        let Some((scheme, rest)) = self.url.split_once("://") else {
            return self.url.clone();
        };
        let authority_end = rest.find('/').unwrap_or(rest.len());
        match rest[..authority_end].rfind('@') {
            Some(at) => format!("{}://***@{}", scheme, &rest[at + 1..]),
            None => self.url.clone(),
        }
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self::new("mongodb://localhost:27017")
    }
}

/// Load MongoConfig from environment variables
///
/// - `DATABASE_URL`, `MONGODB_URL` or `MONGO_URL` (required)
/// - `DATABASE_NAME`, `MONGODB_DATABASE` or `MONGO_DATABASE` (required)
/// - `MONGODB_APP_NAME` (optional)
/// - `MONGODB_MAX_POOL_SIZE` (default: 100)
/// - `MONGODB_MIN_POOL_SIZE` (default: 5)
/// - `MONGODB_CONNECT_TIMEOUT_SECS` (default: 10)
/// - `MONGODB_SERVER_SELECTION_TIMEOUT_SECS` (default: 30)
///
/// A missing URL or name yields `ConfigError::MissingEnvVar`; callers that
/// can run without a database check `ConfigError::is_missing`.
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = env_first_of(URL_ENV_KEYS)?;
        let database = env_first_of(DATABASE_ENV_KEYS)?;

        Ok(Self {
            url,
            database,
            app_name: std::env::var("MONGODB_APP_NAME").ok(),
            max_pool_size: env_parse_or("MONGODB_MAX_POOL_SIZE", DEFAULT_MAX_POOL_SIZE)?,
            min_pool_size: env_parse_or("MONGODB_MIN_POOL_SIZE", DEFAULT_MIN_POOL_SIZE)?,
            connect_timeout_secs: env_parse_or(
                "MONGODB_CONNECT_TIMEOUT_SECS",
                DEFAULT_CONNECT_TIMEOUT_SECS,
            )?,
            server_selection_timeout_secs: env_parse_or(
                "MONGODB_SERVER_SELECTION_TIMEOUT_SECS",
                DEFAULT_SERVER_SELECTION_TIMEOUT_SECS,
            )?,
        })
    }
}
