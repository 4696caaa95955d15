//! Application configuration loaded from environment variables.

use std::time::Duration;

use repository::MongoConfig;

/// Runtime configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `MONGODB_URI`: MongoDB connection string; unset means in-memory repositories
/// - `MONGODB_DATABASE`: database name (default: `"tavern"`)
/// - `STORE_TIMEOUT_SECS`: per-call store timeout (default: `10`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub mongo_uri: Option<String>,
    pub mongo_database: String,
    pub store_timeout: Duration,
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            mongo_uri: lookup("MONGODB_URI").filter(|uri| !uri.is_empty()),
            mongo_database: lookup("MONGODB_DATABASE").unwrap_or(defaults.mongo_database),
            store_timeout: lookup("STORE_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.store_timeout),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
        }
    }

    /// Returns the MongoDB settings, or `None` when running in memory.
    pub fn mongo(&self) -> Option<MongoConfig> {
        self.mongo_uri.as_ref().map(|uri| {
            MongoConfig::new(uri.clone())
                .with_database(self.mongo_database.clone())
                .with_timeout(self.store_timeout)
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mongo_uri: None,
            mongo_database: "tavern".to_string(),
            store_timeout: Duration::from_secs(10),
            log_level: "info".to_string(),
        }
    }
}
