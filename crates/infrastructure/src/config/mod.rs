//! Application configuration
//!
//! Split into focused sub-modules:
//! - `database`: SQLite database settings
//! - `search`: proximity search and check-in geofence settings
//! - `logging`: log filter and output format

mod database;
mod logging;
mod search;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use database::{DatabaseConfig, IN_MEMORY_PATH};
pub use logging::{LogFormat, LoggingConfig};
pub use search::{CheckinConfig, SearchConfig};

/// Environment variable prefix, e.g. `WAYPOINT_DATABASE__PATH`
pub const ENV_PREFIX: &str = "WAYPOINT";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Proximity search configuration
    #[serde(default)]
    pub search: SearchConfig,

    /// Check-in configuration
    #[serde(default)]
    pub checkin: CheckinConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from an optional `config.toml` and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::from_sources(config::File::with_name("config").required(false))
    }

    /// Load configuration from a specific file, overridden by the environment
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        Self::from_sources(config::File::from(path).required(true))
    }

    fn from_sources<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let builder = config::Config::builder()
            .add_source(file)
            // Keys are nested with a double underscore so that field names
            // may contain single ones (WAYPOINT_DATABASE__MAX_CONNECTIONS)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
