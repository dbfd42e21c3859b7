//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer.
//! Contains the SQLite repositories, configuration loading, logging
//! initialisation and service wiring.

pub mod config;
pub mod context;
pub mod persistence;
pub mod telemetry;

pub use config::{
    AppConfig, CheckinConfig, DatabaseConfig, LogFormat, LoggingConfig, SearchConfig,
};
pub use context::{AppContext, SqliteCheckinService, SqlitePlaceService, SqliteRegionService};
pub use persistence::{
    ConnectionPool, DatabaseError, SqliteCheckinRepository, SqlitePlaceRepository,
    SqliteRegionRepository, create_pool,
};
pub use telemetry::{LoggingError, init_logging};
