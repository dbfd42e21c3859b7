//! Database connection management
//!
//! Provides SQLite connection pooling via r2d2.

use std::path::Path;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::migrations;
use crate::config::DatabaseConfig;

/// Failures while opening or preparing the catalogue database
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Cannot create database directory {path}: {source}")]
    Directory {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// SQLite connection pool type alias
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Open the pool described by `config`, migrating the schema if asked to
pub fn create_pool(config: &DatabaseConfig) -> Result<ConnectionPool, DatabaseError> {
    let (manager, max_size) = connection_manager(config)?;
    info!(path = %config.path, max_size, "Opening catalogue database");

    let pool = Pool::builder()
        .max_size(max_size)
        .build(manager.with_init(initialize_connection))?;

    if config.run_migrations {
        let conn = pool.get()?;
        migrations::run_migrations(&conn)?;
    }

    debug!("Database pool ready");
    Ok(pool)
}

/// Manager and pool size for the configured location
///
/// Every `:memory:` connection is a separate database, so in-memory pools
/// hold exactly one connection.
fn connection_manager(
    config: &DatabaseConfig,
) -> Result<(SqliteConnectionManager, u32), DatabaseError> {
    if config.is_in_memory() {
        if config.max_connections > 1 {
            warn!(
                max_connections = config.max_connections,
                "In-memory database uses a single connection"
            );
        }
        return Ok((SqliteConnectionManager::memory(), 1));
    }

    let path = Path::new(&config.path);
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|source| DatabaseError::Directory {
            path: dir.display().to_string(),
            source,
        })?;
    }

    Ok((
        SqliteConnectionManager::file(path),
        config.max_connections.max(1),
    ))
}

/// Pragmas applied to every new connection
fn initialize_connection(conn: &mut Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "
        PRAGMA foreign_keys = ON;
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = 5000;
        ",
    )
}
