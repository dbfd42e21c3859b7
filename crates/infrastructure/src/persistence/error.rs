//! Shared error mapping for the rusqlite persistence layer

use std::fmt::Display;

use application::error::ApplicationError;

/// Map a pool, SQLite or blocking-task error to an application-layer error
pub fn map_db_error(e: impl Display) -> ApplicationError {
    ApplicationError::Repository(format!("Database error: {e}"))
}

/// Wrap a column decoding failure so it surfaces as a row error
pub fn conversion_error(
    column: usize,
    e: impl Into<Box<dyn std::error::Error + Send + Sync>>,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, e.into())
}
