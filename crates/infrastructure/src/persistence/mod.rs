//! Persistence module
//!
//! SQLite-based storage for the place catalogue: regions, places and
//! check-ins.

pub mod checkin_repository;
pub mod connection;
pub mod error;
pub mod migrations;
pub mod place_repository;
pub mod region_repository;
mod sql;

pub use checkin_repository::SqliteCheckinRepository;
pub use connection::{ConnectionPool, DatabaseError, create_pool};
pub use place_repository::SqlitePlaceRepository;
pub use region_repository::SqliteRegionRepository;
