//! SQLite-based check-in persistence

use std::sync::Arc;

use application::{
    error::ApplicationError,
    ports::{CheckinRepository, Page, PageRequest},
};
use async_trait::async_trait;
use domain::entities::Checkin;
use domain::value_objects::{CheckinId, Distance, PlaceId, UserId};
use rusqlite::{Row, params};
use tokio::task;
use tracing::{debug, instrument};

use super::connection::ConnectionPool;
use super::error::{conversion_error, map_db_error};
use super::sql::{parse_coordinate, parse_timestamp, timestamp};

const CHECKIN_COLUMNS: &str =
    "id, user_id, place_id, latitude, longitude, distance_meters, comment, created_at";

/// SQLite-based check-in repository
#[derive(Debug, Clone)]
pub struct SqliteCheckinRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteCheckinRepository {
    /// Create a new SQLite check-in repository
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Newest-first page of check-ins where `column = key`
    async fn list_by(
        &self,
        column: &'static str,
        key: String,
        page: PageRequest,
    ) -> Result<Page<Checkin>, ApplicationError> {
        let pool = Arc::clone(&self.pool);

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(map_db_error)?;

            let total: i64 = conn
                .query_row(
                    &format!("SELECT COUNT(*) FROM checkins WHERE {column} = ?1"),
                    [&key],
                    |row| row.get(0),
                )
                .map_err(map_db_error)?;

            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {CHECKIN_COLUMNS} FROM checkins WHERE {column} = ?1
                     ORDER BY created_at DESC, id ASC LIMIT ?2 OFFSET ?3"
                ))
                .map_err(map_db_error)?;

            let items = stmt
                .query_map(params![key, page.limit, page.offset], row_to_checkin)
                .map_err(map_db_error)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(map_db_error)?;

            debug!(total, returned = items.len(), "Listed check-ins");
            Ok(Page {
                items,
                total_count: total as u64,
            })
        })
        .await
        .map_err(map_db_error)?
    }
}

#[async_trait]
impl CheckinRepository for SqliteCheckinRepository {
    #[instrument(skip(self, checkin), fields(checkin_id = %checkin.id, place_id = %checkin.place_id))]
    async fn insert(&self, checkin: &Checkin) -> Result<(), ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let checkin = checkin.clone();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(map_db_error)?;

            conn.execute(
                "INSERT INTO checkins (
                    id, user_id, place_id, latitude, longitude, distance_meters, comment, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    checkin.id.to_string(),
                    checkin.user_id.to_string(),
                    checkin.place_id.to_string(),
                    checkin.user_location.latitude(),
                    checkin.user_location.longitude(),
                    checkin.distance.meters(),
                    checkin.comment,
                    timestamp(&checkin.created_at),
                ],
            )
            .map_err(map_db_error)?;

            debug!("Saved check-in");
            Ok(())
        })
        .await
        .map_err(map_db_error)?
    }

    #[instrument(skip(self), fields(place_id = %place_id))]
    async fn list_for_place(
        &self,
        place_id: &PlaceId,
        page: PageRequest,
    ) -> Result<Page<Checkin>, ApplicationError> {
        self.list_by("place_id", place_id.to_string(), page).await
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn list_for_user(
        &self,
        user_id: &UserId,
        page: PageRequest,
    ) -> Result<Page<Checkin>, ApplicationError> {
        self.list_by("user_id", user_id.to_string(), page).await
    }

    #[instrument(skip(self), fields(place_id = %place_id))]
    async fn count_for_place(&self, place_id: &PlaceId) -> Result<u64, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let id_str = place_id.to_string();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(map_db_error)?;

            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM checkins WHERE place_id = ?1",
                    [&id_str],
                    |row| row.get(0),
                )
                .map_err(map_db_error)?;

            Ok(count as u64)
        })
        .await
        .map_err(map_db_error)?
    }
}

fn row_to_checkin(row: &Row<'_>) -> rusqlite::Result<Checkin> {
    let id_str: String = row.get(0)?;
    let user_id_str: String = row.get(1)?;
    let place_id_str: String = row.get(2)?;
    let latitude: f64 = row.get(3)?;
    let longitude: f64 = row.get(4)?;
    let distance_meters: f64 = row.get(5)?;
    let created_at_str: String = row.get(7)?;

    Ok(Checkin {
        id: CheckinId::parse(&id_str).map_err(|e| conversion_error(0, e))?,
        user_id: UserId::parse(&user_id_str).map_err(|e| conversion_error(1, e))?,
        place_id: PlaceId::parse(&place_id_str).map_err(|e| conversion_error(2, e))?,
        user_location: parse_coordinate(3, latitude, longitude)?,
        distance: Distance::from_meters(distance_meters),
        comment: row.get(6)?,
        created_at: parse_timestamp(7, &created_at_str)?,
    })
}
