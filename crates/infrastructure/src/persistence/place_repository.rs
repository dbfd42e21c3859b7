//! SQLite-based place persistence

use std::sync::Arc;

use application::{
    error::ApplicationError,
    ports::{Page, PlaceQuery, PlaceRepository},
};
use async_trait::async_trait;
use domain::entities::Place;
use domain::value_objects::{DisplayName, PlaceId, PublicationStatus, RegionId, UserId};
use rusqlite::{OptionalExtension, Row, params, params_from_iter};
use tokio::task;
use tracing::{debug, instrument};

use super::connection::ConnectionPool;
use super::error::{conversion_error, map_db_error};
use super::sql::{
    SqlFilter, order_by, parse_coordinate, parse_timestamp, read_in_batches, timestamp,
};

const PLACE_COLUMNS: &str = "id, region_id, name, description, category, latitude, longitude,
    status, created_by, created_at, updated_at";

/// SQLite-based place repository
#[derive(Debug, Clone)]
pub struct SqlitePlaceRepository {
    pool: Arc<ConnectionPool>,
}

impl SqlitePlaceRepository {
    /// Create a new SQLite place repository
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlaceRepository for SqlitePlaceRepository {
    #[instrument(skip(self, place), fields(place_id = %place.id))]
    async fn insert(&self, place: &Place) -> Result<(), ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let place = place.clone();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(map_db_error)?;

            conn.execute(
                "INSERT INTO places (
                    id, region_id, name, description, category, latitude, longitude,
                    status, created_by, created_at, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                params![
                    place.id.to_string(),
                    place.region_id.map(|id| id.to_string()),
                    place.name.as_str(),
                    place.description,
                    place.category,
                    place.location.latitude(),
                    place.location.longitude(),
                    place.status.as_str(),
                    place.created_by.to_string(),
                    timestamp(&place.created_at),
                    timestamp(&place.updated_at),
                ],
            )
            .map_err(map_db_error)?;

            debug!("Saved place");
            Ok(())
        })
        .await
        .map_err(map_db_error)?
    }

    #[instrument(skip(self), fields(place_id = %id))]
    async fn get(&self, id: &PlaceId) -> Result<Option<Place>, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let id_str = id.to_string();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(map_db_error)?;

            conn.query_row(
                &format!("SELECT {PLACE_COLUMNS} FROM places WHERE id = ?1"),
                [&id_str],
                row_to_place,
            )
            .optional()
            .map_err(map_db_error)
        })
        .await
        .map_err(map_db_error)?
    }

    #[instrument(skip(self, place), fields(place_id = %place.id))]
    async fn update(&self, place: &Place) -> Result<bool, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let place = place.clone();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(map_db_error)?;

            let affected = conn
                .execute(
                    "UPDATE places SET
                        region_id = ?1, name = ?2, description = ?3, category = ?4,
                        latitude = ?5, longitude = ?6, status = ?7, updated_at = ?8
                     WHERE id = ?9",
                    params![
                        place.region_id.map(|id| id.to_string()),
                        place.name.as_str(),
                        place.description,
                        place.category,
                        place.location.latitude(),
                        place.location.longitude(),
                        place.status.as_str(),
                        timestamp(&place.updated_at),
                        place.id.to_string(),
                    ],
                )
                .map_err(map_db_error)?;

            debug!(affected, "Updated place");
            Ok(affected > 0)
        })
        .await
        .map_err(map_db_error)?
    }

    #[instrument(skip(self), fields(place_id = %id))]
    async fn delete(&self, id: &PlaceId) -> Result<bool, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let id_str = id.to_string();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(map_db_error)?;

            let affected = conn
                .execute("DELETE FROM places WHERE id = ?1", [&id_str])
                .map_err(map_db_error)?;

            debug!(affected, "Deleted place");
            Ok(affected > 0)
        })
        .await
        .map_err(map_db_error)?
    }

    #[instrument(skip(self, query), fields(sort = %query.sort, bounded = query.bounding_box.is_some()))]
    async fn find(&self, query: &PlaceQuery) -> Result<Page<Place>, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let query = query.clone();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(map_db_error)?;

            let filter = place_filter(&query);
            let where_sql = filter.where_sql();

            let total: i64 = conn
                .query_row(
                    &format!("SELECT COUNT(*) FROM places{where_sql}"),
                    params_from_iter(filter.values()),
                    |row| row.get(0),
                )
                .map_err(map_db_error)?;

            let mut values = Vec::new();
            let page_sql = filter.page_sql(query.page, &mut values);
            let sql = format!(
                "SELECT {PLACE_COLUMNS} FROM places{where_sql}{}{page_sql}",
                order_by(query.sort)
            );

            let mut stmt = conn.prepare(&sql).map_err(map_db_error)?;
            let items = stmt
                .query_map(params_from_iter(values.iter()), row_to_place)
                .map_err(map_db_error)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(map_db_error)?;

            debug!(total, returned = items.len(), "Listed places");
            Ok(Page {
                items,
                total_count: total as u64,
            })
        })
        .await
        .map_err(map_db_error)?
    }

    #[instrument(skip(self, query), fields(sort = %query.sort))]
    async fn find_all(
        &self,
        query: &PlaceQuery,
        batch_size: u32,
    ) -> Result<Vec<Place>, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let query = query.clone();

        task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(map_db_error)?;

            let filter = place_filter(&query);
            let select = format!(
                "SELECT {PLACE_COLUMNS} FROM places{}{}",
                filter.where_sql(),
                order_by(query.sort)
            );
            let places = read_in_batches(&mut conn, &select, &filter, batch_size, row_to_place)
                .map_err(map_db_error)?;

            debug!(read = places.len(), "Read place candidates");
            Ok(places)
        })
        .await
        .map_err(map_db_error)?
    }
}

/// `WHERE` clause for the query's filter and bounding box
fn place_filter(query: &PlaceQuery) -> SqlFilter {
    let mut filter = SqlFilter::default();
    if let Some(status) = query.filter.status {
        filter.eq("status", status.as_str().to_string());
    }
    if let Some(ref category) = query.filter.category {
        filter.eq("category", category.clone());
    }
    if let Some(region_id) = query.filter.region_id {
        filter.eq("region_id", region_id.to_string());
    }
    if let Some(ref keyword) = query.filter.keyword {
        filter.keyword(&["name", "description"], keyword);
    }
    if let Some(ref bbox) = query.bounding_box {
        filter.bounding_box(bbox);
    }
    filter
}

/// Convert a database row to a Place domain entity
fn row_to_place(row: &Row<'_>) -> rusqlite::Result<Place> {
    let id_str: String = row.get(0)?;
    let region_id_str: Option<String> = row.get(1)?;
    let name: String = row.get(2)?;
    let latitude: f64 = row.get(5)?;
    let longitude: f64 = row.get(6)?;
    let status_str: String = row.get(7)?;
    let created_by_str: String = row.get(8)?;
    let created_at_str: String = row.get(9)?;
    let updated_at_str: String = row.get(10)?;

    Ok(Place {
        id: PlaceId::parse(&id_str).map_err(|e| conversion_error(0, e))?,
        region_id: region_id_str
            .map(|s| RegionId::parse(&s))
            .transpose()
            .map_err(|e| conversion_error(1, e))?,
        name: DisplayName::new(name).map_err(|e| conversion_error(2, e))?,
        description: row.get(3)?,
        category: row.get(4)?,
        location: parse_coordinate(5, latitude, longitude)?,
        status: status_str
            .parse::<PublicationStatus>()
            .map_err(|e| conversion_error(7, e))?,
        created_by: UserId::parse(&created_by_str).map_err(|e| conversion_error(8, e))?,
        created_at: parse_timestamp(9, &created_at_str)?,
        updated_at: parse_timestamp(10, &updated_at_str)?,
    })
}
