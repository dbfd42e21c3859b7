//! SQLite-based region persistence

use std::sync::Arc;

use application::{
    error::ApplicationError,
    ports::{Page, RegionQuery, RegionRepository},
};
use async_trait::async_trait;
use domain::entities::Region;
use domain::value_objects::{DisplayName, PublicationStatus, RegionId};
use rusqlite::{OptionalExtension, Row, params, params_from_iter};
use tokio::task;
use tracing::{debug, instrument};

use super::connection::ConnectionPool;
use super::error::{conversion_error, map_db_error};
use super::sql::{
    SqlFilter, order_by, parse_coordinate, parse_timestamp, read_in_batches, timestamp,
};

const REGION_COLUMNS: &str =
    "id, name, description, latitude, longitude, status, created_at, updated_at";

/// SQLite-based region repository
#[derive(Debug, Clone)]
pub struct SqliteRegionRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteRegionRepository {
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegionRepository for SqliteRegionRepository {
    #[instrument(skip(self, region), fields(region_id = %region.id))]
    async fn insert(&self, region: &Region) -> Result<(), ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let region = region.clone();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(map_db_error)?;

            conn.execute(
                "INSERT INTO regions (
                    id, name, description, latitude, longitude, status, created_at, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    region.id.to_string(),
                    region.name.as_str(),
                    region.description,
                    region.location.latitude(),
                    region.location.longitude(),
                    region.status.as_str(),
                    timestamp(&region.created_at),
                    timestamp(&region.updated_at),
                ],
            )
            .map_err(map_db_error)?;

            debug!("Saved region");
            Ok(())
        })
        .await
        .map_err(map_db_error)?
    }

    #[instrument(skip(self), fields(region_id = %id))]
    async fn get(&self, id: &RegionId) -> Result<Option<Region>, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let id_str = id.to_string();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(map_db_error)?;

            conn.query_row(
                &format!("SELECT {REGION_COLUMNS} FROM regions WHERE id = ?1"),
                [&id_str],
                row_to_region,
            )
            .optional()
            .map_err(map_db_error)
        })
        .await
        .map_err(map_db_error)?
    }

    #[instrument(skip(self), fields(region_id = %id))]
    async fn delete(&self, id: &RegionId) -> Result<bool, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let id_str = id.to_string();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(map_db_error)?;

            let affected = conn
                .execute("DELETE FROM regions WHERE id = ?1", [&id_str])
                .map_err(map_db_error)?;

            debug!(affected, "Deleted region");
            Ok(affected > 0)
        })
        .await
        .map_err(map_db_error)?
    }

    #[instrument(skip(self, query), fields(sort = %query.sort, bounded = query.bounding_box.is_some()))]
    async fn find(&self, query: &RegionQuery) -> Result<Page<Region>, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let query = query.clone();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(map_db_error)?;

            let filter = region_filter(&query);
            let where_sql = filter.where_sql();

            let total: i64 = conn
                .query_row(
                    &format!("SELECT COUNT(*) FROM regions{where_sql}"),
                    params_from_iter(filter.values()),
                    |row| row.get(0),
                )
                .map_err(map_db_error)?;

            let mut values = Vec::new();
            let page_sql = filter.page_sql(query.page, &mut values);
            let sql = format!(
                "SELECT {REGION_COLUMNS} FROM regions{where_sql}{}{page_sql}",
                order_by(query.sort)
            );

            let mut stmt = conn.prepare(&sql).map_err(map_db_error)?;
            let items = stmt
                .query_map(params_from_iter(values.iter()), row_to_region)
                .map_err(map_db_error)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(map_db_error)?;

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
        query: &RegionQuery,
        batch_size: u32,
    ) -> Result<Vec<Region>, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let query = query.clone();

        task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(map_db_error)?;

            let filter = region_filter(&query);
            let select = format!(
                "SELECT {REGION_COLUMNS} FROM regions{}{}",
                filter.where_sql(),
                order_by(query.sort)
            );
            let regions = read_in_batches(&mut conn, &select, &filter, batch_size, row_to_region)
                .map_err(map_db_error)?;

            debug!(read = regions.len(), "Read region candidates");
            Ok(regions)
        })
        .await
        .map_err(map_db_error)?
    }
}

fn region_filter(query: &RegionQuery) -> SqlFilter {
    let mut filter = SqlFilter::default();
    if let Some(status) = query.filter.status {
        filter.eq("status", status.as_str().to_string());
    }
    if let Some(ref keyword) = query.filter.keyword {
        filter.keyword(&["name", "description"], keyword);
    }
    if let Some(ref bbox) = query.bounding_box {
        filter.bounding_box(bbox);
    }
    filter
}

fn row_to_region(row: &Row<'_>) -> rusqlite::Result<Region> {
    let id_str: String = row.get(0)?;
    let name: String = row.get(1)?;
    let latitude: f64 = row.get(3)?;
    let longitude: f64 = row.get(4)?;
    let status_str: String = row.get(5)?;
    let created_at_str: String = row.get(6)?;
    let updated_at_str: String = row.get(7)?;

    Ok(Region {
        id: RegionId::parse(&id_str).map_err(|e| conversion_error(0, e))?,
        name: DisplayName::new(name).map_err(|e| conversion_error(1, e))?,
        description: row.get(2)?,
        location: parse_coordinate(3, latitude, longitude)?,
        status: status_str
            .parse::<PublicationStatus>()
            .map_err(|e| conversion_error(5, e))?,
        created_at: parse_timestamp(6, &created_at_str)?,
        updated_at: parse_timestamp(7, &updated_at_str)?,
    })
}
