//! Service wiring
//!
//! Builds the connection pool, the SQLite repositories and the application
//! services from an [`AppConfig`].

use std::sync::Arc;

use application::{
    ApplicationError, CheckinService, CheckinServiceConfig, PlaceService, ProximitySearch,
    ProximitySearchConfig, RegionService,
};
use tracing::info;

use crate::config::AppConfig;
use crate::persistence::{
    ConnectionPool, SqliteCheckinRepository, SqlitePlaceRepository, SqliteRegionRepository,
    create_pool,
};

/// Place service over SQLite
pub type SqlitePlaceService = PlaceService<SqlitePlaceRepository>;
/// Region service over SQLite
pub type SqliteRegionService = RegionService<SqliteRegionRepository>;
/// Check-in service over SQLite
pub type SqliteCheckinService = CheckinService<SqlitePlaceRepository, SqliteCheckinRepository>;

/// Fully wired services sharing one connection pool
#[derive(Debug, Clone)]
pub struct AppContext {
    pub pool: Arc<ConnectionPool>,
    pub places: SqlitePlaceService,
    pub regions: SqliteRegionService,
    pub checkins: SqliteCheckinService,
}

impl AppContext {
    /// Wire everything from configuration
    ///
    /// # Errors
    ///
    /// `ApplicationError::Configuration` if the check-in distance is out of
    /// range, `ApplicationError::Repository` if the database cannot be opened
    /// or migrated.
    pub fn build(config: &AppConfig) -> Result<Self, ApplicationError> {
        let max_distance = config
            .checkin
            .max_distance()
            .map_err(|e| ApplicationError::Configuration(format!("checkin.max_distance_meters: {e}")))?;

        let pool = Arc::new(
            create_pool(&config.database)
                .map_err(|e| ApplicationError::Repository(e.to_string()))?,
        );

        let place_repository = Arc::new(SqlitePlaceRepository::new(Arc::clone(&pool)));
        let region_repository = Arc::new(SqliteRegionRepository::new(Arc::clone(&pool)));
        let checkin_repository = Arc::new(SqliteCheckinRepository::new(Arc::clone(&pool)));

        let proximity_search = ProximitySearch::new(ProximitySearchConfig {
            candidate_batch_size: config.search.candidate_batch_size,
        });

        info!(
            database = %config.database.path,
            candidate_batch_size = config.search.candidate_batch_size,
            max_checkin_distance_m = max_distance.meters(),
            "Services initialized"
        );

        Ok(Self {
            places: PlaceService::new(Arc::clone(&place_repository), proximity_search.clone()),
            regions: RegionService::new(region_repository, proximity_search),
            checkins: CheckinService::new(
                place_repository,
                checkin_repository,
                CheckinServiceConfig { max_distance },
            ),
            pool,
        })
    }
}
