//! Application services - Use case implementations

mod checkin_service;
mod place_service;
mod proximity_search;
mod region_service;

pub use checkin_service::{CheckinService, CheckinServiceConfig};
pub use place_service::{NewPlace, PlaceSearch, PlaceService, PlaceUpdate};
pub use proximity_search::{ProximitySearch, ProximitySearchConfig, Ranking};
pub use region_service::{NewRegion, RegionSearch, RegionService};
