//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod candidate_source;
mod checkin_repository;
mod pagination;
mod place_repository;
mod query;
mod region_repository;

pub use candidate_source::{CandidateRequest, CandidateSource};
#[cfg(test)]
pub use checkin_repository::MockCheckinRepository;
pub use checkin_repository::CheckinRepository;
pub use pagination::{Page, PageRequest};
#[cfg(test)]
pub use place_repository::MockPlaceRepository;
pub use place_repository::{PlaceFilter, PlaceQuery, PlaceRepository};
pub use query::{RepositoryQuery, SortOrder};
#[cfg(test)]
pub use region_repository::MockRegionRepository;
pub use region_repository::{RegionFilter, RegionQuery, RegionRepository};
