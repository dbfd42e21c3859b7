//! Domain layer for Waypoint
//!
//! Contains the location catalogue's entities, value objects, domain errors
//! and the pure geospatial computation (distance, bounding boxes, proximity
//! filtering and check-in geofencing) shared by every search.
//! This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod geo;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use geo::{
    BoundingBox, CheckinLocationValidator, Located, LongitudeRange, ProximityFilter,
    haversine_distance,
};
pub use value_objects::*;
