//! Geospatial computation
//!
//! Pure, stateless functions shared by region search, place search and
//! check-in validation. Nothing here performs I/O or can fail on valid input.

mod bounding_box;
mod checkin_validator;
mod haversine;
mod proximity;

pub use bounding_box::{BoundingBox, LongitudeRange};
pub use checkin_validator::CheckinLocationValidator;
pub use haversine::{EARTH_RADIUS_METERS, haversine_distance};
pub use proximity::{Located, ProximityFilter};
