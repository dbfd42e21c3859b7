//! Value Objects - Immutable, identity-less domain primitives

mod checkin_distance;
mod checkin_id;
mod coordinate;
mod display_name;
mod distance;
mod place_id;
mod publication_status;
mod region_id;
mod search_radius;
mod user_id;

pub use checkin_distance::MaxCheckinDistance;
pub use checkin_id::CheckinId;
pub use coordinate::Coordinate;
pub use display_name::DisplayName;
pub use distance::Distance;
pub use place_id::PlaceId;
pub use publication_status::PublicationStatus;
pub use region_id::RegionId;
pub use search_radius::SearchRadius;
pub use user_id::UserId;
