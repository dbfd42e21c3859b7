//! Domain entities - Objects with identity and lifecycle

mod checkin;
mod place;
mod region;

pub use checkin::Checkin;
pub use place::Place;
pub use region::Region;
