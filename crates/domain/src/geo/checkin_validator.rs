//! Geofence check for check-in creation

use super::haversine_distance;
use crate::errors::DomainError;
use crate::value_objects::{Coordinate, Distance, MaxCheckinDistance};

/// Decides whether a reported user location is close enough to a place
///
/// A threshold of zero only accepts identical coordinates.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckinLocationValidator;

impl CheckinLocationValidator {
    /// `true` when the user is within `max` of the place
    #[must_use]
    pub fn validate(
        user_location: &Coordinate,
        place_location: &Coordinate,
        max: MaxCheckinDistance,
    ) -> bool {
        haversine_distance(user_location, place_location) <= max.as_distance()
    }

    /// Like [`validate`](Self::validate) but returns the measured distance,
    /// or `DomainError::TooFarFromPlace` when it exceeds `max`
    pub fn check(
        user_location: &Coordinate,
        place_location: &Coordinate,
        max: MaxCheckinDistance,
    ) -> Result<Distance, DomainError> {
        let distance = haversine_distance(user_location, place_location);
        if distance <= max.as_distance() {
            Ok(distance)
        } else {
            Err(DomainError::TooFarFromPlace {
                distance_meters: distance.meters(),
                max_distance_meters: max.meters(),
            })
        }
    }
}
