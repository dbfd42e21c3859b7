//! Proximity filter and the trait for entities that can be searched by it

use serde::{Deserialize, Serialize};

use super::BoundingBox;
use crate::value_objects::{Coordinate, Distance, SearchRadius};

/// An entity with a registered location
pub trait Located {
    /// The entity's coordinate
    fn location(&self) -> Coordinate;
}

impl Located for Coordinate {
    fn location(&self) -> Coordinate {
        *self
    }
}

/// A `{center, radius}` constraint narrowing results to nearby entities
///
/// Serialized as `{"coordinates": {...}, "radiusKm": ...}`, the shape in
/// which list and search requests carry it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProximityFilter {
    #[serde(rename = "coordinates")]
    pub center: Coordinate,
    #[serde(rename = "radiusKm")]
    pub radius: SearchRadius,
}

impl ProximityFilter {
    /// Create a filter
    #[must_use]
    pub const fn new(center: Coordinate, radius: SearchRadius) -> Self {
        Self { center, radius }
    }

    /// Coarse pre-filter for the backing store
    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::around(&self.center, self.radius)
    }

    /// Exact distance from the center
    #[must_use]
    pub fn distance_to(&self, point: &Coordinate) -> Distance {
        self.center.distance_to(point)
    }

    /// Distance of `item` from the center, or `None` when it lies outside
    #[must_use]
    pub fn measure<T: Located + ?Sized>(&self, item: &T) -> Option<Distance> {
        let distance = self.distance_to(&item.location());
        (distance <= self.radius.as_distance()).then_some(distance)
    }

    /// Whether `point` is within the radius (`distance ≤ radius_km · 1000`)
    #[must_use]
    pub fn contains(&self, point: &Coordinate) -> bool {
        self.measure(point).is_some()
    }
}
