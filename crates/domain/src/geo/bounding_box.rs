//! Latitude/longitude rectangle enclosing a search circle
//!
//! The box is a cheap pre-filter that the backing store can evaluate with
//! two range predicates. It may admit points outside the circle (its
//! corners) but never excludes a point inside it; the exact Haversine
//! filter removes the extras afterwards.
//!
//! The deltas are the exact extents of a spherical cap on the same sphere
//! used by [`haversine_distance`](super::haversine_distance):
//!
//! - latitude: `Δlat = r / R` (in degrees)
//! - longitude: `Δlng = asin(sin(r / R) / cos(lat))`
//!
//! One degree of latitude on this sphere is about 111.195 km, so the linear
//! `Δlat = r / 111.195` is exact, while the linear
//! `Δlng = r / (111.195 · cos(lat))` falls slightly short of the arcsine
//! (tens of parts per million at mid latitudes, more toward the poles). The
//! common 111.32 km figure (the WGS-84 equatorial degree) shrinks both
//! linear deltas by a further 0.11%, about 1,100 ppm.
//!
//! When the cap reaches a pole the box spans every longitude. When it
//! extends past ±180° the longitude interval is reported as two ranges.

use serde::{Deserialize, Serialize};

use super::haversine::EARTH_RADIUS_METERS;
use crate::value_objects::{Coordinate, SearchRadius};

/// An inclusive longitude interval within [-180, 180]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LongitudeRange {
    pub min: f64,
    pub max: f64,
}

impl LongitudeRange {
    fn contains(&self, longitude: f64) -> bool {
        (self.min..=self.max).contains(&longitude)
    }
}

/// Axis-aligned box guaranteed to contain every point within a radius
///
/// `min_lng`/`max_lng` are unwrapped: a box centred near the antimeridian
/// may have `max_lng > 180` or `min_lng < -180`. Stores should query
/// [`longitude_ranges`](Self::longitude_ranges) instead of the raw bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    /// Box around `center` covering `radius`
    #[must_use]
    pub fn around(center: &Coordinate, radius: SearchRadius) -> Self {
        let angular = radius.as_distance().meters() / EARTH_RADIUS_METERS;
        let lat_delta = angular.to_degrees();

        let min_lat = (center.latitude() - lat_delta).max(-90.0);
        let max_lat = (center.latitude() + lat_delta).min(90.0);

        let ratio = angular.sin() / center.latitude().to_radians().cos();
        if min_lat <= -90.0 || max_lat >= 90.0 || ratio >= 1.0 {
            return Self {
                min_lat,
                max_lat,
                min_lng: -180.0,
                max_lng: 180.0,
            };
        }

        let lng_delta = ratio.asin().to_degrees();
        Self {
            min_lat,
            max_lat,
            min_lng: center.longitude() - lng_delta,
            max_lng: center.longitude() + lng_delta,
        }
    }

    /// Whether the longitude interval wraps across ±180°
    #[must_use]
    pub fn crosses_antimeridian(&self) -> bool {
        self.min_lng < -180.0 || self.max_lng > 180.0
    }

    /// The longitude interval split into ranges inside [-180, 180]
    ///
    /// Returns one range normally and two when the box crosses the
    /// antimeridian. A point matches the box when its latitude is within
    /// `min_lat..=max_lat` and its longitude is in any returned range.
    #[must_use]
    pub fn longitude_ranges(&self) -> Vec<LongitudeRange> {
        if self.min_lng < -180.0 {
            vec![
                LongitudeRange {
                    min: self.min_lng + 360.0,
                    max: 180.0,
                },
                LongitudeRange {
                    min: -180.0,
                    max: self.max_lng,
                },
            ]
        } else if self.max_lng > 180.0 {
            vec![
                LongitudeRange {
                    min: self.min_lng,
                    max: 180.0,
                },
                LongitudeRange {
                    min: -180.0,
                    max: self.max_lng - 360.0,
                },
            ]
        } else {
            vec![LongitudeRange {
                min: self.min_lng,
                max: self.max_lng,
            }]
        }
    }

    /// Whether a coordinate passes the coarse box predicate
    #[must_use]
    pub fn contains(&self, point: &Coordinate) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.latitude())
            && self
                .longitude_ranges()
                .iter()
                .any(|range| range.contains(point.longitude()))
    }
}
