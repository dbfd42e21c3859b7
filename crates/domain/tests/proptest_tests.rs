//! Property-based tests for the geospatial core
//!
//! These tests use proptest to verify distance and bounding-box invariants
//! across many random inputs.

use domain::geo::{BoundingBox, EARTH_RADIUS_METERS, ProximityFilter, haversine_distance};
use domain::value_objects::{Coordinate, SearchRadius};
use proptest::prelude::*;

/// Point reached by travelling `meters` from `origin` on initial `bearing_deg`
fn destination(origin: &Coordinate, bearing_deg: f64, meters: f64) -> Coordinate {
    let delta = meters / EARTH_RADIUS_METERS;
    let theta = bearing_deg.to_radians();
    let phi1 = origin.latitude().to_radians();
    let lambda1 = origin.longitude().to_radians();

    let phi2 = phi1
        .sin()
        .mul_add(delta.cos(), phi1.cos() * delta.sin() * theta.cos())
        .clamp(-1.0, 1.0)
        .asin();
    let y = theta.sin() * delta.sin() * phi1.cos();
    let x = phi1.sin().mul_add(-phi2.sin(), delta.cos());
    let lambda2 = lambda1 + y.atan2(x);

    let lng = (lambda2.to_degrees() + 540.0).rem_euclid(360.0) - 180.0;
    Coordinate::new_unchecked(phi2.to_degrees().clamp(-90.0, 90.0), lng)
}

fn coordinate() -> impl Strategy<Value = Coordinate> {
    (-90.0f64..=90.0f64, -180.0f64..=180.0f64)
        .prop_map(|(lat, lng)| Coordinate::new(lat, lng).unwrap())
}

fn radius() -> impl Strategy<Value = SearchRadius> {
    (SearchRadius::MIN_KM..=SearchRadius::MAX_KM)
        .prop_map(|km| SearchRadius::from_kilometers(km).unwrap())
}

// ============================================================================
// Distance Property Tests
// ============================================================================

mod distance_tests {
    use super::*;

    proptest! {
        #[test]
        fn distance_to_self_is_zero(a in coordinate()) {
            prop_assert_eq!(haversine_distance(&a, &a).meters(), 0.0);
        }

        #[test]
        fn distance_is_symmetric(a in coordinate(), b in coordinate()) {
            let d1 = haversine_distance(&a, &b).meters();
            let d2 = haversine_distance(&b, &a).meters();
            prop_assert!((d1 - d2).abs() < 1e-6, "{} != {}", d1, d2);
        }

        #[test]
        fn distance_is_non_negative_and_bounded(a in coordinate(), b in coordinate()) {
            let d = haversine_distance(&a, &b).meters();
            prop_assert!(d >= 0.0);
            prop_assert!(d <= EARTH_RADIUS_METERS * std::f64::consts::PI + 1.0);
        }

        #[test]
        fn triangle_inequality_holds(a in coordinate(), b in coordinate(), c in coordinate()) {
            let ac = haversine_distance(&a, &c).meters();
            let ab = haversine_distance(&a, &b).meters();
            let bc = haversine_distance(&b, &c).meters();
            prop_assert!(ac <= ab + bc + 1.0, "{} > {} + {}", ac, ab, bc);
        }
    }
}

// ============================================================================
// Bounding Box Property Tests
// ============================================================================

mod bounding_box_tests {
    use super::*;

    proptest! {
        #[test]
        fn box_contains_every_point_within_radius(
            lat in -89.99f64..=89.99f64,
            lng in -180.0f64..=180.0f64,
            r in radius(),
            bearing in 0.0f64..360.0f64,
            fraction in 0.0f64..=0.999f64,
        ) {
            let center = Coordinate::new(lat, lng).unwrap();
            let point = destination(&center, bearing, r.as_distance().meters() * fraction);
            prop_assume!(haversine_distance(&center, &point) <= r.as_distance());

            let bbox = BoundingBox::around(&center, r);
            prop_assert!(
                bbox.contains(&point),
                "{} (bearing {}, {} of {} km) escaped {:?}",
                point, bearing, fraction, r.kilometers(), bbox
            );
        }

        #[test]
        fn box_latitudes_stay_in_range(center in coordinate(), r in radius()) {
            let bbox = BoundingBox::around(&center, r);
            prop_assert!(bbox.min_lat >= -90.0 && bbox.max_lat <= 90.0);
            prop_assert!(bbox.min_lat <= bbox.max_lat);
            prop_assert!(bbox.min_lng <= bbox.max_lng);
            for range in bbox.longitude_ranges() {
                prop_assert!(range.min >= -180.0 && range.max <= 180.0);
                prop_assert!(range.min <= range.max);
            }
        }

        #[test]
        fn box_contains_its_center(center in coordinate(), r in radius()) {
            prop_assert!(BoundingBox::around(&center, r).contains(&center));
        }
    }
}

// ============================================================================
// Proximity Filter Property Tests
// ============================================================================

mod proximity_filter_tests {
    use super::*;

    proptest! {
        #[test]
        fn measure_agrees_with_exact_distance(
            center in coordinate(),
            r in radius(),
            bearing in 0.0f64..360.0f64,
            fraction in 0.0f64..2.0f64,
        ) {
            let filter = ProximityFilter::new(center, r);
            let point = destination(&center, bearing, r.as_distance().meters() * fraction);
            let exact = haversine_distance(&center, &point);

            match filter.measure(&point) {
                Some(distance) => {
                    prop_assert!(distance <= r.as_distance());
                    prop_assert_eq!(distance, exact);
                },
                None => prop_assert!(exact > r.as_distance()),
            }
        }

        #[test]
        fn contained_points_pass_the_box(
            lat in -89.99f64..=89.99f64,
            lng in -180.0f64..=180.0f64,
            r in radius(),
            bearing in 0.0f64..360.0f64,
            fraction in 0.0f64..=0.999f64,
        ) {
            let center = Coordinate::new(lat, lng).unwrap();
            let filter = ProximityFilter::new(center, r);
            let point = destination(&center, bearing, r.as_distance().meters() * fraction);
            if filter.contains(&point) {
                prop_assert!(filter.bounding_box().contains(&point));
            }
        }
    }
}
