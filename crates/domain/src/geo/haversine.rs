//! Great-circle distance on a spherical earth

use crate::value_objects::{Coordinate, Distance};

/// Mean earth radius used by every distance computation
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Haversine distance between two coordinates
///
/// Accurate to roughly 0.5% against an ellipsoidal model, which is enough
/// for kilometer-scale radius filtering. The result is not rounded.
#[must_use]
pub fn haversine_distance(a: &Coordinate, b: &Coordinate) -> Distance {
    let phi1 = a.latitude().to_radians();
    let phi2 = b.latitude().to_radians();
    let delta_phi = (b.latitude() - a.latitude()).to_radians();
    let delta_lambda = (b.longitude() - a.longitude()).to_radians();

    let h = (phi1.cos() * phi2.cos()).mul_add(
        (delta_lambda / 2.0).sin().powi(2),
        (delta_phi / 2.0).sin().powi(2),
    );
    // Rounding can push h a hair above 1 for antipodal points
    let h = h.min(1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    Distance::from_meters(EARTH_RADIUS_METERS * c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokyo_to_osaka_is_about_392_km() {
        let d = haversine_distance(&Coordinate::tokyo(), &Coordinate::osaka());
        assert!(
            (d.meters() - 392_441.0).abs() <= 2_000.0,
            "unexpected distance {d}"
        );
    }

    #[test]
    fn identical_points_are_zero_apart() {
        let kyoto = Coordinate::kyoto();
        assert!(haversine_distance(&kyoto, &kyoto).meters().abs() < f64::EPSILON);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Coordinate::tokyo();
        let b = Coordinate::kyoto();
        assert_eq!(haversine_distance(&a, &b), haversine_distance(&b, &a));
    }

    #[test]
    fn one_degree_of_latitude_on_the_equator() {
        let a = Coordinate::new_unchecked(0.0, 0.0);
        let b = Coordinate::new_unchecked(1.0, 0.0);
        let expected = EARTH_RADIUS_METERS * 1.0_f64.to_radians();
        assert!((haversine_distance(&a, &b).meters() - expected).abs() < 1e-6);
    }

    #[test]
    fn antipodal_points_are_half_the_circumference() {
        let a = Coordinate::new_unchecked(0.0, 0.0);
        let b = Coordinate::new_unchecked(0.0, 180.0);
        let d = haversine_distance(&a, &b).meters();
        assert!(!d.is_nan());
        assert!((d - EARTH_RADIUS_METERS * std::f64::consts::PI).abs() < 1.0);
    }

    #[test]
    fn crossing_the_antimeridian_takes_the_short_way() {
        let west = Coordinate::new_unchecked(0.0, 179.9);
        let east = Coordinate::new_unchecked(0.0, -179.9);
        let d = haversine_distance(&west, &east).meters();
        assert!(d < 25_000.0, "expected ~22 km, got {d}");
    }
}
