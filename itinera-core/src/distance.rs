//! Great-circle distance between coordinates.

use geo::{Coord, Distance, Haversine, Point};

/// A WGS84 coordinate with `x = longitude` and `y = latitude`, in degrees.
pub type GeoPoint = Coord<f64>;

/// Return the haversine distance between two points in kilometres.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use itinera_core::haversine_km;
///
/// let origin = Coord { x: 0.0, y: 0.0 };
/// let north = Coord { x: 0.0, y: 1.0 };
/// let km = haversine_km(origin, north);
/// assert!((km - 111.2).abs() < 0.5);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "metres are converted to kilometres"
)]
pub fn haversine_km(from: GeoPoint, to: GeoPoint) -> f64 {
    Haversine.distance(Point::from(from), Point::from(to)) / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn identical_points_are_zero_apart() {
        let p = Coord { x: 13.4, y: 52.5 };
        assert!(haversine_km(p, p).abs() < f64::EPSILON);
    }

    #[rstest]
    #[case(Coord { x: 0.0, y: 0.0 }, Coord { x: 0.0, y: 0.01 }, 1.11)]
    #[case(Coord { x: 139.69, y: 35.69 }, Coord { x: -0.13, y: 51.51 }, 9_560.0)]
    fn distance_matches_known_values(
        #[case] from: GeoPoint,
        #[case] to: GeoPoint,
        #[case] expected: f64,
    ) {
        let km = haversine_km(from, to);
        let tolerance = expected * 0.01;
        assert!(
            (km - expected).abs() <= tolerance,
            "expected about {expected} km, got {km}"
        );
    }

    #[rstest]
    fn distance_is_symmetric() {
        let a = Coord { x: 2.35, y: 48.85 };
        let b = Coord { x: 12.49, y: 41.89 };
        assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-9);
    }
}
