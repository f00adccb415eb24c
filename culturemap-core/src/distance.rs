//! Great-circle distance on a spherical Earth.
//!
//! Distances use the haversine formula with a mean Earth radius of
//! 6 371 000 m. The functions are total: NaN components propagate to a NaN
//! result and out-of-range coordinates are not clamped.

use crate::GeoPoint;

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Surface distance between `a` and `b` in metres.
///
/// The result is symmetric, zero for identical points and never negative.
///
/// # Examples
/// ```
/// use culturemap_core::{GeoPoint, distance_meters};
///
/// let seoul = GeoPoint::new(37.5665, 126.9780);
/// let busan = GeoPoint::new(35.1796, 129.0756);
/// let meters = distance_meters(&seoul, &busan);
/// assert!((meters - 325_000.0).abs() < 5_000.0);
/// ```
#[must_use]
pub fn distance_meters(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude_radians().cos() * b.latitude_radians().cos() * (d_lon / 2.0).sin().powi(2);

    // Rounding can push `h` a hair above 1 for antipodal points. `f64::min`
    // would swallow NaN, so compare explicitly.
    let h = if h > 1.0 { 1.0 } else { h };
    2.0 * EARTH_RADIUS_METERS * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Total haversine length of a polyline in metres.
///
/// Returns `0.0` when fewer than two points are supplied.
#[must_use]
pub fn path_length_meters(points: &[GeoPoint]) -> f64 {
    points
        .windows(2)
        .map(|pair| match pair {
            [from, to] => distance_meters(from, to),
            _ => 0.0,
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn seoul() -> GeoPoint {
        GeoPoint::new(37.5665, 126.9780)
    }

    #[fixture]
    fn busan() -> GeoPoint {
        GeoPoint::new(35.1796, 129.0756)
    }

    #[rstest]
    fn seoul_to_busan_is_about_325_km(seoul: GeoPoint, busan: GeoPoint) {
        let meters = distance_meters(&seoul, &busan);
        assert!(
            (meters - 325_000.0).abs() <= 5_000.0,
            "unexpected distance {meters}"
        );
    }

    #[rstest]
    fn distance_is_symmetric(seoul: GeoPoint, busan: GeoPoint) {
        assert_eq!(
            distance_meters(&seoul, &busan),
            distance_meters(&busan, &seoul)
        );
    }

    #[rstest]
    fn identical_points_are_zero_apart(seoul: GeoPoint) {
        assert_eq!(distance_meters(&seoul, &seoul), 0.0);
    }

    #[rstest]
    fn one_degree_of_latitude_is_about_111_km() {
        let meters = distance_meters(&GeoPoint::new(0.0, 0.0), &GeoPoint::new(1.0, 0.0));
        let expected = EARTH_RADIUS_METERS * 1.0_f64.to_radians();
        assert!((meters - expected).abs() < 1e-6);
    }

    #[rstest]
    fn antipodal_points_are_half_the_circumference() {
        let meters = distance_meters(&GeoPoint::new(0.0, 0.0), &GeoPoint::new(0.0, 180.0));
        assert!((meters - std::f64::consts::PI * EARTH_RADIUS_METERS).abs() < 1e-3);
    }

    #[rstest]
    fn nan_input_propagates(seoul: GeoPoint) {
        let meters = distance_meters(&seoul, &GeoPoint::new(f64::NAN, 0.0));
        assert!(meters.is_nan());
    }

    #[rstest]
    fn path_length_sums_consecutive_segments(seoul: GeoPoint, busan: GeoPoint) {
        let midpoint = GeoPoint::new(36.35, 127.38);
        let expected = distance_meters(&seoul, &midpoint) + distance_meters(&midpoint, &busan);
        let total = path_length_meters(&[seoul, midpoint, busan]);
        assert!((total - expected).abs() < 1e-9);
    }

    #[rstest]
    #[case::empty(&[])]
    #[case::single(&[GeoPoint::new(1.0, 1.0)])]
    fn short_paths_have_zero_length(#[case] points: &[GeoPoint]) {
        assert_eq!(path_length_meters(points), 0.0);
    }
}
