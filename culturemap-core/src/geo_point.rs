//! Latitude/longitude value type used throughout the engine.

use std::fmt;
use std::str::FromStr;

use geo::{Coord, Point};
use thiserror::Error;

/// Valid latitude range in decimal degrees.
pub const LATITUDE_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;
/// Valid longitude range in decimal degrees.
pub const LONGITUDE_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;

/// A WGS84 coordinate pair in decimal degrees.
///
/// `GeoPoint` is a plain value: it carries no identity and is constructed
/// per calculation. [`GeoPoint::new`] does not check ranges; use
/// [`GeoPoint::try_new`] when the input comes from outside the process.
///
/// # Examples
/// ```
/// use culturemap_core::GeoPoint;
///
/// let seoul = GeoPoint::new(37.5665, 126.9780);
/// assert_eq!(seoul.latitude, 37.5665);
/// assert!(seoul.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    /// Latitude in decimal degrees, `[-90, 90]`.
    pub latitude: f64,
    /// Longitude in decimal degrees, `[-180, 180]`.
    pub longitude: f64,
}

/// Errors returned by [`GeoPoint::try_new`] and [`GeoPoint::from_str`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoPointError {
    /// One of the components was NaN or infinite.
    #[error("coordinates must be finite numbers")]
    NonFinite,
    /// Latitude fell outside `[-90, 90]`.
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    /// Longitude fell outside `[-180, 180]`.
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
    /// Text did not have the `lat,lon` shape.
    #[error("expected `lat,lon`, found {0:?}")]
    Malformed(String),
}

impl GeoPoint {
    /// Construct a point without validating the ranges.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Construct a point, rejecting non-finite or out-of-range components.
    ///
    /// # Examples
    /// ```
    /// use culturemap_core::{GeoPoint, GeoPointError};
    ///
    /// assert!(GeoPoint::try_new(90.0, -180.0).is_ok());
    /// assert_eq!(
    ///     GeoPoint::try_new(91.0, 0.0),
    ///     Err(GeoPointError::LatitudeOutOfRange(91.0))
    /// );
    /// ```
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self, GeoPointError> {
        let point = Self::new(latitude, longitude);
        point.validate()?;
        Ok(point)
    }

    /// Check the coordinate ranges.
    pub fn validate(&self) -> Result<(), GeoPointError> {
        if !self.latitude.is_finite() || !self.longitude.is_finite() {
            return Err(GeoPointError::NonFinite);
        }
        if !LATITUDE_RANGE.contains(&self.latitude) {
            return Err(GeoPointError::LatitudeOutOfRange(self.latitude));
        }
        if !LONGITUDE_RANGE.contains(&self.longitude) {
            return Err(GeoPointError::LongitudeOutOfRange(self.longitude));
        }
        Ok(())
    }

    /// Whether both components are finite and within range.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Latitude in radians.
    #[must_use]
    pub fn latitude_radians(&self) -> f64 {
        self.latitude.to_radians()
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.latitude, self.longitude)
    }
}

impl FromStr for GeoPoint {
    type Err = GeoPointError;

    /// Parse `"lat,lon"`, e.g. `"37.5665, 126.9780"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || GeoPointError::Malformed(s.to_owned());
        let (lat, lon) = s.split_once(',').ok_or_else(malformed)?;
        let latitude: f64 = lat.trim().parse().map_err(|_| malformed())?;
        let longitude: f64 = lon.trim().parse().map_err(|_| malformed())?;
        Self::try_new(latitude, longitude)
    }
}

// geo uses `x = longitude`, `y = latitude`.
impl From<Coord<f64>> for GeoPoint {
    fn from(coord: Coord<f64>) -> Self {
        Self::new(coord.y, coord.x)
    }
}

impl From<GeoPoint> for Coord<f64> {
    fn from(point: GeoPoint) -> Self {
        Self {
            x: point.longitude,
            y: point.latitude,
        }
    }
}

impl From<Point<f64>> for GeoPoint {
    fn from(point: Point<f64>) -> Self {
        Self::from(point.0)
    }
}

impl From<GeoPoint> for Point<f64> {
    fn from(point: GeoPoint) -> Self {
        Point(Coord::from(point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(90.0, 180.0)]
    #[case(-90.0, -180.0)]
    #[case(0.0, 0.0)]
    fn accepts_boundary_coordinates(#[case] lat: f64, #[case] lon: f64) {
        assert!(GeoPoint::try_new(lat, lon).is_ok());
    }

    #[rstest]
    #[case(90.5, 0.0, GeoPointError::LatitudeOutOfRange(90.5))]
    #[case(0.0, -180.5, GeoPointError::LongitudeOutOfRange(-180.5))]
    #[case(f64::NAN, 0.0, GeoPointError::NonFinite)]
    #[case(0.0, f64::INFINITY, GeoPointError::NonFinite)]
    fn rejects_invalid_coordinates(
        #[case] lat: f64,
        #[case] lon: f64,
        #[case] expected: GeoPointError,
    ) {
        assert_eq!(GeoPoint::try_new(lat, lon), Err(expected));
    }

    #[rstest]
    fn parses_lat_lon_text() {
        let point: GeoPoint = " 37.5665 , 126.9780 ".parse().expect("valid text");
        assert_eq!(point, GeoPoint::new(37.5665, 126.9780));
    }

    #[rstest]
    #[case("37.5665")]
    #[case("north,east")]
    #[case("")]
    fn rejects_malformed_text(#[case] text: &str) {
        let err = text.parse::<GeoPoint>().expect_err("malformed text");
        assert!(matches!(err, GeoPointError::Malformed(_)));
    }

    #[rstest]
    fn geo_coord_uses_x_for_longitude() {
        let point = GeoPoint::new(35.1796, 129.0756);
        let coord: Coord<f64> = point.into();
        assert_eq!(coord, Coord { x: 129.0756, y: 35.1796 });
        assert_eq!(GeoPoint::from(Point::from(coord)), point);
    }

    #[rstest]
    fn display_uses_six_decimals() {
        assert_eq!(GeoPoint::new(1.5, -2.25).to_string(), "1.500000,-2.250000");
    }
}
