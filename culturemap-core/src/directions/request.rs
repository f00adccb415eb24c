//! Directions request and response values.

use geo::{Coord, LineString};

use super::error::DirectionsError;
use crate::{GeoPoint, TransportMode, format_distance, format_duration_seconds};

/// A routing query from `origin` to `destination` through `waypoints`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirectionsRequest {
    /// Departure point.
    pub origin: GeoPoint,
    /// Arrival point.
    pub destination: GeoPoint,
    /// Intermediate stops, visited in order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub waypoints: Vec<GeoPoint>,
}

impl DirectionsRequest {
    /// Create a request without waypoints.
    #[must_use]
    pub const fn new(origin: GeoPoint, destination: GeoPoint) -> Self {
        Self {
            origin,
            destination,
            waypoints: Vec::new(),
        }
    }

    /// Replace the waypoints.
    #[must_use]
    pub fn with_waypoints(mut self, waypoints: Vec<GeoPoint>) -> Self {
        self.waypoints = waypoints;
        self
    }

    /// Reject requests a routing service cannot answer.
    ///
    /// # Errors
    ///
    /// - [`DirectionsError::InvalidCoordinate`] when any point is non-finite
    ///   or out of range.
    /// - [`DirectionsError::SameOriginAndDestination`] when origin and
    ///   destination coincide.
    pub fn validate(&self) -> Result<(), DirectionsError> {
        let named = [("origin", &self.origin), ("destination", &self.destination)];
        let waypoints = self.waypoints.iter().map(|point| ("waypoint", point));
        for (role, point) in named.into_iter().chain(waypoints) {
            point
                .validate()
                .map_err(|err| DirectionsError::InvalidCoordinate {
                    message: format!("{role}: {err}"),
                })?;
        }
        if self.origin == self.destination {
            return Err(DirectionsError::SameOriginAndDestination);
        }
        Ok(())
    }
}

/// A route returned by a [`crate::DirectionsProvider`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Directions {
    /// Road distance in metres.
    pub distance_meters: f64,
    /// Travel time in seconds.
    pub duration_seconds: f64,
    /// Route geometry, possibly empty.
    #[cfg_attr(feature = "serde", serde(default))]
    pub path: Vec<GeoPoint>,
    /// Whether the response was served from a cache.
    #[cfg_attr(feature = "serde", serde(default))]
    pub from_cache: bool,
    /// Name of the routing backend.
    pub provider: String,
    /// Mode the route was computed for.
    pub transport_mode: TransportMode,
}

impl Directions {
    /// The path as a `geo` line string (`x = longitude`).
    #[must_use]
    pub fn path_line(&self) -> LineString<f64> {
        self.path.iter().copied().map(Coord::from).collect()
    }

    /// Distance rendered as `123m` or `1.5km`.
    #[must_use]
    pub fn distance_text(&self) -> String {
        format_distance(self.distance_meters)
    }

    /// Duration rendered with minutes and, past an hour, hours.
    #[must_use]
    pub fn duration_text(&self) -> String {
        format_duration_seconds(self.duration_seconds)
    }
}
