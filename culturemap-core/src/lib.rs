//! Core domain types for the Culturemap itinerary engine.
//!
//! The crate is pure computation: coordinates, great-circle distances,
//! straight-line travel estimates and their display labels, ordered
//! itineraries, and the [`DirectionsProvider`] seam through which a road
//! router can refine those estimates. No I/O happens here; HTTP-backed
//! providers live in `culturemap-data`.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod directions;
pub mod distance;
pub mod geo_point;
pub mod itinerary;
pub mod labels;
pub mod planner;
pub mod travel;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use directions::{
    Directions, DirectionsError, DirectionsProvider, DirectionsRequest, RateLimitScope,
};
pub use distance::{EARTH_RADIUS_METERS, distance_meters, path_length_meters};
pub use geo_point::{GeoPoint, GeoPointError};
pub use itinerary::{Itinerary, Leg, Stop, segment_key};
pub use labels::{UNDER_A_MINUTE, format_distance, format_duration_seconds, format_minutes};
pub use planner::{LegDisplay, LegSource, LegTravel, RoutePlan, RoutePlanner, SummaryError};
pub use travel::{
    DRIVE_LABEL, DRIVE_SPEED_KMH, EstimationPolicy, TransportMode, TravelEstimate,
    TravelEstimator, WALK_MIN_MINUTES, WALK_SPEED_KMH, WALK_THRESHOLD_METERS, drive_floor_minutes,
    duration_minutes, estimate,
};
