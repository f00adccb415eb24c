//! Facade crate for the Culturemap itinerary engine.
//!
//! This crate re-exports the core distance, estimate and planning types and
//! exposes the HTTP directions provider behind the `directions-http`
//! feature.

#![forbid(unsafe_code)]

pub use culturemap_core::{
    Directions, DirectionsError, DirectionsProvider, DirectionsRequest, EstimationPolicy,
    GeoPoint, GeoPointError, Itinerary, Leg, LegDisplay, LegSource, LegTravel, RateLimitScope,
    RoutePlan, RoutePlanner, Stop, SummaryError, TransportMode, TravelEstimate, TravelEstimator,
    distance_meters, estimate, format_distance, format_duration_seconds, format_minutes,
    path_length_meters, segment_key,
};

#[cfg(feature = "directions-http")]
pub use culturemap_data::{
    DisabledDirectionsProvider, HttpDirectionsProvider, HttpDirectionsProviderConfig,
    ProviderBuildError, UsageStats,
};
