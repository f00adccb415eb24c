//! Road-routing directions between itinerary stops.
//!
//! The [`DirectionsProvider`] trait abstracts a routing backend that returns
//! the road distance, duration and path for an origin, a destination and
//! optional waypoints. When a provider fails, callers fall back to the
//! straight-line [`TravelEstimate`](crate::TravelEstimate).

mod error;
mod provider;
mod request;

pub use error::{DirectionsError, RateLimitScope};
pub use provider::DirectionsProvider;
pub use request::{Directions, DirectionsRequest};
