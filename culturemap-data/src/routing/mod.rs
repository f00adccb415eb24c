//! HTTP directions providers for car routing services.
//!
//! [`HttpDirectionsProvider`] implements [`culturemap_core::DirectionsProvider`]
//! against a Kakao-Mobility-compatible directions endpoint. Responses are
//! cached for a short time and calls are throttled by a per-minute and a
//! daily quota, so repeated planning of the same day does not burn through
//! the API allowance.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use culturemap_core::{DirectionsProvider, DirectionsRequest, GeoPoint};
//! use culturemap_data::routing::{HttpDirectionsProvider, HttpDirectionsProviderConfig};
//!
//! let config = HttpDirectionsProviderConfig::new("my-rest-api-key")
//!     .with_timeout(Duration::from_secs(10));
//! let provider = HttpDirectionsProvider::with_config(config)?;
//!
//! let request = DirectionsRequest::new(
//!     GeoPoint::new(37.5665, 126.9780),
//!     GeoPoint::new(37.5172, 127.0473),
//! );
//! let directions = provider.directions(&request)?;
//! println!("{} / {}", directions.distance_text(), directions.duration_text());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod cache;
mod disabled;
mod kakao;
mod limits;
mod provider;

#[doc(hidden)]
pub mod test_support;

pub use cache::{DirectionsCache, cache_key};
pub use disabled::DisabledDirectionsProvider;
pub use limits::{RateLimiter, UsageStats};
pub use provider::{
    DEFAULT_BASE_URL, DEFAULT_CACHE_TTL, DEFAULT_DAILY_LIMIT, DEFAULT_PER_MINUTE_LIMIT,
    DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, HttpDirectionsProvider, HttpDirectionsProviderConfig,
    KAKAO_PROVIDER, ProviderBuildError,
};
