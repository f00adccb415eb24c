//! Directions adapters for the Culturemap engine.
//!
//! Responsibilities:
//! - Implement [`culturemap_core::DirectionsProvider`] over HTTP.
//! - Guard the upstream API with a response cache and call quotas.
//! - Report how many upstream calls were made.
//!
//! Boundaries:
//! - Do not encode travel rules (live in `culturemap-core`).
//! - Keep blocking I/O off async executors; block only on an owned runtime
//!   or through `block_in_place`.
//!
//! Invariants:
//! - Providers are `Send + Sync` and hold no global state.
//! - API keys never appear in logs or `Debug` output.

pub mod routing;

pub use routing::{
    DEFAULT_BASE_URL, DisabledDirectionsProvider, HttpDirectionsProvider,
    HttpDirectionsProviderConfig, ProviderBuildError, UsageStats,
};
