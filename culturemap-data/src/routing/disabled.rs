//! Provider used when no directions API key is configured.

use culturemap_core::{Directions, DirectionsError, DirectionsProvider, DirectionsRequest};
use log::{debug, warn};

use super::limits::UsageStats;

/// `DirectionsProvider` that refuses every request with
/// [`DirectionsError::Disabled`].
///
/// Planning still works with it: every leg falls back to straight-line
/// estimates.
#[derive(Debug, Clone, Copy)]
pub struct DisabledDirectionsProvider;

impl DisabledDirectionsProvider {
    /// Create the provider and warn that routed directions are off.
    #[must_use]
    pub fn new() -> Self {
        warn!("no directions API key configured; routed directions are disabled");
        Self
    }

    /// Always zero.
    #[must_use]
    pub const fn usage(&self) -> UsageStats {
        UsageStats {
            total_calls: 0,
            today_calls: 0,
        }
    }
}

impl Default for DisabledDirectionsProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectionsProvider for DisabledDirectionsProvider {
    fn directions(&self, request: &DirectionsRequest) -> Result<Directions, DirectionsError> {
        debug!(
            "directions disabled; ignoring request from {} to {}",
            request.origin, request.destination
        );
        Err(DirectionsError::Disabled)
    }
}
