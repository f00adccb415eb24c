//! Test utilities for directions providers.
//!
//! [`StubDirectionsProvider`] is a deterministic test double for
//! [`DirectionsProvider`] that replays canned responses without making HTTP
//! requests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use culturemap_core::{
    Directions, DirectionsError, DirectionsProvider, DirectionsRequest, TransportMode,
};

/// Stub `DirectionsProvider` for testing.
///
/// Requests are validated first, like the HTTP provider does. Valid requests
/// consume the queued responses in order; the last one repeats once the
/// queue is down to a single entry.
///
/// # Example
///
/// ```
/// use culturemap_core::{DirectionsError, DirectionsProvider, DirectionsRequest, GeoPoint};
/// use culturemap_data::routing::test_support::StubDirectionsProvider;
///
/// let provider = StubDirectionsProvider::with_error(DirectionsError::Unauthorized);
/// let request = DirectionsRequest::new(GeoPoint::new(37.5, 127.0), GeoPoint::new(37.6, 127.1));
///
/// assert_eq!(provider.directions(&request), Err(DirectionsError::Unauthorized));
/// assert_eq!(provider.calls(), 1);
/// ```
#[derive(Debug)]
pub struct StubDirectionsProvider {
    responses: Mutex<VecDeque<Result<Directions, DirectionsError>>>,
    calls: AtomicUsize,
}

impl StubDirectionsProvider {
    /// Replay `responses` in order, repeating the last.
    ///
    /// An empty sequence answers with [`DirectionsError::EmptyRoute`].
    #[must_use]
    pub fn with_sequence(responses: Vec<Result<Directions, DirectionsError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Answer every request with `directions`.
    #[must_use]
    pub fn with_directions(directions: Directions) -> Self {
        Self::with_sequence(vec![Ok(directions)])
    }

    /// Fail every request with `error`.
    #[must_use]
    pub fn with_error(error: DirectionsError) -> Self {
        Self::with_sequence(vec![Err(error)])
    }

    /// Answer every request with a fixed drive of `distance_meters` taking
    /// `duration_seconds`.
    #[must_use]
    pub fn with_route(distance_meters: f64, duration_seconds: f64) -> Self {
        Self::with_directions(Directions {
            distance_meters,
            duration_seconds,
            path: Vec::new(),
            from_cache: false,
            provider: "stub".to_owned(),
            transport_mode: TransportMode::Drive,
        })
    }

    /// Number of valid requests answered so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DirectionsProvider for StubDirectionsProvider {
    fn directions(&self, request: &DirectionsRequest) -> Result<Directions, DirectionsError> {
        request.validate()?;
        self.calls.fetch_add(1, Ordering::SeqCst);

        let mut responses = self
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let next = if responses.len() > 1 {
            responses.pop_front()
        } else {
            responses.front().cloned()
        };
        next.unwrap_or_else(|| {
            Err(DirectionsError::EmptyRoute {
                message: "stub has no responses".to_owned(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use culturemap_core::GeoPoint;
    use rstest::{fixture, rstest};

    #[fixture]
    fn request() -> DirectionsRequest {
        DirectionsRequest::new(GeoPoint::new(37.5, 127.0), GeoPoint::new(37.6, 127.1))
    }

    #[rstest]
    fn with_route_returns_configured_route(request: DirectionsRequest) {
        let provider = StubDirectionsProvider::with_route(4_000.0, 600.0);

        let directions = provider.directions(&request).expect("should succeed");

        assert_eq!(directions.distance_meters, 4_000.0);
        assert_eq!(directions.duration_seconds, 600.0);
        assert_eq!(provider.calls(), 1);
    }

    #[rstest]
    fn sequence_is_replayed_then_last_repeats(request: DirectionsRequest) {
        let provider = StubDirectionsProvider::with_sequence(vec![
            Err(DirectionsError::Unauthorized),
            Ok(Directions {
                distance_meters: 1.0,
                duration_seconds: 1.0,
                path: Vec::new(),
                from_cache: false,
                provider: "stub".to_owned(),
                transport_mode: TransportMode::Drive,
            }),
        ]);

        assert_eq!(provider.directions(&request), Err(DirectionsError::Unauthorized));
        assert!(provider.directions(&request).is_ok());
        assert!(provider.directions(&request).is_ok());
        assert_eq!(provider.calls(), 3);
    }

    #[rstest]
    fn invalid_request_is_rejected_before_counting() {
        let provider = StubDirectionsProvider::with_route(1.0, 1.0);
        let point = GeoPoint::new(37.5, 127.0);

        let err = provider
            .directions(&DirectionsRequest::new(point, point))
            .expect_err("should fail");

        assert_eq!(err, DirectionsError::SameOriginAndDestination);
        assert_eq!(provider.calls(), 0);
    }

    #[rstest]
    fn empty_sequence_reports_empty_route(request: DirectionsRequest) {
        let provider = StubDirectionsProvider::with_sequence(Vec::new());
        assert!(matches!(
            provider.directions(&request),
            Err(DirectionsError::EmptyRoute { .. })
        ));
    }
}
