//! Directions provider trait.

use super::error::DirectionsError;
use super::request::{Directions, DirectionsRequest};

/// Fetch road directions for a request.
///
/// Implementations validate the request with
/// [`DirectionsRequest::validate`] before contacting any backend and report
/// failures as [`DirectionsError`] values rather than panicking.
///
/// # Examples
///
/// ```rust
/// use culturemap_core::{
///     Directions, DirectionsError, DirectionsProvider, DirectionsRequest, GeoPoint,
///     TransportMode, distance_meters,
/// };
///
/// struct CrowFlies;
///
/// impl DirectionsProvider for CrowFlies {
///     fn directions(&self, request: &DirectionsRequest) -> Result<Directions, DirectionsError> {
///         request.validate()?;
///         let meters = distance_meters(&request.origin, &request.destination);
///         Ok(Directions {
///             distance_meters: meters,
///             duration_seconds: meters,
///             path: vec![request.origin, request.destination],
///             from_cache: false,
///             provider: "crow".into(),
///             transport_mode: TransportMode::Walk,
///         })
///     }
/// }
///
/// let request = DirectionsRequest::new(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.01));
/// let directions = CrowFlies.directions(&request)?;
/// assert_eq!(directions.path.len(), 2);
/// # Ok::<(), DirectionsError>(())
/// ```
pub trait DirectionsProvider: Send + Sync {
    /// Return directions for `request`.
    fn directions(&self, request: &DirectionsRequest) -> Result<Directions, DirectionsError>;
}

impl<P: DirectionsProvider + ?Sized> DirectionsProvider for &P {
    fn directions(&self, request: &DirectionsRequest) -> Result<Directions, DirectionsError> {
        (**self).directions(request)
    }
}

impl<P: DirectionsProvider + ?Sized> DirectionsProvider for Box<P> {
    fn directions(&self, request: &DirectionsRequest) -> Result<Directions, DirectionsError> {
        (**self).directions(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GeoPoint;
    use crate::test_support::{FailingDirectionsProvider, StraightLineDirectionsProvider};
    use rstest::rstest;

    fn sample_request() -> DirectionsRequest {
        DirectionsRequest::new(GeoPoint::new(37.5665, 126.9780), GeoPoint::new(37.5512, 126.9882))
    }

    #[rstest]
    fn straight_line_provider_returns_route() {
        let provider = StraightLineDirectionsProvider;
        let directions = provider
            .directions(&sample_request())
            .expect("expected directions from StraightLineDirectionsProvider");
        assert!(directions.distance_meters > 0.0);
        assert_eq!(directions.path.first(), Some(&sample_request().origin));
    }

    #[rstest]
    fn providers_reject_identical_endpoints() {
        let provider = StraightLineDirectionsProvider;
        let point = GeoPoint::new(1.0, 1.0);
        let err = provider
            .directions(&DirectionsRequest::new(point, point))
            .expect_err("expected SameOriginAndDestination");
        assert_eq!(err, DirectionsError::SameOriginAndDestination);
    }

    #[rstest]
    fn boxed_providers_delegate() {
        let provider: Box<dyn DirectionsProvider> =
            Box::new(FailingDirectionsProvider::new(DirectionsError::Disabled));
        let err = provider
            .directions(&sample_request())
            .expect_err("expected the configured error");
        assert_eq!(err, DirectionsError::Disabled);
    }
}
