//! Deterministic directions providers used by unit and behaviour tests.

use crate::{
    DRIVE_SPEED_KMH, Directions, DirectionsError, DirectionsProvider, DirectionsRequest,
    TransportMode, path_length_meters,
};

/// `DirectionsProvider` that drives in straight lines at the urban speed.
///
/// The path is the origin, the waypoints and the destination; the distance
/// is its haversine length.
#[derive(Default, Debug, Copy, Clone)]
pub struct StraightLineDirectionsProvider;

impl DirectionsProvider for StraightLineDirectionsProvider {
    fn directions(&self, request: &DirectionsRequest) -> Result<Directions, DirectionsError> {
        request.validate()?;
        let mut path = Vec::with_capacity(request.waypoints.len() + 2);
        path.push(request.origin);
        path.extend(request.waypoints.iter().copied());
        path.push(request.destination);

        let distance_meters = path_length_meters(&path);
        let meters_per_second = DRIVE_SPEED_KMH * 1_000.0 / 3_600.0;
        Ok(Directions {
            distance_meters,
            duration_seconds: distance_meters / meters_per_second,
            path,
            from_cache: false,
            provider: "straight-line".to_owned(),
            transport_mode: TransportMode::Drive,
        })
    }
}

/// `DirectionsProvider` that fails every call with a fixed error.
#[derive(Debug, Clone)]
pub struct FailingDirectionsProvider {
    error: DirectionsError,
}

impl FailingDirectionsProvider {
    /// Fail with `error` on every call.
    #[must_use]
    pub const fn new(error: DirectionsError) -> Self {
        Self { error }
    }
}

impl DirectionsProvider for FailingDirectionsProvider {
    fn directions(&self, _request: &DirectionsRequest) -> Result<Directions, DirectionsError> {
        Err(self.error.clone())
    }
}
