//! Combine routed directions with straight-line estimates for a plan.
//!
//! The planner asks a [`DirectionsProvider`] for the whole route (used to
//! draw the map and summarise the day) and for each consecutive leg. Any
//! leg the provider cannot answer falls back to the [`TravelEstimator`], so
//! a flaky routing backend degrades the view instead of emptying it.

use log::{debug, warn};

use crate::{
    Directions, DirectionsError, DirectionsProvider, DirectionsRequest, GeoPoint, Itinerary,
    TransportMode, TravelEstimate, TravelEstimator,
};

/// Where a leg's travel figures came from.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "kind", content = "detail", rename_all = "lowercase")
)]
pub enum LegSource {
    /// Answered by the routing provider.
    Routed(Directions),
    /// Straight-line fallback.
    Estimated(TravelEstimate),
    /// A stop lacks coordinates.
    Unavailable,
}

/// Display-ready figures for one leg.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegDisplay {
    /// `123m` or `1.5km`.
    pub distance: String,
    /// `약 N분`, `1분 미만` or an hour-based label.
    pub duration: String,
    /// Transport mode.
    pub mode: TransportMode,
    /// Mode icon.
    pub icon: String,
    /// Transport label.
    pub label: String,
}

/// Travel between two consecutive stops of a plan.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegTravel {
    /// Departure stop id.
    pub from: u64,
    /// Arrival stop id.
    pub to: u64,
    /// Origin of the figures.
    pub source: LegSource,
}

impl LegTravel {
    /// Display strings, or `None` when the leg has no travel information.
    #[must_use]
    pub fn display(&self) -> Option<LegDisplay> {
        match &self.source {
            LegSource::Routed(directions) => Some(LegDisplay {
                distance: directions.distance_text(),
                duration: directions.duration_text(),
                mode: directions.transport_mode,
                icon: directions.transport_mode.icon().to_owned(),
                label: crate::DRIVE_LABEL.to_owned(),
            }),
            LegSource::Estimated(estimate) => Some(LegDisplay {
                distance: estimate.distance_text(),
                duration: estimate.duration_text(),
                mode: estimate.transport_mode,
                icon: estimate.transport_mode.icon().to_owned(),
                label: estimate.label.clone(),
            }),
            LegSource::Unavailable => None,
        }
    }
}

/// Why the whole-route summary is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "reason", content = "message"))]
pub enum SummaryError {
    /// Fewer than two stops have coordinates.
    NotEnoughStops,
    /// The provider failed; carries the rendered error.
    Provider(String),
}

/// Result of planning an itinerary.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutePlan {
    /// Whole-route directions through every located stop.
    pub summary: Option<Directions>,
    /// Set when `summary` is `None`.
    pub summary_error: Option<SummaryError>,
    /// One entry per consecutive stop pair.
    pub legs: Vec<LegTravel>,
}

impl RoutePlan {
    /// Number of legs answered by the provider.
    #[must_use]
    pub fn routed_legs(&self) -> usize {
        self.legs
            .iter()
            .filter(|leg| matches!(leg.source, LegSource::Routed(_)))
            .count()
    }
}

/// Plans routes for itineraries using a provider and a fallback estimator.
#[derive(Debug, Clone)]
pub struct RoutePlanner<P> {
    provider: P,
    estimator: TravelEstimator,
}

impl<P: DirectionsProvider> RoutePlanner<P> {
    /// Create a planner.
    pub const fn new(provider: P, estimator: TravelEstimator) -> Self {
        Self {
            provider,
            estimator,
        }
    }

    /// The underlying provider.
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Plan the whole route and every leg of `itinerary`.
    ///
    /// Provider failures never abort planning: the summary records the
    /// error and failing legs fall back to straight-line estimates.
    pub fn plan(&self, itinerary: &Itinerary) -> RoutePlan {
        let located: Vec<GeoPoint> = itinerary
            .stops_with_location()
            .map(|(_, location)| location)
            .collect();
        let (summary, summary_error) = match self.summary(&located) {
            Ok(directions) => (Some(directions), None),
            Err(err) => (None, Some(err)),
        };
        let legs = itinerary
            .stops
            .windows(2)
            .filter_map(|pair| match pair {
                [from, to] => Some(LegTravel {
                    from: from.id,
                    to: to.id,
                    source: self.leg_source(from.location, to.location, from.id, to.id),
                }),
                _ => None,
            })
            .collect();
        RoutePlan {
            summary,
            summary_error,
            legs,
        }
    }

    fn summary(&self, located: &[GeoPoint]) -> Result<Directions, SummaryError> {
        let [origin, middle @ .., destination] = located else {
            return Err(SummaryError::NotEnoughStops);
        };
        let request =
            DirectionsRequest::new(*origin, *destination).with_waypoints(middle.to_vec());
        self.provider.directions(&request).map_err(|err| {
            warn!("whole-route directions failed: {err}");
            SummaryError::Provider(err.to_string())
        })
    }

    fn leg_source(
        &self,
        from: Option<GeoPoint>,
        to: Option<GeoPoint>,
        from_id: u64,
        to_id: u64,
    ) -> LegSource {
        let (Some(origin), Some(destination)) = (from, to) else {
            return LegSource::Unavailable;
        };
        match self
            .provider
            .directions(&DirectionsRequest::new(origin, destination))
        {
            Ok(directions) => LegSource::Routed(directions),
            Err(err) => {
                log_leg_failure(from_id, to_id, &err);
                self.estimator
                    .estimate(Some(&origin), Some(&destination))
                    .map_or(LegSource::Unavailable, LegSource::Estimated)
            }
        }
    }
}

fn log_leg_failure(from: u64, to: u64, err: &DirectionsError) {
    match err {
        DirectionsError::Disabled => {
            debug!("directions disabled; estimating leg {from}-{to}");
        }
        _ => warn!("directions for leg {from}-{to} failed, estimating instead: {err}"),
    }
}
