//! Kakao Mobility directions API response types.
//!
//! Only the fields the engine reads are modelled; everything else in the
//! payload is ignored.
//!
//! See: <https://developers.kakaomobility.com/docs/navi-api/directions/>

use culturemap_core::{Directions, DirectionsError, GeoPoint, TransportMode};
use serde::Deserialize;

use super::provider::KAKAO_PROVIDER;

/// Render a point the way the API expects it: `lng,lat` with six decimals.
pub(crate) fn lng_lat(point: &GeoPoint) -> String {
    format!("{:.6},{:.6}", point.longitude, point.latitude)
}

/// Top-level directions response.
#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    /// Candidate routes; the first one is used.
    #[serde(default)]
    pub routes: Option<Vec<Route>>,
}

/// One candidate route.
#[derive(Debug, Deserialize)]
pub struct Route {
    /// `0` on success; anything else means no route was found.
    #[serde(default)]
    pub result_code: i64,

    /// Human-readable explanation of `result_code`.
    #[serde(default)]
    pub result_msg: Option<String>,

    /// Totals for the whole route.
    #[serde(default)]
    pub summary: Option<Summary>,

    /// Legs between consecutive waypoints.
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// Route totals.
#[derive(Debug, Deserialize)]
pub struct Summary {
    /// Metres.
    #[serde(default)]
    pub distance: f64,
    /// Seconds.
    #[serde(default)]
    pub duration: f64,
}

/// A section between two waypoints.
#[derive(Debug, Deserialize)]
pub struct Section {
    /// Roads in driving order.
    #[serde(default)]
    pub roads: Vec<Road>,
}

/// A road segment with its geometry.
#[derive(Debug, Deserialize)]
pub struct Road {
    /// Flat `[lng1, lat1, lng2, lat2, ...]` list.
    #[serde(default)]
    pub vertexes: Vec<f64>,
}

impl DirectionsResponse {
    /// Convert the first route into [`Directions`].
    ///
    /// A missing summary yields zero distance and duration. A trailing
    /// unpaired vertex value is dropped.
    ///
    /// # Errors
    ///
    /// [`DirectionsError::EmptyRoute`] when there are no routes or the first
    /// route carries a non-zero result code.
    pub fn into_directions(self) -> Result<Directions, DirectionsError> {
        let route = self
            .routes
            .and_then(|routes| routes.into_iter().next())
            .ok_or_else(|| DirectionsError::EmptyRoute {
                message: "response contained no routes".to_owned(),
            })?;

        if route.result_code != 0 {
            return Err(DirectionsError::EmptyRoute {
                message: route
                    .result_msg
                    .unwrap_or_else(|| format!("result code {}", route.result_code)),
            });
        }

        let (distance_meters, duration_seconds) = route
            .summary
            .map_or((0.0, 0.0), |summary| (summary.distance, summary.duration));
        let path = route
            .sections
            .iter()
            .flat_map(|section| &section.roads)
            .flat_map(|road| road.vertexes.chunks_exact(2))
            .filter_map(|pair| match pair {
                [lng, lat] => Some(GeoPoint::new(*lat, *lng)),
                _ => None,
            })
            .collect();

        Ok(Directions {
            distance_meters,
            duration_seconds,
            path,
            from_cache: false,
            provider: KAKAO_PROVIDER.to_owned(),
            transport_mode: TransportMode::Drive,
        })
    }
}
