//! Ordered plan stops and the legs between them.

use crate::{GeoPoint, TravelEstimate, TravelEstimator};

/// A place visited as part of an itinerary.
///
/// Coordinates are optional: places entered by hand may lack them, and legs
/// touching such a stop carry no travel information.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Stop {
    /// Stable identifier of the place.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Position, when known.
    #[cfg_attr(feature = "serde", serde(default))]
    pub location: Option<GeoPoint>,
    /// Position within the day, lowest first.
    #[cfg_attr(feature = "serde", serde(default))]
    pub visit_order: Option<u32>,
    /// Free-form visit time, e.g. `"14:30"`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub visit_time: Option<String>,
}

impl Stop {
    /// Create a stop with a known location.
    ///
    /// # Examples
    /// ```
    /// use culturemap_core::{GeoPoint, Stop};
    ///
    /// let stop = Stop::new(7, "Gyeongbokgung", Some(GeoPoint::new(37.5796, 126.9770)));
    /// assert_eq!(stop.id, 7);
    /// assert!(stop.visit_order.is_none());
    /// ```
    pub fn new(id: u64, name: impl Into<String>, location: Option<GeoPoint>) -> Self {
        Self {
            id,
            name: name.into(),
            location,
            visit_order: None,
            visit_time: None,
        }
    }

    /// Set the visit order.
    #[must_use]
    pub fn with_visit_order(mut self, order: u32) -> Self {
        self.visit_order = Some(order);
        self
    }

    /// Set the visit time.
    #[must_use]
    pub fn with_visit_time(mut self, time: impl Into<String>) -> Self {
        self.visit_time = Some(time.into());
        self
    }
}

/// Identifier of the leg between two stops, `"{from}-{to}"`.
#[must_use]
pub fn segment_key(from: u64, to: u64) -> String {
    format!("{from}-{to}")
}

/// Travel between two consecutive stops.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Leg {
    /// Departure stop id.
    pub from: u64,
    /// Arrival stop id.
    pub to: u64,
    /// Straight-line estimate, absent when either stop lacks coordinates.
    pub estimate: Option<TravelEstimate>,
}

impl Leg {
    /// See [`segment_key`].
    #[must_use]
    pub fn key(&self) -> String {
        segment_key(self.from, self.to)
    }
}

/// A dated plan: an ordered list of stops.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Itinerary {
    /// Optional plan title.
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: Option<String>,
    /// Plan date, `YYYY-MM-DD`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub date: Option<String>,
    /// Stops in visiting order.
    pub stops: Vec<Stop>,
}

impl Itinerary {
    /// Build an itinerary, ordering stops by [`Stop::visit_order`].
    ///
    /// The sort is stable. Stops without an order follow the ordered ones
    /// and keep their relative positions.
    ///
    /// # Examples
    /// ```
    /// use culturemap_core::{Itinerary, Stop};
    ///
    /// let itinerary = Itinerary::new(vec![
    ///     Stop::new(1, "b", None).with_visit_order(2),
    ///     Stop::new(2, "a", None).with_visit_order(1),
    /// ]);
    /// let ids: Vec<u64> = itinerary.stops.iter().map(|s| s.id).collect();
    /// assert_eq!(ids, vec![2, 1]);
    /// ```
    #[must_use]
    pub fn new(stops: Vec<Stop>) -> Self {
        let mut itinerary = Self {
            title: None,
            date: None,
            stops,
        };
        itinerary.sort_stops();
        itinerary
    }

    /// Set the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the date.
    #[must_use]
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Re-apply visit ordering, e.g. after deserialising.
    pub fn sort_stops(&mut self) {
        self.stops
            .sort_by_key(|stop| stop.visit_order.map_or((1, 0), |order| (0, order)));
    }

    /// Stops that carry coordinates, in visiting order.
    pub fn stops_with_location(&self) -> impl Iterator<Item = (&Stop, GeoPoint)> {
        self.stops
            .iter()
            .filter_map(|stop| stop.location.map(|location| (stop, location)))
    }

    /// One leg per consecutive pair of stops.
    ///
    /// # Examples
    /// ```
    /// use culturemap_core::{GeoPoint, Itinerary, Stop, TravelEstimator};
    ///
    /// let itinerary = Itinerary::new(vec![
    ///     Stop::new(1, "City Hall", Some(GeoPoint::new(37.5665, 126.9780))),
    ///     Stop::new(2, "Unknown", None),
    ///     Stop::new(3, "Deoksugung", Some(GeoPoint::new(37.5658, 126.9751))),
    /// ]);
    /// let legs = itinerary.legs(&TravelEstimator::default());
    /// assert_eq!(legs.len(), 2);
    /// assert!(legs.iter().all(|leg| leg.estimate.is_none()));
    /// ```
    #[must_use]
    pub fn legs(&self, estimator: &TravelEstimator) -> Vec<Leg> {
        self.stops
            .windows(2)
            .filter_map(|pair| match pair {
                [from, to] => Some(Leg {
                    from: from.id,
                    to: to.id,
                    estimate: estimator.estimate(from.location.as_ref(), to.location.as_ref()),
                }),
                _ => None,
            })
            .collect()
    }
}
