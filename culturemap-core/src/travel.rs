//! Straight-line travel-time estimates between itinerary stops.
//!
//! The estimator picks a transport mode from the haversine distance and
//! converts it to minutes with fixed average speeds and minimum floors:
//!
//! | Mode  | Applies to      | Speed   | Floor                         |
//! |-------|-----------------|---------|-------------------------------|
//! | Walk  | `<= 1500 m`     | 4 km/h  | 3 min                         |
//! | Drive | `> 1500 m`      | 30 km/h | 5 (`<= 2 km`), 8 (`<= 5 km`), 10 |

use std::fmt;

use crate::{GeoPoint, distance_meters, format_distance, format_minutes};

/// Distances up to and including this many metres are walked.
pub const WALK_THRESHOLD_METERS: f64 = 1_500.0;
/// Average walking pace in km/h.
pub const WALK_SPEED_KMH: f64 = 4.0;
/// Average urban driving speed in km/h.
pub const DRIVE_SPEED_KMH: f64 = 30.0;
/// Minimum minutes for a walk.
pub const WALK_MIN_MINUTES: u32 = 3;

/// Label shown when a car leg comes from a routing service rather than the
/// walk/drive recommendation.
pub const DRIVE_LABEL: &str = "자동차 이동";

/// How a leg is travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TransportMode {
    /// On foot.
    Walk,
    /// By car.
    #[cfg_attr(feature = "serde", serde(alias = "car"))]
    Drive,
}

impl TransportMode {
    /// Short identifier, `walk` or `car`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Walk => "walk",
            Self::Drive => "car",
        }
    }

    /// Recommendation label shown next to an estimated leg.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Walk => "도보 이동 (추천)",
            Self::Drive => "자동차 이동 (추천)",
        }
    }

    /// Icon rendered beside the label.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Walk => "🚶",
            Self::Drive => "🚗",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A derived, display-oriented travel estimate between two points.
///
/// Estimates are recomputed on demand and never persisted.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TravelEstimate {
    /// Great-circle distance in metres.
    pub distance_meters: f64,
    /// Selected transport mode.
    pub transport_mode: TransportMode,
    /// Estimated duration in whole minutes, floors applied.
    pub duration_minutes: u32,
    /// Transport label for the selected mode.
    pub label: String,
}

impl TravelEstimate {
    /// Distance rendered as `123m` or `1.5km`.
    #[must_use]
    pub fn distance_text(&self) -> String {
        format_distance(self.distance_meters)
    }

    /// Duration rendered as `1분 미만` or `약 N분`.
    #[must_use]
    pub fn duration_text(&self) -> String {
        format_minutes(self.duration_minutes)
    }
}

/// Mode-selection rule applied by a [`TravelEstimator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum EstimationPolicy {
    /// Walk up to [`WALK_THRESHOLD_METERS`], drive beyond.
    #[default]
    WalkOrDrive,
    /// Always drive. Used when the estimate stands in for a car route.
    DriveOnly,
}

impl fmt::Display for EstimationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::WalkOrDrive => "walk-or-drive",
            Self::DriveOnly => "drive-only",
        })
    }
}

impl std::str::FromStr for EstimationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "walk-or-drive" => Ok(Self::WalkOrDrive),
            "drive-only" => Ok(Self::DriveOnly),
            _ => Err(format!("unknown estimation policy '{s}'")),
        }
    }
}

/// Pure estimator turning distances into [`TravelEstimate`] values.
///
/// # Examples
/// ```
/// use culturemap_core::{EstimationPolicy, TransportMode, TravelEstimator};
///
/// let estimator = TravelEstimator::new(EstimationPolicy::WalkOrDrive);
/// let walk = estimator.estimate_for_distance(100.0);
/// assert_eq!(walk.transport_mode, TransportMode::Walk);
/// assert_eq!(walk.duration_minutes, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TravelEstimator {
    policy: EstimationPolicy,
}

impl TravelEstimator {
    /// Create an estimator applying `policy`.
    #[must_use]
    pub const fn new(policy: EstimationPolicy) -> Self {
        Self { policy }
    }

    /// The configured policy.
    #[must_use]
    pub const fn policy(&self) -> EstimationPolicy {
        self.policy
    }

    /// Estimate travel between two optional points.
    ///
    /// Returns `None` when either point is missing.
    #[must_use]
    pub fn estimate(&self, a: Option<&GeoPoint>, b: Option<&GeoPoint>) -> Option<TravelEstimate> {
        let (a, b) = a.zip(b)?;
        Some(self.estimate_for_distance(distance_meters(a, b)))
    }

    /// Estimate travel for an already computed distance.
    #[must_use]
    pub fn estimate_for_distance(&self, distance_meters: f64) -> TravelEstimate {
        let transport_mode = self.select_mode(distance_meters);
        let label = match self.policy {
            EstimationPolicy::WalkOrDrive => transport_mode.label(),
            EstimationPolicy::DriveOnly => DRIVE_LABEL,
        };
        TravelEstimate {
            distance_meters,
            transport_mode,
            duration_minutes: duration_minutes(transport_mode, distance_meters),
            label: label.to_owned(),
        }
    }

    fn select_mode(&self, distance_meters: f64) -> TransportMode {
        match self.policy {
            EstimationPolicy::WalkOrDrive if distance_meters <= WALK_THRESHOLD_METERS => {
                TransportMode::Walk
            }
            EstimationPolicy::WalkOrDrive | EstimationPolicy::DriveOnly => TransportMode::Drive,
        }
    }
}

/// Whole minutes to cover `distance_meters` in `mode`, floors applied.
///
/// # Examples
/// ```
/// use culturemap_core::{TransportMode, duration_minutes};
///
/// assert_eq!(duration_minutes(TransportMode::Walk, 1_000.0), 15);
/// assert_eq!(duration_minutes(TransportMode::Drive, 1_600.0), 5);
/// assert_eq!(duration_minutes(TransportMode::Drive, 15_000.0), 30);
/// ```
#[must_use]
pub fn duration_minutes(mode: TransportMode, distance_meters: f64) -> u32 {
    let distance_km = distance_meters / 1_000.0;
    match mode {
        TransportMode::Walk => {
            let raw = round_minutes(distance_km / WALK_SPEED_KMH * 60.0);
            raw.max(WALK_MIN_MINUTES)
        }
        TransportMode::Drive => {
            let raw = round_minutes(distance_km / DRIVE_SPEED_KMH * 60.0);
            raw.max(drive_floor_minutes(distance_km))
        }
    }
}

/// Minimum drive duration, covering departure and signal waits.
#[must_use]
pub fn drive_floor_minutes(distance_km: f64) -> u32 {
    if distance_km <= 2.0 {
        5
    } else if distance_km <= 5.0 {
        8
    } else {
        10
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "minutes are rounded and clamped to the u32 range first"
)]
fn round_minutes(minutes: f64) -> u32 {
    if minutes.is_nan() || minutes <= 0.0 {
        return 0;
    }
    let rounded = minutes.round();
    if rounded >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        rounded as u32
    }
}

/// Estimate travel between two optional points using the walk-or-drive rule.
///
/// # Examples
/// ```
/// use culturemap_core::{GeoPoint, TransportMode, estimate};
///
/// let a = GeoPoint::new(37.5665, 126.9780);
/// let b = GeoPoint::new(37.5700, 126.9920);
/// let leg = estimate(Some(&a), Some(&b)).expect("both points present");
/// assert_eq!(leg.transport_mode, TransportMode::Walk);
/// assert!(estimate(Some(&a), None).is_none());
/// ```
#[must_use]
pub fn estimate(a: Option<&GeoPoint>, b: Option<&GeoPoint>) -> Option<TravelEstimate> {
    TravelEstimator::default().estimate(a, b)
}
