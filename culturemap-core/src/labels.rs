//! Display strings for distances and durations.
//!
//! Labels are Korean, matching the itinerary views they feed.

/// Label used when a duration rounds to less than one minute.
pub const UNDER_A_MINUTE: &str = "1분 미만";

/// Round half away from zero, then clamp into `u64`.
///
/// Negative and NaN input yields `0`.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is rounded and clamped to the u64 range first"
)]
fn round_to_u64(value: f64) -> u64 {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    let rounded = value.round();
    if rounded >= u64::MAX as f64 {
        u64::MAX
    } else {
        rounded as u64
    }
}

/// Render a distance as whole metres below one kilometre, else kilometres with
/// one decimal.
///
/// # Examples
/// ```
/// use culturemap_core::format_distance;
///
/// assert_eq!(format_distance(123.4), "123m");
/// assert_eq!(format_distance(1_500.0), "1.5km");
/// assert_eq!(format_distance(1_250.0), "1.3km");
/// ```
#[must_use]
pub fn format_distance(meters: f64) -> String {
    if meters < 1_000.0 {
        return format!("{}m", round_to_u64(meters));
    }
    // Tenths of a kilometre, rounded half-up on the metre value. Formatting
    // the kilometre float with `{:.1}` would render 1150 m as "1.1km".
    let tenths = round_to_u64(meters / 100.0);
    format!("{}.{}km", tenths / 10, tenths % 10)
}

/// Render a whole-minute duration.
///
/// # Examples
/// ```
/// use culturemap_core::format_minutes;
///
/// assert_eq!(format_minutes(0), "1분 미만");
/// assert_eq!(format_minutes(12), "약 12분");
/// ```
#[must_use]
pub fn format_minutes(minutes: u32) -> String {
    if minutes < 1 {
        UNDER_A_MINUTE.to_owned()
    } else {
        format!("약 {minutes}분")
    }
}

/// Render a duration in seconds, switching to hours past sixty minutes.
///
/// Routed legs report seconds; the minute count is rounded before the hour
/// split.
///
/// # Examples
/// ```
/// use culturemap_core::format_duration_seconds;
///
/// assert_eq!(format_duration_seconds(20.0), "1분 미만");
/// assert_eq!(format_duration_seconds(1_500.0), "약 25분");
/// assert_eq!(format_duration_seconds(7_200.0), "약 2시간");
/// assert_eq!(format_duration_seconds(5_430.0), "약 1시간 31분");
/// ```
#[must_use]
pub fn format_duration_seconds(seconds: f64) -> String {
    let minutes = round_to_u64(seconds / 60.0);
    if minutes < 1 {
        return UNDER_A_MINUTE.to_owned();
    }
    if minutes < 60 {
        return format!("약 {minutes}분");
    }
    let hours = minutes / 60;
    match minutes % 60 {
        0 => format!("약 {hours}시간"),
        remain => format!("약 {hours}시간 {remain}분"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, "0m")]
    #[case(999.4, "999m")]
    #[case(1_000.0, "1.0km")]
    #[case(1_549.0, "1.5km")]
    #[case(1_550.0, "1.6km")]
    #[case(1_150.0, "1.2km")]
    #[case(2_250.0, "2.3km")]
    #[case(325_012.0, "325.0km")]
    fn formats_distances(#[case] meters: f64, #[case] expected: &str) {
        assert_eq!(format_distance(meters), expected);
    }

    #[rstest]
    fn rounds_up_to_the_kilometre_threshold_in_metres() {
        // Below one kilometre the metre count is shown even when it rounds to 1000.
        assert_eq!(format_distance(999.6), "1000m");
    }

    #[rstest]
    #[case(0, "1분 미만")]
    #[case(1, "약 1분")]
    #[case(75, "약 75분")]
    fn formats_minutes(#[case] minutes: u32, #[case] expected: &str) {
        assert_eq!(format_minutes(minutes), expected);
    }

    #[rstest]
    #[case(29.0, "1분 미만")]
    #[case(30.0, "약 1분")]
    #[case(3_540.0, "약 59분")]
    #[case(3_570.0, "약 1시간")]
    #[case(3_600.0, "약 1시간")]
    #[case(3_900.0, "약 1시간 5분")]
    #[case(f64::NAN, "1분 미만")]
    #[case(-120.0, "1분 미만")]
    fn formats_routed_durations(#[case] seconds: f64, #[case] expected: &str) {
        assert_eq!(format_duration_seconds(seconds), expected);
    }
}
