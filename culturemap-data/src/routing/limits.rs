//! Call quotas and usage counters for the directions API.

use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use culturemap_core::RateLimitScope;

const MINUTE: Duration = Duration::from_secs(60);
const SECONDS_PER_DAY: u64 = 86_400;

/// Days since the Unix epoch, in UTC.
pub(crate) fn current_utc_day() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs() / SECONDS_PER_DAY)
}

#[derive(Debug, Default)]
struct Windows {
    minute_started: Option<Instant>,
    minute_calls: u32,
    day: u64,
    day_calls: u32,
}

/// Fixed-window limiter with a 60-second window and a UTC-day window.
///
/// A rejected call does not consume budget in either window.
#[derive(Debug)]
pub struct RateLimiter {
    per_minute: u32,
    daily: u32,
    windows: Mutex<Windows>,
}

impl RateLimiter {
    /// Allow `per_minute` calls per window and `daily` calls per UTC day.
    #[must_use]
    pub fn new(per_minute: u32, daily: u32) -> Self {
        Self {
            per_minute,
            daily,
            windows: Mutex::new(Windows::default()),
        }
    }

    /// Reserve one call at `now` on UTC day `day`.
    ///
    /// # Errors
    ///
    /// Returns the exhausted [`RateLimitScope`], minute before day.
    pub fn try_acquire(&self, now: Instant, day: u64) -> Result<(), RateLimitScope> {
        let mut windows = self.windows.lock().unwrap_or_else(PoisonError::into_inner);

        let minute_expired = windows
            .minute_started
            .is_none_or(|started| now.saturating_duration_since(started) >= MINUTE);
        if minute_expired {
            windows.minute_started = Some(now);
            windows.minute_calls = 0;
        }
        if windows.day != day {
            windows.day = day;
            windows.day_calls = 0;
        }

        if windows.minute_calls >= self.per_minute {
            return Err(RateLimitScope::Minute);
        }
        if windows.day_calls >= self.daily {
            return Err(RateLimitScope::Day);
        }
        windows.minute_calls += 1;
        windows.day_calls += 1;
        Ok(())
    }
}

/// Snapshot of upstream calls that returned a route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageStats {
    /// Calls since the provider was built.
    pub total_calls: u64,
    /// Calls during the current UTC day.
    pub today_calls: u64,
}

#[derive(Debug, Default)]
struct UsageState {
    total: u64,
    day: u64,
    today: u64,
}

/// Thread-safe usage counters.
#[derive(Debug, Default)]
pub(crate) struct UsageCounter {
    state: Mutex<UsageState>,
}

impl UsageCounter {
    pub(crate) fn record(&self, day: u64) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.day != day {
            state.day = day;
            state.today = 0;
        }
        state.total += 1;
        state.today += 1;
    }

    pub(crate) fn snapshot(&self, day: u64) -> UsageStats {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        UsageStats {
            total_calls: state.total,
            today_calls: if state.day == day { state.today } else { 0 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const DAY: u64 = 20_000;

    #[rstest]
    fn minute_window_blocks_then_resets() {
        let limiter = RateLimiter::new(2, 100);
        let start = Instant::now();

        assert_eq!(limiter.try_acquire(start, DAY), Ok(()));
        assert_eq!(limiter.try_acquire(start, DAY), Ok(()));
        assert_eq!(
            limiter.try_acquire(start + Duration::from_secs(59), DAY),
            Err(RateLimitScope::Minute)
        );
        assert_eq!(
            limiter.try_acquire(start + Duration::from_secs(60), DAY),
            Ok(())
        );
    }

    #[rstest]
    fn daily_window_blocks_until_the_next_day() {
        let limiter = RateLimiter::new(100, 1);
        let now = Instant::now();

        assert_eq!(limiter.try_acquire(now, DAY), Ok(()));
        assert_eq!(limiter.try_acquire(now, DAY), Err(RateLimitScope::Day));
        assert_eq!(limiter.try_acquire(now, DAY + 1), Ok(()));
    }

    #[rstest]
    fn rejected_calls_do_not_consume_the_daily_budget() {
        let limiter = RateLimiter::new(1, 2);
        let now = Instant::now();

        assert_eq!(limiter.try_acquire(now, DAY), Ok(()));
        assert_eq!(limiter.try_acquire(now, DAY), Err(RateLimitScope::Minute));
        assert_eq!(limiter.try_acquire(now + MINUTE, DAY), Ok(()));
        assert_eq!(
            limiter.try_acquire(now + MINUTE * 2, DAY),
            Err(RateLimitScope::Day)
        );
    }

    #[rstest]
    fn zero_limit_rejects_everything() {
        let limiter = RateLimiter::new(0, 400);
        assert_eq!(
            limiter.try_acquire(Instant::now(), DAY),
            Err(RateLimitScope::Minute)
        );
    }

    #[rstest]
    fn usage_counts_reset_daily_but_total_does_not() {
        let usage = UsageCounter::default();
        usage.record(DAY);
        usage.record(DAY);
        assert_eq!(
            usage.snapshot(DAY),
            UsageStats {
                total_calls: 2,
                today_calls: 2
            }
        );
        assert_eq!(
            usage.snapshot(DAY + 1),
            UsageStats {
                total_calls: 2,
                today_calls: 0
            }
        );
        usage.record(DAY + 1);
        assert_eq!(usage.snapshot(DAY + 1).today_calls, 1);
        assert_eq!(usage.snapshot(DAY + 1).total_calls, 3);
    }
}
