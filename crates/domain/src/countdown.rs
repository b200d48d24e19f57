//! Countdown math for time-gated unlocks.
//!
//! One implementation covers both gates in the product: "day N unlocks at
//! `started_at + (N - 1) * 24h`" and "feature unlocks 24h after a milestone
//! was completed". Both are the same `anchor + fixed_delay` shape, so the
//! calculator takes an arbitrary anchor and delay.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Remaining time until a scheduled unlock.
///
/// Holds the remaining duration rounded up to a whole second; the
/// hours/minutes split is derived on read so repeated queries never
/// compound rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Countdown {
    remaining_seconds: i64,
}

impl Countdown {
    /// Time remaining until `target`, or `None` once the target has passed.
    pub fn until(target: DateTime<Utc>, now: DateTime<Utc>) -> Option<Self> {
        let remaining = target - now;
        if remaining <= Duration::zero() {
            return None;
        }
        // Round up, never down: a sub-second remainder still counts as
        // locked time, so it must not collapse to zero.
        let remaining_seconds = ((remaining.num_milliseconds() + 999) / 1000).max(1);
        Some(Self { remaining_seconds })
    }

    /// Time remaining until `anchor + delay` - the shared gate shape.
    pub fn from_anchor(anchor: DateTime<Utc>, delay: Duration, now: DateTime<Utc>) -> Option<Self> {
        Self::until(anchor + delay, now)
    }

    /// Remaining duration, in whole seconds (rounded up at construction).
    pub fn remaining(&self) -> Duration {
        Duration::seconds(self.remaining_seconds)
    }

    /// Total minutes remaining, rounded up so the display never shows
    /// "0h 0m" while time actually remains.
    fn total_minutes(&self) -> i64 {
        (self.remaining_seconds + 59) / 60
    }

    /// Whole hours remaining.
    pub fn hours(&self) -> i64 {
        self.total_minutes() / 60
    }

    /// Minutes remaining after the whole hours. The round-up carries into
    /// the hours, so this never reports 60.
    pub fn minutes(&self) -> i64 {
        self.total_minutes() % 60
    }
}

impl std::fmt::Display for Countdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}h {}m", self.hours(), self.minutes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).single().expect("valid")
    }

    #[test]
    fn none_once_target_passed() {
        assert_eq!(Countdown::until(t0(), t0()), None);
        assert_eq!(Countdown::until(t0(), t0() + Duration::minutes(1)), None);
    }

    #[test]
    fn splits_hours_and_minutes() {
        let countdown =
            Countdown::until(t0() + Duration::hours(22) + Duration::minutes(30), t0())
                .expect("in the future");
        assert_eq!(countdown.hours(), 22);
        assert_eq!(countdown.minutes(), 30);
        assert_eq!(countdown.to_string(), "22h 30m");
    }

    #[test]
    fn sub_minute_remainder_rounds_up() {
        let countdown = Countdown::until(t0() + Duration::seconds(30), t0()).expect("in the future");
        assert_eq!(countdown.hours(), 0);
        assert_eq!(countdown.minutes(), 1);
    }

    #[test]
    fn minute_round_up_carries_into_hours() {
        // 1h 59m 59s: the rounded-up minute must roll over, not read 60.
        let countdown =
            Countdown::until(t0() + Duration::seconds(7_199), t0()).expect("in the future");
        assert_eq!(countdown.hours(), 2);
        assert_eq!(countdown.minutes(), 0);
        assert_eq!(countdown.to_string(), "2h 0m");
    }

    #[test]
    fn sub_second_remainder_still_counts_down() {
        // Under a second left is still locked time; it must not display
        // "0h 0m".
        let countdown =
            Countdown::until(t0() + Duration::milliseconds(400), t0()).expect("in the future");
        assert_eq!(countdown.remaining(), Duration::seconds(1));
        assert_eq!(countdown.hours(), 0);
        assert_eq!(countdown.minutes(), 1);
        assert_eq!(countdown.to_string(), "0h 1m");
    }

    #[test]
    fn anchor_plus_delay_matches_until() {
        // The prerequisite-plus-cooldown gate: 24h after a milestone.
        let milestone_completed_at = t0();
        let now = t0() + Duration::hours(10);
        let countdown =
            Countdown::from_anchor(milestone_completed_at, Duration::hours(24), now)
                .expect("in the future");
        assert_eq!(countdown.remaining(), Duration::hours(14));
    }

    #[test]
    fn exact_remaining_is_preserved() {
        let countdown =
            Countdown::until(t0() + Duration::seconds(3_661), t0()).expect("in the future");
        assert_eq!(countdown.remaining(), Duration::seconds(3_661));
        assert_eq!(countdown.hours(), 1);
        assert_eq!(countdown.minutes(), 2);
    }
}
