//! Hybrid drip unlock policy.
//!
//! Which days of a program are open at a given instant. A day unlocks when
//! ANY of these holds:
//!
//! 1. Time gate: `elapsed_days + 1` days are open, counting from
//!    `started_at` in whole 24h steps (day 1 opens at enrollment).
//! 2. Prerequisite rule: a day whose spec is
//!    [`UnlockRule::ScheduledOrPrerequisite`] opens once its prerequisite
//!    day is completed, regardless of the calendar.
//! 3. Soft completion gate: completing day `d` opens day `d + 1`, so
//!    catching up faster than real time is always allowed.
//!
//! The result is a pure function of `(program, enrollment, now)`. Because
//! `completed_days` only grows and conditions are OR-ed (never replaced),
//! the unlocked set is monotone over time - a day never re-locks, even if
//! the clock moves backward.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{Enrollment, ProgramDefinition, UnlockRule};

/// Render state of a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    Locked,
    Unlocked,
    Completed,
}

/// Whole days elapsed since `started_at`, clamped to zero.
///
/// The clamp absorbs clock skew (`now < started_at`) so the policy never
/// produces a negative-unlock artifact; callers that want to log the skew
/// can compare the raw timestamps themselves.
pub fn elapsed_days(started_at: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
    let days = (now - started_at).num_days();
    days.max(0).min(u32::MAX as i64) as u32
}

/// When the time gate for `day` opens: `started_at + (day - 1) * 24h`.
pub fn day_unlock_at(started_at: DateTime<Utc>, day: u32) -> DateTime<Utc> {
    started_at + Duration::hours(24 * i64::from(day.saturating_sub(1)))
}

/// Compute the set of unlocked days for an enrollment at `now`.
///
/// Returns the empty set until the enrollment has started. Once started,
/// day 1 is always in the set.
pub fn unlocked_days(
    program: &ProgramDefinition,
    enrollment: &Enrollment,
    now: DateTime<Utc>,
) -> BTreeSet<u32> {
    let Some(started_at) = enrollment.started_at() else {
        return BTreeSet::new();
    };

    let duration = program.duration_days();
    let mut unlocked = BTreeSet::new();

    // Time gate: day 1 opens at elapsed_days = 0.
    let by_time = elapsed_days(started_at, now).saturating_add(1).min(duration);
    unlocked.extend(1..=by_time);

    // Prerequisite rules on day specs (canonically: only the final day).
    for day in program.days() {
        if let UnlockRule::ScheduledOrPrerequisite { prerequisite_day } = day.unlock_rule() {
            if enrollment.is_day_completed(prerequisite_day) {
                unlocked.insert(day.day_index());
            }
        }
    }

    // Soft gate: completion of d opens d + 1. Completion-driven, not
    // visitation-driven - completing day 2 after an absence still opens 3.
    for &completed in enrollment.completed_days() {
        if completed < duration {
            unlocked.insert(completed + 1);
        }
    }

    unlocked
}

impl DayStatus {
    /// Classify one day from the completion set and the unlocked set.
    pub fn classify(day: u32, completed: &BTreeSet<u32>, unlocked: &BTreeSet<u32>) -> Self {
        if completed.contains(&day) {
            DayStatus::Completed
        } else if unlocked.contains(&day) {
            DayStatus::Unlocked
        } else {
            DayStatus::Locked
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{ProgramId, UserId};
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).single().expect("valid")
    }

    fn program() -> ProgramDefinition {
        ProgramDefinition::fixed("7-Day Challenge", 7).expect("valid")
    }

    fn enrollment() -> Enrollment {
        Enrollment::started(UserId::new(), ProgramId::new(), t0())
    }

    #[test]
    fn nothing_unlocked_before_start() {
        let program = program();
        let enrollment = Enrollment::new(UserId::new(), ProgramId::new());
        assert!(unlocked_days(&program, &enrollment, t0()).is_empty());
    }

    #[test]
    fn day_one_unlocks_at_enrollment() {
        let program = program();
        let enrollment = enrollment();
        let unlocked = unlocked_days(&program, &enrollment, t0());
        assert_eq!(unlocked, BTreeSet::from([1]));
    }

    #[test]
    fn time_gate_opens_one_day_per_24h() {
        let program = program();
        let enrollment = enrollment();
        let unlocked = unlocked_days(&program, &enrollment, t0() + Duration::hours(25));
        assert_eq!(unlocked, BTreeSet::from([1, 2]));

        let unlocked = unlocked_days(&program, &enrollment, t0() + Duration::hours(23));
        assert_eq!(unlocked, BTreeSet::from([1]));
    }

    #[test]
    fn time_gate_caps_at_duration() {
        let program = program();
        let enrollment = enrollment();
        let unlocked = unlocked_days(&program, &enrollment, t0() + Duration::days(30));
        assert_eq!(unlocked.len(), 7);
        assert!(unlocked.contains(&7));
    }

    #[test]
    fn completing_a_day_unlocks_the_next_immediately() {
        let program = program();
        let mut enrollment = enrollment();
        enrollment.mark_completed(1);
        let unlocked = unlocked_days(&program, &enrollment, t0() + Duration::hours(2));
        assert!(unlocked.contains(&2));
        assert!(!unlocked.contains(&3));
    }

    #[test]
    fn soft_gate_is_completion_driven_not_visitation_driven() {
        // Returning after an absence and completing day 2 (never day 1)
        // still opens day 3.
        let program = program();
        let mut enrollment = enrollment();
        enrollment.mark_completed(2);
        let unlocked = unlocked_days(&program, &enrollment, t0());
        assert!(unlocked.contains(&3));
    }

    #[test]
    fn final_day_unlocks_early_via_prerequisite() {
        // Completing day 6 opens day 7 at elapsed time zero.
        let program = program();
        let mut enrollment = enrollment();
        enrollment.mark_completed(6);
        let unlocked = unlocked_days(&program, &enrollment, t0());
        assert!(unlocked.contains(&7));
    }

    #[test]
    fn earlier_days_have_no_prerequisite_shortcut() {
        // Completing day 3 opens day 4 (soft gate) but not day 5.
        let program = program();
        let mut enrollment = enrollment();
        enrollment.mark_completed(3);
        let unlocked = unlocked_days(&program, &enrollment, t0());
        assert!(unlocked.contains(&4));
        assert!(!unlocked.contains(&5));
    }

    #[test]
    fn clock_skew_clamps_to_day_one() {
        let program = program();
        let enrollment = enrollment();
        let unlocked = unlocked_days(&program, &enrollment, t0() - Duration::hours(48));
        assert_eq!(unlocked, BTreeSet::from([1]));
    }

    #[test]
    fn unlocked_set_is_monotone_over_time() {
        let program = program();
        let mut enrollment = enrollment();
        enrollment.mark_completed(1);
        enrollment.mark_completed(2);

        let mut previous = BTreeSet::new();
        for hours in [0i64, 12, 24, 48, 72, 96, 120, 144, 168, 240] {
            let current = unlocked_days(&program, &enrollment, t0() + Duration::hours(hours));
            assert!(
                previous.is_subset(&current),
                "unlock set shrank between steps at +{hours}h"
            );
            previous = current;
        }
    }

    #[test]
    fn day_status_classification() {
        let program = program();
        let mut enrollment = enrollment();
        enrollment.mark_completed(1);
        let now = t0() + Duration::hours(2);
        let unlocked = unlocked_days(&program, &enrollment, now);
        let completed = enrollment.completed_days();
        assert_eq!(DayStatus::classify(1, completed, &unlocked), DayStatus::Completed);
        assert_eq!(DayStatus::classify(2, completed, &unlocked), DayStatus::Unlocked);
        assert_eq!(DayStatus::classify(3, completed, &unlocked), DayStatus::Locked);
    }

    #[test]
    fn day_unlock_at_formula() {
        assert_eq!(day_unlock_at(t0(), 1), t0());
        assert_eq!(day_unlock_at(t0(), 4), t0() + Duration::hours(72));
    }
}
