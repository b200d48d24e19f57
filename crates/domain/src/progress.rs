//! Progress aggregation.
//!
//! Derives the summary every surface renders from: completed count, percent
//! complete, current day, and the encouragement tier. The underlying ratio
//! stays exact; rounding happens once, at the display accessor.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Discrete encouragement bucket over the completion fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncouragementTier {
    NotStarted,
    Early,
    Midway,
    NearlyDone,
    Complete,
}

/// Fractional cutoffs between tiers.
///
/// Fractions of `completed / duration`, not day counts, so the same
/// breakpoints work for any program length. Defaults match the observed
/// 7-day product (midway at 3/7, nearly-done at 5/7).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierBreakpoints {
    pub midway: f64,
    pub nearly_done: f64,
}

impl Default for TierBreakpoints {
    fn default() -> Self {
        Self {
            midway: 3.0 / 7.0,
            nearly_done: 5.0 / 7.0,
        }
    }
}

impl TierBreakpoints {
    /// Bucket a completion fraction.
    pub fn tier(&self, completed_count: u32, duration_days: u32, fraction: f64) -> EncouragementTier {
        if completed_count == 0 {
            EncouragementTier::NotStarted
        } else if completed_count >= duration_days {
            EncouragementTier::Complete
        } else if fraction >= self.nearly_done {
            EncouragementTier::NearlyDone
        } else if fraction >= self.midway {
            EncouragementTier::Midway
        } else {
            EncouragementTier::Early
        }
    }
}

/// Derived progress statistics for one enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    completed_count: u32,
    duration_days: u32,
    current_day: u32,
    percent_complete: u32,
    tier: EncouragementTier,
}

impl ProgressSummary {
    /// Compute the summary from the completion set and the unlocked set.
    ///
    /// `current_day` is the smallest unlocked day not yet completed; once
    /// that set is empty (including full completion) it pins to the final
    /// day.
    pub fn compute(
        completed_days: &BTreeSet<u32>,
        unlocked_days: &BTreeSet<u32>,
        duration_days: u32,
        breakpoints: TierBreakpoints,
    ) -> Self {
        let completed_count = completed_days.len() as u32;
        let fraction = Self::fraction_of(completed_count, duration_days);
        let current_day = unlocked_days
            .iter()
            .copied()
            .find(|day| !completed_days.contains(day))
            .unwrap_or(duration_days);

        Self {
            completed_count,
            duration_days,
            current_day,
            percent_complete: (fraction * 100.0).round() as u32,
            tier: breakpoints.tier(completed_count, duration_days, fraction),
        }
    }

    fn fraction_of(completed_count: u32, duration_days: u32) -> f64 {
        if duration_days == 0 {
            return 0.0;
        }
        f64::from(completed_count) / f64::from(duration_days)
    }

    // === Accessors ===

    pub fn completed_count(&self) -> u32 {
        self.completed_count
    }

    pub fn duration_days(&self) -> u32 {
        self.duration_days
    }

    pub fn current_day(&self) -> u32 {
        self.current_day
    }

    /// Exact completion ratio in `0.0..=1.0`.
    pub fn fraction(&self) -> f64 {
        Self::fraction_of(self.completed_count, self.duration_days)
    }

    /// Completion percentage rounded to the nearest integer for display.
    pub fn percent_complete(&self) -> u32 {
        self.percent_complete
    }

    pub fn tier(&self) -> EncouragementTier {
        self.tier
    }

    pub fn is_complete(&self) -> bool {
        self.duration_days > 0 && self.completed_count >= self.duration_days
    }
}
