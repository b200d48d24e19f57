//! View types and errors for the challenge use-case area.
//!
//! `ChallengeState` is the single snapshot every surface renders from. It is
//! derived fresh from `(program, enrollment, now)` on each query so no stale
//! unlock state ever crosses a request boundary.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use cadence_domain::{
    day_unlock_at, unlocked_days, Countdown, DayStatus, Enrollment, EnrollmentStatus,
    ProgramDefinition, ProgramId, ProgressSummary, TierBreakpoints,
};

use crate::infrastructure::ports::RepoError;

/// Errors surfaced by the challenge use cases.
#[derive(Debug, thiserror::Error)]
pub enum ChallengeError {
    /// Day index outside program bounds - a caller bug, never retried.
    #[error("day {day} is out of range for a {duration_days}-day program")]
    InvalidDay { day: u32, duration_days: u32 },

    /// Attempt to complete a day that is still locked. Recoverable: the UI
    /// shows the locked state (countdown or "complete the previous day").
    #[error("day {day} is locked")]
    DayLocked { day: u32 },

    /// Operation requires an enrollment that does not exist.
    #[error("not enrolled in program {0}")]
    NotEnrolled(ProgramId),

    /// Program id unknown to the catalog.
    #[error("program not found: {0}")]
    ProgramNotFound(ProgramId),

    /// Storage failure; the whole operation may be retried (all operations
    /// are idempotent).
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Overall enrollment status as rendered by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeStatus {
    NotEnrolled,
    InProgress,
    Completed,
}

impl From<EnrollmentStatus> for ChallengeStatus {
    fn from(status: EnrollmentStatus) -> Self {
        match status {
            EnrollmentStatus::NotStarted => ChallengeStatus::NotEnrolled,
            EnrollmentStatus::InProgress => ChallengeStatus::InProgress,
            EnrollmentStatus::Completed => ChallengeStatus::Completed,
        }
    }
}

/// One day as rendered in the program overview.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayView {
    pub day_index: u32,
    pub title: String,
    pub status: DayStatus,
    pub requires_live_session: bool,
    pub is_decision_day: bool,
    /// When the time gate for this day opens. Absent until enrollment.
    pub unlocks_at: Option<DateTime<Utc>>,
}

/// Countdown to the next time-gated unlock.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextUnlock {
    pub day: u32,
    pub countdown: Countdown,
}

/// Consistent snapshot of one user's state in one program.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeState {
    pub program_id: ProgramId,
    pub status: ChallengeStatus,
    pub started_at: Option<DateTime<Utc>>,
    pub days: Vec<DayView>,
    pub unlocked_days: BTreeSet<u32>,
    pub completed_days: BTreeSet<u32>,
    pub progress: ProgressSummary,
    /// Countdown to the earliest locked day, when its gate is time-based.
    pub next_unlock: Option<NextUnlock>,
}

impl ChallengeState {
    /// Derive the full snapshot for an enrollment at `now`.
    pub fn derive(program: &ProgramDefinition, enrollment: &Enrollment, now: DateTime<Utc>) -> Self {
        let unlocked = unlocked_days(program, enrollment, now);
        let completed = enrollment.completed_days().clone();
        let progress = ProgressSummary::compute(
            &completed,
            &unlocked,
            program.duration_days(),
            TierBreakpoints::default(),
        );

        let days = program
            .days()
            .iter()
            .map(|spec| {
                let status = DayStatus::classify(spec.day_index(), &completed, &unlocked);
                DayView {
                    day_index: spec.day_index(),
                    title: spec.title().to_string(),
                    status,
                    requires_live_session: spec.requires_live_session(),
                    is_decision_day: spec.is_decision_day(),
                    unlocks_at: enrollment
                        .started_at()
                        .map(|started| day_unlock_at(started, spec.day_index())),
                }
            })
            .collect();

        let next_unlock = enrollment.started_at().and_then(|started| {
            let next_locked = (1..=program.duration_days()).find(|day| !unlocked.contains(day))?;
            let delay = Duration::hours(24 * i64::from(next_locked - 1));
            let countdown = Countdown::from_anchor(started, delay, now)?;
            Some(NextUnlock {
                day: next_locked,
                countdown,
            })
        });

        Self {
            program_id: program.id(),
            status: enrollment.status(program.duration_days()).into(),
            started_at: enrollment.started_at(),
            days,
            unlocked_days: unlocked,
            completed_days: completed,
            progress,
            next_unlock,
        }
    }

    /// Snapshot for a user with no enrollment: everything locked, zero
    /// progress, no countdown. The funnel renders from the same type.
    pub fn not_enrolled(program: &ProgramDefinition, now: DateTime<Utc>) -> Self {
        let enrollment = Enrollment::new(cadence_domain::UserId::new(), program.id());
        let mut state = Self::derive(program, &enrollment, now);
        state.status = ChallengeStatus::NotEnrolled;
        state
    }

    /// Render status of a single day, if it exists in the program.
    pub fn day_status(&self, day: u32) -> Option<DayStatus> {
        self.days
            .iter()
            .find(|view| view.day_index == day)
            .map(|view| view.status)
    }
}
