//! Enrollment entity - a user's durable progress record in one program
//!
//! Enrollments are append-only: created on enroll, grown by completions,
//! never deleted. Unlock state is deliberately not stored here - it is
//! derived from `started_at`, `completed_days`, and the current instant by
//! [`crate::drip`], so there is no stored snapshot to go stale.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{ProgramId, UserId};

/// Lifecycle state of an enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    NotStarted,
    InProgress,
    Completed,
}

/// A user's enrollment in a program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    user_id: UserId,
    program_id: ProgramId,
    started_at: Option<DateTime<Utc>>,
    completed_days: BTreeSet<u32>,
    /// Optimistic-concurrency token, bumped by the store on every save.
    #[serde(default)]
    revision: u64,
}

impl Enrollment {
    /// Create an enrollment record that has not started yet.
    pub fn new(user_id: UserId, program_id: ProgramId) -> Self {
        Self {
            user_id,
            program_id,
            started_at: None,
            completed_days: BTreeSet::new(),
            revision: 0,
        }
    }

    /// Create an enrollment started at the given instant.
    pub fn started(user_id: UserId, program_id: ProgramId, now: DateTime<Utc>) -> Self {
        let mut enrollment = Self::new(user_id, program_id);
        enrollment.start(now);
        enrollment
    }

    // === Accessors ===

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn program_id(&self) -> ProgramId {
        self.program_id
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn completed_days(&self) -> &BTreeSet<u32> {
        &self.completed_days
    }

    pub fn completed_count(&self) -> u32 {
        self.completed_days.len() as u32
    }

    pub fn is_day_completed(&self, day: u32) -> bool {
        self.completed_days.contains(&day)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Lifecycle state given the program duration.
    pub fn status(&self, duration_days: u32) -> EnrollmentStatus {
        if self.started_at.is_none() {
            EnrollmentStatus::NotStarted
        } else if self.is_program_completed(duration_days) {
            EnrollmentStatus::Completed
        } else {
            EnrollmentStatus::InProgress
        }
    }

    /// Whether every day of a `duration_days` program is completed.
    pub fn is_program_completed(&self, duration_days: u32) -> bool {
        duration_days > 0 && self.completed_count() >= duration_days
    }

    // === Mutations ===

    /// Mark the enrollment as started. Idempotent: a second call keeps the
    /// original start time.
    pub fn start(&mut self, now: DateTime<Utc>) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    /// Record a day as completed. Returns `true` if this call changed the
    /// set, `false` if the day was already completed (idempotent no-op).
    ///
    /// Bounds are the caller's responsibility; the service validates day
    /// indices against the program definition before calling this.
    pub fn mark_completed(&mut self, day: u32) -> bool {
        self.completed_days.insert(day)
    }

    /// Set the revision token. Called by the store, not by domain logic.
    pub fn with_revision(mut self, revision: u64) -> Self {
        self.revision = revision;
        self
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
    fn new_enrollment_is_not_started() {
        let enrollment = Enrollment::new(UserId::new(), ProgramId::new());
        assert_eq!(enrollment.started_at(), None);
        assert_eq!(enrollment.status(7), EnrollmentStatus::NotStarted);
        assert_eq!(enrollment.completed_count(), 0);
    }

    #[test]
    fn start_is_idempotent() {
        let mut enrollment = Enrollment::new(UserId::new(), ProgramId::new());
        enrollment.start(t0());
        let later = t0() + chrono::Duration::hours(5);
        enrollment.start(later);
        assert_eq!(enrollment.started_at(), Some(t0()));
    }

    #[test]
    fn mark_completed_is_idempotent() {
        let mut enrollment = Enrollment::started(UserId::new(), ProgramId::new(), t0());
        assert!(enrollment.mark_completed(3));
        assert!(!enrollment.mark_completed(3));
        assert_eq!(enrollment.completed_count(), 1);
        assert!(enrollment.is_day_completed(3));
    }

    #[test]
    fn status_transitions_to_completed() {
        let mut enrollment = Enrollment::started(UserId::new(), ProgramId::new(), t0());
        for day in 1..=7 {
            enrollment.mark_completed(day);
        }
        assert_eq!(enrollment.status(7), EnrollmentStatus::Completed);
        assert!(enrollment.is_program_completed(7));
    }

    #[test]
    fn in_progress_until_all_days_done() {
        let mut enrollment = Enrollment::started(UserId::new(), ProgramId::new(), t0());
        for day in 1..=6 {
            enrollment.mark_completed(day);
        }
        assert_eq!(enrollment.status(7), EnrollmentStatus::InProgress);
        assert!(!enrollment.is_program_completed(7));
    }
}
