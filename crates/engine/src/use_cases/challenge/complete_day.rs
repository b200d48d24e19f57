//! Complete-day use case - record completion and open what it unlocks.

use std::sync::Arc;

use cadence_domain::{unlocked_days, Enrollment, ProgramId, UserId};

use crate::infrastructure::ports::{ClockPort, EnrollmentRepo, ProgramCatalog};

use super::types::ChallengeError;
use super::EnrollmentLocks;

/// Marks a day complete.
///
/// The unlock check runs against a freshly computed set at call time, never
/// a cached snapshot. Completing an already-completed day (or any day of an
/// already-finished program) is an idempotent no-op, so client retries and
/// optimistic UI reconciliation are safe.
pub struct CompleteDay {
    enrollments: Arc<dyn EnrollmentRepo>,
    catalog: Arc<dyn ProgramCatalog>,
    clock: Arc<dyn ClockPort>,
    locks: Arc<EnrollmentLocks>,
}

impl CompleteDay {
    pub fn new(
        enrollments: Arc<dyn EnrollmentRepo>,
        catalog: Arc<dyn ProgramCatalog>,
        clock: Arc<dyn ClockPort>,
        locks: Arc<EnrollmentLocks>,
    ) -> Self {
        Self {
            enrollments,
            catalog,
            clock,
            locks,
        }
    }

    pub async fn execute(
        &self,
        user_id: UserId,
        program_id: ProgramId,
        day: u32,
    ) -> Result<Enrollment, ChallengeError> {
        let program = self
            .catalog
            .get(program_id)
            .await?
            .ok_or(ChallengeError::ProgramNotFound(program_id))?;

        // Bounds are checked before any state is touched.
        if !program.contains_day(day) {
            return Err(ChallengeError::InvalidDay {
                day,
                duration_days: program.duration_days(),
            });
        }

        let key_lock = self.locks.for_key(user_id, program_id);
        let _guard = key_lock.lock().await;

        let mut enrollment = self
            .enrollments
            .get(user_id, program_id)
            .await?
            .ok_or(ChallengeError::NotEnrolled(program_id))?;

        if enrollment.is_day_completed(day) {
            return Ok(enrollment);
        }
        if enrollment.is_program_completed(program.duration_days()) {
            // Terminal state: nothing left to record.
            return Ok(enrollment);
        }

        let now = self.clock.now();
        if let Some(started_at) = enrollment.started_at() {
            if now < started_at {
                tracing::warn!(
                    user_id = %user_id,
                    program_id = %program_id,
                    started_at = %started_at,
                    now = %now,
                    "Clock skew detected: now precedes enrollment start; clamping elapsed time"
                );
            }
        }

        let unlocked = unlocked_days(&program, &enrollment, now);
        if !unlocked.contains(&day) {
            return Err(ChallengeError::DayLocked { day });
        }

        enrollment.mark_completed(day);
        self.enrollments.save(&enrollment).await?;

        tracing::info!(
            user_id = %user_id,
            program_id = %program_id,
            day,
            completed_count = enrollment.completed_count(),
            "Recorded day completion"
        );

        Ok(enrollment)
    }
}
