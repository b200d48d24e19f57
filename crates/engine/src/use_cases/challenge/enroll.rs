//! Enroll use case - start a user's run of a program.

use std::sync::Arc;

use cadence_domain::{Enrollment, ProgramId, UserId};

use crate::infrastructure::ports::{ClockPort, EnrollmentRepo, ProgramCatalog};

use super::types::ChallengeError;
use super::EnrollmentLocks;

/// Enrolls a user in a program, setting the drip anchor (`started_at`).
///
/// Idempotent: enrolling an already-started user returns the existing
/// record unchanged, keeping the original start time.
pub struct Enroll {
    enrollments: Arc<dyn EnrollmentRepo>,
    catalog: Arc<dyn ProgramCatalog>,
    clock: Arc<dyn ClockPort>,
    locks: Arc<EnrollmentLocks>,
}

impl Enroll {
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
    ) -> Result<Enrollment, ChallengeError> {
        let program = self
            .catalog
            .get(program_id)
            .await?
            .ok_or(ChallengeError::ProgramNotFound(program_id))?;

        let key_lock = self.locks.for_key(user_id, program_id);
        let _guard = key_lock.lock().await;

        if let Some(existing) = self.enrollments.get(user_id, program_id).await? {
            if existing.started_at().is_some() {
                tracing::debug!(
                    user_id = %user_id,
                    program_id = %program_id,
                    "Enroll requested but already started; returning existing enrollment"
                );
                return Ok(existing);
            }
            // Stored-but-unstarted record: start it in place.
            let mut enrollment = existing;
            enrollment.start(self.clock.now());
            self.enrollments.save(&enrollment).await?;
            return Ok(enrollment);
        }

        let now = self.clock.now();
        let enrollment = Enrollment::started(user_id, program_id, now);
        self.enrollments.save(&enrollment).await?;

        tracing::info!(
            user_id = %user_id,
            program_id = %program_id,
            duration_days = program.duration_days(),
            started_at = %now,
            "Enrolled user in program"
        );

        Ok(enrollment)
    }
}
