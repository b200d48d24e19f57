//! Get-state use case - the single consistent snapshot for rendering.

use std::sync::Arc;

use cadence_domain::{ProgramId, UserId};

use crate::infrastructure::ports::{ClockPort, EnrollmentRepo, ProgramCatalog};

use super::types::{ChallengeError, ChallengeState};

/// Read-only query deriving the full challenge view from the current
/// instant. Nothing is cached between calls: "now" is part of the input, so
/// a stale snapshot would be wrong by construction.
pub struct GetState {
    enrollments: Arc<dyn EnrollmentRepo>,
    catalog: Arc<dyn ProgramCatalog>,
    clock: Arc<dyn ClockPort>,
}

impl GetState {
    pub fn new(
        enrollments: Arc<dyn EnrollmentRepo>,
        catalog: Arc<dyn ProgramCatalog>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            enrollments,
            catalog,
            clock,
        }
    }

    pub async fn execute(
        &self,
        user_id: UserId,
        program_id: ProgramId,
    ) -> Result<ChallengeState, ChallengeError> {
        let program = self
            .catalog
            .get(program_id)
            .await?
            .ok_or(ChallengeError::ProgramNotFound(program_id))?;

        let now = self.clock.now();
        let Some(enrollment) = self.enrollments.get(user_id, program_id).await? else {
            return Ok(ChallengeState::not_enrolled(&program, now));
        };

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

        Ok(ChallengeState::derive(&program, &enrollment, now))
    }
}
