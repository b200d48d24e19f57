//! Challenge use cases - enroll, complete-day, and state queries.
//!
//! The service is stateless over a stateful store: each call loads the
//! enrollment, derives unlock/progress state from the injected clock, and
//! persists only the completion facts. Mutations are serialized per
//! (user, program) key so concurrent devices cannot drop each other's
//! completions.

mod complete_day;
mod enroll;
mod get_state;
pub mod types;

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use cadence_domain::{ProgramId, UserId};

use crate::infrastructure::ports::{ClockPort, EnrollmentRepo, ProgramCatalog};

pub use complete_day::CompleteDay;
pub use enroll::Enroll;
pub use get_state::GetState;
pub use types::{ChallengeError, ChallengeState, ChallengeStatus, DayView, NextUnlock};

/// Per-(user, program) mutation locks.
///
/// Single-writer-per-key: `enroll` and `complete_day` hold the key's lock
/// across their read-modify-write. Reads take no lock - the union-based
/// unlock policy makes stale reads benign.
#[derive(Default)]
pub struct EnrollmentLocks {
    locks: DashMap<(UserId, ProgramId), Arc<Mutex<()>>>,
}

impl EnrollmentLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get (or create) the lock for one enrollment key.
    pub fn for_key(&self, user_id: UserId, program_id: ProgramId) -> Arc<Mutex<()>> {
        self.locks
            .entry((user_id, program_id))
            .or_default()
            .clone()
    }
}

/// Bundle of the challenge use cases, sharing one lock table.
pub struct ChallengeUseCases {
    pub enroll: Enroll,
    pub complete_day: CompleteDay,
    pub get_state: GetState,
}

impl ChallengeUseCases {
    pub fn new(
        enrollments: Arc<dyn EnrollmentRepo>,
        catalog: Arc<dyn ProgramCatalog>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        let locks = Arc::new(EnrollmentLocks::new());
        Self {
            enroll: Enroll::new(
                enrollments.clone(),
                catalog.clone(),
                clock.clone(),
                locks.clone(),
            ),
            complete_day: CompleteDay::new(
                enrollments.clone(),
                catalog.clone(),
                clock.clone(),
                locks,
            ),
            get_state: GetState::new(enrollments, catalog, clock),
        }
    }
}
