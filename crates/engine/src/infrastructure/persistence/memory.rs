//! In-memory storage adapters.
//!
//! Reference implementations of the storage ports: a dashmap-backed
//! enrollment store with a revision compare-and-swap, and a fixed program
//! catalog. Production deployments swap these behind the same ports.

use async_trait::async_trait;
use dashmap::DashMap;

use cadence_domain::{Enrollment, ProgramDefinition, ProgramId, UserId};

use crate::infrastructure::ports::{EnrollmentRepo, ProgramCatalog, RepoError};

/// Enrollment store backed by a concurrent map.
///
/// `save` enforces the revision contract: the incoming enrollment must carry
/// the revision of the record it was loaded from (or 0 for a fresh record).
/// The stored copy gets the bumped revision, so a stale writer fails with
/// [`RepoError::Conflict`] instead of silently dropping a concurrent
/// completion.
#[derive(Default)]
pub struct InMemoryEnrollmentRepo {
    records: DashMap<(UserId, ProgramId), Enrollment>,
}

impl InMemoryEnrollmentRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EnrollmentRepo for InMemoryEnrollmentRepo {
    async fn get(
        &self,
        user_id: UserId,
        program_id: ProgramId,
    ) -> Result<Option<Enrollment>, RepoError> {
        Ok(self
            .records
            .get(&(user_id, program_id))
            .map(|record| record.clone()))
    }

    async fn save(&self, enrollment: &Enrollment) -> Result<(), RepoError> {
        let key = (enrollment.user_id(), enrollment.program_id());
        // Entry API holds the shard lock across the check-and-store, making
        // the compare-and-swap atomic.
        match self.records.entry(key) {
            dashmap::mapref::entry::Entry::Occupied(mut occupied) => {
                if occupied.get().revision() != enrollment.revision() {
                    return Err(RepoError::conflict(
                        "Enrollment",
                        format!("{}/{}", key.0, key.1),
                    ));
                }
                let next = enrollment.clone().with_revision(enrollment.revision() + 1);
                occupied.insert(next);
            }
            dashmap::mapref::entry::Entry::Vacant(vacant) => {
                if enrollment.revision() != 0 {
                    return Err(RepoError::conflict(
                        "Enrollment",
                        format!("{}/{}", key.0, key.1),
                    ));
                }
                vacant.insert(enrollment.clone().with_revision(1));
            }
        }
        Ok(())
    }
}

/// Fixed set of program definitions, keyed by id.
pub struct StaticProgramCatalog {
    programs: DashMap<ProgramId, ProgramDefinition>,
}

impl StaticProgramCatalog {
    pub fn new(programs: impl IntoIterator<Item = ProgramDefinition>) -> Self {
        let map = DashMap::new();
        for program in programs {
            map.insert(program.id(), program);
        }
        Self { programs: map }
    }
}

#[async_trait]
impl ProgramCatalog for StaticProgramCatalog {
    async fn get(&self, program_id: ProgramId) -> Result<Option<ProgramDefinition>, RepoError> {
        Ok(self.programs.get(&program_id).map(|p| p.clone()))
    }
}
