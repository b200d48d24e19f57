//! Repository port traits for enrollment storage and program configuration.

use async_trait::async_trait;
use cadence_domain::{Enrollment, ProgramDefinition, ProgramId, UserId};

use super::error::RepoError;

/// Durable storage for enrollments, keyed by (user, program).
///
/// `save` is a compare-and-swap on the enrollment's revision: adapters must
/// reject a write whose revision does not match the stored record with
/// [`RepoError::Conflict`]. Use cases serialize mutations per key, so a
/// conflict normally means two processes share one store; the operations are
/// idempotent, so reload-and-retry is safe.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentRepo: Send + Sync {
    async fn get(
        &self,
        user_id: UserId,
        program_id: ProgramId,
    ) -> Result<Option<Enrollment>, RepoError>;

    async fn save(&self, enrollment: &Enrollment) -> Result<(), RepoError>;
}

/// Read-only catalog of authored program definitions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProgramCatalog: Send + Sync {
    async fn get(&self, program_id: ProgramId) -> Result<Option<ProgramDefinition>, RepoError>;
}
