//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is
//! concrete types. Ports exist for:
//! - Enrollment storage (could swap in-memory -> Postgres/Redis)
//! - Program catalog (read-only authored configuration)
//! - Clock (for testing - simulate elapsed days without sleeping)

mod error;
mod repos;
mod testing;

pub use error::RepoError;
pub use repos::{EnrollmentRepo, ProgramCatalog};
pub use testing::ClockPort;

#[cfg(test)]
pub use repos::{MockEnrollmentRepo, MockProgramCatalog};
#[cfg(test)]
pub use testing::MockClockPort;
