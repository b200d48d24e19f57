//! Cadence domain layer.
//!
//! Pure types and policy for fixed-length drip programs: program
//! definitions, enrollments, the hybrid unlock policy, progress
//! aggregation, and countdown math. No I/O lives here - everything is a
//! function of stored facts plus a caller-supplied instant.

pub mod countdown;
pub mod drip;
pub mod entities;
pub mod error;
pub mod ids;
pub mod progress;

pub use entities::{DaySpec, Enrollment, EnrollmentStatus, ProgramDefinition, UnlockRule};

pub use error::DomainError;

pub use countdown::Countdown;
pub use drip::{day_unlock_at, elapsed_days, unlocked_days, DayStatus};
pub use progress::{EncouragementTier, ProgressSummary, TierBreakpoints};

pub use ids::{ProgramId, UserId};
