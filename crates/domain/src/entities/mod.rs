//! Domain entities.

mod enrollment;
mod program;

pub use enrollment::{Enrollment, EnrollmentStatus};
pub use program::{DaySpec, ProgramDefinition, UnlockRule};
