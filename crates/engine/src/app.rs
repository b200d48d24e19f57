//! Application state and composition.

use std::sync::Arc;

use cadence_domain::ProgramDefinition;

use crate::infrastructure::{
    clock::SystemClock,
    persistence::{InMemoryEnrollmentRepo, StaticProgramCatalog},
    ports::{ClockPort, EnrollmentRepo, ProgramCatalog},
};
use crate::use_cases::ChallengeUseCases;

/// Main application state.
///
/// Holds the wired ports and use cases. Presentation layers (HTTP handlers,
/// desktop shells) call the use cases and render the returned snapshots;
/// none of them re-derive scheduling logic.
pub struct App {
    pub enrollments: Arc<dyn EnrollmentRepo>,
    pub catalog: Arc<dyn ProgramCatalog>,
    pub clock: Arc<dyn ClockPort>,
    pub challenge: ChallengeUseCases,
}

impl App {
    /// Compose the app from explicit port implementations.
    pub fn new(
        enrollments: Arc<dyn EnrollmentRepo>,
        catalog: Arc<dyn ProgramCatalog>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        let challenge = ChallengeUseCases::new(enrollments.clone(), catalog.clone(), clock.clone());
        Self {
            enrollments,
            catalog,
            clock,
            challenge,
        }
    }

    /// Convenience wiring: in-memory store, static catalog, system clock.
    pub fn in_memory(programs: impl IntoIterator<Item = ProgramDefinition>) -> Self {
        Self::new(
            Arc::new(InMemoryEnrollmentRepo::new()),
            Arc::new(StaticProgramCatalog::new(programs)),
            Arc::new(SystemClock::new()),
        )
    }

    /// Same wiring with a caller-supplied clock (tests, simulations).
    pub fn in_memory_with_clock(
        programs: impl IntoIterator<Item = ProgramDefinition>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self::new(
            Arc::new(InMemoryEnrollmentRepo::new()),
            Arc::new(StaticProgramCatalog::new(programs)),
            clock,
        )
    }
}
