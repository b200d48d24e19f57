//! Use cases - user story orchestration over the ports.

pub mod challenge;

pub use challenge::ChallengeUseCases;
