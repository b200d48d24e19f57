//! Reference adapters for the storage ports.

mod memory;

pub use memory::{InMemoryEnrollmentRepo, StaticProgramCatalog};
