//! Infrastructure layer - ports and their reference adapters.

pub mod clock;
pub mod persistence;
pub mod ports;
