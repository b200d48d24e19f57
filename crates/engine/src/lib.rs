//! Cadence Engine library.
//!
//! Orchestrates the drip-unlock challenge service over storage and clock
//! ports. Unlock and progress state is derived on read, never stored, so
//! every query reflects the current instant.
//!
//! ## Structure
//!
//! - `infrastructure/` - Port traits and reference adapters (in-memory
//!   store, system/manual clocks)
//! - `use_cases/` - Enroll, complete-day, and get-state orchestration
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
