//! Testability port for injecting time.

use chrono::{DateTime, Utc};

/// Source of the current instant. Injected everywhere time is read so tests
/// can simulate elapsed days without sleeping.
#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
