//! Unified error types for the domain layer
//!
//! Provides a common error type for domain operations, enabling consistent
//! error handling without forcing callers to use String or anyhow.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., malformed program definition)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Day index outside the program bounds
    #[error("Invalid day {day}: program runs for {duration_days} days")]
    InvalidDay { day: u32, duration_days: u32 },
}

impl DomainError {
    /// Creates a validation error for business rule violations.
    ///
    /// Use this when domain invariants are violated: required fields empty,
    /// day specs out of order, prerequisite pointing past its own day.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an invalid day error for an index outside `1..=duration_days`.
    pub fn invalid_day(day: u32, duration_days: u32) -> Self {
        Self::InvalidDay { day, duration_days }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = DomainError::validation("duration_days must be at least 1");
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(
            err.to_string(),
            "Validation failed: duration_days must be at least 1"
        );
    }

    #[test]
    fn test_invalid_day_error() {
        let err = DomainError::invalid_day(9, 7);
        assert!(matches!(err, DomainError::InvalidDay { .. }));
        assert_eq!(err.to_string(), "Invalid day 9: program runs for 7 days");
    }
}
