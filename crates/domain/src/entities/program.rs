//! Program definition - authored content metadata for a fixed-length program
//!
//! A program is a fixed sequence of days released on a hybrid drip: each day
//! carries an unlock rule, and the policy in [`crate::drip`] interprets those
//! rules against an enrollment and the current instant. The definition itself
//! is immutable configuration; the engine never mutates it.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::ProgramId;

/// How a single day's hard gate is satisfied.
///
/// Every day is also subject to the soft completion gate (completing day `d`
/// unlocks `d + 1`), which lives in the policy, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum UnlockRule {
    /// Unlocks once enough calendar time has elapsed since enrollment.
    Scheduled,
    /// Unlocks on schedule, or early once the named day is completed.
    ScheduledOrPrerequisite { prerequisite_day: u32 },
}

/// One day of a program.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySpec {
    day_index: u32,
    title: String,
    unlock_rule: UnlockRule,
    /// Day includes a scheduled live session (rendered differently by the UI).
    requires_live_session: bool,
    /// Final/decision day of the program.
    is_decision_day: bool,
}

impl DaySpec {
    pub fn new(day_index: u32, title: impl Into<String>) -> Self {
        Self {
            day_index,
            title: title.into(),
            unlock_rule: UnlockRule::Scheduled,
            requires_live_session: false,
            is_decision_day: false,
        }
    }

    // === Builders ===

    pub fn with_unlock_rule(mut self, rule: UnlockRule) -> Self {
        self.unlock_rule = rule;
        self
    }

    pub fn with_live_session(mut self, requires_live_session: bool) -> Self {
        self.requires_live_session = requires_live_session;
        self
    }

    pub fn with_decision_day(mut self, is_decision_day: bool) -> Self {
        self.is_decision_day = is_decision_day;
        self
    }

    // === Accessors ===

    pub fn day_index(&self) -> u32 {
        self.day_index
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn unlock_rule(&self) -> UnlockRule {
        self.unlock_rule
    }

    pub fn requires_live_session(&self) -> bool {
        self.requires_live_session
    }

    pub fn is_decision_day(&self) -> bool {
        self.is_decision_day
    }
}

/// Immutable definition of a fixed-duration program.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramDefinition {
    id: ProgramId,
    name: String,
    duration_days: u32,
    days: Vec<DaySpec>,
}

impl ProgramDefinition {
    /// Create the canonical fixed-length program shape.
    ///
    /// Every day unlocks on schedule; the final day additionally unlocks
    /// early once the second-to-last day is completed, and is flagged as the
    /// decision day. Earlier days deliberately do not get the prerequisite
    /// shortcut - only the finale opens off the calendar.
    pub fn fixed(name: impl Into<String>, duration_days: u32) -> Result<Self, DomainError> {
        if duration_days == 0 {
            return Err(DomainError::validation("duration_days must be at least 1"));
        }
        let days = (1..=duration_days)
            .map(|i| {
                let spec = DaySpec::new(i, format!("Day {i}"));
                if i == duration_days && duration_days > 1 {
                    spec.with_unlock_rule(UnlockRule::ScheduledOrPrerequisite {
                        prerequisite_day: duration_days - 1,
                    })
                    .with_decision_day(true)
                } else {
                    spec
                }
            })
            .collect();
        Self::new(name, duration_days, days)
    }

    /// Create a program from explicit day specs.
    pub fn new(
        name: impl Into<String>,
        duration_days: u32,
        days: Vec<DaySpec>,
    ) -> Result<Self, DomainError> {
        let program = Self {
            id: ProgramId::new(),
            name: name.into(),
            duration_days,
            days,
        };
        program.validate()?;
        Ok(program)
    }

    fn validate(&self) -> Result<(), DomainError> {
        if self.name.is_empty() {
            return Err(DomainError::validation("program name cannot be empty"));
        }
        if self.duration_days == 0 {
            return Err(DomainError::validation("duration_days must be at least 1"));
        }
        if self.days.len() != self.duration_days as usize {
            return Err(DomainError::validation(format!(
                "expected {} day specs, got {}",
                self.duration_days,
                self.days.len()
            )));
        }
        for (position, day) in self.days.iter().enumerate() {
            let expected = position as u32 + 1;
            if day.day_index != expected {
                return Err(DomainError::validation(format!(
                    "day specs must be ordered 1..{}, found index {} at position {}",
                    self.duration_days, day.day_index, position
                )));
            }
            if let UnlockRule::ScheduledOrPrerequisite { prerequisite_day } = day.unlock_rule {
                if prerequisite_day == 0 || prerequisite_day >= day.day_index {
                    return Err(DomainError::validation(format!(
                        "day {} prerequisite must name an earlier day, got {}",
                        day.day_index, prerequisite_day
                    )));
                }
            }
        }
        Ok(())
    }

    /// Replace a day spec, keeping the definition valid.
    pub fn with_day(mut self, day: DaySpec) -> Result<Self, DomainError> {
        let index = day.day_index;
        if !self.contains_day(index) {
            return Err(DomainError::invalid_day(index, self.duration_days));
        }
        self.days[(index - 1) as usize] = day;
        self.validate()?;
        Ok(self)
    }

    pub fn with_id(mut self, id: ProgramId) -> Self {
        self.id = id;
        self
    }

    // === Accessors ===

    pub fn id(&self) -> ProgramId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn duration_days(&self) -> u32 {
        self.duration_days
    }

    pub fn days(&self) -> &[DaySpec] {
        &self.days
    }

    /// Look up a day spec by 1-based index.
    pub fn day(&self, day_index: u32) -> Option<&DaySpec> {
        if self.contains_day(day_index) {
            self.days.get((day_index - 1) as usize)
        } else {
            None
        }
    }

    /// Whether `day_index` is inside `1..=duration_days`.
    pub fn contains_day(&self, day_index: u32) -> bool {
        day_index >= 1 && day_index <= self.duration_days
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_program_has_one_spec_per_day() {
        let program = ProgramDefinition::fixed("7-Day Challenge", 7).expect("valid");
        assert_eq!(program.duration_days(), 7);
        assert_eq!(program.days().len(), 7);
        assert_eq!(program.day(1).map(DaySpec::day_index), Some(1));
        assert_eq!(program.day(7).map(DaySpec::day_index), Some(7));
        assert!(program.day(8).is_none());
        assert!(program.day(0).is_none());
    }

    #[test]
    fn only_final_day_gets_prerequisite_shortcut() {
        let program = ProgramDefinition::fixed("7-Day Challenge", 7).expect("valid");
        for day in 1..7 {
            assert_eq!(
                program.day(day).map(DaySpec::unlock_rule),
                Some(UnlockRule::Scheduled),
                "day {day} should be purely scheduled"
            );
        }
        assert_eq!(
            program.day(7).map(DaySpec::unlock_rule),
            Some(UnlockRule::ScheduledOrPrerequisite { prerequisite_day: 6 }),
        );
        assert!(program.day(7).is_some_and(DaySpec::is_decision_day));
    }

    #[test]
    fn single_day_program_has_no_prerequisite() {
        let program = ProgramDefinition::fixed("One-Shot", 1).expect("valid");
        assert_eq!(
            program.day(1).map(DaySpec::unlock_rule),
            Some(UnlockRule::Scheduled)
        );
    }

    #[test]
    fn zero_duration_rejected() {
        let err = ProgramDefinition::fixed("Empty", 0).expect_err("should fail");
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn prerequisite_must_be_earlier_day() {
        let days = vec![
            DaySpec::new(1, "Day 1"),
            DaySpec::new(2, "Day 2").with_unlock_rule(UnlockRule::ScheduledOrPrerequisite {
                prerequisite_day: 2,
            }),
        ];
        let err = ProgramDefinition::new("Bad", 2, days).expect_err("should fail");
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn with_day_replaces_spec() {
        let program = ProgramDefinition::fixed("7-Day Challenge", 7).expect("valid");
        let program = program
            .with_day(DaySpec::new(5, "Live Coaching Call").with_live_session(true))
            .expect("valid");
        let day5 = program.day(5).expect("day 5 exists");
        assert_eq!(day5.title(), "Live Coaching Call");
        assert!(day5.requires_live_session());
    }

    #[test]
    fn with_day_rejects_out_of_range_index() {
        let program = ProgramDefinition::fixed("7-Day Challenge", 7).expect("valid");
        let err = program
            .with_day(DaySpec::new(9, "Bonus"))
            .expect_err("should fail");
        assert_eq!(err, DomainError::invalid_day(9, 7));
    }
}
