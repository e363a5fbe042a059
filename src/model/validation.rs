// File: ./src/model/validation.rs
//! Well-formedness checks a form runs before handing a rule to the engine.
use crate::model::rule::{Frequency, RecurrenceRuleState};
use anyhow::{Result, anyhow};
use std::fmt;

pub const MAX_DAILY_COUNT: u32 = 999;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RuleViolation {
    IntervalTooSmall,
    ConflictingEndConditions,
    EndBeforeStart,
    CountTooSmall,
    DailyCountTooLarge,
    MissingWeekDays,
    MissingMonthlyWeekDay,
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleViolation::IntervalTooSmall => write!(f, "Recurrence interval must be at least 1"),
            RuleViolation::ConflictingEndConditions => write!(
                f,
                "Recurrence must have exactly one end condition (never, end date, or count)"
            ),
            RuleViolation::EndBeforeStart => {
                write!(f, "Recurrence end date must not be before its start date")
            }
            RuleViolation::CountTooSmall => write!(f, "Recurrence count must be at least 1"),
            RuleViolation::DailyCountTooLarge => write!(
                f,
                "Daily recurrence count must be no more than {}",
                MAX_DAILY_COUNT
            ),
            RuleViolation::MissingWeekDays => write!(
                f,
                "Weekly recurrence must specify at least one day of the week"
            ),
            RuleViolation::MissingMonthlyWeekDay => write!(
                f,
                "Monthly recurrence on a weekday occurrence must specify the weekday"
            ),
        }
    }
}

impl std::error::Error for RuleViolation {}

/// Collects every violation instead of stopping at the first, so a form can
/// show them all at once.
pub fn validate(rule: &RecurrenceRuleState) -> std::result::Result<(), Vec<RuleViolation>> {
    let mut errors = Vec::new();

    if rule.interval < 1 {
        errors.push(RuleViolation::IntervalTooSmall);
    }

    if rule.recurrence_end_date.is_some() && rule.count.is_some() {
        errors.push(RuleViolation::ConflictingEndConditions);
    }

    if let Some(end) = rule.recurrence_end_date
        && end < rule.recurrence_start_date
    {
        errors.push(RuleViolation::EndBeforeStart);
    }

    if let Some(count) = rule.count {
        if count < 1 {
            errors.push(RuleViolation::CountTooSmall);
        } else if rule.frequency == Frequency::Daily && count > MAX_DAILY_COUNT {
            errors.push(RuleViolation::DailyCountTooLarge);
        }
    }

    match rule.frequency {
        Frequency::Weekly if rule.week_days.is_empty() => {
            errors.push(RuleViolation::MissingWeekDays);
        }
        Frequency::Monthly
            if rule.week_day_occurrence_in_month.is_some() && rule.week_days.is_empty() =>
        {
            errors.push(RuleViolation::MissingMonthlyWeekDay);
        }
        _ => {}
    }

    if errors.is_empty() {
        Ok(())
    } else {
        log::debug!("Rule rejected with {} violation(s)", errors.len());
        Err(errors)
    }
}

/// Gate for callers that only need pass/fail: every violation folded into one error.
pub fn ensure_valid(rule: &RecurrenceRuleState) -> Result<()> {
    validate(rule).map_err(|violations| {
        let messages: Vec<String> = violations.iter().map(ToString::to_string).collect();
        anyhow!("Invalid recurrence rule: {}", messages.join("; "))
    })
}
