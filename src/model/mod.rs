// File: ./src/model/mod.rs
pub mod calendar;
pub mod change;
pub mod display;
pub mod recurrence;
pub mod rule;
pub mod scope;
pub mod validation;

pub use calendar::{MonthlyOptions, monthly_options, weekday_ordinal_in_month};
pub use change::{ChangeSet, occurrence_dates_changed, rule_changed};
pub use display::{RuleDisplay, describe, is_valid_date_format};
pub use recurrence::RecurrenceEngine;
pub use rule::{
    EndCondition, Frequency, Occurrence, RecurrenceRuleState, WeekDay, WeekOrdinal, WeekdayOccurrence,
};
pub use scope::{
    EditRequest, MutationScope, ScopeDecision, UpdatePlan, classify, deletion_decision,
    resolve_anchor_date,
};
pub use validation::{RuleViolation, ensure_valid, validate};
