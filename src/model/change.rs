// File: ./src/model/change.rs
//! Change detection between the stored event and the user's in-progress edit.
use crate::model::rule::{Occurrence, RecurrenceRuleState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// True if either the start or the end moved to a different calendar day.
/// Time-of-day is ignored.
pub fn occurrence_dates_changed(
    old_start: DateTime<Utc>,
    old_end: DateTime<Utc>,
    new_start: DateTime<Utc>,
    new_end: DateTime<Utc>,
) -> bool {
    old_start.date_naive() != new_start.date_naive() || old_end.date_naive() != new_end.date_naive()
}

/// True if there was no previous rule, or if any field of the rule differs.
///
/// `week_days` is a set, so two rules listing the same days in another order
/// are equal.
pub fn rule_changed(old_rule: Option<&RecurrenceRuleState>, new_rule: &RecurrenceRuleState) -> bool {
    let Some(old) = old_rule else {
        return true;
    };
    old.frequency != new_rule.frequency
        || old.interval != new_rule.interval
        || old.recurrence_start_date != new_rule.recurrence_start_date
        || old.recurrence_end_date != new_rule.recurrence_end_date
        || old.count != new_rule.count
        || old.week_day_occurrence_in_month != new_rule.week_day_occurrence_in_month
        || old.week_days != new_rule.week_days
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSet {
    pub dates_changed: bool,
    pub rule_changed: bool,
}

impl ChangeSet {
    pub fn new(dates_changed: bool, rule_changed: bool) -> Self {
        Self {
            dates_changed,
            rule_changed,
        }
    }

    pub fn detect(
        previous_rule: Option<&RecurrenceRuleState>,
        previous: &Occurrence,
        proposed_rule: &RecurrenceRuleState,
        proposed: &Occurrence,
    ) -> Self {
        let changes = Self {
            dates_changed: occurrence_dates_changed(
                previous.start_date,
                previous.end_date,
                proposed.start_date,
                proposed.end_date,
            ),
            rule_changed: rule_changed(previous_rule, proposed_rule),
        };
        log::debug!(
            "Detected changes: dates_changed={}, rule_changed={}",
            changes.dates_changed,
            changes.rule_changed
        );
        changes
    }

    pub fn any(&self) -> bool {
        self.dates_changed || self.rule_changed
    }
}
