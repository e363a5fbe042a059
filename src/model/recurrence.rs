// File: ./src/model/recurrence.rs
use crate::model::rule::{Frequency, RecurrenceRuleState, WeekDay};
use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use rrule::RRuleSet;
use std::str::FromStr;

pub struct RecurrenceEngine;

impl RecurrenceEngine {
    /// Renders the rule as an RFC 5545 RRULE body (without the "RRULE:" prefix).
    pub fn to_rrule(rule: &RecurrenceRuleState) -> String {
        let mut parts = vec![format!("FREQ={}", rule.frequency.rrule_code())];

        if rule.interval > 1 {
            parts.push(format!("INTERVAL={}", rule.interval));
        }

        let start = rule.recurrence_start_date;
        match rule.frequency {
            Frequency::Daily => {}
            Frequency::Weekly => {
                if !rule.week_days.is_empty() {
                    let days: Vec<&str> = rule.week_days.iter().map(WeekDay::code).collect();
                    parts.push(format!("BYDAY={}", days.join(",")));
                }
            }
            Frequency::Monthly => match rule.week_day_occurrence_in_month {
                Some(occurrence) => {
                    let prefix = occurrence.rrule_prefix();
                    let days: Vec<String> = if rule.week_days.is_empty() {
                        vec![format!("{}{}", prefix, WeekDay::of(start).code())]
                    } else {
                        rule.week_days
                            .iter()
                            .map(|d| format!("{}{}", prefix, d.code()))
                            .collect()
                    };
                    parts.push(format!("BYDAY={}", days.join(",")));
                }
                None => parts.push(format!("BYMONTHDAY={}", start.day())),
            },
            Frequency::Yearly => {
                parts.push(format!("BYMONTH={}", start.month()));
                parts.push(format!("BYMONTHDAY={}", start.day()));
            }
        }

        // UNTIL must match DTSTART's value type; DTSTART is always a UTC
        // date-time here, so the end date becomes end-of-day UTC.
        if let Some(end) = rule.recurrence_end_date {
            parts.push(format!("UNTIL={}T235959Z", end.format("%Y%m%d")));
        } else if let Some(count) = rule.count {
            parts.push(format!("COUNT={}", count));
        }

        parts.join(";")
    }

    /// Expands the first `limit` occurrence dates of the rule.
    pub fn preview(rule: &RecurrenceRuleState, limit: usize) -> Result<Vec<NaiveDate>> {
        let rrule_string = format!(
            "DTSTART:{}T000000Z\nRRULE:{}",
            rule.recurrence_start_date.format("%Y%m%d"),
            Self::to_rrule(rule)
        );
        log::debug!("Expanding recurrence: {}", rrule_string.replace('\n', " "));

        let rrule_set = RRuleSet::from_str(&rrule_string).map_err(|e| {
            anyhow::anyhow!("Failed to parse recurrence '{}': {}", rrule_string, e)
        })?;

        Ok(rrule_set
            .into_iter()
            .take(limit)
            .map(|d| d.to_utc().date_naive())
            .collect())
    }

    /// First occurrence strictly after `after`, if the series has one within `horizon` steps.
    pub fn next_after(
        rule: &RecurrenceRuleState,
        after: NaiveDate,
        horizon: usize,
    ) -> Result<Option<NaiveDate>> {
        Ok(Self::preview(rule, horizon)?
            .into_iter()
            .find(|d| *d > after))
    }
}
