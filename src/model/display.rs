// File: ./src/model/display.rs
use crate::model::rule::{Frequency, RecurrenceRuleState, WeekDay};
use chrono::{Datelike, NaiveDate};
use std::fmt::Write;

pub const DEFAULT_DATE_FORMAT: &str = "%B %-d, %Y";

/// True when `date_format` can render a calendar date: every specifier is
/// known to chrono and none of them needs a time or an offset.
pub fn is_valid_date_format(date_format: &str) -> bool {
    let mut out = String::new();
    write!(out, "{}", NaiveDate::MIN.format(date_format)).is_ok()
}

pub trait RuleDisplay {
    /// Human-readable summary, e.g. "Every 2 weeks on Monday, Friday, for 10 times".
    fn describe(&self) -> String;
    /// Same as `describe`, formatting the end date with a chrono format string.
    /// An unusable format string falls back to [`DEFAULT_DATE_FORMAT`].
    fn describe_with(&self, date_format: &str) -> String;
}

impl RuleDisplay for RecurrenceRuleState {
    fn describe(&self) -> String {
        self.describe_with(DEFAULT_DATE_FORMAT)
    }

    fn describe_with(&self, date_format: &str) -> String {
        let mut s = frequency_clause(self.frequency, self.interval);

        let qualifier = qualifier_clause(self);
        if let Some(q) = &qualifier {
            s.push(' ');
            s.push_str(q);
        }

        let termination = if let Some(end) = self.recurrence_end_date {
            let date_format = if is_valid_date_format(date_format) {
                date_format
            } else {
                log::warn!("Invalid date format '{}', using default", date_format);
                DEFAULT_DATE_FORMAT
            };
            Some(format!("until {}", end.format(date_format)))
        } else {
            self.count.map(|count| format!("for {} times", count))
        };
        if let Some(t) = termination {
            s.push_str(if qualifier.is_some() { ", " } else { " " });
            s.push_str(&t);
        }

        s
    }
}

fn frequency_clause(frequency: Frequency, interval: u32) -> String {
    if interval <= 1 {
        format!("Every {}", frequency.unit())
    } else {
        format!("Every {} {}s", interval, frequency.unit())
    }
}

fn join_days<'a>(days: impl Iterator<Item = &'a WeekDay>) -> String {
    days.map(WeekDay::name).collect::<Vec<_>>().join(", ")
}

fn qualifier_clause(rule: &RecurrenceRuleState) -> Option<String> {
    let start = rule.recurrence_start_date;
    match rule.frequency {
        Frequency::Daily => None,
        Frequency::Weekly => {
            if rule.week_days.is_empty() {
                None
            } else {
                Some(format!("on {}", join_days(rule.week_days.iter())))
            }
        }
        Frequency::Monthly => match rule.week_day_occurrence_in_month {
            Some(occurrence) => {
                let days = if rule.week_days.is_empty() {
                    WeekDay::of(start).name().to_string()
                } else {
                    join_days(rule.week_days.iter())
                };
                Some(format!("on the {} {}", occurrence.label(), days))
            }
            None => Some(format!("on day {}", start.day())),
        },
        Frequency::Yearly => Some(format!("on {}", start.format("%B %-d"))),
    }
}

/// Free-function form of [`RuleDisplay::describe`].
pub fn describe(rule: &RecurrenceRuleState) -> String {
    rule.describe()
}
