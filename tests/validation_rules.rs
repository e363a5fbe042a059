// Tests for rule well-formedness checks.
use chrono::NaiveDate;
use recurscope::model::{
    Frequency, RecurrenceRuleState, RuleViolation, WeekdayOccurrence, ensure_valid, validate,
};
use std::collections::BTreeSet;
use strum::IntoEnumIterator;

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, 21).unwrap()
}

fn daily() -> RecurrenceRuleState {
    RecurrenceRuleState::default_rule(start(), Frequency::Daily)
}

#[test]
fn test_default_rules_are_valid() {
    for frequency in Frequency::iter() {
        let rule = RecurrenceRuleState::default_rule(start(), frequency);
        assert_eq!(validate(&rule), Ok(()), "{:?}", frequency);
    }
}

#[test]
fn test_zero_interval() {
    let mut rule = daily();
    rule.interval = 0;
    assert_eq!(validate(&rule), Err(vec![RuleViolation::IntervalTooSmall]));
}

#[test]
fn test_end_date_and_count_together_rejected() {
    let mut rule = daily();
    rule.recurrence_end_date = NaiveDate::from_ymd_opt(2024, 12, 31);
    rule.count = Some(5);
    let errors = validate(&rule).unwrap_err();
    assert!(errors.contains(&RuleViolation::ConflictingEndConditions));
}

#[test]
fn test_end_before_start() {
    let mut rule = daily();
    rule.recurrence_end_date = NaiveDate::from_ymd_opt(2024, 7, 20);
    assert_eq!(validate(&rule), Err(vec![RuleViolation::EndBeforeStart]));
}

#[test]
fn test_count_bounds() {
    let mut rule = daily();
    rule.count = Some(0);
    assert_eq!(validate(&rule), Err(vec![RuleViolation::CountTooSmall]));

    rule.count = Some(1000);
    assert_eq!(validate(&rule), Err(vec![RuleViolation::DailyCountTooLarge]));

    rule.count = Some(999);
    assert_eq!(validate(&rule), Ok(()));

    // The daily cap does not apply to other frequencies.
    let mut weekly = RecurrenceRuleState::default_rule(start(), Frequency::Weekly);
    weekly.count = Some(1000);
    assert_eq!(validate(&weekly), Ok(()));
}

#[test]
fn test_weekly_without_days() {
    let mut rule = RecurrenceRuleState::default_rule(start(), Frequency::Weekly);
    rule.week_days = BTreeSet::new();
    assert_eq!(validate(&rule), Err(vec![RuleViolation::MissingWeekDays]));
}

#[test]
fn test_monthly_occurrence_without_weekday() {
    let mut rule = RecurrenceRuleState::default_rule(start(), Frequency::Monthly);
    rule.week_day_occurrence_in_month = WeekdayOccurrence::nth(2);
    assert_eq!(validate(&rule), Err(vec![RuleViolation::MissingMonthlyWeekDay]));
}

#[test]
fn test_all_violations_reported_together() {
    let mut rule = RecurrenceRuleState::default_rule(start(), Frequency::Weekly);
    rule.interval = 0;
    rule.week_days.clear();
    let errors = validate(&rule).unwrap_err();
    assert_eq!(
        errors,
        vec![RuleViolation::IntervalTooSmall, RuleViolation::MissingWeekDays]
    );
    assert_eq!(
        errors[1].to_string(),
        "Weekly recurrence must specify at least one day of the week"
    );
}

#[test]
fn test_ensure_valid_lists_every_violation() {
    assert!(ensure_valid(&daily()).is_ok());

    let mut rule = daily();
    rule.interval = 0;
    rule.recurrence_end_date = NaiveDate::from_ymd_opt(2024, 12, 31);
    rule.count = Some(5);
    let message = ensure_valid(&rule).unwrap_err().to_string();
    assert!(message.starts_with("Invalid recurrence rule: "));
    assert!(message.contains("interval must be at least 1"));
    assert!(message.contains("exactly one end condition"));
}
