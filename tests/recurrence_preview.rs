// Tests for RRULE rendering and occurrence expansion.
use chrono::{Datelike, NaiveDate};
use recurscope::model::{
    EndCondition, Frequency, RecurrenceEngine, RecurrenceRuleState, WeekDay,
    weekday_ordinal_in_month,
};
use std::collections::BTreeSet;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn test_rrule_weekly_with_interval_and_count() {
    let mut rule = RecurrenceRuleState::default_rule(d(2024, 7, 20), Frequency::Weekly);
    rule.interval = 2;
    rule.week_days = BTreeSet::from([WeekDay::Friday, WeekDay::Monday]);
    let rule = rule.with_end_condition(EndCondition::After(10));
    assert_eq!(
        RecurrenceEngine::to_rrule(&rule),
        "FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,FR;COUNT=10"
    );
}

#[test]
fn test_rrule_monthly_variants() {
    let by_date = RecurrenceRuleState::default_rule(d(2024, 7, 21), Frequency::Monthly);
    assert_eq!(RecurrenceEngine::to_rrule(&by_date), "FREQ=MONTHLY;BYMONTHDAY=21");

    let nth = by_date.clone().on_weekday_of(d(2024, 7, 18));
    assert_eq!(RecurrenceEngine::to_rrule(&nth), "FREQ=MONTHLY;BYDAY=3TH");

    let last = by_date.on_weekday_of(d(2024, 3, 29));
    assert_eq!(RecurrenceEngine::to_rrule(&last), "FREQ=MONTHLY;BYDAY=-1FR");
}

#[test]
fn test_rrule_until_is_end_of_day_utc() {
    let rule = RecurrenceRuleState::default_rule(d(2024, 1, 1), Frequency::Daily)
        .with_end_condition(EndCondition::On(d(2024, 1, 5)));
    assert_eq!(
        RecurrenceEngine::to_rrule(&rule),
        "FREQ=DAILY;UNTIL=20240105T235959Z"
    );
}

#[test]
fn test_preview_daily_until_is_inclusive() {
    let rule = RecurrenceRuleState::default_rule(d(2024, 1, 1), Frequency::Daily)
        .with_end_condition(EndCondition::On(d(2024, 1, 5)));
    let dates = RecurrenceEngine::preview(&rule, 100).unwrap();
    assert_eq!(
        dates,
        vec![
            d(2024, 1, 1),
            d(2024, 1, 2),
            d(2024, 1, 3),
            d(2024, 1, 4),
            d(2024, 1, 5)
        ]
    );
}

#[test]
fn test_preview_every_other_saturday() {
    let mut rule = RecurrenceRuleState::default_rule(d(2024, 7, 20), Frequency::Weekly);
    rule.interval = 2;
    let dates = RecurrenceEngine::preview(&rule, 3).unwrap();
    assert_eq!(dates, vec![d(2024, 7, 20), d(2024, 8, 3), d(2024, 8, 17)]);
}

#[test]
fn test_preview_third_thursday_matches_ordinal() {
    let rule = RecurrenceRuleState::default_rule(d(2024, 7, 18), Frequency::Monthly)
        .on_weekday_of(d(2024, 7, 18));
    let dates = RecurrenceEngine::preview(&rule, 4).unwrap();
    assert_eq!(
        dates,
        vec![d(2024, 7, 18), d(2024, 8, 15), d(2024, 9, 19), d(2024, 10, 17)]
    );
    for date in dates {
        assert_eq!(WeekDay::of(date), WeekDay::Thursday);
        assert_eq!(weekday_ordinal_in_month(date), 3);
    }
}

#[test]
fn test_preview_last_friday() {
    let rule = RecurrenceRuleState::default_rule(d(2024, 3, 29), Frequency::Monthly)
        .on_weekday_of(d(2024, 3, 29));
    let dates = RecurrenceEngine::preview(&rule, 3).unwrap();
    assert_eq!(dates, vec![d(2024, 3, 29), d(2024, 4, 26), d(2024, 5, 31)]);
}

#[test]
fn test_preview_yearly_count() {
    let rule = RecurrenceRuleState::default_rule(d(2024, 7, 21), Frequency::Yearly)
        .with_end_condition(EndCondition::After(2));
    let dates = RecurrenceEngine::preview(&rule, 10).unwrap();
    assert_eq!(dates, vec![d(2024, 7, 21), d(2025, 7, 21)]);
    assert!(dates.iter().all(|date| date.month() == 7 && date.day() == 21));
}

#[test]
fn test_next_after() {
    let rule = RecurrenceRuleState::default_rule(d(2024, 7, 20), Frequency::Weekly);
    let next = RecurrenceEngine::next_after(&rule, d(2024, 7, 22), 10).unwrap();
    assert_eq!(next, Some(d(2024, 7, 27)));
}
