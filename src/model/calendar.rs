// File: ./src/model/calendar.rs
//! Calendar facts about a single date: which occurrence of its weekday it is
//! within the month, and the labels used to talk about that.
use crate::model::rule::{WeekDay, WeekdayOccurrence};
use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

/// 1-based count of how many times `date`'s weekday has occurred in its month
/// up to and including `date` ("this is the Nth Tuesday"). Always within 1..=5.
pub fn weekday_ordinal_in_month(date: NaiveDate) -> u32 {
    (date.day() - 1) / 7 + 1
}

/// True when no later day of the month shares `date`'s weekday.
pub fn is_last_occurrence_of_weekday(date: NaiveDate) -> bool {
    match date.checked_add_signed(Duration::days(7)) {
        Some(next_week) => next_week.month() != date.month(),
        None => true,
    }
}

/// English ordinal suffix for `n`: 1st, 2nd, 3rd, 4th, 11th, 12th, 13th, 21st...
pub fn ordinal_suffix(n: u32) -> &'static str {
    if (11..=13).contains(&(n % 100)) {
        return "th";
    }
    match n % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

pub fn ordinal_word(n: i64) -> &'static str {
    match n {
        1 => "first",
        2 => "second",
        3 => "third",
        4 => "fourth",
        5 => "fifth",
        _ => "last",
    }
}

/// The ways a MONTHLY rule can be anchored on a start date. `by_last_weekday`
/// is only offered when the date is the final such weekday of its month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyOptions {
    pub by_date: String,
    pub by_weekday: String,
    pub by_last_weekday: Option<String>,
    pub date_value: u32,
    pub week_value: u32,
    pub weekday_value: WeekDay,
    pub occurrence: WeekdayOccurrence,
}

pub fn monthly_options(date: NaiveDate) -> MonthlyOptions {
    let week = weekday_ordinal_in_month(date);
    let day = WeekDay::of(date);
    MonthlyOptions {
        by_date: format!("Monthly on day {}", date.day()),
        by_weekday: format!("Monthly on the {} {}", ordinal_word(week as i64), day),
        by_last_weekday: is_last_occurrence_of_weekday(date)
            .then(|| format!("Monthly on the last {}", day)),
        date_value: date.day(),
        week_value: week,
        weekday_value: day,
        occurrence: WeekdayOccurrence::from_date(date),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn suffixes() {
        for (n, s) in [(1, "st"), (2, "nd"), (3, "rd"), (4, "th"), (11, "th"), (12, "th")] {
            assert_eq!(ordinal_suffix(n), s);
        }
        assert_eq!(ordinal_suffix(13), "th");
        assert_eq!(ordinal_suffix(21), "st");
        assert_eq!(ordinal_suffix(22), "nd");
        assert_eq!(ordinal_suffix(23), "rd");
        assert_eq!(ordinal_suffix(111), "th");
    }

    #[test]
    fn ordinal_words_fall_back_to_last() {
        assert_eq!(ordinal_word(1), "first");
        assert_eq!(ordinal_word(5), "fifth");
        assert_eq!(ordinal_word(6), "last");
        assert_eq!(ordinal_word(0), "last");
        assert_eq!(ordinal_word(-1), "last");
    }

    #[test]
    fn last_occurrence_detection() {
        // Jan 2024: 29th is the last Monday, 24th is not the last Wednesday.
        assert!(is_last_occurrence_of_weekday(d(2024, 1, 29)));
        assert!(!is_last_occurrence_of_weekday(d(2024, 1, 24)));
        // A 4th occurrence can also be the last one.
        assert!(is_last_occurrence_of_weekday(d(2024, 2, 26)));
    }
}
