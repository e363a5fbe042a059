// File: ./src/model/rule.rs
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use strum::EnumIter;

fn default_interval() -> u32 {
    1
}

#[derive(
    Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Singular unit used in "Every week" / "Every 2 weeks".
    pub fn unit(&self) -> &'static str {
        match self {
            Frequency::Daily => "day",
            Frequency::Weekly => "week",
            Frequency::Monthly => "month",
            Frequency::Yearly => "year",
        }
    }

    pub fn rrule_code(&self) -> &'static str {
        match self {
            Frequency::Daily => "DAILY",
            Frequency::Weekly => "WEEKLY",
            Frequency::Monthly => "MONTHLY",
            Frequency::Yearly => "YEARLY",
        }
    }
}

// Declaration order is the canonical week order (Sunday first), which is what
// `Ord` and therefore `BTreeSet<WeekDay>` iteration follow.
#[derive(
    Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeekDay {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl WeekDay {
    pub fn name(&self) -> &'static str {
        match self {
            WeekDay::Sunday => "Sunday",
            WeekDay::Monday => "Monday",
            WeekDay::Tuesday => "Tuesday",
            WeekDay::Wednesday => "Wednesday",
            WeekDay::Thursday => "Thursday",
            WeekDay::Friday => "Friday",
            WeekDay::Saturday => "Saturday",
        }
    }

    /// Two-letter RFC 5545 code (SU, MO, ...).
    pub fn code(&self) -> &'static str {
        match self {
            WeekDay::Sunday => "SU",
            WeekDay::Monday => "MO",
            WeekDay::Tuesday => "TU",
            WeekDay::Wednesday => "WE",
            WeekDay::Thursday => "TH",
            WeekDay::Friday => "FR",
            WeekDay::Saturday => "SA",
        }
    }

    pub fn of(date: NaiveDate) -> Self {
        date.weekday().into()
    }
}

impl From<chrono::Weekday> for WeekDay {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Sun => WeekDay::Sunday,
            chrono::Weekday::Mon => WeekDay::Monday,
            chrono::Weekday::Tue => WeekDay::Tuesday,
            chrono::Weekday::Wed => WeekDay::Wednesday,
            chrono::Weekday::Thu => WeekDay::Thursday,
            chrono::Weekday::Fri => WeekDay::Friday,
            chrono::Weekday::Sat => WeekDay::Saturday,
        }
    }
}

impl From<WeekDay> for chrono::Weekday {
    fn from(day: WeekDay) -> Self {
        match day {
            WeekDay::Sunday => chrono::Weekday::Sun,
            WeekDay::Monday => chrono::Weekday::Mon,
            WeekDay::Tuesday => chrono::Weekday::Tue,
            WeekDay::Wednesday => chrono::Weekday::Wed,
            WeekDay::Thursday => chrono::Weekday::Thu,
            WeekDay::Friday => chrono::Weekday::Fri,
            WeekDay::Saturday => chrono::Weekday::Sat,
        }
    }
}

impl fmt::Display for WeekDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// --- WEEKDAY-IN-MONTH ORDINAL ---

/// Which occurrence of a weekday inside its month a MONTHLY rule fires on.
///
/// On the wire this is an integer: 1-4 for `Nth`, -1 for `Last`. A fifth
/// occurrence is always the last one of the month, so 5 is read as `Last`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum WeekdayOccurrence {
    Nth(WeekOrdinal),
    Last,
}

/// Position of a weekday inside its month, 1 through 4. Only built through
/// [`WeekOrdinal::new`], so a `Nth` value always survives the wire.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct WeekOrdinal(u8);

impl WeekOrdinal {
    pub fn new(n: u8) -> Option<Self> {
        (1..=4).contains(&n).then_some(WeekOrdinal(n))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

pub const LAST_WEEKDAY_OCCURRENCE: i8 = -1;

impl WeekdayOccurrence {
    /// `Nth` for 1..=4, `None` otherwise.
    pub fn nth(n: u8) -> Option<Self> {
        WeekOrdinal::new(n).map(WeekdayOccurrence::Nth)
    }

    /// The occurrence a given date represents ("3rd Tuesday", or "last" for a 5th).
    pub fn from_date(date: NaiveDate) -> Self {
        let ordinal = crate::model::calendar::weekday_ordinal_in_month(date);
        u8::try_from(ordinal)
            .ok()
            .and_then(WeekdayOccurrence::nth)
            .unwrap_or(WeekdayOccurrence::Last)
    }

    /// Short ordinal label: 1st, 2nd, 3rd, 4th or last.
    pub fn label(&self) -> String {
        match self {
            WeekdayOccurrence::Nth(n) => {
                let n = n.get();
                format!("{}{}", n, crate::model::calendar::ordinal_suffix(n as u32))
            }
            WeekdayOccurrence::Last => "last".to_string(),
        }
    }

    /// Signed prefix used in an RRULE BYDAY entry (`3TH`, `-1FR`).
    pub fn rrule_prefix(&self) -> i8 {
        (*self).into()
    }
}

impl TryFrom<i8> for WeekdayOccurrence {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            5 | LAST_WEEKDAY_OCCURRENCE => Ok(WeekdayOccurrence::Last),
            other => u8::try_from(other)
                .ok()
                .and_then(WeekdayOccurrence::nth)
                .ok_or_else(|| format!("Invalid weekday occurrence in month: {}", other)),
        }
    }
}

impl From<WeekdayOccurrence> for i8 {
    fn from(value: WeekdayOccurrence) -> Self {
        match value {
            WeekdayOccurrence::Nth(n) => n.get() as i8,
            WeekdayOccurrence::Last => LAST_WEEKDAY_OCCURRENCE,
        }
    }
}

impl fmt::Display for WeekdayOccurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

// --- END CONDITION ---

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum EndCondition {
    Never,
    On(NaiveDate),
    After(u32),
}

// --- RULE ---

/// A repetition pattern as edited in the event form.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceRuleState {
    pub recurrence_start_date: NaiveDate,
    #[serde(default)]
    pub recurrence_end_date: Option<NaiveDate>,
    pub frequency: Frequency,
    #[serde(default)]
    pub week_days: BTreeSet<WeekDay>,
    #[serde(default = "default_interval")]
    pub interval: u32,
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default, rename = "weekDayOccurenceInMonth")]
    pub week_day_occurrence_in_month: Option<WeekdayOccurrence>,
}

impl RecurrenceRuleState {
    /// Rule a freshly opened recurrence editor starts from: every 1 unit, never ends.
    /// Weekly rules pre-select the start date's weekday.
    pub fn default_rule(start: NaiveDate, frequency: Frequency) -> Self {
        let mut week_days = BTreeSet::new();
        if frequency == Frequency::Weekly {
            week_days.insert(WeekDay::of(start));
        }
        Self {
            recurrence_start_date: start,
            recurrence_end_date: None,
            frequency,
            week_days,
            interval: 1,
            count: None,
            week_day_occurrence_in_month: None,
        }
    }

    pub fn end_condition(&self) -> EndCondition {
        match (self.recurrence_end_date, self.count) {
            (Some(date), _) => EndCondition::On(date),
            (None, Some(count)) => EndCondition::After(count),
            (None, None) => EndCondition::Never,
        }
    }

    /// Sets the termination, clearing whichever of end date / count it replaces.
    pub fn with_end_condition(mut self, end: EndCondition) -> Self {
        match end {
            EndCondition::Never => {
                self.recurrence_end_date = None;
                self.count = None;
            }
            EndCondition::On(date) => {
                self.recurrence_end_date = Some(date);
                self.count = None;
            }
            EndCondition::After(count) => {
                self.recurrence_end_date = None;
                self.count = Some(count);
            }
        }
        self
    }

    /// Switches a MONTHLY rule to "nth weekday" semantics anchored on `date`.
    pub fn on_weekday_of(mut self, date: NaiveDate) -> Self {
        self.frequency = Frequency::Monthly;
        self.week_days = BTreeSet::from([WeekDay::of(date)]);
        self.week_day_occurrence_in_month = Some(WeekdayOccurrence::from_date(date));
        self
    }

    /// Whether `week_days` carries meaning for this rule.
    pub fn uses_week_days(&self) -> bool {
        match self.frequency {
            Frequency::Weekly => true,
            Frequency::Monthly => self.week_day_occurrence_in_month.is_some(),
            Frequency::Daily | Frequency::Yearly => false,
        }
    }
}

// --- OCCURRENCE ---

/// One concrete dated instance of a series (or a standalone event).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl Occurrence {
    pub fn new(start_date: DateTime<Utc>, end_date: DateTime<Utc>) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    pub fn start_day(&self) -> NaiveDate {
        self.start_date.date_naive()
    }

    pub fn end_day(&self) -> NaiveDate {
        self.end_date.date_naive()
    }
}
