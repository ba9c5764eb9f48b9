//! Reporting periods: the named tokens offered by the dashboard's filter bar
//! and their resolution into concrete calendar-date intervals.
//!
//! Resolution is a pure function of the requested period and an explicit
//! `today`. The
//! caller captures `today` once per query cycle and threads it through every
//! component, so a batch of calls straddling midnight still observes a single
//! reference date. Nothing in this crate reads the system clock.

use chrono::{Datelike, NaiveDate};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{ActivityError, Result};
use crate::utils::{
    days_before, first_day_of_month, last_day_of_month, previous_month, week_start,
};

/// Inclusive calendar-date interval. `start <= end` always holds; reversed
/// bounds are swapped on construction rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self { start: end, end: start }
        }
    }

    pub fn single(day: NaiveDate) -> Self {
        Self { start: day, end: day }
    }

    /// Both ends inclusive. Calendar-date comparison only; no time-of-day
    /// component ever participates.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// The full calendar month containing `date`.
    pub fn month_of(date: NaiveDate) -> Self {
        Self {
            start: first_day_of_month(date),
            end: last_day_of_month(date.year(), date.month()),
        }
    }

    /// First of the month through `today`.
    pub fn month_to_date(today: NaiveDate) -> Self {
        Self {
            start: first_day_of_month(today),
            end: today,
        }
    }

    /// The full calendar month before the one containing `today`.
    pub fn prior_month(today: NaiveDate) -> Self {
        let (year, month) = previous_month(today.year(), today.month());
        Self {
            start: NaiveDate::from_ymd_opt(year, month, 1).unwrap(),
            end: last_day_of_month(year, month),
        }
    }

    /// `[today - 7 days, today]`, the fixed recency window behind the
    /// "new this week" dashboard counters.
    pub fn trailing_week(today: NaiveDate) -> Self {
        Self {
            start: days_before(today, 7),
            end: today,
        }
    }
}

/// Named period as selected in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PeriodToken {
    Today,
    Yesterday,
    /// Monday of the current ISO week through today.
    Week,
    #[serde(rename = "last7days")]
    Last7Days,
    /// First of the current month through today.
    Month,
    /// January 1st through today.
    Year,
    /// No date constraint at all.
    All,
}

impl PeriodToken {
    /// Parses a UI token. The legacy backend's Spanish spellings are still
    /// accepted alongside the current English ones.
    pub fn from_token(token: &str) -> Result<Self> {
        match token.trim().to_lowercase().as_str() {
            "today" | "hoy" => Ok(Self::Today),
            "yesterday" | "ayer" => Ok(Self::Yesterday),
            "week" | "semana" => Ok(Self::Week),
            "last7days" | "ultimos7dias" => Ok(Self::Last7Days),
            "month" | "mes" => Ok(Self::Month),
            "year" | "anio" | "año" => Ok(Self::Year),
            "all" | "todos" => Ok(Self::All),
            other => Err(ActivityError::UnknownPeriod(other.to_string())),
        }
    }
}

impl std::str::FromStr for PeriodToken {
    type Err = ActivityError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_token(s)
    }
}

/// What the caller asks for: either a named token or an explicit range.
/// Deserializes from a bare token string (`"month"`) or a range object
/// (`{"from": "2024-01-01", "to": "2024-03-31"}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum PeriodSpec {
    Named(PeriodToken),
    Range {
        from: NaiveDate,
        #[serde(default)]
        to: Option<NaiveDate>,
    },
}

impl Default for PeriodSpec {
    fn default() -> Self {
        Self::Named(PeriodToken::All)
    }
}

impl PeriodSpec {
    pub fn from_token(token: &str) -> Result<Self> {
        PeriodToken::from_token(token).map(Self::Named)
    }

    /// Resolves to a concrete interval. All named tokens are inclusive and
    /// computed from calendar fields of the supplied `today`; forward-open
    /// tokens end on `today` itself.
    pub fn resolve(&self, today: NaiveDate) -> Period {
        match *self {
            Self::Named(PeriodToken::Today) => Period::Bounded(DateRange::single(today)),
            Self::Named(PeriodToken::Yesterday) => {
                Period::Bounded(DateRange::single(days_before(today, 1)))
            }
            Self::Named(PeriodToken::Week) => {
                Period::Bounded(DateRange::new(week_start(today), today))
            }
            Self::Named(PeriodToken::Last7Days) => {
                Period::Bounded(DateRange::trailing_week(today))
            }
            Self::Named(PeriodToken::Month) => Period::Bounded(DateRange::month_to_date(today)),
            Self::Named(PeriodToken::Year) => Period::Bounded(DateRange::new(
                NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap(),
                today,
            )),
            Self::Named(PeriodToken::All) => Period::Unbounded,
            Self::Range { from, to } => {
                Period::Bounded(DateRange::new(from, to.unwrap_or(today)))
            }
        }
    }
}

/// A resolved period: a concrete interval, or the unbounded sentinel that
/// admits every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Bounded(DateRange),
    Unbounded,
}

impl Period {
    /// Whether a record with the given normalized date passes this period.
    ///
    /// Bounded periods are fail-closed: a record whose date failed to
    /// normalize is excluded so it cannot pollute financial totals.
    /// Unbounded is fail-open: no range test is being applied, so a missing
    /// date is not grounds for exclusion.
    pub fn admits(&self, date: Option<NaiveDate>) -> bool {
        match self {
            Self::Unbounded => true,
            Self::Bounded(range) => date.is_some_and(|d| range.contains(d)),
        }
    }

    pub fn bounds(&self) -> Option<DateRange> {
        match self {
            Self::Bounded(range) => Some(*range),
            Self::Unbounded => None,
        }
    }
}
