//! Calendar date used for fixings, accruals and payments.

use chrono::{Datelike, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use crate::error::{MeridianError, MeridianResult};

/// A calendar date for financial calculations.
///
/// Newtype over `chrono::NaiveDate` carrying the handful of date operations
/// the valuation engine needs.
///
/// # Example
///
/// ```rust
/// use meridian_core::types::Date;
///
/// let date = Date::from_ymd(2025, 1, 31).unwrap();
/// let next = date.add_months(1).unwrap();
/// assert_eq!(next, Date::from_ymd(2025, 2, 28).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `MeridianError::InvalidDate` if the date does not exist.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> MeridianResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| MeridianError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Parses an ISO 8601 date (`YYYY-MM-DD`).
    ///
    /// # Errors
    ///
    /// Returns `MeridianError::InvalidDate` if the string is not a valid date.
    pub fn parse(s: &str) -> MeridianResult<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|_| MeridianError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// Returns the year.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month, 1 to 12.
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day of the month.
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns the ordinal day within the year, starting at 1.
    #[must_use]
    pub fn day_of_year(&self) -> u32 {
        self.0.ordinal()
    }

    /// Returns 366 in leap years and 365 otherwise.
    #[must_use]
    pub fn days_in_year(&self) -> u32 {
        365 + u32::from(self.0.leap_year())
    }

    /// True on the last calendar day of the month.
    #[must_use]
    pub fn is_end_of_month(&self) -> bool {
        self.0.succ_opt().map_or(true, |next| next.month() != self.month())
    }

    /// Shifts the date by a signed number of calendar days.
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + chrono::Duration::days(days))
    }

    /// Shifts the date by a signed number of months, clamping the day to the
    /// end of the target month (Jan 31 + 1M is Feb 28).
    ///
    /// # Errors
    ///
    /// Returns `MeridianError::InvalidDate` if the result is out of range.
    pub fn add_months(&self, months: i32) -> MeridianResult<Self> {
        let shifted = if months >= 0 {
            self.0.checked_add_months(Months::new(months.unsigned_abs()))
        } else {
            self.0.checked_sub_months(Months::new(months.unsigned_abs()))
        };
        shifted
            .map(Date)
            .ok_or_else(|| MeridianError::invalid_date(format!("{self} shifted by {months} months")))
    }

    /// Signed number of calendar days from `self` to `other`.
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// True on Saturdays and Sundays.
    #[must_use]
    pub fn is_weekend(&self) -> bool {
        matches!(self.0.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Returns the first weekday strictly after this date.
    #[must_use]
    pub fn next_business_day(&self) -> Self {
        self.add_business_days(1)
    }

    /// Moves by a signed number of weekdays. Zero returns the date unchanged,
    /// even on a weekend.
    #[must_use]
    pub fn add_business_days(&self, days: i32) -> Self {
        let step = if days < 0 { -1 } else { 1 };
        let mut current = *self;
        for _ in 0..days.unsigned_abs() {
            current = current.add_days(step);
            while current.is_weekend() {
                current = current.add_days(step);
            }
        }
        current
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for Date {
    type Err = MeridianError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Sub<Date> for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    fn sub(self, other: Date) -> Self::Output {
        other.days_between(&self)
    }
}
