//! Day count conventions for accrual year fractions.
//!
//! Day count conventions determine how many days lie between two dates and
//! how that count converts into a fraction of a year.
//!
//! # Supported Conventions
//!
//! - [`Act360`]: Actual/360 - money market and most IBOR/overnight indices
//! - [`Act365Fixed`]: Actual/365 Fixed - GBP indices, time to payment
//! - [`ActActIsda`]: Actual/Actual ISDA - year-based split
//! - [`Thirty360US`]: 30/360 US - USD fixed legs (with Feb EOM rules)
//! - [`Thirty360E`]: 30E/360 - EUR fixed legs
//!
//! # Usage
//!
//! ```rust
//! use meridian_core::daycounts::{DayCount, Act360};
//! use meridian_core::types::Date;
//!
//! let start = Date::from_ymd(2025, 1, 1).unwrap();
//! let end = Date::from_ymd(2025, 4, 1).unwrap();
//! assert_eq!(Act360.day_count(start, end), 90);
//! assert_eq!(Act360.year_fraction(start, end), 0.25);
//! ```

mod actual;
mod thirty360;

pub use actual::{Act360, Act365Fixed, ActActIsda};
pub use thirty360::{Thirty360E, Thirty360US};

use serde::{Deserialize, Serialize};

use crate::error::MeridianError;
use crate::types::Date;

/// Trait for day count conventions.
///
/// Year fractions are plain `f64`: they feed straight into floating point
/// pricing formulas and are never rounded.
pub trait DayCount: Send + Sync {
    /// Returns the market name of the convention (e.g., "ACT/360").
    fn name(&self) -> &'static str;

    /// Calculates the year fraction between two dates.
    ///
    /// Negative when `end` is before `start`.
    fn year_fraction(&self, start: Date, end: Date) -> f64;

    /// Counts the days between two dates according to the convention.
    fn day_count(&self, start: Date, end: Date) -> i64;
}

/// Enumeration of the supported day count conventions.
///
/// Serializable handle used by indices and trades; it implements
/// [`DayCount`] by delegating to the matching convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayCountConvention {
    /// ACT/360
    Act360,
    /// ACT/365 Fixed
    Act365Fixed,
    /// ACT/ACT ISDA
    ActActIsda,
    /// 30/360 US (Bond Basis)
    Thirty360US,
    /// 30E/360 (Eurobond Basis)
    Thirty360E,
}

impl DayCountConvention {
    /// Returns all available day count conventions.
    #[must_use]
    pub fn all() -> &'static [DayCountConvention] {
        &[
            DayCountConvention::Act360,
            DayCountConvention::Act365Fixed,
            DayCountConvention::ActActIsda,
            DayCountConvention::Thirty360US,
            DayCountConvention::Thirty360E,
        ]
    }

    fn delegate(&self) -> &'static dyn DayCount {
        match self {
            DayCountConvention::Act360 => &Act360,
            DayCountConvention::Act365Fixed => &Act365Fixed,
            DayCountConvention::ActActIsda => &ActActIsda,
            DayCountConvention::Thirty360US => &Thirty360US,
            DayCountConvention::Thirty360E => &Thirty360E,
        }
    }
}

impl DayCount for DayCountConvention {
    fn name(&self) -> &'static str {
        self.delegate().name()
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        self.delegate().year_fraction(start, end)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        self.delegate().day_count(start, end)
    }
}

impl std::fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for DayCountConvention {
    type Err = MeridianError;

    /// Parses a day count convention from its market name or a common alias.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();

        match normalized.as_str() {
            "ACT/360" | "ACTUAL/360" | "ACT360" => Ok(DayCountConvention::Act360),
            "ACT/365" | "ACT/365F" | "ACT/365 FIXED" | "ACTUAL/365" | "ACT365F" => {
                Ok(DayCountConvention::Act365Fixed)
            }
            "ACT/ACT" | "ACT/ACT ISDA" | "ACTUAL/ACTUAL" | "ACTACT" => {
                Ok(DayCountConvention::ActActIsda)
            }
            "30/360" | "30/360 US" | "30U/360" | "BOND" => Ok(DayCountConvention::Thirty360US),
            "30E/360" | "30/360 ICMA" | "EUROBOND" => Ok(DayCountConvention::Thirty360E),
            _ => Err(MeridianError::DayCountError {
                reason: format!("unknown day count convention: '{s}'"),
            }),
        }
    }
}
