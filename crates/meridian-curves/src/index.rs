//! Rate index definitions.
//!
//! Defines the benchmark rates that floating observations reference:
//! - Overnight rates: SOFR, ESTR, SONIA, TONAR, SARON
//! - Term rates: USD/GBP LIBOR, EURIBOR, JPY TIBOR
//!
//! Each index carries its currency, day count, tenor and fixing lag.

use meridian_core::daycounts::DayCountConvention;
use meridian_core::Currency;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CurveError;

/// Benchmark rate indices.
///
/// The set is closed: observations and forward curves are keyed by these
/// variants and every `match` over them is exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RateIndex {
    // =========================================================================
    // Overnight Indices (Risk-Free Rates)
    // =========================================================================
    /// SOFR - Secured Overnight Financing Rate (USD)
    Sofr,
    /// ESTR - Euro Short-Term Rate (EUR)
    Estr,
    /// SONIA - Sterling Overnight Index Average (GBP)
    Sonia,
    /// TONAR - Tokyo Overnight Average Rate (JPY)
    Tonar,
    /// SARON - Swiss Average Rate Overnight (CHF)
    Saron,

    // =========================================================================
    // Term Rates
    // =========================================================================
    /// USD LIBOR 3M
    UsdLibor3M,
    /// GBP LIBOR 3M
    GbpLibor3M,
    /// GBP LIBOR 6M
    GbpLibor6M,
    /// EURIBOR 3M
    Euribor3M,
    /// EURIBOR 6M
    Euribor6M,
    /// JPY TIBOR 3M
    JpyTibor3M,
}

impl RateIndex {
    /// Returns every index.
    #[must_use]
    pub fn all() -> &'static [RateIndex] {
        &[
            RateIndex::Sofr,
            RateIndex::Estr,
            RateIndex::Sonia,
            RateIndex::Tonar,
            RateIndex::Saron,
            RateIndex::UsdLibor3M,
            RateIndex::GbpLibor3M,
            RateIndex::GbpLibor6M,
            RateIndex::Euribor3M,
            RateIndex::Euribor6M,
            RateIndex::JpyTibor3M,
        ]
    }

    /// Returns the currency for this index.
    #[must_use]
    pub fn currency(&self) -> Currency {
        match self {
            RateIndex::Sofr | RateIndex::UsdLibor3M => Currency::USD,
            RateIndex::Estr | RateIndex::Euribor3M | RateIndex::Euribor6M => Currency::EUR,
            RateIndex::Sonia | RateIndex::GbpLibor3M | RateIndex::GbpLibor6M => Currency::GBP,
            RateIndex::Tonar | RateIndex::JpyTibor3M => Currency::JPY,
            RateIndex::Saron => Currency::CHF,
        }
    }

    /// Returns true if this is an overnight rate.
    #[must_use]
    pub fn is_overnight(&self) -> bool {
        matches!(
            self,
            RateIndex::Sofr | RateIndex::Estr | RateIndex::Sonia | RateIndex::Tonar | RateIndex::Saron
        )
    }

    /// Returns the standard day count convention.
    #[must_use]
    pub fn day_count(&self) -> DayCountConvention {
        match self {
            // USD, EUR and CHF money markets use ACT/360
            RateIndex::Sofr
            | RateIndex::UsdLibor3M
            | RateIndex::Estr
            | RateIndex::Euribor3M
            | RateIndex::Euribor6M
            | RateIndex::Saron => DayCountConvention::Act360,

            // GBP and JPY use ACT/365
            RateIndex::Sonia
            | RateIndex::GbpLibor3M
            | RateIndex::GbpLibor6M
            | RateIndex::Tonar
            | RateIndex::JpyTibor3M => DayCountConvention::Act365Fixed,
        }
    }

    /// Returns the tenor in months (0 for overnight).
    #[must_use]
    pub fn tenor_months(&self) -> i32 {
        match self {
            RateIndex::Sofr
            | RateIndex::Estr
            | RateIndex::Sonia
            | RateIndex::Tonar
            | RateIndex::Saron => 0,
            RateIndex::UsdLibor3M
            | RateIndex::GbpLibor3M
            | RateIndex::Euribor3M
            | RateIndex::JpyTibor3M => 3,
            RateIndex::GbpLibor6M | RateIndex::Euribor6M => 6,
        }
    }

    /// Returns the fixing lag in business days.
    ///
    /// This is the number of days before the accrual period starts
    /// that the rate is fixed.
    #[must_use]
    pub fn fixing_lag(&self) -> i32 {
        match self {
            RateIndex::Sofr | RateIndex::Sonia | RateIndex::Tonar | RateIndex::Saron => 0,
            RateIndex::Estr => 1,
            // Sterling LIBOR fixed on the start date
            RateIndex::GbpLibor3M | RateIndex::GbpLibor6M => 0,
            RateIndex::UsdLibor3M
            | RateIndex::Euribor3M
            | RateIndex::Euribor6M
            | RateIndex::JpyTibor3M => 2,
        }
    }

    /// Returns the index name as used in market conventions.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            RateIndex::Sofr => "SOFR",
            RateIndex::Estr => "ESTR",
            RateIndex::Sonia => "SONIA",
            RateIndex::Tonar => "TONAR",
            RateIndex::Saron => "SARON",
            RateIndex::UsdLibor3M => "USD LIBOR 3M",
            RateIndex::GbpLibor3M => "GBP LIBOR 3M",
            RateIndex::GbpLibor6M => "GBP LIBOR 6M",
            RateIndex::Euribor3M => "EURIBOR 3M",
            RateIndex::Euribor6M => "EURIBOR 6M",
            RateIndex::JpyTibor3M => "JPY TIBOR 3M",
        }
    }
}

impl fmt::Display for RateIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for RateIndex {
    type Err = CurveError;

    /// Parses an index name, case-insensitively, treating `-` and `_` as spaces.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| if c == '-' || c == '_' { ' ' } else { c.to_ascii_uppercase() })
            .collect();

        RateIndex::all()
            .iter()
            .find(|index| index.name() == normalized)
            .copied()
            .ok_or_else(|| CurveError::invalid_value(format!("unknown rate index: '{s}'")))
    }
}
