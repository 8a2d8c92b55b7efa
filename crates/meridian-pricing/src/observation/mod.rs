//! Rate observations and their resolution against a pricing environment.
//!
//! A [`RateObservation`] describes how the rate of one accrual period is
//! determined. The set of kinds is closed; [`DispatchingRateObservationFn`]
//! resolves each kind with an exhaustive `match`.

mod dispatch;

pub use dispatch::{DispatchingRateObservationFn, RateObservationFn};

use meridian_core::{Currency, Date};
use meridian_curves::RateIndex;
use serde::{Deserialize, Serialize};

use crate::error::{PricingError, PricingResult};

/// How the rate of an accrual period is observed.
///
/// # Example
///
/// ```rust
/// use meridian_core::Date;
/// use meridian_curves::RateIndex;
/// use meridian_pricing::RateObservation;
///
/// let fixing = Date::from_ymd(2025, 3, 3).unwrap();
/// let obs = RateObservation::ibor(RateIndex::Euribor3M, fixing).unwrap();
/// assert_eq!(obs.index(), Some(RateIndex::Euribor3M));
///
/// // Overnight indices cannot be observed as a single term fixing
/// assert!(RateObservation::ibor(RateIndex::Estr, fixing).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RateObservationFields")]
pub enum RateObservation {
    /// A fixed rate.
    Fixed {
        /// The rate, as a decimal.
        rate: f64,
    },
    /// A single fixing of a term index.
    Ibor {
        /// The term index.
        index: RateIndex,
        /// Date the index is fixed.
        fixing_date: Date,
    },
    /// An overnight index compounded over a period.
    OvernightCompounded {
        /// The overnight index.
        index: RateIndex,
        /// First fixing date.
        start_date: Date,
        /// End of the period.
        end_date: Date,
    },
    /// An overnight index arithmetically averaged over a period.
    OvernightAveraged {
        /// The overnight index.
        index: RateIndex,
        /// First fixing date.
        start_date: Date,
        /// End of the period.
        end_date: Date,
    },
}

impl RateObservation {
    /// Creates a fixed rate observation.
    ///
    /// # Errors
    ///
    /// Returns an error if the rate is not finite.
    pub fn fixed(rate: f64) -> PricingResult<Self> {
        if !rate.is_finite() {
            return Err(PricingError::invalid_observation(format!(
                "fixed rate must be finite, was {rate}"
            )));
        }
        Ok(Self::Fixed { rate })
    }

    /// Creates a term index observation.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is an overnight index.
    pub fn ibor(index: RateIndex, fixing_date: Date) -> PricingResult<Self> {
        if index.is_overnight() {
            return Err(PricingError::invalid_observation(format!(
                "{index} is an overnight index, not a term index"
            )));
        }
        Ok(Self::Ibor { index, fixing_date })
    }

    /// Creates a compounded overnight observation.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is not overnight or the period is empty.
    pub fn overnight_compounded(
        index: RateIndex,
        start_date: Date,
        end_date: Date,
    ) -> PricingResult<Self> {
        check_overnight(index, start_date, end_date)?;
        Ok(Self::OvernightCompounded {
            index,
            start_date,
            end_date,
        })
    }

    /// Creates an averaged overnight observation.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is not overnight or the period is empty.
    pub fn overnight_averaged(
        index: RateIndex,
        start_date: Date,
        end_date: Date,
    ) -> PricingResult<Self> {
        check_overnight(index, start_date, end_date)?;
        Ok(Self::OvernightAveraged {
            index,
            start_date,
            end_date,
        })
    }

    /// Returns the observed index, or `None` for a fixed rate.
    #[must_use]
    pub fn index(&self) -> Option<RateIndex> {
        match self {
            RateObservation::Fixed { .. } => None,
            RateObservation::Ibor { index, .. }
            | RateObservation::OvernightCompounded { index, .. }
            | RateObservation::OvernightAveraged { index, .. } => Some(*index),
        }
    }

    /// Returns the currency of the observed index, or `None` for a fixed rate.
    #[must_use]
    pub fn currency(&self) -> Option<Currency> {
        self.index().map(|index| index.currency())
    }

    /// Checks if this is a fixed rate.
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        matches!(self, RateObservation::Fixed { .. })
    }
}

// Same wire form as `RateObservation`, validated on the way in.
#[derive(Deserialize)]
enum RateObservationFields {
    Fixed {
        rate: f64,
    },
    Ibor {
        index: RateIndex,
        fixing_date: Date,
    },
    OvernightCompounded {
        index: RateIndex,
        start_date: Date,
        end_date: Date,
    },
    OvernightAveraged {
        index: RateIndex,
        start_date: Date,
        end_date: Date,
    },
}

impl TryFrom<RateObservationFields> for RateObservation {
    type Error = PricingError;

    fn try_from(fields: RateObservationFields) -> Result<Self, Self::Error> {
        match fields {
            RateObservationFields::Fixed { rate } => Self::fixed(rate),
            RateObservationFields::Ibor { index, fixing_date } => Self::ibor(index, fixing_date),
            RateObservationFields::OvernightCompounded {
                index,
                start_date,
                end_date,
            } => Self::overnight_compounded(index, start_date, end_date),
            RateObservationFields::OvernightAveraged {
                index,
                start_date,
                end_date,
            } => Self::overnight_averaged(index, start_date, end_date),
        }
    }
}

fn check_overnight(index: RateIndex, start_date: Date, end_date: Date) -> PricingResult<()> {
    if !index.is_overnight() {
        return Err(PricingError::invalid_observation(format!(
            "{index} is a term index, not an overnight index"
        )));
    }
    if start_date >= end_date {
        return Err(PricingError::invalid_observation(format!(
            "overnight period {start_date} to {end_date} is empty"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_constructors_validate() {
        assert!(RateObservation::fixed(0.025).is_ok());
        assert!(RateObservation::fixed(f64::INFINITY).is_err());

        let d1 = date(2025, 3, 3);
        let d2 = date(2025, 6, 3);
        assert!(RateObservation::ibor(RateIndex::UsdLibor3M, d1).is_ok());
        assert!(RateObservation::overnight_compounded(RateIndex::Sofr, d1, d2).is_ok());
        assert!(RateObservation::overnight_compounded(RateIndex::Euribor3M, d1, d2).is_err());
        assert!(RateObservation::overnight_averaged(RateIndex::Sofr, d2, d1).is_err());
        assert!(RateObservation::overnight_averaged(RateIndex::Sofr, d1, d1).is_err());
    }

    #[test]
    fn test_index_and_currency() {
        let fixed = RateObservation::fixed(0.01).unwrap();
        assert!(fixed.is_fixed());
        assert_eq!(fixed.index(), None);
        assert_eq!(fixed.currency(), None);

        let obs = RateObservation::overnight_averaged(
            RateIndex::Sonia,
            date(2025, 3, 3),
            date(2025, 4, 3),
        )
        .unwrap();
        assert_eq!(obs.index(), Some(RateIndex::Sonia));
        assert_eq!(obs.currency(), Some(Currency::GBP));
    }

    #[test]
    fn test_serde() {
        let obs = RateObservation::ibor(RateIndex::Euribor6M, date(2025, 3, 3)).unwrap();
        let json = serde_json::to_string(&obs).unwrap();
        let back: RateObservation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, obs);
    }

    #[test]
    fn test_deserialize_validates() {
        let overnight_as_term = r#"{"Ibor":{"index":"Sofr","fixing_date":"2025-03-03"}}"#;
        assert!(serde_json::from_str::<RateObservation>(overnight_as_term).is_err());

        let reversed = r#"{"OvernightCompounded":{"index":"Sofr","start_date":"2025-06-03","end_date":"2025-03-03"}}"#;
        assert!(serde_json::from_str::<RateObservation>(reversed).is_err());

        let term_averaged = r#"{"OvernightAveraged":{"index":"Euribor3M","start_date":"2025-03-03","end_date":"2025-06-03"}}"#;
        assert!(serde_json::from_str::<RateObservation>(term_averaged).is_err());

        let valid = r#"{"OvernightAveraged":{"index":"Sonia","start_date":"2025-03-03","end_date":"2025-06-03"}}"#;
        let obs: RateObservation = serde_json::from_str(valid).unwrap();
        assert_eq!(obs.index(), Some(RateIndex::Sonia));
    }
}
