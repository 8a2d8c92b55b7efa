//! Point sensitivities to individual curve nodes.

use meridian_core::{Currency, Date};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::error::{CurveError, CurveResult};
use crate::index::RateIndex;

/// Sensitivity to the zero rate of a discount curve at a date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZeroRateSensitivity {
    currency: Currency,
    date: Date,
    sensitivity: f64,
}

impl ZeroRateSensitivity {
    /// Creates a zero-rate sensitivity for the discount curve of `currency`.
    #[must_use]
    pub fn of(currency: Currency, date: Date, sensitivity: f64) -> Self {
        Self {
            currency,
            date,
            sensitivity,
        }
    }

    /// Returns the currency of the discount curve.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the date on the curve.
    #[must_use]
    pub fn date(&self) -> Date {
        self.date
    }

    /// Returns the sensitivity value.
    #[must_use]
    pub fn sensitivity(&self) -> f64 {
        self.sensitivity
    }
}

/// Sensitivity to a term index forward rate at a fixing date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IborRateSensitivity {
    index: RateIndex,
    fixing_date: Date,
    currency: Currency,
    sensitivity: f64,
}

impl IborRateSensitivity {
    /// Creates a sensitivity expressed in the index currency.
    #[must_use]
    pub fn of(index: RateIndex, fixing_date: Date, sensitivity: f64) -> Self {
        Self::of_currency(index, fixing_date, index.currency(), sensitivity)
    }

    /// Creates a sensitivity expressed in an explicit currency.
    #[must_use]
    pub fn of_currency(
        index: RateIndex,
        fixing_date: Date,
        currency: Currency,
        sensitivity: f64,
    ) -> Self {
        Self {
            index,
            fixing_date,
            currency,
            sensitivity,
        }
    }

    /// Returns the index.
    #[must_use]
    pub fn index(&self) -> RateIndex {
        self.index
    }

    /// Returns the fixing date.
    #[must_use]
    pub fn fixing_date(&self) -> Date {
        self.fixing_date
    }

    /// Returns the currency of the sensitivity.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the sensitivity value.
    #[must_use]
    pub fn sensitivity(&self) -> f64 {
        self.sensitivity
    }
}

/// Sensitivity to an overnight index rate over `[fixing_date, end_date)`.
///
/// The fixing date is always strictly before the end date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OvernightRateSensitivityFields")]
pub struct OvernightRateSensitivity {
    index: RateIndex,
    currency: Currency,
    fixing_date: Date,
    end_date: Date,
    sensitivity: f64,
}

impl OvernightRateSensitivity {
    /// Creates a sensitivity over an explicit period.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::InvalidSensitivity` unless `fixing_date` is
    /// strictly before `end_date`.
    pub fn of(
        index: RateIndex,
        currency: Currency,
        fixing_date: Date,
        end_date: Date,
        sensitivity: f64,
    ) -> CurveResult<Self> {
        if fixing_date >= end_date {
            return Err(CurveError::invalid_sensitivity(format!(
                "fixing date {fixing_date} must be before end date {end_date}"
            )));
        }
        Ok(Self {
            index,
            currency,
            fixing_date,
            end_date,
            sensitivity,
        })
    }

    /// Creates a sensitivity to a single overnight fixing.
    ///
    /// The end date is the next business day after the fixing date.
    #[must_use]
    pub fn of_fixing(
        index: RateIndex,
        currency: Currency,
        fixing_date: Date,
        sensitivity: f64,
    ) -> Self {
        Self {
            index,
            currency,
            fixing_date,
            end_date: fixing_date.next_business_day(),
            sensitivity,
        }
    }

    /// Returns the index.
    #[must_use]
    pub fn index(&self) -> RateIndex {
        self.index
    }

    /// Returns the currency of the sensitivity.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the fixing date.
    #[must_use]
    pub fn fixing_date(&self) -> Date {
        self.fixing_date
    }

    /// Returns the end date of the period.
    #[must_use]
    pub fn end_date(&self) -> Date {
        self.end_date
    }

    /// Returns the sensitivity value.
    #[must_use]
    pub fn sensitivity(&self) -> f64 {
        self.sensitivity
    }
}

#[derive(Deserialize)]
struct OvernightRateSensitivityFields {
    index: RateIndex,
    currency: Currency,
    fixing_date: Date,
    end_date: Date,
    sensitivity: f64,
}

impl TryFrom<OvernightRateSensitivityFields> for OvernightRateSensitivity {
    type Error = CurveError;

    fn try_from(f: OvernightRateSensitivityFields) -> Result<Self, Self::Error> {
        Self::of(f.index, f.currency, f.fixing_date, f.end_date, f.sensitivity)
    }
}

/// A point sensitivity to one node of one curve.
///
/// Sensitivities order by curve key, then kind, then currency, then dates.
/// The value is excluded from the ordering so entries with equal keys can be
/// summed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointSensitivity {
    /// Discount curve zero rate.
    ZeroRate(ZeroRateSensitivity),
    /// Term index forward rate.
    IborRate(IborRateSensitivity),
    /// Overnight index rate over a period.
    OvernightRate(OvernightRateSensitivity),
}

impl PointSensitivity {
    /// Returns the key of the curve the sensitivity belongs to.
    ///
    /// Discount curves are keyed by currency code, forward curves by index name.
    #[must_use]
    pub fn curve_key(&self) -> &str {
        match self {
            PointSensitivity::ZeroRate(s) => s.currency.code(),
            PointSensitivity::IborRate(s) => s.index.name(),
            PointSensitivity::OvernightRate(s) => s.index.name(),
        }
    }

    /// Returns the currency of the sensitivity.
    #[must_use]
    pub fn currency(&self) -> Currency {
        match self {
            PointSensitivity::ZeroRate(s) => s.currency,
            PointSensitivity::IborRate(s) => s.currency,
            PointSensitivity::OvernightRate(s) => s.currency,
        }
    }

    /// Returns the primary date: the curve date or the fixing date.
    #[must_use]
    pub fn date(&self) -> Date {
        match self {
            PointSensitivity::ZeroRate(s) => s.date,
            PointSensitivity::IborRate(s) => s.fixing_date,
            PointSensitivity::OvernightRate(s) => s.fixing_date,
        }
    }

    /// Returns the sensitivity value.
    #[must_use]
    pub fn sensitivity(&self) -> f64 {
        match self {
            PointSensitivity::ZeroRate(s) => s.sensitivity,
            PointSensitivity::IborRate(s) => s.sensitivity,
            PointSensitivity::OvernightRate(s) => s.sensitivity,
        }
    }

    /// Returns a copy with the value replaced.
    #[must_use]
    pub fn with_sensitivity(&self, sensitivity: f64) -> Self {
        let mut copy = *self;
        match &mut copy {
            PointSensitivity::ZeroRate(s) => s.sensitivity = sensitivity,
            PointSensitivity::IborRate(s) => s.sensitivity = sensitivity,
            PointSensitivity::OvernightRate(s) => s.sensitivity = sensitivity,
        }
        copy
    }

    /// Returns a copy with the value scaled by `factor`.
    #[must_use]
    pub fn multiplied_by(&self, factor: f64) -> Self {
        self.with_sensitivity(self.sensitivity() * factor)
    }

    /// Returns a copy expressed in `currency`.
    ///
    /// Forward sensitivities take the currency of the value they belong to,
    /// which differs from the index currency when a product settles in
    /// another currency. Discount sensitivities are keyed by the currency of
    /// their curve and are returned unchanged.
    #[must_use]
    pub fn with_currency(&self, currency: Currency) -> Self {
        let mut copy = *self;
        match &mut copy {
            PointSensitivity::ZeroRate(_) => {}
            PointSensitivity::IborRate(s) => s.currency = currency,
            PointSensitivity::OvernightRate(s) => s.currency = currency,
        }
        copy
    }

    /// Compares two sensitivities, ignoring their values.
    #[must_use]
    pub fn compare_key(&self, other: &PointSensitivity) -> Ordering {
        self.curve_key()
            .cmp(other.curve_key())
            .then_with(|| self.rank().cmp(&other.rank()))
            .then_with(|| self.currency().cmp(&other.currency()))
            .then_with(|| self.date().cmp(&other.date()))
            .then_with(|| self.end_date().cmp(&other.end_date()))
    }

    fn rank(&self) -> u8 {
        match self {
            PointSensitivity::ZeroRate(_) => 0,
            PointSensitivity::IborRate(_) => 1,
            PointSensitivity::OvernightRate(_) => 2,
        }
    }

    fn end_date(&self) -> Option<Date> {
        match self {
            PointSensitivity::OvernightRate(s) => Some(s.end_date),
            PointSensitivity::ZeroRate(_) | PointSensitivity::IborRate(_) => None,
        }
    }
}

impl From<ZeroRateSensitivity> for PointSensitivity {
    fn from(s: ZeroRateSensitivity) -> Self {
        PointSensitivity::ZeroRate(s)
    }
}

impl From<IborRateSensitivity> for PointSensitivity {
    fn from(s: IborRateSensitivity) -> Self {
        PointSensitivity::IborRate(s)
    }
}

impl From<OvernightRateSensitivity> for PointSensitivity {
    fn from(s: OvernightRateSensitivity) -> Self {
        PointSensitivity::OvernightRate(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_overnight_requires_fixing_before_end() {
        let fixing = date(2025, 3, 3);
        assert!(OvernightRateSensitivity::of(RateIndex::Sofr, Currency::USD, fixing, fixing, 1.0)
            .is_err());
        assert!(OvernightRateSensitivity::of(
            RateIndex::Sofr,
            Currency::USD,
            fixing,
            date(2025, 3, 1),
            1.0
        )
        .is_err());
        let ok = OvernightRateSensitivity::of(
            RateIndex::Sofr,
            Currency::USD,
            fixing,
            date(2025, 6, 3),
            1.0,
        )
        .unwrap();
        assert_eq!(ok.end_date(), date(2025, 6, 3));
    }

    #[test]
    fn test_of_fixing_uses_next_business_day() {
        // Friday fixing ends on Monday
        let s = OvernightRateSensitivity::of_fixing(RateIndex::Sonia, Currency::GBP, date(2025, 1, 3), 2.0);
        assert_eq!(s.end_date(), date(2025, 1, 6));
        assert_eq!(s.sensitivity(), 2.0);
    }

    #[test]
    fn test_ordering_excludes_value() {
        let a: PointSensitivity =
            IborRateSensitivity::of(RateIndex::Euribor3M, date(2025, 3, 3), 1.0).into();
        let b = a.with_sensitivity(-5.0);
        assert_eq!(a.compare_key(&b), Ordering::Equal);
        assert_ne!(a, b);
    }

    #[test]
    fn test_ordering_chain() {
        let fixing = date(2025, 3, 3);
        let on = |ccy: Currency, fix: Date, end: Date| -> PointSensitivity {
            OvernightRateSensitivity::of(RateIndex::Sofr, ccy, fix, end, 1.0)
                .unwrap()
                .into()
        };

        // Curve key first: "EURIBOR 3M" < "SOFR" < "USD"
        let ibor: PointSensitivity = IborRateSensitivity::of(RateIndex::Euribor3M, fixing, 1.0).into();
        let sofr = on(Currency::USD, fixing, date(2025, 3, 4));
        let zero: PointSensitivity = ZeroRateSensitivity::of(Currency::USD, fixing, 1.0).into();
        assert_eq!(ibor.compare_key(&sofr), Ordering::Less);
        assert_eq!(sofr.compare_key(&zero), Ordering::Less);

        // Then currency, fixing date, end date
        assert_eq!(
            on(Currency::EUR, fixing, date(2025, 3, 4)).compare_key(&sofr),
            Ordering::Less
        );
        assert_eq!(
            on(Currency::USD, date(2025, 3, 4), date(2025, 3, 5)).compare_key(&sofr),
            Ordering::Greater
        );
        assert_eq!(
            on(Currency::USD, fixing, date(2025, 6, 3)).compare_key(&sofr),
            Ordering::Greater
        );
    }

    #[test]
    fn test_same_key_different_kind_is_ordered() {
        let fixing = date(2025, 3, 3);
        let ibor: PointSensitivity = IborRateSensitivity::of(RateIndex::Sofr, fixing, 1.0).into();
        let on: PointSensitivity =
            OvernightRateSensitivity::of_fixing(RateIndex::Sofr, Currency::USD, fixing, 1.0).into();
        assert_eq!(ibor.compare_key(&on), Ordering::Less);
        assert_eq!(on.compare_key(&ibor), Ordering::Greater);
    }

    #[test]
    fn test_with_currency_retags_forward_sensitivities() {
        let ibor: PointSensitivity =
            IborRateSensitivity::of(RateIndex::GbpLibor3M, date(2025, 6, 16), 2.0).into();
        let retagged = ibor.with_currency(Currency::AUD);
        assert_eq!(retagged.currency(), Currency::AUD);
        assert_eq!(retagged.curve_key(), "GBP LIBOR 3M");
        assert_eq!(retagged.sensitivity(), 2.0);

        let overnight: PointSensitivity = OvernightRateSensitivity::of(
            RateIndex::Sonia,
            Currency::GBP,
            date(2025, 6, 16),
            date(2025, 9, 16),
            1.0,
        )
        .unwrap()
        .into();
        assert_eq!(overnight.with_currency(Currency::USD).currency(), Currency::USD);

        let zero: PointSensitivity =
            ZeroRateSensitivity::of(Currency::GBP, date(2025, 9, 16), 1.0).into();
        assert_eq!(zero.with_currency(Currency::AUD), zero);
    }

    #[test]
    fn test_multiplied_by() {
        let s: PointSensitivity = ZeroRateSensitivity::of(Currency::GBP, date(2026, 1, 2), 3.0).into();
        assert_eq!(s.multiplied_by(-2.0).sensitivity(), -6.0);
        assert_eq!(s.curve_key(), "GBP");
    }

    #[test]
    fn test_deserialize_validates_dates() {
        let json = r#"{"index":"Sofr","currency":"USD","fixing_date":"2025-03-03","end_date":"2025-03-03","sensitivity":1.0}"#;
        assert!(serde_json::from_str::<OvernightRateSensitivity>(json).is_err());

        let json = r#"{"index":"Sofr","currency":"USD","fixing_date":"2025-03-03","end_date":"2025-03-04","sensitivity":1.0}"#;
        let s: OvernightRateSensitivity = serde_json::from_str(json).unwrap();
        assert_eq!(s.fixing_date(), date(2025, 3, 3));
    }
}
