//! Core trait for read-only curves.
//!
//! This module defines the [`Curve`] trait queried by pricing environments.
//! Curves are built elsewhere; this layer only reads them.

use meridian_core::Date;

use crate::error::CurveResult;

/// Time of one day in ACT/365F years.
pub(crate) const ONE_DAY: f64 = 1.0 / 365.0;

/// A read-only discounting curve.
///
/// # Required Methods
///
/// - [`discount_factor`](Curve::discount_factor): discount factor at a time in years
/// - [`reference_date`](Curve::reference_date): date from which times are measured
///
/// # Derived Methods
///
/// - [`zero_rate`](Curve::zero_rate): continuously-compounded zero rate
/// - [`forward_rate`](Curve::forward_rate): simple forward rate between two times
/// - date-based variants measuring time ACT/365F from the reference date
///
/// # Example
///
/// ```rust
/// use meridian_core::Date;
/// use meridian_curves::{Curve, FlatCurve};
///
/// let today = Date::from_ymd(2025, 1, 2).unwrap();
/// let curve = FlatCurve::new(today, 0.03);
/// let df = curve.discount_factor(1.0).unwrap();
/// assert!((df - (-0.03f64).exp()).abs() < 1e-15);
/// ```
pub trait Curve: Send + Sync {
    /// Returns the discount factor from the reference date to time `t`.
    ///
    /// Returns 1.0 for t ≤ 0.
    fn discount_factor(&self, t: f64) -> CurveResult<f64>;

    /// Returns the curve's reference (valuation) date.
    fn reference_date(&self) -> Date;

    /// Returns the continuously-compounded zero rate at time `t`.
    ///
    /// For t ≤ 0 the rate over the first day is returned.
    fn zero_rate(&self, t: f64) -> CurveResult<f64> {
        let t = if t <= 0.0 { ONE_DAY } else { t };
        let df = self.discount_factor(t)?;
        Ok(-df.ln() / t)
    }

    /// Returns the simply-compounded forward rate between times `t1` and `t2`.
    ///
    /// # Formula
    ///
    /// `F(t1, t2) = (DF(t1) / DF(t2) - 1) / (t2 - t1)`
    fn forward_rate(&self, t1: f64, t2: f64) -> CurveResult<f64> {
        if t2 <= t1 {
            return Ok(0.0);
        }

        let df1 = self.discount_factor(t1)?;
        let df2 = self.discount_factor(t2)?;

        if df2 <= 0.0 {
            return Ok(0.0);
        }

        Ok((df1 / df2 - 1.0) / (t2 - t1))
    }

    /// Returns the year fraction from the reference date to the given date.
    ///
    /// Uses ACT/365 Fixed.
    fn year_fraction(&self, date: Date) -> f64 {
        self.reference_date().days_between(&date) as f64 / 365.0
    }

    /// Returns the discount factor for a specific date.
    fn discount_factor_at(&self, date: Date) -> CurveResult<f64> {
        self.discount_factor(self.year_fraction(date))
    }

    /// Returns the forward rate between two dates.
    fn forward_rate_between(&self, start: Date, end: Date) -> CurveResult<f64> {
        self.forward_rate(self.year_fraction(start), self.year_fraction(end))
    }
}
