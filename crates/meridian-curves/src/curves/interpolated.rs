//! Curve interpolating zero rates between pillars.

use meridian_core::Date;

use crate::error::{CurveError, CurveResult};
use crate::traits::Curve;

/// A curve defined by continuously-compounded zero rates at pillar times.
///
/// Zero rates are interpolated linearly between pillars and held flat beyond
/// the first and last pillar.
///
/// # Example
///
/// ```rust
/// use meridian_core::Date;
/// use meridian_curves::{Curve, InterpolatedCurve};
///
/// let today = Date::from_ymd(2025, 1, 2).unwrap();
/// let curve = InterpolatedCurve::new(today, vec![1.0, 2.0], vec![0.02, 0.03]).unwrap();
/// assert!((curve.zero_rate(1.5).unwrap() - 0.025).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolatedCurve {
    reference_date: Date,
    tenors: Vec<f64>,
    zero_rates: Vec<f64>,
}

impl InterpolatedCurve {
    /// Creates a curve from pillar times (years) and zero rates.
    ///
    /// # Errors
    ///
    /// Returns an error if the vectors differ in length, are empty, contain
    /// non-finite values, or the tenors are not strictly increasing.
    pub fn new(reference_date: Date, tenors: Vec<f64>, zero_rates: Vec<f64>) -> CurveResult<Self> {
        if tenors.len() != zero_rates.len() {
            return Err(CurveError::builder_error(format!(
                "Tenors ({}) and rates ({}) must have same length",
                tenors.len(),
                zero_rates.len()
            )));
        }

        if tenors.is_empty() {
            return Err(CurveError::InsufficientPoints {
                required: 1,
                got: 0,
            });
        }

        if tenors.iter().chain(zero_rates.iter()).any(|v| !v.is_finite()) {
            return Err(CurveError::invalid_value("pillar values must be finite"));
        }

        for i in 1..tenors.len() {
            if tenors[i] <= tenors[i - 1] {
                return Err(CurveError::NonMonotonicTenors {
                    index: i,
                    prev: tenors[i - 1],
                    current: tenors[i],
                });
            }
        }

        Ok(Self {
            reference_date,
            tenors,
            zero_rates,
        })
    }

    /// Creates a curve from pillar dates, measuring time ACT/365F from the
    /// reference date.
    ///
    /// # Errors
    ///
    /// See [`InterpolatedCurve::new`].
    pub fn from_dates(
        reference_date: Date,
        dates: &[Date],
        zero_rates: Vec<f64>,
    ) -> CurveResult<Self> {
        let tenors = dates
            .iter()
            .map(|d| reference_date.days_between(d) as f64 / 365.0)
            .collect();
        Self::new(reference_date, tenors, zero_rates)
    }

    /// Returns the pillar times.
    #[must_use]
    pub fn tenors(&self) -> &[f64] {
        &self.tenors
    }

    /// Returns the pillar zero rates.
    #[must_use]
    pub fn zero_rates(&self) -> &[f64] {
        &self.zero_rates
    }

    fn interpolated_rate(&self, t: f64) -> f64 {
        let n = self.tenors.len();
        if t <= self.tenors[0] {
            return self.zero_rates[0];
        }
        if t >= self.tenors[n - 1] {
            return self.zero_rates[n - 1];
        }

        // First pillar at or beyond t; exists because t < last tenor.
        let hi = self.tenors.partition_point(|&x| x < t);
        let lo = hi - 1;
        let weight = (t - self.tenors[lo]) / (self.tenors[hi] - self.tenors[lo]);
        self.zero_rates[lo] + weight * (self.zero_rates[hi] - self.zero_rates[lo])
    }
}

impl Curve for InterpolatedCurve {
    fn discount_factor(&self, t: f64) -> CurveResult<f64> {
        if t <= 0.0 {
            return Ok(1.0);
        }
        Ok((-self.interpolated_rate(t) * t).exp())
    }

    fn reference_date(&self) -> Date {
        self.reference_date
    }

    fn zero_rate(&self, t: f64) -> CurveResult<f64> {
        Ok(self.interpolated_rate(t))
    }
}
