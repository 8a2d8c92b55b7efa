//! Curve with a single continuously-compounded zero rate.

use meridian_core::Date;

use crate::error::{CurveError, CurveResult};
use crate::traits::Curve;

/// A curve with a constant continuously-compounded zero rate.
///
/// `DF(t) = exp(-r * t)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatCurve {
    reference_date: Date,
    rate: f64,
}

impl FlatCurve {
    /// Creates a flat curve.
    #[must_use]
    pub fn new(reference_date: Date, rate: f64) -> Self {
        Self {
            reference_date,
            rate,
        }
    }

    /// Returns the zero rate.
    #[must_use]
    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl Curve for FlatCurve {
    fn discount_factor(&self, t: f64) -> CurveResult<f64> {
        if !self.rate.is_finite() {
            return Err(CurveError::invalid_value(format!(
                "flat curve rate is not finite: {}",
                self.rate
            )));
        }
        if t <= 0.0 {
            return Ok(1.0);
        }
        Ok((-self.rate * t).exp())
    }

    fn reference_date(&self) -> Date {
        self.reference_date
    }

    fn zero_rate(&self, _t: f64) -> CurveResult<f64> {
        Ok(self.rate)
    }
}
