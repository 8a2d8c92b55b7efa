//! Error types for the pricing layer.

use meridian_core::MeridianError;
use meridian_curves::CurveError;
use thiserror::Error;

/// Result type for pricing operations.
pub type PricingResult<T> = Result<T, PricingError>;

/// Errors that can occur while building or pricing products.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PricingError {
    /// A product failed validation at construction.
    #[error("invalid product: {reason}")]
    InvalidProduct {
        /// Description of the violation.
        reason: String,
    },

    /// A rate observation failed validation.
    #[error("invalid rate observation: {reason}")]
    InvalidObservation {
        /// Description of the violation.
        reason: String,
    },

    /// Invalid input parameter.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A formula hit a numeric degeneracy.
    #[error("math error: {0}")]
    MathError(String),

    /// Market data lookup failed.
    #[error(transparent)]
    Curve(#[from] CurveError),

    /// Error raised by the core layer.
    #[error(transparent)]
    Core(#[from] MeridianError),
}

impl PricingError {
    /// Creates an invalid product error.
    #[must_use]
    pub fn invalid_product(reason: impl Into<String>) -> Self {
        Self::InvalidProduct {
            reason: reason.into(),
        }
    }

    /// Creates an invalid observation error.
    #[must_use]
    pub fn invalid_observation(reason: impl Into<String>) -> Self {
        Self::InvalidObservation {
            reason: reason.into(),
        }
    }

    /// Creates a new invalid input error.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Creates a new math error.
    #[must_use]
    pub fn math_error(msg: impl Into<String>) -> Self {
        Self::MathError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_core::{Currency, CurrencyPair};

    #[test]
    fn test_display() {
        assert_eq!(
            PricingError::math_error("denominator is zero").to_string(),
            "math error: denominator is zero"
        );
        assert_eq!(
            PricingError::invalid_product("no legs").to_string(),
            "invalid product: no legs"
        );
    }

    #[test]
    fn test_lookup_errors_pass_through() {
        let pair = CurrencyPair::of(Currency::GBP, Currency::USD);
        let err: PricingError = CurveError::fx_rate_not_found(pair).into();
        assert!(matches!(err, PricingError::Curve(CurveError::FxRateNotFound { .. })));
        assert_eq!(err.to_string(), "FX rate not found: GBP/USD");

        let err: PricingError = MeridianError::currency_mismatch(Currency::GBP, Currency::USD).into();
        assert!(matches!(err, PricingError::Core(_)));
    }
}
