//! Error types for curve and pricing environment operations.

use meridian_core::types::Date;
use meridian_core::MeridianError;
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Curve not found in environment.
    #[error("Curve not found: {name}")]
    CurveNotFound {
        /// Name/identifier of the missing curve.
        name: String,
    },

    /// FX rate not available in environment.
    #[error("FX rate not found: {pair}")]
    FxRateNotFound {
        /// The requested currency pair.
        pair: String,
    },

    /// Historic fixing not available for a date before the valuation date.
    #[error("Fixing not found: {index} on {date}")]
    FixingNotFound {
        /// Index name.
        index: String,
        /// Fixing date.
        date: Date,
    },

    /// Reference dates between curves don't match.
    #[error("Reference date mismatch: expected {expected}, got {got}")]
    ReferenceDateMismatch {
        /// Expected reference date.
        expected: Date,
        /// Actual reference date.
        got: Date,
    },

    /// Not enough data points for interpolation.
    #[error("Insufficient points: need at least {required}, got {got}")]
    InsufficientPoints {
        /// Minimum required points.
        required: usize,
        /// Actual number of points provided.
        got: usize,
    },

    /// Tenors are not strictly increasing.
    #[error("Non-monotonic tenors at index {index}: {prev:.4} >= {current:.4}")]
    NonMonotonicTenors {
        /// Index where monotonicity violation occurred.
        index: usize,
        /// Previous tenor value.
        prev: f64,
        /// Current tenor value.
        current: f64,
    },

    /// Invalid value (NaN, Inf, or domain error).
    #[error("Invalid value: {reason}")]
    InvalidValue {
        /// Description of why value is invalid.
        reason: String,
    },

    /// A point sensitivity failed validation.
    #[error("Invalid sensitivity: {reason}")]
    InvalidSensitivity {
        /// Description of the violation.
        reason: String,
    },

    /// Builder error.
    #[error("Builder error: {reason}")]
    BuilderError {
        /// Description of the builder error.
        reason: String,
    },

    /// Error raised by the core layer.
    #[error(transparent)]
    Core(#[from] MeridianError),
}

impl CurveError {
    /// Creates a curve not found error.
    #[must_use]
    pub fn curve_not_found(name: impl Into<String>) -> Self {
        Self::CurveNotFound { name: name.into() }
    }

    /// Creates an FX rate not found error.
    #[must_use]
    pub fn fx_rate_not_found(pair: impl ToString) -> Self {
        Self::FxRateNotFound {
            pair: pair.to_string(),
        }
    }

    /// Creates a fixing not found error.
    #[must_use]
    pub fn fixing_not_found(index: impl ToString, date: Date) -> Self {
        Self::FixingNotFound {
            index: index.to_string(),
            date,
        }
    }

    /// Creates a reference date mismatch error.
    #[must_use]
    pub fn reference_date_mismatch(expected: Date, got: Date) -> Self {
        Self::ReferenceDateMismatch { expected, got }
    }

    /// Creates an invalid value error.
    #[must_use]
    pub fn invalid_value(reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            reason: reason.into(),
        }
    }

    /// Creates an invalid sensitivity error.
    #[must_use]
    pub fn invalid_sensitivity(reason: impl Into<String>) -> Self {
        Self::InvalidSensitivity {
            reason: reason.into(),
        }
    }

    /// Creates a builder error.
    #[must_use]
    pub fn builder_error(reason: impl Into<String>) -> Self {
        Self::BuilderError {
            reason: reason.into(),
        }
    }
}
