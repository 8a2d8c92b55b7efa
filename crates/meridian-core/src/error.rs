//! Error types for the Meridian core layer.
//!
//! This module defines the error type shared by dates, currencies, money
//! and the currency-pair conventions loader.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type MeridianResult<T> = Result<T, MeridianError>;

/// The main error type for core operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeridianError {
    /// Error in date calculations or invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// A currency code that is not three ASCII letters.
    #[error("Invalid currency code: '{code}'")]
    InvalidCurrency {
        /// The rejected code.
        code: String,
    },

    /// A currency pair that cannot be parsed or has identical currencies.
    #[error("Invalid currency pair: '{pair}' - {reason}")]
    InvalidCurrencyPair {
        /// The rejected pair text.
        pair: String,
        /// Reason for invalidity.
        reason: String,
    },

    /// Two amounts in different currencies were combined.
    #[error("Currency mismatch: expected {expected}, found {found}")]
    CurrencyMismatch {
        /// Currency of the receiving amount.
        expected: String,
        /// Currency of the other amount.
        found: String,
    },

    /// A currency is absent from a multi-currency amount.
    #[error("Currency not present: {currency}")]
    CurrencyNotFound {
        /// The missing currency.
        currency: String,
    },

    /// An FX rate could not be resolved.
    #[error("FX rate not found: {pair}")]
    FxRateNotFound {
        /// The pair that was requested.
        pair: String,
    },

    /// Day count parsing or calculation error.
    #[error("Day count error: {reason}")]
    DayCountError {
        /// Description of the error.
        reason: String,
    },

    /// Mathematical error (non-finite values, rounding overflow, etc.).
    #[error("Mathematical error: {reason}")]
    MathError {
        /// Description of the error.
        reason: String,
    },

    /// Configuration error.
    #[error("Configuration error: {reason}")]
    ConfigError {
        /// Description of the configuration error.
        reason: String,
    },
}

impl MeridianError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid currency error.
    #[must_use]
    pub fn invalid_currency(code: impl Into<String>) -> Self {
        Self::InvalidCurrency { code: code.into() }
    }

    /// Creates an invalid currency pair error.
    #[must_use]
    pub fn invalid_currency_pair(pair: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCurrencyPair {
            pair: pair.into(),
            reason: reason.into(),
        }
    }

    /// Creates a currency mismatch error.
    #[must_use]
    pub fn currency_mismatch(expected: impl ToString, found: impl ToString) -> Self {
        Self::CurrencyMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates a currency not found error.
    #[must_use]
    pub fn currency_not_found(currency: impl ToString) -> Self {
        Self::CurrencyNotFound {
            currency: currency.to_string(),
        }
    }

    /// Creates an FX rate not found error.
    #[must_use]
    pub fn fx_rate_not_found(pair: impl ToString) -> Self {
        Self::FxRateNotFound {
            pair: pair.to_string(),
        }
    }

    /// Creates a math error.
    #[must_use]
    pub fn math_error(reason: impl Into<String>) -> Self {
        Self::MathError {
            reason: reason.into(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config_error(reason: impl Into<String>) -> Self {
        Self::ConfigError {
            reason: reason.into(),
        }
    }
}
