//! An amount of money in a single currency.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Mul, Neg};

use crate::error::{MeridianError, MeridianResult};
use crate::types::{Currency, CurrencyPair};

/// An amount of money in a single currency.
///
/// Pricing results are carried as `f64`; [`CurrencyAmount::rounded`]
/// produces the amount rounded to the currency's minor units.
///
/// # Example
///
/// ```rust
/// use meridian_core::money::CurrencyAmount;
/// use meridian_core::types::Currency;
///
/// let a = CurrencyAmount::of(Currency::USD, 100.0);
/// let b = CurrencyAmount::of(Currency::USD, 25.5);
/// assert_eq!(a.plus(&b).unwrap().amount(), 125.5);
/// assert!(a.plus(&CurrencyAmount::of(Currency::EUR, 1.0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrencyAmount {
    currency: Currency,
    amount: f64,
}

impl CurrencyAmount {
    /// Creates an amount in the given currency.
    #[must_use]
    pub fn of(currency: Currency, amount: f64) -> Self {
        Self { currency, amount }
    }

    /// Creates a zero amount in the given currency.
    #[must_use]
    pub fn zero(currency: Currency) -> Self {
        Self::of(currency, 0.0)
    }

    /// Returns the currency.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the amount.
    #[must_use]
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Checks if the amount is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount == 0.0
    }

    /// Adds another amount in the same currency.
    ///
    /// # Errors
    ///
    /// Returns `MeridianError::CurrencyMismatch` if the currencies differ.
    pub fn plus(&self, other: &CurrencyAmount) -> MeridianResult<Self> {
        self.check_currency(other)?;
        Ok(Self::of(self.currency, self.amount + other.amount))
    }

    /// Subtracts another amount in the same currency.
    ///
    /// # Errors
    ///
    /// Returns `MeridianError::CurrencyMismatch` if the currencies differ.
    pub fn minus(&self, other: &CurrencyAmount) -> MeridianResult<Self> {
        self.check_currency(other)?;
        Ok(Self::of(self.currency, self.amount - other.amount))
    }

    /// Scales the amount by a factor.
    #[must_use]
    pub fn multiplied_by(&self, factor: f64) -> Self {
        Self::of(self.currency, self.amount * factor)
    }

    /// Returns the amount with its sign flipped.
    #[must_use]
    pub fn negated(&self) -> Self {
        Self::of(self.currency, -self.amount)
    }

    /// Applies a function to the amount, keeping the currency.
    #[must_use]
    pub fn map_amount(&self, f: impl FnOnce(f64) -> f64) -> Self {
        Self::of(self.currency, f(self.amount))
    }

    /// Converts to another currency at the given rate.
    ///
    /// `rate` is the price of one unit of this currency in `target`.
    /// Converting to the same currency requires a rate of exactly 1.
    ///
    /// # Errors
    ///
    /// Returns `MeridianError::MathError` when converting to the same
    /// currency with a rate other than 1.
    pub fn converted_to(&self, target: Currency, rate: f64) -> MeridianResult<Self> {
        if target == self.currency {
            if rate != 1.0 {
                return Err(MeridianError::math_error(format!(
                    "rate for identity pair {} must be 1, was {rate}",
                    CurrencyPair::of(target, target)
                )));
            }
            return Ok(*self);
        }
        Ok(Self::of(target, self.amount * rate))
    }

    /// Rounds the amount to the currency's minor units, half away from zero.
    ///
    /// # Errors
    ///
    /// Returns `MeridianError::MathError` if the amount is not finite.
    pub fn rounded(&self) -> MeridianResult<Self> {
        let decimal = Decimal::from_f64(self.amount).ok_or_else(|| {
            MeridianError::math_error(format!("cannot round non-finite amount {}", self.amount))
        })?;
        let rounded = decimal
            .round_dp_with_strategy(self.currency.minor_units(), RoundingStrategy::MidpointAwayFromZero)
            .to_f64()
            .ok_or_else(|| MeridianError::math_error("rounded amount out of range"))?;
        Ok(Self::of(self.currency, rounded))
    }

    fn check_currency(&self, other: &CurrencyAmount) -> MeridianResult<()> {
        if self.currency != other.currency {
            return Err(MeridianError::currency_mismatch(self.currency, other.currency));
        }
        Ok(())
    }
}

impl fmt::Display for CurrencyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.currency, self.amount)
    }
}

impl Neg for CurrencyAmount {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl Mul<f64> for CurrencyAmount {
    type Output = Self;

    fn mul(self, factor: f64) -> Self::Output {
        self.multiplied_by(factor)
    }
}
