//! Ordered currency pair (e.g., EUR/USD).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Currency;
use crate::error::{MeridianError, MeridianResult};

/// An ordered pair of currencies.
///
/// The pair represents an exchange rate quote: for EUR/USD = 1.10,
/// base=EUR, counter=USD, meaning 1 EUR = 1.10 USD.
///
/// # Example
///
/// ```rust
/// use meridian_core::types::{Currency, CurrencyPair};
///
/// let pair = CurrencyPair::parse("EUR/USD").unwrap();
/// assert_eq!(pair.base(), Currency::EUR);
/// assert_eq!(pair.inverse().to_string(), "USD/EUR");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyPair {
    base: Currency,
    counter: Currency,
}

impl CurrencyPair {
    /// Creates a new currency pair. Identity pairs (e.g. USD/USD) are allowed.
    #[must_use]
    pub fn of(base: Currency, counter: Currency) -> Self {
        Self { base, counter }
    }

    /// Parses a pair written as `AAA/BBB`.
    ///
    /// # Errors
    ///
    /// Returns `MeridianError::InvalidCurrencyPair` if the text is not two
    /// currency codes separated by `/`.
    pub fn parse(s: &str) -> MeridianResult<Self> {
        let (base, counter) = s
            .trim()
            .split_once('/')
            .ok_or_else(|| MeridianError::invalid_currency_pair(s, "expected format AAA/BBB"))?;
        let base = Currency::of(base)
            .map_err(|_| MeridianError::invalid_currency_pair(s, "invalid base currency"))?;
        let counter = Currency::of(counter)
            .map_err(|_| MeridianError::invalid_currency_pair(s, "invalid counter currency"))?;
        Ok(Self::of(base, counter))
    }

    /// Returns the base currency.
    #[must_use]
    pub fn base(&self) -> Currency {
        self.base
    }

    /// Returns the counter currency.
    #[must_use]
    pub fn counter(&self) -> Currency {
        self.counter
    }

    /// Returns the inverse pair (swaps base and counter).
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self::of(self.counter, self.base)
    }

    /// Checks if base and counter are the same currency.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.base == self.counter
    }

    /// Checks if `other` is this pair with base and counter swapped.
    #[must_use]
    pub fn is_inverse(&self, other: &CurrencyPair) -> bool {
        self.base == other.counter && self.counter == other.base
    }

    /// Checks if the pair contains the currency on either side.
    #[must_use]
    pub fn contains(&self, currency: Currency) -> bool {
        self.base == currency || self.counter == currency
    }

    /// Returns the pair with currencies sorted by code.
    ///
    /// `EUR/USD` and `USD/EUR` share the same unordered key.
    #[must_use]
    pub fn unordered_key(&self) -> (Currency, Currency) {
        if self.base <= self.counter {
            (self.base, self.counter)
        } else {
            (self.counter, self.base)
        }
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.counter)
    }
}

impl FromStr for CurrencyPair {
    type Err = MeridianError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CurrencyPair {
    type Error = MeridianError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CurrencyPair> for String {
    fn from(pair: CurrencyPair) -> Self {
        pair.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let pair = CurrencyPair::parse("gbp/usd").unwrap();
        assert_eq!(pair.base(), Currency::GBP);
        assert_eq!(pair.counter(), Currency::USD);
        assert_eq!(pair.to_string(), "GBP/USD");
    }

    #[test]
    fn test_parse_invalid() {
        assert!(CurrencyPair::parse("EURUSD").is_err());
        assert!(CurrencyPair::parse("EUR/US").is_err());
        assert!(CurrencyPair::parse("/USD").is_err());
    }

    #[test]
    fn test_inverse() {
        let pair = CurrencyPair::of(Currency::EUR, Currency::USD);
        let inv = pair.inverse();
        assert!(pair.is_inverse(&inv));
        assert!(!pair.is_inverse(&pair));
        assert_eq!(inv.inverse(), pair);
    }

    #[test]
    fn test_identity_and_contains() {
        assert!(CurrencyPair::of(Currency::USD, Currency::USD).is_identity());
        let pair = CurrencyPair::of(Currency::EUR, Currency::USD);
        assert!(!pair.is_identity());
        assert!(pair.contains(Currency::EUR));
        assert!(pair.contains(Currency::USD));
        assert!(!pair.contains(Currency::GBP));
    }

    #[test]
    fn test_unordered_key() {
        let a = CurrencyPair::parse("AAA/BBB").unwrap();
        let b = CurrencyPair::parse("BBB/AAA").unwrap();
        assert_eq!(a.unordered_key(), b.unordered_key());
    }

    #[test]
    fn test_serde_as_string() {
        let pair = CurrencyPair::of(Currency::EUR, Currency::GBP);
        let json = serde_json::to_string(&pair).unwrap();
        assert_eq!(json, "\"EUR/GBP\"");
        assert_eq!(serde_json::from_str::<CurrencyPair>(&json).unwrap(), pair);
    }
}
