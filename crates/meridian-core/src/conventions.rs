//! Market quoting conventions for currency pairs.
//!
//! Conventions are read from a TOML table keyed by pair:
//!
//! ```toml
//! [currency_pairs]
//! "EUR/USD" = { rate_digits = 4 }
//! "USD/JPY" = { rate_digits = 2 }
//! ```
//!
//! The key fixes the market ordering of the pair and `rate_digits` the
//! number of decimal places FX rates are quoted to. These values drive
//! display and rounding only; pricing never consults them.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{MeridianError, MeridianResult};
use crate::types::{Currency, CurrencyPair};

/// Built-in table of common pairs.
const STANDARD_TABLE: &str = include_str!("../resources/currency_pairs.toml");

/// Largest scale a `Decimal` can carry.
const MAX_RATE_DIGITS: u32 = 28;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConventionsFile {
    #[serde(default)]
    currency_pairs: BTreeMap<String, PairEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PairEntry {
    rate_digits: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PairConvention {
    pair: CurrencyPair,
    rate_digits: u32,
}

/// Immutable table of currency-pair conventions.
///
/// Lookups accept either ordering of a pair: `USD/EUR` finds the `EUR/USD`
/// entry.
///
/// # Example
///
/// ```rust
/// use meridian_core::conventions::CurrencyPairConventions;
/// use meridian_core::types::CurrencyPair;
///
/// let conventions = CurrencyPairConventions::from_toml_str(
///     r#"
///     [currency_pairs]
///     "EUR/USD" = { rate_digits = 4 }
///     "#,
/// )
/// .unwrap();
///
/// let pair = CurrencyPair::parse("USD/EUR").unwrap();
/// assert_eq!(conventions.rate_digits(&pair), Some(4));
/// assert_eq!(conventions.conventional_pair(&pair).unwrap().to_string(), "EUR/USD");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CurrencyPairConventions {
    by_key: HashMap<(Currency, Currency), PairConvention>,
}

impl CurrencyPairConventions {
    /// Loads the built-in table of common pairs.
    ///
    /// # Errors
    ///
    /// Returns `MeridianError::ConfigError` if the embedded table is invalid.
    pub fn standard() -> MeridianResult<Self> {
        Self::from_toml_str(STANDARD_TABLE)
    }

    /// Parses conventions from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `MeridianError::ConfigError` if the document is malformed, a key
    /// is not a valid `AAA/BBB` pair, a pair has identical currencies, the
    /// digit count is out of range, or two keys denote the same unordered pair
    /// (e.g. `EUR/USD` and `USD/EUR`).
    pub fn from_toml_str(content: &str) -> MeridianResult<Self> {
        let file: ConventionsFile = toml::from_str(content)
            .map_err(|e| MeridianError::config_error(format!("invalid currency pair table: {e}")))?;

        let mut by_key: HashMap<(Currency, Currency), PairConvention> = HashMap::new();
        for (key, entry) in file.currency_pairs {
            let pair = CurrencyPair::parse(&key)
                .map_err(|e| MeridianError::config_error(e.to_string()))?;
            if pair.is_identity() {
                return Err(MeridianError::config_error(format!(
                    "currency pair {pair} has identical currencies"
                )));
            }
            if entry.rate_digits > MAX_RATE_DIGITS {
                return Err(MeridianError::config_error(format!(
                    "currency pair {pair} has {} rate digits, maximum is {MAX_RATE_DIGITS}",
                    entry.rate_digits
                )));
            }

            let convention = PairConvention {
                pair,
                rate_digits: entry.rate_digits,
            };
            if let Some(existing) = by_key.insert(pair.unordered_key(), convention) {
                warn!(pair = %pair, existing = %existing.pair, "duplicate currency pair definition");
                return Err(MeridianError::config_error(format!(
                    "currency pair {pair} is defined twice (also as {})",
                    existing.pair
                )));
            }
        }

        debug!(pairs = by_key.len(), "loaded currency pair conventions");
        Ok(Self { by_key })
    }

    /// Reads and parses conventions from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `MeridianError::ConfigError` if the file cannot be read or
    /// fails validation (see [`Self::from_toml_str`]).
    pub fn from_file(path: impl AsRef<Path>) -> MeridianResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            MeridianError::config_error(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Returns the number of pairs defined.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// Checks if no pair is defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Checks if the pair, in either ordering, is defined.
    #[must_use]
    pub fn contains(&self, pair: &CurrencyPair) -> bool {
        self.by_key.contains_key(&pair.unordered_key())
    }

    /// Returns the defined pairs in their market ordering, sorted.
    #[must_use]
    pub fn pairs(&self) -> Vec<CurrencyPair> {
        let mut pairs: Vec<_> = self.by_key.values().map(|c| c.pair).collect();
        pairs.sort();
        pairs
    }

    /// Returns the quoting precision of the pair, in either ordering.
    #[must_use]
    pub fn rate_digits(&self, pair: &CurrencyPair) -> Option<u32> {
        self.lookup(pair).map(|c| c.rate_digits)
    }

    /// Returns the market ordering of the pair.
    #[must_use]
    pub fn conventional_pair(&self, pair: &CurrencyPair) -> Option<CurrencyPair> {
        self.lookup(pair).map(|c| c.pair)
    }

    /// Checks if the pair is written in its market ordering.
    #[must_use]
    pub fn is_conventional(&self, pair: &CurrencyPair) -> bool {
        self.lookup(pair).is_some_and(|c| c.pair == *pair)
    }

    /// Rounds an FX rate to the pair's quoting precision, half away from zero.
    ///
    /// # Errors
    ///
    /// Returns `MeridianError::InvalidCurrencyPair` if the pair has no
    /// convention, or `MeridianError::MathError` if the rate is not finite.
    pub fn round_rate(&self, pair: &CurrencyPair, rate: f64) -> MeridianResult<f64> {
        let digits = self
            .rate_digits(pair)
            .ok_or_else(|| MeridianError::invalid_currency_pair(pair.to_string(), "no convention defined"))?;
        Decimal::from_f64(rate)
            .map(|d| d.round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero))
            .and_then(|d| d.to_f64())
            .ok_or_else(|| MeridianError::math_error(format!("cannot round FX rate {rate}")))
    }

    fn lookup(&self, pair: &CurrencyPair) -> Option<&PairConvention> {
        self.by_key.get(&pair.unordered_key())
    }
}
