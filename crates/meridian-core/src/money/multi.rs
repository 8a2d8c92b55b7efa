//! Amounts of money in several currencies.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Add;

use super::CurrencyAmount;
use crate::error::{MeridianError, MeridianResult};
use crate::types::{Currency, CurrencyPair};

/// A collection of amounts, at most one per currency.
///
/// Adding an amount in a currency already present sums into the existing
/// entry, so a `MultiCurrencyAmount` never holds two entries for the same
/// currency. Entries iterate in currency-code order.
///
/// # Example
///
/// ```rust
/// use meridian_core::money::{CurrencyAmount, MultiCurrencyAmount};
/// use meridian_core::types::Currency;
///
/// let total = MultiCurrencyAmount::of(Currency::GBP, 100.0)
///     + MultiCurrencyAmount::of(Currency::USD, 50.0)
///     + MultiCurrencyAmount::of(Currency::GBP, 10.0);
/// assert_eq!(total.len(), 2);
/// assert_eq!(total.amount_or_zero(Currency::GBP), 110.0);
/// ```
///
/// Serialized as a map from currency code to amount. Deserializing sums
/// repeated currency keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MultiCurrencyAmount {
    amounts: BTreeMap<Currency, f64>,
}

impl MultiCurrencyAmount {
    /// Creates an empty amount.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates an amount holding a single currency.
    #[must_use]
    pub fn of(currency: Currency, amount: f64) -> Self {
        Self::empty().plus_amount(CurrencyAmount::of(currency, amount))
    }

    /// Creates an amount from a list, summing entries that share a currency.
    #[must_use]
    pub fn from_amounts(amounts: impl IntoIterator<Item = CurrencyAmount>) -> Self {
        amounts.into_iter().collect()
    }

    /// Returns a copy with the given amount added.
    #[must_use]
    pub fn plus_amount(mut self, amount: CurrencyAmount) -> Self {
        self.add_in_place(amount);
        self
    }

    /// Returns the sum of this and another multi-currency amount.
    #[must_use]
    pub fn plus(&self, other: &MultiCurrencyAmount) -> Self {
        let mut result = self.clone();
        for amount in other.iter() {
            result.add_in_place(amount);
        }
        result
    }

    /// Returns this amount minus another multi-currency amount.
    #[must_use]
    pub fn minus(&self, other: &MultiCurrencyAmount) -> Self {
        self.plus(&other.negated())
    }

    /// Returns the amount in the given currency.
    ///
    /// # Errors
    ///
    /// Returns `MeridianError::CurrencyNotFound` if the currency is absent.
    pub fn amount(&self, currency: Currency) -> MeridianResult<CurrencyAmount> {
        self.amounts
            .get(&currency)
            .map(|amount| CurrencyAmount::of(currency, *amount))
            .ok_or_else(|| MeridianError::currency_not_found(currency))
    }

    /// Returns the amount in the given currency, or zero when absent.
    #[must_use]
    pub fn amount_or_zero(&self, currency: Currency) -> f64 {
        self.amounts.get(&currency).copied().unwrap_or(0.0)
    }

    /// Checks if the currency has an entry.
    #[must_use]
    pub fn contains(&self, currency: Currency) -> bool {
        self.amounts.contains_key(&currency)
    }

    /// Returns the currencies present, in code order.
    pub fn currencies(&self) -> impl Iterator<Item = Currency> + '_ {
        self.amounts.keys().copied()
    }

    /// Returns the number of currencies present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    /// Checks if no currency is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    /// Iterates the entries as `CurrencyAmount`s, in code order.
    pub fn iter(&self) -> impl Iterator<Item = CurrencyAmount> + '_ {
        self.amounts
            .iter()
            .map(|(currency, amount)| CurrencyAmount::of(*currency, *amount))
    }

    /// Scales every entry by a factor.
    #[must_use]
    pub fn multiplied_by(&self, factor: f64) -> Self {
        self.map_amounts(|amount| amount * factor)
    }

    /// Flips the sign of every entry.
    #[must_use]
    pub fn negated(&self) -> Self {
        self.map_amounts(|amount| -amount)
    }

    /// Applies a function to every amount, keeping the currencies.
    #[must_use]
    pub fn map_amounts(&self, mut f: impl FnMut(f64) -> f64) -> Self {
        Self {
            amounts: self
                .amounts
                .iter()
                .map(|(currency, amount)| (*currency, f(*amount)))
                .collect(),
        }
    }

    /// Converts every entry to `target` and sums them.
    ///
    /// `rate` is asked for the price of one unit of each entry's currency in
    /// `target`. An entry already in `target` is taken at 1 without calling
    /// `rate`.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by `rate`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use meridian_core::money::MultiCurrencyAmount;
    /// use meridian_core::types::Currency;
    /// use meridian_core::MeridianError;
    ///
    /// let total = MultiCurrencyAmount::of(Currency::GBP, 100.0)
    ///     + MultiCurrencyAmount::of(Currency::USD, 50.0);
    /// let usd = total
    ///     .convert_to(Currency::USD, |_pair| Ok::<_, MeridianError>(1.5))
    ///     .unwrap();
    /// assert_eq!(usd.amount(), 200.0);
    /// ```
    pub fn convert_to<E, F>(&self, target: Currency, mut rate: F) -> Result<CurrencyAmount, E>
    where
        F: FnMut(CurrencyPair) -> Result<f64, E>,
    {
        let mut total = 0.0;
        for (currency, amount) in &self.amounts {
            if *currency == target {
                total += amount;
            } else {
                total += amount * rate(CurrencyPair::of(*currency, target))?;
            }
        }
        Ok(CurrencyAmount::of(target, total))
    }

    fn add_in_place(&mut self, amount: CurrencyAmount) {
        *self.amounts.entry(amount.currency()).or_insert(0.0) += amount.amount();
    }
}

impl<'de> Deserialize<'de> for MultiCurrencyAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AmountsVisitor;

        impl<'de> Visitor<'de> for AmountsVisitor {
            type Value = MultiCurrencyAmount;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of currency codes to amounts")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut total = MultiCurrencyAmount::empty();
                while let Some((currency, amount)) = map.next_entry::<Currency, f64>()? {
                    total.add_in_place(CurrencyAmount::of(currency, amount));
                }
                Ok(total)
            }
        }

        deserializer.deserialize_map(AmountsVisitor)
    }
}

impl FromIterator<CurrencyAmount> for MultiCurrencyAmount {
    fn from_iter<I: IntoIterator<Item = CurrencyAmount>>(iter: I) -> Self {
        let mut result = Self::empty();
        for amount in iter {
            result.add_in_place(amount);
        }
        result
    }
}

impl From<CurrencyAmount> for MultiCurrencyAmount {
    fn from(amount: CurrencyAmount) -> Self {
        Self::empty().plus_amount(amount)
    }
}

impl Add for MultiCurrencyAmount {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        self.plus(&other)
    }
}

impl Add<CurrencyAmount> for MultiCurrencyAmount {
    type Output = Self;

    fn add(self, amount: CurrencyAmount) -> Self::Output {
        self.plus_amount(amount)
    }
}

impl fmt::Display for MultiCurrencyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, amount) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{amount}")?;
        }
        write!(f, "]")
    }
}
