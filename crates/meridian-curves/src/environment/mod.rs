//! Pricing environments.
//!
//! A [`PricingEnvironment`] is a read-only snapshot of market state at a
//! valuation date. Every query is a pure function of the snapshot.

mod immutable;

pub use immutable::{CurveRef, ImmutablePricingEnvironment, ImmutablePricingEnvironmentBuilder};

use meridian_core::money::{CurrencyAmount, MultiCurrencyAmount};
use meridian_core::types::{Currency, CurrencyPair, Date};

use crate::error::{CurveError, CurveResult};
use crate::index::RateIndex;

/// Market state queried by pricers.
///
/// # Required Methods
///
/// - [`valuation_date`](PricingEnvironment::valuation_date)
/// - [`discount_factor`](PricingEnvironment::discount_factor): per currency and payment date
/// - [`fx_rate`](PricingEnvironment::fx_rate): spot rate for a pair
/// - [`index_rate`](PricingEnvironment::index_rate): forward or historic index rate
///
/// Unresolvable lookups return an error; they are never defaulted.
pub trait PricingEnvironment: Send + Sync {
    /// Returns the valuation date of the snapshot.
    fn valuation_date(&self) -> Date;

    /// Returns the discount factor for one unit of `currency` paid on `date`.
    fn discount_factor(&self, currency: Currency, date: Date) -> CurveResult<f64>;

    /// Returns the spot rate: the price of one unit of the base currency in
    /// the counter currency.
    fn fx_rate(&self, pair: CurrencyPair) -> CurveResult<f64>;

    /// Returns the rate of `index` over `[start, end]`.
    ///
    /// The period may collapse to a single fixing date (`start == end`).
    fn index_rate(&self, index: RateIndex, start: Date, end: Date) -> CurveResult<f64>;

    /// Returns the rate from `base` to `counter`, 1.0 without a lookup when
    /// they are equal.
    fn fx_rate_between(&self, base: Currency, counter: Currency) -> CurveResult<f64> {
        if base == counter {
            return Ok(1.0);
        }
        self.fx_rate(CurrencyPair::of(base, counter))
    }

    /// Returns the ACT/365F time in years from the valuation date to `date`.
    fn relative_time(&self, date: Date) -> f64 {
        self.valuation_date().days_between(&date) as f64 / 365.0
    }

    /// Converts an amount into `target` at spot.
    fn fx_convert(&self, amount: CurrencyAmount, target: Currency) -> CurveResult<CurrencyAmount> {
        let rate = self.fx_rate_between(amount.currency(), target)?;
        Ok(amount.converted_to(target, rate)?)
    }

    /// Converts every entry of `amounts` into `target` at spot and sums them.
    fn fx_convert_all(
        &self,
        amounts: &MultiCurrencyAmount,
        target: Currency,
    ) -> CurveResult<CurrencyAmount> {
        amounts.convert_to(target, |pair| self.fx_rate(pair))
    }
}

impl<E: PricingEnvironment + ?Sized> PricingEnvironment for &E {
    fn valuation_date(&self) -> Date {
        (**self).valuation_date()
    }

    fn discount_factor(&self, currency: Currency, date: Date) -> CurveResult<f64> {
        (**self).discount_factor(currency, date)
    }

    fn fx_rate(&self, pair: CurrencyPair) -> CurveResult<f64> {
        (**self).fx_rate(pair)
    }

    fn index_rate(&self, index: RateIndex, start: Date, end: Date) -> CurveResult<f64> {
        (**self).index_rate(index, start, end)
    }
}

/// Checks that a period is not reversed.
pub(crate) fn check_period(index: RateIndex, start: Date, end: Date) -> CurveResult<()> {
    if end < start {
        return Err(CurveError::invalid_value(format!(
            "{index} period ends {end} before it starts {start}"
        )));
    }
    Ok(())
}
