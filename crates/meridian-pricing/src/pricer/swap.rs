//! Pricer for expanded swaps.

use meridian_core::{Currency, CurrencyAmount, MultiCurrencyAmount};
use meridian_curves::{PointSensitivities, PricingEnvironment};
use rayon::prelude::*;
use tracing::debug;

use super::leg::SwapLegPricer;
use crate::error::PricingResult;
use crate::observation::RateObservationFn;
use crate::product::{ExpandedSwap, ExpandedSwapLeg};

/// Prices a swap by pricing each of its legs.
///
/// A single-currency swap sums its legs directly and never reads an FX
/// rate. A cross-currency swap reports one amount per currency.
#[derive(Debug, Clone, Default)]
pub struct SwapProductPricer<O> {
    leg_pricer: SwapLegPricer<O>,
}

impl<O: RateObservationFn> SwapProductPricer<O> {
    /// Creates a pricer on top of a leg pricer.
    #[must_use]
    pub fn new(leg_pricer: SwapLegPricer<O>) -> Self {
        Self { leg_pricer }
    }

    /// Returns the leg pricer.
    #[must_use]
    pub fn leg_pricer(&self) -> &SwapLegPricer<O> {
        &self.leg_pricer
    }

    /// Returns the present value converted into `currency` at spot.
    ///
    /// Each leg value is converted with the rate from the leg currency to
    /// `currency`; legs already in `currency` are not converted.
    pub fn present_value_in(
        &self,
        env: &dyn PricingEnvironment,
        swap: &ExpandedSwap,
        currency: Currency,
    ) -> PricingResult<CurrencyAmount> {
        let mut total = 0.0;
        for leg in swap.legs() {
            let pv = self.leg_pricer.present_value(env, leg)?;
            total += pv * env.fx_rate_between(leg.currency(), currency)?;
        }
        debug!(currency = %currency, pv = total, "swap present value");
        Ok(CurrencyAmount::of(currency, total))
    }

    /// Returns the present value per currency.
    pub fn present_value(
        &self,
        env: &dyn PricingEnvironment,
        swap: &ExpandedSwap,
    ) -> PricingResult<MultiCurrencyAmount> {
        Self::value(env, swap, |env, leg| self.leg_pricer.present_value(env, leg))
    }

    /// Returns the future value per currency.
    pub fn future_value(
        &self,
        env: &dyn PricingEnvironment,
        swap: &ExpandedSwap,
    ) -> PricingResult<MultiCurrencyAmount> {
        Self::value(env, swap, |env, leg| self.leg_pricer.future_value(env, leg))
    }

    /// Returns the combined, normalized sensitivity of all legs.
    pub fn present_value_sensitivity(
        &self,
        env: &dyn PricingEnvironment,
        swap: &ExpandedSwap,
    ) -> PricingResult<PointSensitivities> {
        let mut result = PointSensitivities::empty();
        for leg in swap.legs() {
            let leg_sens = self.leg_pricer.present_value_sensitivity(env, leg)?;
            result.extend(leg_sens.iter().copied());
        }
        Ok(result.normalized())
    }

    /// Prices many swaps in parallel against one environment.
    ///
    /// Results are returned in the order of `swaps`.
    pub fn present_value_all(
        &self,
        env: &dyn PricingEnvironment,
        swaps: &[ExpandedSwap],
    ) -> Vec<PricingResult<MultiCurrencyAmount>> {
        debug!(swaps = swaps.len(), "pricing swap batch");
        swaps
            .par_iter()
            .map(|swap| self.present_value(env, swap))
            .collect()
    }

    fn value<F>(
        env: &dyn PricingEnvironment,
        swap: &ExpandedSwap,
        value_fn: F,
    ) -> PricingResult<MultiCurrencyAmount>
    where
        F: Fn(&dyn PricingEnvironment, &ExpandedSwapLeg) -> PricingResult<f64>,
    {
        if swap.is_cross_currency() {
            let mut total = MultiCurrencyAmount::empty();
            for leg in swap.legs() {
                total = total.plus_amount(CurrencyAmount::of(leg.currency(), value_fn(env, leg)?));
            }
            Ok(total)
        } else {
            let currency = swap.legs()[0].currency();
            let mut total = 0.0;
            for leg in swap.legs() {
                total += value_fn(env, leg)?;
            }
            Ok(MultiCurrencyAmount::of(currency, total))
        }
    }
}
