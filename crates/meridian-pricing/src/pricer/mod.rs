//! Discounting pricers.
//!
//! - [`SwapLegPricer`]: present and future value of one leg
//! - [`SwapProductPricer`]: swaps, single or cross currency
//! - [`DiscountingFraPricer`]: FRAs under ISDA, AFMA or no discounting
//!
//! Pricers hold no market state. [`Pricers::standard`] wires the default
//! set together.

mod fra;
mod leg;
mod swap;

pub use fra::DiscountingFraPricer;
pub use leg::SwapLegPricer;
pub use swap::SwapProductPricer;

use crate::observation::DispatchingRateObservationFn;

/// The standard set of pricers, all resolving rates with
/// [`DispatchingRateObservationFn`].
#[derive(Debug, Clone, Default)]
pub struct Pricers {
    swap: SwapProductPricer<DispatchingRateObservationFn>,
    fra: DiscountingFraPricer<DispatchingRateObservationFn>,
}

impl Pricers {
    /// Assembles the standard pricers.
    #[must_use]
    pub fn standard() -> Self {
        let observation_fn = DispatchingRateObservationFn::new();
        Self {
            swap: SwapProductPricer::new(SwapLegPricer::new(observation_fn)),
            fra: DiscountingFraPricer::new(observation_fn),
        }
    }

    /// Returns the swap pricer.
    #[must_use]
    pub fn swap(&self) -> &SwapProductPricer<DispatchingRateObservationFn> {
        &self.swap
    }

    /// Returns the swap leg pricer.
    #[must_use]
    pub fn swap_leg(&self) -> &SwapLegPricer<DispatchingRateObservationFn> {
        self.swap.leg_pricer()
    }

    /// Returns the FRA pricer.
    #[must_use]
    pub fn fra(&self) -> &DiscountingFraPricer<DispatchingRateObservationFn> {
        &self.fra
    }
}
