//! Expanded products.
//!
//! Products arrive here already resolved into dated periods. Pricers read
//! them and never modify them.

mod fra;
mod swap;

pub use fra::{BuySell, ExpandedFra, Fra, FraBuilder, FraDiscountingMethod};
pub use swap::{
    ExpandedSwap, ExpandedSwapLeg, PayReceive, RateAccrualPeriod, RatePaymentPeriod, SwapLegType,
};
