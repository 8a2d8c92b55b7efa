//! # Meridian Pricing
//!
//! Present value, future value and curve sensitivities of interest rate
//! products, computed against a [`PricingEnvironment`](meridian_curves::PricingEnvironment).
//!
//! # Modules
//!
//! - [`observation`]: how accrual rates are observed, and their resolution
//! - [`product`]: FRAs and swaps expanded into dated periods
//! - [`pricer`]: leg, swap and FRA pricers and the standard wiring
//! - [`credit`]: credit default swap accrual-on-default conventions
//!
//! All pricing is a pure function of an environment snapshot and an
//! expanded product, so pricers and environments can be shared across
//! threads.
//!
//! # Example
//!
//! ```rust
//! use meridian_core::{Currency, Date};
//! use meridian_curves::{FlatCurve, ImmutablePricingEnvironment, RateIndex};
//! use meridian_pricing::prelude::*;
//!
//! let today = Date::from_ymd(2025, 1, 2).unwrap();
//! let env = ImmutablePricingEnvironment::builder(today)
//!     .discount_curve(Currency::EUR, FlatCurve::new(today, 0.025))
//!     .forward_curve(RateIndex::Euribor3M, FlatCurve::new(today, 0.03))
//!     .build()
//!     .unwrap();
//!
//! let fra = Fra::builder()
//!     .index(RateIndex::Euribor3M)
//!     .start_date(Date::from_ymd(2025, 7, 2).unwrap())
//!     .end_date(Date::from_ymd(2025, 10, 2).unwrap())
//!     .fixed_rate(0.02)
//!     .notional(1_000_000.0)
//!     .build()
//!     .unwrap()
//!     .expand()
//!     .unwrap();
//!
//! let pricers = Pricers::standard();
//! let pv = pricers.fra().present_value(&env, &fra).unwrap();
//! assert_eq!(pv.currency(), Currency::EUR);
//! assert!(pv.amount() > 0.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]

pub mod credit;
pub mod error;
pub mod observation;
pub mod pricer;
pub mod product;

pub use credit::AccrualOnDefaultFormula;
pub use error::{PricingError, PricingResult};
pub use observation::{DispatchingRateObservationFn, RateObservation, RateObservationFn};
pub use pricer::{DiscountingFraPricer, Pricers, SwapLegPricer, SwapProductPricer};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use super::credit::AccrualOnDefaultFormula;
    pub use super::error::{PricingError, PricingResult};
    pub use super::observation::{DispatchingRateObservationFn, RateObservation, RateObservationFn};
    pub use super::pricer::{DiscountingFraPricer, Pricers, SwapLegPricer, SwapProductPricer};
    pub use super::product::{
        BuySell, ExpandedFra, ExpandedSwap, ExpandedSwapLeg, Fra, FraDiscountingMethod,
        PayReceive, RateAccrualPeriod, RatePaymentPeriod, SwapLegType,
    };
}
