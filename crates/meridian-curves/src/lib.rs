//! # Meridian Curves
//!
//! Market state for the Meridian valuation engine.
//!
//! This crate provides:
//!
//! - **Curve Trait**: read-only [`Curve`] queried for discount factors and forwards
//! - **Curve Types**: [`FlatCurve`] and [`InterpolatedCurve`]
//! - **Rate Indices**: the closed set of overnight and term benchmarks
//! - **Pricing Environment**: the [`PricingEnvironment`] contract and an
//!   immutable implementation holding curves, spot rates and fixings
//! - **Sensitivities**: point sensitivities to curve nodes and their
//!   merging
//!
//! Curves are consumed here, never calibrated.
//!
//! ## Quick Start
//!
//! ```rust
//! use meridian_curves::prelude::*;
//!
//! let today = Date::from_ymd(2025, 1, 2).unwrap();
//! let env = ImmutablePricingEnvironment::builder(today)
//!     .ois_curve(RateIndex::Sofr, FlatCurve::new(today, 0.04))
//!     .build()
//!     .unwrap();
//!
//! let start = Date::from_ymd(2025, 4, 2).unwrap();
//! let end = Date::from_ymd(2025, 7, 2).unwrap();
//! let forward = env.index_rate(RateIndex::Sofr, start, end).unwrap();
//! assert!(forward > 0.039 && forward < 0.040);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]

pub mod curves;
pub mod environment;
pub mod error;
pub mod index;
pub mod sensitivity;
pub mod traits;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::curves::{FlatCurve, InterpolatedCurve};
    pub use crate::environment::{ImmutablePricingEnvironment, PricingEnvironment};
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::index::RateIndex;
    pub use crate::sensitivity::{
        IborRateSensitivity, OvernightRateSensitivity, PointSensitivities, PointSensitivity,
        ZeroRateSensitivity,
    };
    pub use crate::traits::Curve;
    pub use meridian_core::{Currency, CurrencyPair, Date};
}

pub use curves::{FlatCurve, InterpolatedCurve};
pub use environment::{
    CurveRef, ImmutablePricingEnvironment, ImmutablePricingEnvironmentBuilder, PricingEnvironment,
};
pub use error::{CurveError, CurveResult};
pub use index::RateIndex;
pub use sensitivity::{PointSensitivities, PointSensitivity};
pub use traits::Curve;
