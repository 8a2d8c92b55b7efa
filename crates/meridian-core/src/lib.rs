//! # Meridian Core
//!
//! Core types for the Meridian valuation engine.
//!
//! This crate provides the building blocks shared by the curve and pricing layers:
//!
//! - **Types**: `Date`, `Currency` and `CurrencyPair`
//! - **Day Count Conventions**: year fractions for accrual periods
//! - **Money**: `CurrencyAmount` and `MultiCurrencyAmount` with exact
//!   per-currency accounting
//! - **Conventions**: market quoting conventions for currency pairs, loaded
//!   from a TOML table
//!
//! ## Example
//!
//! ```rust
//! use meridian_core::prelude::*;
//!
//! let gbp = CurrencyAmount::of(Currency::GBP, 100.0);
//! let usd = CurrencyAmount::of(Currency::USD, 50.0);
//!
//! let total: MultiCurrencyAmount = [gbp, usd].into_iter().collect();
//! let in_usd = total
//!     .convert_to(Currency::USD, |_pair| Ok::<_, MeridianError>(1.25))
//!     .unwrap();
//! assert!((in_usd.amount() - 175.0).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::trivially_copy_pass_by_ref)]

pub mod conventions;
pub mod daycounts;
pub mod error;
pub mod money;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::conventions::CurrencyPairConventions;
    pub use crate::daycounts::{DayCount, DayCountConvention};
    pub use crate::error::{MeridianError, MeridianResult};
    pub use crate::money::{CurrencyAmount, MultiCurrencyAmount};
    pub use crate::types::{Currency, CurrencyPair, Date};
}

// Re-export commonly used types at crate root
pub use error::{MeridianError, MeridianResult};
pub use money::{CurrencyAmount, MultiCurrencyAmount};
pub use types::{Currency, CurrencyPair, Date};
