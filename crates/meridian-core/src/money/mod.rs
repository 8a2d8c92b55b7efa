//! Money primitives.
//!
//! - [`CurrencyAmount`]: an amount in one currency
//! - [`MultiCurrencyAmount`]: at most one amount per currency, summing on add

mod amount;
mod multi;

pub use amount::CurrencyAmount;
pub use multi::MultiCurrencyAmount;
