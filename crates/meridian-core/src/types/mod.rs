//! Domain types shared across the engine.

mod currency;
mod currency_pair;
mod date;

pub use currency::Currency;
pub use currency_pair::CurrencyPair;
pub use date::Date;
