//! Currency identified by a three-letter ISO 4217 style code.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{MeridianError, MeridianResult};

/// A currency, identified by its three-letter code.
///
/// The set of currencies is open: any three ASCII letters form a valid code,
/// so test and synthetic currencies (e.g. `AAA`) behave like real ones.
/// Currencies order by code.
///
/// # Example
///
/// ```rust
/// use meridian_core::types::Currency;
///
/// let gbp: Currency = "gbp".parse().unwrap();
/// assert_eq!(gbp, Currency::GBP);
/// assert_eq!(gbp.minor_units(), 2);
/// assert_eq!(Currency::JPY.minor_units(), 0);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency([u8; 3]);

/// Currencies quoted with other than two decimal places.
const MINOR_UNIT_EXCEPTIONS: &[(&str, u32)] = &[
    ("JPY", 0),
    ("KRW", 0),
    ("CLP", 0),
    ("ISK", 0),
    ("VND", 0),
    ("BHD", 3),
    ("KWD", 3),
    ("OMR", 3),
    ("JOD", 3),
    ("TND", 3),
];

impl Currency {
    /// United States Dollar
    pub const USD: Currency = Currency(*b"USD");
    /// Euro
    pub const EUR: Currency = Currency(*b"EUR");
    /// British Pound Sterling
    pub const GBP: Currency = Currency(*b"GBP");
    /// Japanese Yen
    pub const JPY: Currency = Currency(*b"JPY");
    /// Swiss Franc
    pub const CHF: Currency = Currency(*b"CHF");
    /// Canadian Dollar
    pub const CAD: Currency = Currency(*b"CAD");
    /// Australian Dollar
    pub const AUD: Currency = Currency(*b"AUD");
    /// New Zealand Dollar
    pub const NZD: Currency = Currency(*b"NZD");
    /// Swedish Krona
    pub const SEK: Currency = Currency(*b"SEK");
    /// Norwegian Krone
    pub const NOK: Currency = Currency(*b"NOK");
    /// Danish Krone
    pub const DKK: Currency = Currency(*b"DKK");
    /// South Korean Won
    pub const KRW: Currency = Currency(*b"KRW");
    /// Bahraini Dinar
    pub const BHD: Currency = Currency(*b"BHD");
    /// Kuwaiti Dinar
    pub const KWD: Currency = Currency(*b"KWD");

    /// Creates a currency from a three-letter code (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `MeridianError::InvalidCurrency` unless the code is exactly
    /// three ASCII letters.
    pub fn of(code: &str) -> MeridianResult<Self> {
        let bytes = code.trim().as_bytes();
        if bytes.len() != 3 || !bytes.iter().all(u8::is_ascii_alphabetic) {
            return Err(MeridianError::invalid_currency(code));
        }
        Ok(Currency([
            bytes[0].to_ascii_uppercase(),
            bytes[1].to_ascii_uppercase(),
            bytes[2].to_ascii_uppercase(),
        ]))
    }

    /// Returns the three-letter code.
    #[must_use]
    pub fn code(&self) -> &str {
        // Construction only admits ASCII letters.
        std::str::from_utf8(&self.0).unwrap_or("???")
    }

    /// Returns the number of decimal places amounts are rounded to.
    #[must_use]
    pub fn minor_units(&self) -> u32 {
        let code = self.code();
        MINOR_UNIT_EXCEPTIONS
            .iter()
            .find(|(c, _)| *c == code)
            .map_or(2, |(_, units)| *units)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl fmt::Debug for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = MeridianError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::of(s)
    }
}

impl TryFrom<String> for Currency {
    type Error = MeridianError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::of(&value)
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.code().to_string()
    }
}
