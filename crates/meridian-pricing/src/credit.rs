//! Credit default swap conventions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PricingError, PricingResult};

/// Formula for the accrual paid on default of a credit default swap.
///
/// Each formula carries the `omega` constant used by the accrued premium
/// calculation. Names parse case-insensitively, with `-` and `_`
/// interchangeable.
///
/// # Example
///
/// ```rust
/// use meridian_pricing::AccrualOnDefaultFormula;
///
/// let formula = AccrualOnDefaultFormula::of("Markit-Fix").unwrap();
/// assert_eq!(formula, AccrualOnDefaultFormula::MarkitFix);
/// assert_eq!(formula.to_string(), "Markit-Fix");
/// assert_eq!(formula.omega(), 0.0);
/// assert_eq!(AccrualOnDefaultFormula::OriginalIsda.omega(), 1.0 / 730.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AccrualOnDefaultFormula {
    /// The formula of ISDA standard model v1.8.1 and below.
    OriginalIsda,
    /// The correction proposed by Markit in v1.8.2.
    MarkitFix,
    /// The mathematically exact formula.
    Correct,
}

impl AccrualOnDefaultFormula {
    /// Returns every formula.
    #[must_use]
    pub fn all() -> &'static [AccrualOnDefaultFormula] {
        &[
            AccrualOnDefaultFormula::OriginalIsda,
            AccrualOnDefaultFormula::MarkitFix,
            AccrualOnDefaultFormula::Correct,
        ]
    }

    /// Parses a formula from its name.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not known.
    pub fn of(name: &str) -> PricingResult<Self> {
        name.parse()
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            AccrualOnDefaultFormula::OriginalIsda => "Original-ISDA",
            AccrualOnDefaultFormula::MarkitFix => "Markit-Fix",
            AccrualOnDefaultFormula::Correct => "Correct",
        }
    }

    /// Returns the omega constant: 1/730 for the original ISDA formula,
    /// zero otherwise.
    #[must_use]
    pub fn omega(&self) -> f64 {
        match self {
            AccrualOnDefaultFormula::OriginalIsda => 1.0 / 730.0,
            AccrualOnDefaultFormula::MarkitFix | AccrualOnDefaultFormula::Correct => 0.0,
        }
    }
}

impl fmt::Display for AccrualOnDefaultFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for AccrualOnDefaultFormula {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded = s.replace('-', "_").to_ascii_uppercase();
        match folded.as_str() {
            "ORIGINAL_ISDA" => Ok(AccrualOnDefaultFormula::OriginalIsda),
            "MARKIT_FIX" => Ok(AccrualOnDefaultFormula::MarkitFix),
            "CORRECT" => Ok(AccrualOnDefaultFormula::Correct),
            _ => Err(PricingError::invalid_input(format!(
                "unknown accrual on default formula: '{s}'"
            ))),
        }
    }
}

impl TryFrom<String> for AccrualOnDefaultFormula {
    type Error = PricingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AccrualOnDefaultFormula> for String {
    fn from(formula: AccrualOnDefaultFormula) -> Self {
        formula.name().to_string()
    }
}
