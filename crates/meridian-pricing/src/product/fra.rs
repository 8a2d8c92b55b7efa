//! Forward rate agreements.

use std::fmt;
use std::str::FromStr;

use meridian_core::daycounts::{DayCount, DayCountConvention};
use meridian_core::{Currency, Date};
use meridian_curves::RateIndex;
use serde::{Deserialize, Serialize};

use crate::error::{PricingError, PricingResult};
use crate::observation::RateObservation;

/// Direction of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuySell {
    /// Buy: pay fixed, receive floating.
    Buy,
    /// Sell: receive fixed, pay floating.
    Sell,
}

impl BuySell {
    /// Returns `amount` with the sign of this direction.
    #[must_use]
    pub fn normalize(&self, amount: f64) -> f64 {
        match self {
            BuySell::Buy => amount.abs(),
            BuySell::Sell => -amount.abs(),
        }
    }
}

/// How the settlement amount of a FRA is discounted from the end of the
/// period back to the payment date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FraDiscountingMethod {
    /// No discounting.
    None,
    /// ISDA: discounted at the floating rate.
    Isda,
    /// AFMA (Australian): difference of the fixed and floating discounted
    /// amounts, on an ACT/365 basis.
    Afma,
}

impl FraDiscountingMethod {
    /// Returns the market name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            FraDiscountingMethod::None => "None",
            FraDiscountingMethod::Isda => "ISDA",
            FraDiscountingMethod::Afma => "AFMA",
        }
    }
}

impl fmt::Display for FraDiscountingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for FraDiscountingMethod {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NONE" => Ok(FraDiscountingMethod::None),
            "ISDA" => Ok(FraDiscountingMethod::Isda),
            "AFMA" => Ok(FraDiscountingMethod::Afma),
            _ => Err(PricingError::invalid_input(format!(
                "unknown FRA discounting method: '{s}'"
            ))),
        }
    }
}

/// A forward rate agreement as traded.
///
/// Use [`Fra::builder`] to create one and [`Fra::expand`] to resolve it
/// for pricing.
///
/// # Example
///
/// ```rust
/// use meridian_core::Date;
/// use meridian_curves::RateIndex;
/// use meridian_pricing::product::{Fra, FraDiscountingMethod};
///
/// let fra = Fra::builder()
///     .index(RateIndex::GbpLibor3M)
///     .start_date(Date::from_ymd(2025, 6, 16).unwrap())
///     .end_date(Date::from_ymd(2025, 9, 16).unwrap())
///     .fixed_rate(0.0425)
///     .notional(10_000_000.0)
///     .build()
///     .unwrap();
///
/// let expanded = fra.expand().unwrap();
/// assert_eq!(expanded.discounting(), FraDiscountingMethod::Isda);
/// assert_eq!(expanded.payment_date(), fra.start_date());
/// ```
///
/// Deserialization accepts the same fields as [`FraBuilder`], with the same
/// defaults and checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FraBuilder")]
pub struct Fra {
    buy_sell: BuySell,
    currency: Currency,
    notional: f64,
    start_date: Date,
    end_date: Date,
    payment_date: Option<Date>,
    fixing_date: Option<Date>,
    fixed_rate: f64,
    index: RateIndex,
    day_count: DayCountConvention,
    discounting: FraDiscountingMethod,
}

impl Fra {
    /// Creates a builder.
    #[must_use]
    pub fn builder() -> FraBuilder {
        FraBuilder::default()
    }

    /// Returns the direction.
    #[must_use]
    pub fn buy_sell(&self) -> BuySell {
        self.buy_sell
    }

    /// Returns the settlement currency.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the unsigned notional.
    #[must_use]
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Returns the start date of the period.
    #[must_use]
    pub fn start_date(&self) -> Date {
        self.start_date
    }

    /// Returns the end date of the period.
    #[must_use]
    pub fn end_date(&self) -> Date {
        self.end_date
    }

    /// Returns the fixed rate.
    #[must_use]
    pub fn fixed_rate(&self) -> f64 {
        self.fixed_rate
    }

    /// Returns the floating index.
    #[must_use]
    pub fn index(&self) -> RateIndex {
        self.index
    }

    /// Returns the day count used for the year fraction.
    #[must_use]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Returns the discounting method.
    #[must_use]
    pub fn discounting(&self) -> FraDiscountingMethod {
        self.discounting
    }

    /// Resolves the trade into the form consumed by pricers.
    ///
    /// - The payment date defaults to the start date.
    /// - The fixing date defaults to the index fixing lag in business days
    ///   before the start date.
    /// - The notional is signed: positive when bought.
    pub fn expand(&self) -> PricingResult<ExpandedFra> {
        let fixing_date = self
            .fixing_date
            .unwrap_or_else(|| self.start_date.add_business_days(-self.index.fixing_lag()));
        Ok(ExpandedFra {
            currency: self.currency,
            notional: self.buy_sell.normalize(self.notional),
            payment_date: self.payment_date.unwrap_or(self.start_date),
            start_date: self.start_date,
            end_date: self.end_date,
            year_fraction: self.day_count.year_fraction(self.start_date, self.end_date),
            fixed_rate: self.fixed_rate,
            floating_rate: RateObservation::ibor(self.index, fixing_date)?,
            discounting: self.discounting,
        })
    }
}

/// Builder for a [`Fra`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FraBuilder {
    buy_sell: Option<BuySell>,
    currency: Option<Currency>,
    notional: Option<f64>,
    start_date: Option<Date>,
    end_date: Option<Date>,
    payment_date: Option<Date>,
    fixing_date: Option<Date>,
    fixed_rate: Option<f64>,
    index: Option<RateIndex>,
    day_count: Option<DayCountConvention>,
    discounting: Option<FraDiscountingMethod>,
}

impl FraBuilder {
    /// Sets the direction. Defaults to buy.
    #[must_use]
    pub fn buy_sell(mut self, buy_sell: BuySell) -> Self {
        self.buy_sell = Some(buy_sell);
        self
    }

    /// Sets the settlement currency. Defaults to the index currency.
    #[must_use]
    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = Some(currency);
        self
    }

    /// Sets the unsigned notional.
    #[must_use]
    pub fn notional(mut self, notional: f64) -> Self {
        self.notional = Some(notional);
        self
    }

    /// Sets the start date.
    #[must_use]
    pub fn start_date(mut self, date: Date) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Sets the end date.
    #[must_use]
    pub fn end_date(mut self, date: Date) -> Self {
        self.end_date = Some(date);
        self
    }

    /// Sets the payment date. Defaults to the start date.
    #[must_use]
    pub fn payment_date(mut self, date: Date) -> Self {
        self.payment_date = Some(date);
        self
    }

    /// Sets an explicit fixing date.
    #[must_use]
    pub fn fixing_date(mut self, date: Date) -> Self {
        self.fixing_date = Some(date);
        self
    }

    /// Sets the fixed rate.
    #[must_use]
    pub fn fixed_rate(mut self, rate: f64) -> Self {
        self.fixed_rate = Some(rate);
        self
    }

    /// Sets the floating index.
    #[must_use]
    pub fn index(mut self, index: RateIndex) -> Self {
        self.index = Some(index);
        self
    }

    /// Sets the day count. Defaults to the index day count.
    #[must_use]
    pub fn day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = Some(day_count);
        self
    }

    /// Sets the discounting method. Defaults to ISDA.
    #[must_use]
    pub fn discounting(mut self, method: FraDiscountingMethod) -> Self {
        self.discounting = Some(method);
        self
    }

    /// Builds the FRA.
    ///
    /// # Errors
    ///
    /// Returns an error if the index, dates, fixed rate or notional are
    /// missing, if the index is overnight, if the period is empty, or if a
    /// number is not finite.
    pub fn build(self) -> PricingResult<Fra> {
        let index = self.index.ok_or_else(|| missing("index"))?;
        let start_date = self.start_date.ok_or_else(|| missing("start_date"))?;
        let end_date = self.end_date.ok_or_else(|| missing("end_date"))?;
        let fixed_rate = self.fixed_rate.ok_or_else(|| missing("fixed_rate"))?;
        let notional = self.notional.ok_or_else(|| missing("notional"))?;

        if index.is_overnight() {
            return Err(PricingError::invalid_product(format!(
                "FRA index {index} must be a term index"
            )));
        }
        if end_date <= start_date {
            return Err(PricingError::invalid_product(format!(
                "FRA ends {end_date} on or before it starts {start_date}"
            )));
        }
        if !fixed_rate.is_finite() || !notional.is_finite() {
            return Err(PricingError::invalid_product(
                "FRA fixed rate and notional must be finite",
            ));
        }

        Ok(Fra {
            buy_sell: self.buy_sell.unwrap_or(BuySell::Buy),
            currency: self.currency.unwrap_or_else(|| index.currency()),
            notional: notional.abs(),
            start_date,
            end_date,
            payment_date: self.payment_date,
            fixing_date: self.fixing_date,
            fixed_rate,
            index,
            day_count: self.day_count.unwrap_or_else(|| index.day_count()),
            discounting: self.discounting.unwrap_or(FraDiscountingMethod::Isda),
        })
    }
}

impl TryFrom<FraBuilder> for Fra {
    type Error = PricingError;

    fn try_from(builder: FraBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

fn missing(field: &str) -> PricingError {
    PricingError::invalid_product(format!("FRA {field} is required"))
}

/// A FRA resolved for pricing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExpandedFra {
    currency: Currency,
    notional: f64,
    payment_date: Date,
    start_date: Date,
    end_date: Date,
    year_fraction: f64,
    fixed_rate: f64,
    floating_rate: RateObservation,
    discounting: FraDiscountingMethod,
}

impl ExpandedFra {
    /// Returns the settlement currency.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the signed notional.
    #[must_use]
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Returns the payment date.
    #[must_use]
    pub fn payment_date(&self) -> Date {
        self.payment_date
    }

    /// Returns the start date.
    #[must_use]
    pub fn start_date(&self) -> Date {
        self.start_date
    }

    /// Returns the end date.
    #[must_use]
    pub fn end_date(&self) -> Date {
        self.end_date
    }

    /// Returns the year fraction under the trade's day count.
    #[must_use]
    pub fn year_fraction(&self) -> f64 {
        self.year_fraction
    }

    /// Returns the fixed rate.
    #[must_use]
    pub fn fixed_rate(&self) -> f64 {
        self.fixed_rate
    }

    /// Returns the floating rate observation.
    #[must_use]
    pub fn floating_rate(&self) -> &RateObservation {
        &self.floating_rate
    }

    /// Returns the discounting method.
    #[must_use]
    pub fn discounting(&self) -> FraDiscountingMethod {
        self.discounting
    }

    /// Returns actual days over 365, the basis of AFMA settlement.
    #[must_use]
    pub fn afma_year_fraction(&self) -> f64 {
        self.start_date.days_between(&self.end_date) as f64 / 365.0
    }
}
