//! Expanded swaps: legs flattened into dated payment periods.

use std::collections::BTreeSet;
use std::fmt;

use meridian_core::{Currency, Date};
use serde::{Deserialize, Serialize};

use crate::error::{PricingError, PricingResult};
use crate::observation::RateObservation;

/// Whether a leg is paid or received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayReceive {
    /// The leg is paid; notionals are negative.
    Pay,
    /// The leg is received; notionals are positive.
    Receive,
}

impl PayReceive {
    /// Returns `amount` with the sign of this direction.
    #[must_use]
    pub fn normalize(&self, amount: f64) -> f64 {
        match self {
            PayReceive::Pay => -amount.abs(),
            PayReceive::Receive => amount.abs(),
        }
    }

    fn accepts(self, notional: f64) -> bool {
        match self {
            PayReceive::Pay => notional <= 0.0,
            PayReceive::Receive => notional >= 0.0,
        }
    }
}

impl fmt::Display for PayReceive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayReceive::Pay => write!(f, "Pay"),
            PayReceive::Receive => write!(f, "Receive"),
        }
    }
}

/// The kind of rate a leg pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwapLegType {
    /// Fixed rate.
    Fixed,
    /// Term index.
    Ibor,
    /// Overnight index.
    Overnight,
    /// Anything else.
    Other,
}

/// One accrual period of a payment period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RateAccrualPeriodFields")]
pub struct RateAccrualPeriod {
    start_date: Date,
    end_date: Date,
    year_fraction: f64,
    observation: RateObservation,
    gearing: f64,
    spread: f64,
}

impl RateAccrualPeriod {
    /// Creates a period with gearing 1 and no spread.
    ///
    /// # Errors
    ///
    /// Returns an error if the period is empty or the year fraction is not
    /// finite and non-negative.
    pub fn new(
        start_date: Date,
        end_date: Date,
        year_fraction: f64,
        observation: RateObservation,
    ) -> PricingResult<Self> {
        if end_date <= start_date {
            return Err(PricingError::invalid_product(format!(
                "accrual period ends {end_date} on or before it starts {start_date}"
            )));
        }
        if !year_fraction.is_finite() || year_fraction < 0.0 {
            return Err(PricingError::invalid_product(format!(
                "year fraction must be finite and non-negative, was {year_fraction}"
            )));
        }
        Ok(Self {
            start_date,
            end_date,
            year_fraction,
            observation,
            gearing: 1.0,
            spread: 0.0,
        })
    }

    /// Returns a copy with the given gearing applied to the observed rate.
    #[must_use]
    pub fn with_gearing(mut self, gearing: f64) -> Self {
        self.gearing = gearing;
        self
    }

    /// Returns a copy with the given spread added to the geared rate.
    #[must_use]
    pub fn with_spread(mut self, spread: f64) -> Self {
        self.spread = spread;
        self
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

    /// Returns the year fraction.
    #[must_use]
    pub fn year_fraction(&self) -> f64 {
        self.year_fraction
    }

    /// Returns the rate observation.
    #[must_use]
    pub fn observation(&self) -> &RateObservation {
        &self.observation
    }

    /// Returns the gearing.
    #[must_use]
    pub fn gearing(&self) -> f64 {
        self.gearing
    }

    /// Returns the spread.
    #[must_use]
    pub fn spread(&self) -> f64 {
        self.spread
    }
}

#[derive(Deserialize)]
struct RateAccrualPeriodFields {
    start_date: Date,
    end_date: Date,
    year_fraction: f64,
    observation: RateObservation,
    #[serde(default = "unit_gearing")]
    gearing: f64,
    #[serde(default)]
    spread: f64,
}

fn unit_gearing() -> f64 {
    1.0
}

impl TryFrom<RateAccrualPeriodFields> for RateAccrualPeriod {
    type Error = PricingError;

    fn try_from(f: RateAccrualPeriodFields) -> Result<Self, Self::Error> {
        Ok(Self::new(f.start_date, f.end_date, f.year_fraction, f.observation)?
            .with_gearing(f.gearing)
            .with_spread(f.spread))
    }
}

/// A payment of the accrued amount of one or more accrual periods.
///
/// The forecast value is `notional * Σ (rate * gearing + spread) * year_fraction`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatePaymentPeriod {
    payment_date: Date,
    currency: Currency,
    notional: f64,
    accrual_periods: Vec<RateAccrualPeriod>,
}

impl RatePaymentPeriod {
    /// Creates a payment period.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no accrual periods or the notional is
    /// not finite.
    pub fn new(
        payment_date: Date,
        currency: Currency,
        notional: f64,
        accrual_periods: Vec<RateAccrualPeriod>,
    ) -> PricingResult<Self> {
        if accrual_periods.is_empty() {
            return Err(PricingError::invalid_product(
                "payment period needs at least one accrual period",
            ));
        }
        if !notional.is_finite() {
            return Err(PricingError::invalid_product(format!(
                "notional must be finite, was {notional}"
            )));
        }
        Ok(Self {
            payment_date,
            currency,
            notional,
            accrual_periods,
        })
    }

    /// Returns the payment date.
    #[must_use]
    pub fn payment_date(&self) -> Date {
        self.payment_date
    }

    /// Returns the currency.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the signed notional.
    #[must_use]
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Returns the accrual periods in schedule order.
    #[must_use]
    pub fn accrual_periods(&self) -> &[RateAccrualPeriod] {
        &self.accrual_periods
    }

    /// Returns the start of the first accrual period.
    #[must_use]
    pub fn start_date(&self) -> Date {
        self.accrual_periods[0].start_date
    }

    /// Returns the end of the last accrual period.
    #[must_use]
    pub fn end_date(&self) -> Date {
        self.accrual_periods[self.accrual_periods.len() - 1].end_date
    }
}

/// A swap leg flattened into payment periods.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpandedSwapLeg {
    leg_type: SwapLegType,
    pay_receive: PayReceive,
    currency: Currency,
    payment_periods: Vec<RatePaymentPeriod>,
}

impl ExpandedSwapLeg {
    /// Creates a leg.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no payment periods, if the periods do
    /// not share one currency, or if a notional has the wrong sign for
    /// `pay_receive`.
    pub fn new(
        leg_type: SwapLegType,
        pay_receive: PayReceive,
        payment_periods: Vec<RatePaymentPeriod>,
    ) -> PricingResult<Self> {
        let currency = payment_periods
            .first()
            .map(RatePaymentPeriod::currency)
            .ok_or_else(|| PricingError::invalid_product("leg needs at least one payment period"))?;

        for period in &payment_periods {
            if period.currency != currency {
                return Err(PricingError::invalid_product(format!(
                    "leg mixes currencies {currency} and {}",
                    period.currency
                )));
            }
            if !pay_receive.accepts(period.notional) {
                return Err(PricingError::invalid_product(format!(
                    "{pay_receive} leg has notional {} with the wrong sign",
                    period.notional
                )));
            }
        }

        Ok(Self {
            leg_type,
            pay_receive,
            currency,
            payment_periods,
        })
    }

    /// Returns the leg type.
    #[must_use]
    pub fn leg_type(&self) -> SwapLegType {
        self.leg_type
    }

    /// Returns whether the leg is paid or received.
    #[must_use]
    pub fn pay_receive(&self) -> PayReceive {
        self.pay_receive
    }

    /// Returns the leg currency.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the payment periods in schedule order.
    #[must_use]
    pub fn payment_periods(&self) -> &[RatePaymentPeriod] {
        &self.payment_periods
    }

    /// Returns the start of the first period.
    #[must_use]
    pub fn start_date(&self) -> Date {
        self.payment_periods[0].start_date()
    }

    /// Returns the end of the last period.
    #[must_use]
    pub fn end_date(&self) -> Date {
        self.payment_periods[self.payment_periods.len() - 1].end_date()
    }
}

/// A swap flattened into legs of payment periods.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpandedSwap {
    legs: Vec<ExpandedSwapLeg>,
}

impl ExpandedSwap {
    /// Creates a swap.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no legs.
    pub fn new(legs: Vec<ExpandedSwapLeg>) -> PricingResult<Self> {
        if legs.is_empty() {
            return Err(PricingError::invalid_product("swap needs at least one leg"));
        }
        Ok(Self { legs })
    }

    /// Returns the legs.
    #[must_use]
    pub fn legs(&self) -> &[ExpandedSwapLeg] {
        &self.legs
    }

    /// Returns the legs of one type.
    pub fn legs_of_type(&self, leg_type: SwapLegType) -> impl Iterator<Item = &ExpandedSwapLeg> {
        self.legs.iter().filter(move |leg| leg.leg_type == leg_type)
    }

    /// Returns the distinct leg currencies.
    #[must_use]
    pub fn currencies(&self) -> BTreeSet<Currency> {
        self.legs.iter().map(ExpandedSwapLeg::currency).collect()
    }

    /// Checks if the legs span more than one currency.
    #[must_use]
    pub fn is_cross_currency(&self) -> bool {
        self.legs
            .iter()
            .any(|leg| leg.currency != self.legs[0].currency)
    }
}
