//! FRA pricing against mocked market data and rate resolution.

use approx::assert_abs_diff_eq;
use meridian_core::{Currency, CurrencyPair, Date};
use meridian_curves::{
    CurveError, CurveResult, FlatCurve, ImmutablePricingEnvironment, PointSensitivities,
    PricingEnvironment, RateIndex,
};
use meridian_pricing::prelude::*;

const TOLERANCE: f64 = 1e-12;

/// Environment returning one discount factor for every date.
struct FixedDiscountEnv {
    df: f64,
    forward: f64,
}

impl PricingEnvironment for FixedDiscountEnv {
    fn valuation_date(&self) -> Date {
        Date::from_ymd(2015, 1, 2).unwrap()
    }

    fn discount_factor(&self, _currency: Currency, _date: Date) -> CurveResult<f64> {
        Ok(self.df)
    }

    fn fx_rate(&self, pair: CurrencyPair) -> CurveResult<f64> {
        Err(CurveError::fx_rate_not_found(pair))
    }

    fn index_rate(&self, _index: RateIndex, _start: Date, _end: Date) -> CurveResult<f64> {
        Ok(self.forward)
    }
}

/// Resolver returning one forward rate without reading the environment.
struct FixedForward(f64);

impl RateObservationFn for FixedForward {
    fn rate(
        &self,
        _env: &dyn PricingEnvironment,
        _observation: &RateObservation,
        _start_date: Date,
        _end_date: Date,
    ) -> PricingResult<f64> {
        Ok(self.0)
    }

    fn rate_sensitivity(
        &self,
        _env: &dyn PricingEnvironment,
        _observation: &RateObservation,
        _start_date: Date,
        _end_date: Date,
    ) -> PricingResult<PointSensitivities> {
        Ok(PointSensitivities::empty())
    }
}

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn isda_fra() -> Fra {
    Fra::builder()
        .buy_sell(BuySell::Buy)
        .index(RateIndex::GbpLibor3M)
        .start_date(date(2015, 6, 15))
        .end_date(date(2015, 9, 15))
        .payment_date(date(2015, 6, 16))
        .fixed_rate(0.25 / 100.0)
        .notional(1_000_000.0)
        .discounting(FraDiscountingMethod::Isda)
        .build()
        .unwrap()
}

fn afma_fra() -> Fra {
    Fra::builder()
        .buy_sell(BuySell::Buy)
        .currency(Currency::AUD)
        .index(RateIndex::GbpLibor3M)
        .start_date(date(2015, 6, 15))
        .end_date(date(2015, 9, 16))
        .fixed_rate(0.25 / 100.0)
        .notional(1_000_000.0)
        .discounting(FraDiscountingMethod::Afma)
        .build()
        .unwrap()
}

#[test]
fn test_present_value_is_discounted_future_value_isda() {
    let env = FixedDiscountEnv {
        df: 0.98,
        forward: 0.015,
    };
    let pricer = Pricers::standard();
    let fra = isda_fra().expand().unwrap();

    let pv = pricer.fra().present_value(&env, &fra).unwrap();
    let fv = pricer.fra().future_value(&env, &fra).unwrap();
    assert_eq!(pv, fv.multiplied_by(0.98));
}

#[test]
fn test_present_value_is_discounted_future_value_afma() {
    let env = FixedDiscountEnv {
        df: 0.965,
        forward: 0.015,
    };
    let pricer = Pricers::standard();
    let fra = afma_fra().expand().unwrap();

    let pv = pricer.fra().present_value(&env, &fra).unwrap();
    let fv = pricer.fra().future_value(&env, &fra).unwrap();
    assert_eq!(pv, fv.multiplied_by(0.965));
}

#[test]
fn test_future_value_isda() {
    let forward_rate = 0.02;
    let env = FixedDiscountEnv {
        df: 1.0,
        forward: f64::NAN,
    };
    let fra = isda_fra().expand().unwrap();
    let pricer = DiscountingFraPricer::new(FixedForward(forward_rate));

    let computed = pricer.future_value(&env, &fra).unwrap();
    let fixed_rate = isda_fra().fixed_rate();
    let year_fraction = fra.year_fraction();
    let notional = fra.notional();
    let expected = notional * (forward_rate - fixed_rate) * year_fraction
        / (1.0 + forward_rate * year_fraction);
    assert_eq!(computed.currency(), Currency::GBP);
    assert_abs_diff_eq!(computed.amount(), expected, epsilon = TOLERANCE);
}

#[test]
fn test_future_value_afma() {
    let forward_rate = 0.018;
    let env = FixedDiscountEnv {
        df: 1.0,
        forward: f64::NAN,
    };
    let fra = afma_fra().expand().unwrap();
    let pricer = DiscountingFraPricer::new(FixedForward(forward_rate));

    let computed = pricer.future_value(&env, &fra).unwrap();
    let fixed_rate = afma_fra().fixed_rate();
    let year_fraction = fra.start_date().days_between(&fra.end_date()) as f64 / 365.0;
    let notional = fra.notional();
    let expected = notional
        * (1.0 / (1.0 + fixed_rate * year_fraction) - 1.0 / (1.0 + forward_rate * year_fraction));
    assert_eq!(computed.currency(), Currency::AUD);
    assert_abs_diff_eq!(computed.amount(), expected, epsilon = TOLERANCE);
}

#[test]
fn test_sold_fra_mirrors_bought_fra() {
    let env = FixedDiscountEnv {
        df: 0.99,
        forward: 0.01,
    };
    let pricer = Pricers::standard();
    let bought = isda_fra();
    let sold = Fra::builder()
        .buy_sell(BuySell::Sell)
        .index(bought.index())
        .start_date(bought.start_date())
        .end_date(bought.end_date())
        .payment_date(date(2015, 6, 16))
        .fixed_rate(bought.fixed_rate())
        .notional(bought.notional())
        .build()
        .unwrap();

    let pv_bought = pricer.fra().present_value(&env, &bought.expand().unwrap()).unwrap();
    let pv_sold = pricer.fra().present_value(&env, &sold.expand().unwrap()).unwrap();
    assert_abs_diff_eq!(pv_bought.amount(), -pv_sold.amount(), epsilon = TOLERANCE);
}

#[test]
fn test_against_environment_with_fixing() {
    let today = date(2015, 6, 15);
    let env = ImmutablePricingEnvironment::builder(today)
        .discount_curve(Currency::GBP, FlatCurve::new(today, 0.005))
        .forward_curve(RateIndex::GbpLibor3M, FlatCurve::new(today, 0.006))
        .fixing(RateIndex::GbpLibor3M, today, 0.0057)
        .build()
        .unwrap();

    let fra = isda_fra().expand().unwrap();
    let pricer = Pricers::standard();
    let fv = pricer.fra().future_value(&env, &fra).unwrap();

    // GBP LIBOR fixes on the start date, which is the valuation date
    let yf = fra.year_fraction();
    let expected = 1_000_000.0 * (0.0057 - 0.0025) * yf / (1.0 + 0.0057 * yf);
    assert_abs_diff_eq!(fv.amount(), expected, epsilon = TOLERANCE);
}

#[test]
fn test_sensitivity_in_settlement_currency() {
    let env = FixedDiscountEnv {
        df: 0.965,
        forward: 0.018,
    };
    let pricer = Pricers::standard();
    let fra = afma_fra().expand().unwrap();
    assert_eq!(fra.currency(), Currency::AUD);

    let sens = pricer.fra().present_value_sensitivity(&env, &fra).unwrap();
    assert_eq!(sens.len(), 2);
    assert!(sens.iter().all(|s| s.currency() == Currency::AUD));

    let forward = sens
        .iter()
        .find(|s| s.curve_key() == RateIndex::GbpLibor3M.name())
        .unwrap();
    let yf = fra.afma_year_fraction();
    let expected = 1_000_000.0 * yf / (1.0 + 0.018 * yf).powi(2) * 0.965;
    assert_abs_diff_eq!(forward.sensitivity(), expected, epsilon = 1e-6);
}
