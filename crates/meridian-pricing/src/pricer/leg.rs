//! Discounting pricer for a single swap leg.

use meridian_core::Date;
use meridian_curves::sensitivity::ZeroRateSensitivity;
use meridian_curves::{PointSensitivities, PointSensitivity, PricingEnvironment};
use tracing::debug;

use crate::error::PricingResult;
use crate::observation::RateObservationFn;
use crate::product::{ExpandedSwapLeg, RatePaymentPeriod};

/// Prices a leg by summing the discounted forecast of each payment.
///
/// Periods are visited in the leg's stored order so results are
/// reproducible.
#[derive(Debug, Clone, Default)]
pub struct SwapLegPricer<O> {
    observation_fn: O,
}

impl<O: RateObservationFn> SwapLegPricer<O> {
    /// Creates a pricer resolving rates with `observation_fn`.
    #[must_use]
    pub fn new(observation_fn: O) -> Self {
        Self { observation_fn }
    }

    /// Returns the rate resolver.
    #[must_use]
    pub fn observation_fn(&self) -> &O {
        &self.observation_fn
    }

    /// Returns the undiscounted amount paid by one payment period.
    pub fn forecast_value(
        &self,
        env: &dyn PricingEnvironment,
        period: &RatePaymentPeriod,
    ) -> PricingResult<f64> {
        let mut accrued = 0.0;
        for accrual in period.accrual_periods() {
            let rate = self.observation_fn.rate(
                env,
                accrual.observation(),
                accrual.start_date(),
                accrual.end_date(),
            )?;
            accrued += (rate * accrual.gearing() + accrual.spread()) * accrual.year_fraction();
        }
        Ok(period.notional() * accrued)
    }

    /// Returns the present value of the leg in its own currency.
    pub fn present_value(
        &self,
        env: &dyn PricingEnvironment,
        leg: &ExpandedSwapLeg,
    ) -> PricingResult<f64> {
        let mut pv = 0.0;
        for period in leg.payment_periods() {
            let df = env.discount_factor(period.currency(), period.payment_date())?;
            pv += self.forecast_value(env, period)? * df;
        }
        debug!(currency = %leg.currency(), pv, "leg present value");
        Ok(pv)
    }

    /// Returns the undiscounted value of the leg in its own currency.
    pub fn future_value(
        &self,
        env: &dyn PricingEnvironment,
        leg: &ExpandedSwapLeg,
    ) -> PricingResult<f64> {
        let mut fv = 0.0;
        for period in leg.payment_periods() {
            fv += self.forecast_value(env, period)?;
        }
        debug!(currency = %leg.currency(), fv, "leg future value");
        Ok(fv)
    }

    /// Returns the sensitivity of the leg present value to the curves.
    ///
    /// Each payment contributes its forward sensitivities scaled by
    /// `notional * gearing * year_fraction * df`, and one zero-rate
    /// sensitivity of `-t * df * forecast` to its discount curve.
    pub fn present_value_sensitivity(
        &self,
        env: &dyn PricingEnvironment,
        leg: &ExpandedSwapLeg,
    ) -> PricingResult<PointSensitivities> {
        let mut result = PointSensitivities::empty();
        for period in leg.payment_periods() {
            let payment_date = period.payment_date();
            let df = env.discount_factor(period.currency(), payment_date)?;

            for accrual in period.accrual_periods() {
                let factor =
                    period.notional() * accrual.gearing() * accrual.year_fraction() * df;
                let forward = self.observation_fn.rate_sensitivity(
                    env,
                    accrual.observation(),
                    accrual.start_date(),
                    accrual.end_date(),
                )?;
                let forward = forward.multiplied_by(factor).with_currency(period.currency());
                result.extend(forward.iter().copied());
            }

            let forecast = self.forecast_value(env, period)?;
            result.extend([PointSensitivity::from(discounting_sensitivity(
                env,
                period,
                payment_date,
                df,
                forecast,
            ))]);
        }
        Ok(result.normalized())
    }
}

fn discounting_sensitivity(
    env: &dyn PricingEnvironment,
    period: &RatePaymentPeriod,
    payment_date: Date,
    df: f64,
    amount: f64,
) -> ZeroRateSensitivity {
    let t = env.relative_time(payment_date);
    ZeroRateSensitivity::of(period.currency(), payment_date, -t * df * amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::{DispatchingRateObservationFn, RateObservation};
    use crate::product::{PayReceive, RateAccrualPeriod, SwapLegType};
    use approx::assert_relative_eq;
    use meridian_core::{Currency, CurrencyPair};
    use meridian_curves::{CurveError, CurveResult, RateIndex};

    struct TestEnv;

    impl PricingEnvironment for TestEnv {
        fn valuation_date(&self) -> Date {
            date(2025, 1, 2)
        }

        fn discount_factor(&self, _currency: Currency, date: Date) -> CurveResult<f64> {
            Ok((-0.03 * self.relative_time(date)).exp())
        }

        fn fx_rate(&self, pair: CurrencyPair) -> CurveResult<f64> {
            Err(CurveError::fx_rate_not_found(pair))
        }

        fn index_rate(&self, _index: RateIndex, _start: Date, _end: Date) -> CurveResult<f64> {
            Ok(0.035)
        }
    }

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn ibor_leg() -> ExpandedSwapLeg {
        let periods = [(2025, 1, 6), (2025, 4, 7), (2025, 7, 7)]
            .windows(2)
            .map(|w| {
                let start = date(w[0].0, w[0].1, w[0].2);
                let end = date(w[1].0, w[1].1, w[1].2);
                let obs = RateObservation::ibor(RateIndex::UsdLibor3M, start.add_business_days(-2))
                    .unwrap();
                let accrual = RateAccrualPeriod::new(start, end, 0.25, obs)
                    .unwrap()
                    .with_spread(0.001);
                RatePaymentPeriod::new(end, Currency::USD, 1_000_000.0, vec![accrual]).unwrap()
            })
            .collect();
        ExpandedSwapLeg::new(SwapLegType::Ibor, PayReceive::Receive, periods).unwrap()
    }

    #[test]
    fn test_future_and_present_value() {
        let pricer = SwapLegPricer::new(DispatchingRateObservationFn);
        let leg = ibor_leg();

        let forecast = 1_000_000.0 * (0.035 + 0.001) * 0.25;
        let fv = pricer.future_value(&TestEnv, &leg).unwrap();
        assert_relative_eq!(fv, 2.0 * forecast, epsilon = 1e-9);

        let df1 = TestEnv.discount_factor(Currency::USD, date(2025, 4, 7)).unwrap();
        let df2 = TestEnv.discount_factor(Currency::USD, date(2025, 7, 7)).unwrap();
        let pv = pricer.present_value(&TestEnv, &leg).unwrap();
        assert_relative_eq!(pv, forecast * (df1 + df2), epsilon = 1e-9);
    }

    #[test]
    fn test_gearing() {
        let obs = RateObservation::fixed(0.02).unwrap();
        let accrual = RateAccrualPeriod::new(date(2025, 1, 6), date(2026, 1, 6), 1.0, obs)
            .unwrap()
            .with_gearing(1.5)
            .with_spread(-0.005);
        let period =
            RatePaymentPeriod::new(date(2026, 1, 6), Currency::USD, -100.0, vec![accrual]).unwrap();
        let pricer = SwapLegPricer::new(DispatchingRateObservationFn);
        assert_relative_eq!(
            pricer.forecast_value(&TestEnv, &period).unwrap(),
            -100.0 * (0.02 * 1.5 - 0.005)
        );
    }

    #[test]
    fn test_present_value_sensitivity() {
        let pricer = SwapLegPricer::new(DispatchingRateObservationFn);
        let leg = ibor_leg();
        let sens = pricer.present_value_sensitivity(&TestEnv, &leg).unwrap();

        // Two discount nodes and two fixings
        assert_eq!(sens.len(), 4);
        let forward: Vec<_> = sens
            .iter()
            .filter(|s| matches!(s, PointSensitivity::IborRate(_)))
            .collect();
        assert_eq!(forward.len(), 2);

        let df1 = TestEnv.discount_factor(Currency::USD, date(2025, 4, 7)).unwrap();
        let first = forward
            .iter()
            .find(|s| s.date() == date(2025, 1, 2))
            .unwrap();
        assert_relative_eq!(first.sensitivity(), 1_000_000.0 * 0.25 * df1, epsilon = 1e-9);

        let zero: Vec<_> = sens
            .iter()
            .filter(|s| matches!(s, PointSensitivity::ZeroRate(_)))
            .collect();
        assert!(zero.iter().all(|s| s.sensitivity() < 0.0));
    }

    #[test]
    fn test_forward_sensitivity_in_payment_currency() {
        let start = date(2025, 1, 6);
        let end = date(2025, 4, 7);
        let obs = RateObservation::overnight_compounded(RateIndex::Sofr, start, end).unwrap();
        let accrual = RateAccrualPeriod::new(start, end, 0.25, obs).unwrap();
        let period = RatePaymentPeriod::new(end, Currency::CAD, 1_000_000.0, vec![accrual]).unwrap();
        let leg = ExpandedSwapLeg::new(SwapLegType::Overnight, PayReceive::Receive, vec![period])
            .unwrap();

        let pricer = SwapLegPricer::new(DispatchingRateObservationFn);
        let sens = pricer.present_value_sensitivity(&TestEnv, &leg).unwrap();
        assert_eq!(sens.len(), 2);
        assert!(sens.iter().all(|s| s.currency() == Currency::CAD));
        assert!(sens.iter().any(|s| s.curve_key() == "SOFR"));
    }
}
