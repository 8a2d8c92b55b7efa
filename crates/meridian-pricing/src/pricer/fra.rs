//! Discounting pricer for forward rate agreements.

use meridian_core::CurrencyAmount;
use meridian_curves::sensitivity::ZeroRateSensitivity;
use meridian_curves::{PointSensitivities, PointSensitivity, PricingEnvironment};
use tracing::debug;

use crate::error::{PricingError, PricingResult};
use crate::observation::RateObservationFn;
use crate::product::{ExpandedFra, FraDiscountingMethod};

/// Prices an [`ExpandedFra`] by discounting its settlement amount.
///
/// # Formulas
///
/// With notional `N`, fixed rate `K`, forward rate `F` and year fraction
/// `yf`:
///
/// - ISDA: `N * (F - K) * yf / (1 + F * yf)`
/// - AFMA: `N * (1 / (1 + K * yf) - 1 / (1 + F * yf))`, `yf` = days / 365
/// - None: `N * (F - K) * yf`
///
/// The present value is the future value times the discount factor to the
/// payment date.
#[derive(Debug, Clone, Default)]
pub struct DiscountingFraPricer<O> {
    observation_fn: O,
}

impl<O: RateObservationFn> DiscountingFraPricer<O> {
    /// Creates a pricer resolving the floating rate with `observation_fn`.
    #[must_use]
    pub fn new(observation_fn: O) -> Self {
        Self { observation_fn }
    }

    /// Returns the present value of the FRA.
    pub fn present_value(
        &self,
        env: &dyn PricingEnvironment,
        fra: &ExpandedFra,
    ) -> PricingResult<CurrencyAmount> {
        let fv = self.future_value(env, fra)?;
        let df = env.discount_factor(fra.currency(), fra.payment_date())?;
        let pv = fv.multiplied_by(df);
        debug!(currency = %fra.currency(), pv = pv.amount(), df, "FRA present value");
        Ok(pv)
    }

    /// Returns the undiscounted settlement amount of the FRA.
    pub fn future_value(
        &self,
        env: &dyn PricingEnvironment,
        fra: &ExpandedFra,
    ) -> PricingResult<CurrencyAmount> {
        let forward = self.forward_rate(env, fra)?;
        let notional = fra.notional();
        let fixed = fra.fixed_rate();

        let value = match fra.discounting() {
            FraDiscountingMethod::None => notional * (forward - fixed) * fra.year_fraction(),
            FraDiscountingMethod::Isda => {
                let yf = fra.year_fraction();
                let denominator = non_zero(1.0 + forward * yf, "ISDA")?;
                notional * (forward - fixed) * yf / denominator
            }
            FraDiscountingMethod::Afma => {
                let yf = fra.afma_year_fraction();
                let fixed_growth = non_zero(1.0 + fixed * yf, "AFMA")?;
                let forward_growth = non_zero(1.0 + forward * yf, "AFMA")?;
                notional * (1.0 / fixed_growth - 1.0 / forward_growth)
            }
        };

        if !value.is_finite() {
            return Err(PricingError::math_error(format!(
                "FRA future value is not finite: {value}"
            )));
        }
        debug!(
            currency = %fra.currency(),
            method = %fra.discounting(),
            forward,
            fv = value,
            "FRA future value"
        );
        Ok(CurrencyAmount::of(fra.currency(), value))
    }

    /// Returns the sensitivity of the present value to the curves.
    ///
    /// The forward sensitivity is the analytic derivative of the settlement
    /// formula with respect to the forward rate, discounted. The discounting
    /// adds one zero-rate sensitivity at the payment date.
    pub fn present_value_sensitivity(
        &self,
        env: &dyn PricingEnvironment,
        fra: &ExpandedFra,
    ) -> PricingResult<PointSensitivities> {
        let forward = self.forward_rate(env, fra)?;
        let notional = fra.notional();
        let fixed = fra.fixed_rate();

        let derivative = match fra.discounting() {
            FraDiscountingMethod::None => notional * fra.year_fraction(),
            FraDiscountingMethod::Isda => {
                let yf = fra.year_fraction();
                let growth = non_zero(1.0 + forward * yf, "ISDA")?;
                notional * yf * (1.0 + fixed * yf) / (growth * growth)
            }
            FraDiscountingMethod::Afma => {
                let yf = fra.afma_year_fraction();
                let growth = non_zero(1.0 + forward * yf, "AFMA")?;
                notional * yf / (growth * growth)
            }
        };

        let df = env.discount_factor(fra.currency(), fra.payment_date())?;
        let mut result = self
            .observation_fn
            .rate_sensitivity(env, fra.floating_rate(), fra.start_date(), fra.end_date())?
            .multiplied_by(derivative * df)
            .with_currency(fra.currency());

        let fv = self.future_value(env, fra)?.amount();
        let t = env.relative_time(fra.payment_date());
        result.extend([PointSensitivity::from(ZeroRateSensitivity::of(
            fra.currency(),
            fra.payment_date(),
            -t * df * fv,
        ))]);
        Ok(result.normalized())
    }

    fn forward_rate(&self, env: &dyn PricingEnvironment, fra: &ExpandedFra) -> PricingResult<f64> {
        self.observation_fn
            .rate(env, fra.floating_rate(), fra.start_date(), fra.end_date())
    }
}

fn non_zero(denominator: f64, method: &str) -> PricingResult<f64> {
    if denominator == 0.0 || !denominator.is_finite() {
        return Err(PricingError::math_error(format!(
            "{method} FRA discounting denominator is {denominator}"
        )));
    }
    Ok(denominator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::{DispatchingRateObservationFn, RateObservation};
    use crate::product::Fra;
    use approx::assert_relative_eq;
    use meridian_core::daycounts::DayCountConvention;
    use meridian_core::{Currency, CurrencyPair, Date};
    use meridian_curves::{CurveError, CurveResult, RateIndex};

    struct ConstantEnv {
        forward: f64,
        df: f64,
    }

    impl PricingEnvironment for ConstantEnv {
        fn valuation_date(&self) -> Date {
            Date::from_ymd(2025, 1, 2).unwrap()
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

    fn fra(method: FraDiscountingMethod, fixed: f64) -> ExpandedFra {
        Fra::builder()
            .index(RateIndex::GbpLibor3M)
            .start_date(Date::from_ymd(2025, 6, 16).unwrap())
            .end_date(Date::from_ymd(2025, 9, 16).unwrap())
            .fixed_rate(fixed)
            .notional(1_000_000.0)
            .discounting(method)
            .build()
            .unwrap()
            .expand()
            .unwrap()
    }

    #[test]
    fn test_no_discounting_formula() {
        let env = ConstantEnv {
            forward: 0.03,
            df: 0.99,
        };
        let fra = fra(FraDiscountingMethod::None, 0.025);
        let pricer = DiscountingFraPricer::new(DispatchingRateObservationFn);
        let fv = pricer.future_value(&env, &fra).unwrap();
        assert_relative_eq!(fv.amount(), 1_000_000.0 * 0.005 * 92.0 / 365.0, epsilon = 1e-9);
        assert_eq!(fv.currency(), Currency::GBP);
    }

    #[test]
    fn test_zero_denominator_is_an_error() {
        let fra = Fra::builder()
            .index(RateIndex::UsdLibor3M)
            .start_date(Date::from_ymd(2025, 6, 16).unwrap())
            .end_date(Date::from_ymd(2025, 9, 16).unwrap())
            .day_count(DayCountConvention::Thirty360US)
            .fixed_rate(0.02)
            .notional(1_000_000.0)
            .build()
            .unwrap()
            .expand()
            .unwrap();
        assert_eq!(fra.year_fraction(), 0.25);
        let env = ConstantEnv {
            forward: -4.0,
            df: 1.0,
        };
        let pricer = DiscountingFraPricer::new(DispatchingRateObservationFn);
        assert!(matches!(
            pricer.future_value(&env, &fra),
            Err(PricingError::MathError(_))
        ));
    }

    #[test]
    fn test_sensitivity_matches_finite_difference() {
        let pricer = DiscountingFraPricer::new(DispatchingRateObservationFn);
        let bump = 1e-7;
        for method in [
            FraDiscountingMethod::None,
            FraDiscountingMethod::Isda,
            FraDiscountingMethod::Afma,
        ] {
            let fra = fra(method, 0.02);
            let up = ConstantEnv {
                forward: 0.03 + bump,
                df: 0.97,
            };
            let down = ConstantEnv {
                forward: 0.03 - bump,
                df: 0.97,
            };
            let base = ConstantEnv {
                forward: 0.03,
                df: 0.97,
            };
            let numeric = (pricer.present_value(&up, &fra).unwrap().amount()
                - pricer.present_value(&down, &fra).unwrap().amount())
                / (2.0 * bump);

            let sens = pricer.present_value_sensitivity(&base, &fra).unwrap();
            let forward: f64 = sens
                .iter()
                .filter(|s| matches!(s, PointSensitivity::IborRate(_)))
                .map(PointSensitivity::sensitivity)
                .sum();
            assert_relative_eq!(forward, numeric, max_relative = 1e-6);
            assert_eq!(sens.len(), 2);
        }
    }

    #[test]
    fn test_floating_rate_is_term_fixing() {
        let fra = fra(FraDiscountingMethod::Afma, 0.02);
        assert!(matches!(fra.floating_rate(), RateObservation::Ibor { .. }));
    }
}
