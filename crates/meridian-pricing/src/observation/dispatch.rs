//! Resolution of rate observations.

use meridian_core::daycounts::DayCount;
use meridian_core::Date;
use meridian_curves::sensitivity::{IborRateSensitivity, OvernightRateSensitivity};
use meridian_curves::{PointSensitivities, PricingEnvironment, RateIndex};

use super::RateObservation;
use crate::error::{PricingError, PricingResult};

/// Resolves a rate observation to a rate.
///
/// `start_date` and `end_date` are the dates of the accrual period the
/// observation belongs to.
pub trait RateObservationFn: Send + Sync {
    /// Returns the rate of the observation.
    fn rate(
        &self,
        env: &dyn PricingEnvironment,
        observation: &RateObservation,
        start_date: Date,
        end_date: Date,
    ) -> PricingResult<f64>;

    /// Returns the sensitivity of the rate to the curves it reads.
    fn rate_sensitivity(
        &self,
        env: &dyn PricingEnvironment,
        observation: &RateObservation,
        start_date: Date,
        end_date: Date,
    ) -> PricingResult<PointSensitivities>;
}

/// Resolves every observation kind against the environment.
///
/// - Fixed rates return the stored rate without reading the environment.
/// - Term fixings read `index_rate(index, fixing, fixing)`.
/// - Compounded overnight rates read `index_rate(index, start, end)`.
/// - Averaged overnight rates convert the compounded period rate `R` over
///   year fraction `τ` to `ln(1 + R·τ) / τ`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchingRateObservationFn;

impl DispatchingRateObservationFn {
    /// Creates the resolver.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn averaged(
        env: &dyn PricingEnvironment,
        index: RateIndex,
        start_date: Date,
        end_date: Date,
    ) -> PricingResult<(f64, f64)> {
        let compounded = env.index_rate(index, start_date, end_date)?;
        let tau = index.day_count().year_fraction(start_date, end_date);
        let growth = 1.0 + compounded * tau;
        if tau <= 0.0 || growth <= 0.0 {
            return Err(PricingError::math_error(format!(
                "{index} average over {start_date} to {end_date} is undefined"
            )));
        }
        // (rate, d rate / d compounded)
        Ok((growth.ln() / tau, 1.0 / growth))
    }
}

impl RateObservationFn for DispatchingRateObservationFn {
    fn rate(
        &self,
        env: &dyn PricingEnvironment,
        observation: &RateObservation,
        _start_date: Date,
        _end_date: Date,
    ) -> PricingResult<f64> {
        match *observation {
            RateObservation::Fixed { rate } => Ok(rate),
            RateObservation::Ibor { index, fixing_date } => {
                Ok(env.index_rate(index, fixing_date, fixing_date)?)
            }
            RateObservation::OvernightCompounded {
                index,
                start_date,
                end_date,
            } => Ok(env.index_rate(index, start_date, end_date)?),
            RateObservation::OvernightAveraged {
                index,
                start_date,
                end_date,
            } => Self::averaged(env, index, start_date, end_date).map(|(rate, _)| rate),
        }
    }

    fn rate_sensitivity(
        &self,
        env: &dyn PricingEnvironment,
        observation: &RateObservation,
        _start_date: Date,
        _end_date: Date,
    ) -> PricingResult<PointSensitivities> {
        match *observation {
            RateObservation::Fixed { .. } => Ok(PointSensitivities::empty()),
            RateObservation::Ibor { index, fixing_date } => Ok(PointSensitivities::of(vec![
                IborRateSensitivity::of(index, fixing_date, 1.0).into(),
            ])),
            RateObservation::OvernightCompounded {
                index,
                start_date,
                end_date,
            } => {
                let sensitivity = OvernightRateSensitivity::of(
                    index,
                    index.currency(),
                    start_date,
                    end_date,
                    1.0,
                )?;
                Ok(PointSensitivities::of(vec![sensitivity.into()]))
            }
            RateObservation::OvernightAveraged {
                index,
                start_date,
                end_date,
            } => {
                let (_, derivative) = Self::averaged(env, index, start_date, end_date)?;
                let sensitivity = OvernightRateSensitivity::of(
                    index,
                    index.currency(),
                    start_date,
                    end_date,
                    derivative,
                )?;
                Ok(PointSensitivities::of(vec![sensitivity.into()]))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use meridian_core::{Currency, CurrencyPair};
    use meridian_curves::{CurveError, CurveResult, PointSensitivity};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FlatRateEnv {
        rate: f64,
        calls: AtomicUsize,
    }

    impl PricingEnvironment for FlatRateEnv {
        fn valuation_date(&self) -> Date {
            Date::from_ymd(2025, 1, 2).unwrap()
        }

        fn discount_factor(&self, _currency: Currency, _date: Date) -> CurveResult<f64> {
            Ok(1.0)
        }

        fn fx_rate(&self, pair: CurrencyPair) -> CurveResult<f64> {
            Err(CurveError::fx_rate_not_found(pair))
        }

        fn index_rate(&self, _index: RateIndex, start: Date, end: Date) -> CurveResult<f64> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert!(start <= end);
            Ok(self.rate)
        }
    }

    fn env(rate: f64) -> FlatRateEnv {
        FlatRateEnv {
            rate,
            calls: AtomicUsize::new(0),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_fixed_does_not_read_environment() {
        let env = env(0.05);
        let obs = RateObservation::fixed(0.0125).unwrap();
        let rate = DispatchingRateObservationFn
            .rate(&env, &obs, date(2025, 3, 3), date(2025, 6, 3))
            .unwrap();
        assert_eq!(rate, 0.0125);
        assert_eq!(env.calls.load(Ordering::SeqCst), 0);
        assert!(DispatchingRateObservationFn
            .rate_sensitivity(&env, &obs, date(2025, 3, 3), date(2025, 6, 3))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_ibor_reads_single_fixing() {
        let env = env(0.031);
        let fixing = date(2025, 2, 27);
        let obs = RateObservation::ibor(RateIndex::Euribor3M, fixing).unwrap();
        let resolver = DispatchingRateObservationFn::new();
        assert_eq!(
            resolver.rate(&env, &obs, date(2025, 3, 3), date(2025, 6, 3)).unwrap(),
            0.031
        );

        let sens = resolver
            .rate_sensitivity(&env, &obs, date(2025, 3, 3), date(2025, 6, 3))
            .unwrap();
        assert_eq!(sens.len(), 1);
        match sens.sensitivities()[0] {
            PointSensitivity::IborRate(s) => {
                assert_eq!(s.fixing_date(), fixing);
                assert_eq!(s.currency(), Currency::EUR);
                assert_eq!(s.sensitivity(), 1.0);
            }
            other => panic!("unexpected sensitivity {other:?}"),
        }
    }

    #[test]
    fn test_overnight_compounded_and_averaged() {
        let env = env(0.04);
        let start = date(2025, 3, 3);
        let end = date(2025, 6, 3);
        let resolver = DispatchingRateObservationFn;

        let compounded = RateObservation::overnight_compounded(RateIndex::Sofr, start, end).unwrap();
        assert_eq!(resolver.rate(&env, &compounded, start, end).unwrap(), 0.04);

        let averaged = RateObservation::overnight_averaged(RateIndex::Sofr, start, end).unwrap();
        let tau: f64 = 92.0 / 360.0;
        let rate = resolver.rate(&env, &averaged, start, end).unwrap();
        assert_relative_eq!(rate, (1.0 + 0.04 * tau).ln() / tau, epsilon = 1e-15);
        assert!(rate < 0.04);

        let sens = resolver
            .rate_sensitivity(&env, &averaged, start, end)
            .unwrap();
        match sens.sensitivities()[0] {
            PointSensitivity::OvernightRate(s) => {
                assert_eq!(s.fixing_date(), start);
                assert_eq!(s.end_date(), end);
                assert_relative_eq!(s.sensitivity(), 1.0 / (1.0 + 0.04 * tau));
            }
            other => panic!("unexpected sensitivity {other:?}"),
        }
    }

    #[test]
    fn test_lookup_failure_propagates() {
        struct Missing;
        impl PricingEnvironment for Missing {
            fn valuation_date(&self) -> Date {
                Date::from_ymd(2025, 1, 2).unwrap()
            }
            fn discount_factor(&self, currency: Currency, _date: Date) -> CurveResult<f64> {
                Err(CurveError::curve_not_found(currency.code()))
            }
            fn fx_rate(&self, pair: CurrencyPair) -> CurveResult<f64> {
                Err(CurveError::fx_rate_not_found(pair))
            }
            fn index_rate(&self, index: RateIndex, _start: Date, _end: Date) -> CurveResult<f64> {
                Err(CurveError::curve_not_found(index.name()))
            }
        }

        let obs = RateObservation::ibor(RateIndex::GbpLibor3M, date(2025, 3, 3)).unwrap();
        let err = DispatchingRateObservationFn
            .rate(&Missing, &obs, date(2025, 3, 3), date(2025, 6, 3))
            .unwrap_err();
        assert!(matches!(err, PricingError::Curve(CurveError::CurveNotFound { .. })));
    }
}
