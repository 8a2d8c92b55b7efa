//! Integration tests for the immutable pricing environment.

use approx::assert_relative_eq;
use meridian_core::money::{CurrencyAmount, MultiCurrencyAmount};
use meridian_curves::prelude::*;
use proptest::prelude::*;

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn environment(gbp_usd: f64) -> ImmutablePricingEnvironment {
    let today = date(2025, 6, 16);
    ImmutablePricingEnvironment::builder(today)
        .curve_group("EOD")
        .ois_curve(RateIndex::Sofr, FlatCurve::new(today, 0.043))
        .ois_curve(RateIndex::Sonia, FlatCurve::new(today, 0.041))
        .fx_rate(CurrencyPair::of(Currency::GBP, Currency::USD), gbp_usd)
        .build()
        .unwrap()
}

#[test]
fn test_convert_multi_currency_total() {
    let env = environment(1.27);
    let total = MultiCurrencyAmount::of(Currency::GBP, 100.0)
        + MultiCurrencyAmount::of(Currency::USD, 50.0);
    assert_eq!(total.len(), 2);

    let usd = env.fx_convert_all(&total, Currency::USD).unwrap();
    assert_eq!(usd.currency(), Currency::USD);
    assert_relative_eq!(usd.amount(), 100.0 * 1.27 + 50.0, epsilon = 1e-12);

    let gbp = env.fx_convert_all(&total, Currency::GBP).unwrap();
    assert_relative_eq!(gbp.amount(), 100.0 + 50.0 / 1.27, epsilon = 1e-12);
}

#[test]
fn test_fx_convert_single_amount() {
    let env = environment(1.25);
    let usd = env
        .fx_convert(CurrencyAmount::of(Currency::GBP, 80.0), Currency::USD)
        .unwrap();
    assert_relative_eq!(usd.amount(), 100.0);
    assert!(env
        .fx_convert(CurrencyAmount::of(Currency::CHF, 1.0), Currency::USD)
        .is_err());
}

#[test]
fn test_shared_environment_across_threads() {
    let env = environment(1.27);
    let payment = date(2027, 6, 16);
    let expected = env.discount_factor(Currency::GBP, payment).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| env.discount_factor(Currency::GBP, payment).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn test_sensitivities_from_many_workers_merge() {
    let fixing = date(2025, 9, 15);
    let lists: Vec<PointSensitivities> = (0..8)
        .map(|_| {
            PointSensitivities::of(vec![
                OvernightRateSensitivity::of_fixing(RateIndex::Sonia, Currency::GBP, fixing, 0.5)
                    .into(),
                ZeroRateSensitivity::of(Currency::GBP, fixing, -1.0).into(),
            ])
        })
        .collect();

    let merged = PointSensitivities::merge_all(lists);
    assert_eq!(merged.len(), 2);
    // "GBP" sorts before "SONIA"
    assert_eq!(merged.sensitivities()[0].curve_key(), "GBP");
    assert_relative_eq!(merged.sensitivities()[0].sensitivity(), -8.0);
    assert_relative_eq!(merged.sensitivities()[1].sensitivity(), 4.0);
}

proptest! {
    #[test]
    fn prop_conversion_is_linear_in_rate(
        gbp in -1.0e6..1.0e6f64,
        usd in -1.0e6..1.0e6f64,
        rate in 0.5..2.5f64,
    ) {
        let env = environment(rate);
        let total = MultiCurrencyAmount::of(Currency::GBP, gbp)
            .plus_amount(CurrencyAmount::of(Currency::USD, usd));
        let converted = env.fx_convert_all(&total, Currency::USD).unwrap();
        prop_assert!((converted.amount() - (gbp * rate + usd)).abs() <= 1e-6);
    }
}
