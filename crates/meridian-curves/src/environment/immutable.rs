//! Immutable pricing environment backed by curves, spot rates and fixings.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use meridian_core::daycounts::DayCount;
use meridian_core::types::{Currency, CurrencyPair, Date};
use tracing::{debug, trace};

use super::{check_period, PricingEnvironment};
use crate::error::{CurveError, CurveResult};
use crate::index::RateIndex;
use crate::traits::Curve;

/// Shared reference to a read-only curve.
pub type CurveRef = Arc<dyn Curve>;

/// A pricing environment that never changes after it is built.
///
/// Holds:
/// - **Discount curves** per currency
/// - **Forward curves** per rate index
/// - **FX spot rates** per currency pair; the inverse pair is derived
/// - **Historic fixings** per rate index, used for periods that started
///   before the valuation date
///
/// # Example
///
/// ```rust
/// use meridian_core::{Currency, CurrencyPair, Date};
/// use meridian_curves::{FlatCurve, ImmutablePricingEnvironment, PricingEnvironment, RateIndex};
///
/// let today = Date::from_ymd(2025, 1, 2).unwrap();
/// let env = ImmutablePricingEnvironment::builder(today)
///     .discount_curve(Currency::USD, FlatCurve::new(today, 0.04))
///     .forward_curve(RateIndex::Sofr, FlatCurve::new(today, 0.04))
///     .fx_rate(CurrencyPair::of(Currency::EUR, Currency::USD), 1.10)
///     .build()
///     .unwrap();
///
/// let df = env.discount_factor(Currency::USD, today.add_days(365)).unwrap();
/// assert!((df - (-0.04f64).exp()).abs() < 1e-12);
/// let usd_eur = env.fx_rate(CurrencyPair::of(Currency::USD, Currency::EUR)).unwrap();
/// assert!((usd_eur - 1.0 / 1.10).abs() < 1e-12);
/// ```
pub struct ImmutablePricingEnvironment {
    /// Valuation date.
    valuation_date: Date,

    /// Name of the curve group the curves came from.
    curve_group: String,

    /// Discount curves per currency.
    discount_curves: HashMap<Currency, CurveRef>,

    /// Forward curves per rate index.
    forward_curves: HashMap<RateIndex, CurveRef>,

    /// Spot rates as quoted.
    fx_rates: HashMap<CurrencyPair, f64>,

    /// Historic fixings per index, ordered by date.
    fixings: HashMap<RateIndex, BTreeMap<Date, f64>>,
}

impl ImmutablePricingEnvironment {
    /// Creates a builder for an environment valued at `valuation_date`.
    #[must_use]
    pub fn builder(valuation_date: Date) -> ImmutablePricingEnvironmentBuilder {
        ImmutablePricingEnvironmentBuilder::new(valuation_date)
    }

    /// Returns the name of the curve group.
    #[must_use]
    pub fn curve_group(&self) -> &str {
        &self.curve_group
    }

    /// Returns the discount curve for a currency.
    pub fn discount_curve(&self, currency: Currency) -> CurveResult<&dyn Curve> {
        self.discount_curves
            .get(&currency)
            .map(|c| c.as_ref())
            .ok_or_else(|| CurveError::curve_not_found(format!("{currency} discount")))
    }

    /// Returns the forward curve for a rate index.
    pub fn forward_curve(&self, index: RateIndex) -> CurveResult<&dyn Curve> {
        self.forward_curves
            .get(&index)
            .map(|c| c.as_ref())
            .ok_or_else(|| CurveError::curve_not_found(format!("{index} forward")))
    }

    /// Returns the historic fixing of `index` on `date`, if one was supplied.
    #[must_use]
    pub fn fixing(&self, index: RateIndex, date: Date) -> Option<f64> {
        self.fixings.get(&index).and_then(|series| series.get(&date)).copied()
    }

    /// Returns all currencies with a discount curve, sorted.
    #[must_use]
    pub fn currencies(&self) -> Vec<Currency> {
        let mut currencies: Vec<Currency> = self.discount_curves.keys().copied().collect();
        currencies.sort();
        currencies
    }

    /// Returns all indices with a forward curve, sorted.
    #[must_use]
    pub fn indices(&self) -> Vec<RateIndex> {
        let mut indices: Vec<RateIndex> = self.forward_curves.keys().copied().collect();
        indices.sort();
        indices
    }

    fn forward_rate(&self, index: RateIndex, start: Date, end: Date) -> CurveResult<f64> {
        let end = if start == end {
            Self::collapsed_end(index, start)?
        } else {
            end
        };
        let curve = self.forward_curve(index)?;
        let df_start = curve.discount_factor_at(start)?;
        let df_end = curve.discount_factor_at(end)?;
        let accrual = index.day_count().year_fraction(start, end);
        if accrual <= 0.0 || df_end <= 0.0 {
            return Err(CurveError::invalid_value(format!(
                "{index} forward over {start} to {end} is undefined"
            )));
        }
        let rate = (df_start / df_end - 1.0) / accrual;
        trace!(index = %index, start = %start, end = %end, rate, "forward rate");
        Ok(rate)
    }

    fn collapsed_end(index: RateIndex, start: Date) -> CurveResult<Date> {
        if index.is_overnight() {
            Ok(start.next_business_day())
        } else {
            Ok(start.add_months(index.tenor_months())?)
        }
    }
}

impl PricingEnvironment for ImmutablePricingEnvironment {
    fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    fn discount_factor(&self, currency: Currency, date: Date) -> CurveResult<f64> {
        self.discount_curve(currency)?.discount_factor_at(date)
    }

    fn fx_rate(&self, pair: CurrencyPair) -> CurveResult<f64> {
        if pair.is_identity() {
            return Ok(1.0);
        }
        if let Some(rate) = self.fx_rates.get(&pair) {
            return Ok(*rate);
        }
        self.fx_rates
            .get(&pair.inverse())
            .map(|rate| 1.0 / rate)
            .ok_or_else(|| CurveError::fx_rate_not_found(pair))
    }

    /// Resolves the rate of `index` over `[start, end]`.
    ///
    /// - A period starting before the valuation date returns the stored
    ///   fixing on `start` as the rate of the whole period. This holds for
    ///   overnight periods too: a partly fixed compounded period is not
    ///   compounded from daily fixings, and a missing fixing is an error.
    /// - A period starting on the valuation date uses the fixing on `start`
    ///   when one is stored, and the forward curve otherwise.
    /// - Later periods read the forward curve.
    fn index_rate(&self, index: RateIndex, start: Date, end: Date) -> CurveResult<f64> {
        check_period(index, start, end)?;

        if start < self.valuation_date {
            return self
                .fixing(index, start)
                .ok_or_else(|| CurveError::fixing_not_found(index, start));
        }
        if start == self.valuation_date {
            if let Some(rate) = self.fixing(index, start) {
                return Ok(rate);
            }
        }
        self.forward_rate(index, start, end)
    }
}

impl std::fmt::Debug for ImmutablePricingEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImmutablePricingEnvironment")
            .field("valuation_date", &self.valuation_date)
            .field("curve_group", &self.curve_group)
            .field("currencies", &self.currencies())
            .field("indices", &self.indices())
            .field("fx_rates", &self.fx_rates.len())
            .finish_non_exhaustive()
    }
}

/// Builder for an [`ImmutablePricingEnvironment`].
pub struct ImmutablePricingEnvironmentBuilder {
    valuation_date: Date,
    curve_group: String,
    discount_curves: HashMap<Currency, CurveRef>,
    forward_curves: HashMap<RateIndex, CurveRef>,
    fx_rates: HashMap<CurrencyPair, f64>,
    fixings: HashMap<RateIndex, BTreeMap<Date, f64>>,
}

impl ImmutablePricingEnvironmentBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(valuation_date: Date) -> Self {
        Self {
            valuation_date,
            curve_group: String::from("default"),
            discount_curves: HashMap::new(),
            forward_curves: HashMap::new(),
            fx_rates: HashMap::new(),
            fixings: HashMap::new(),
        }
    }

    /// Sets the curve group name.
    #[must_use]
    pub fn curve_group(mut self, name: impl Into<String>) -> Self {
        self.curve_group = name.into();
        self
    }

    /// Adds a discount curve for a currency.
    #[must_use]
    pub fn discount_curve(mut self, currency: Currency, curve: impl Curve + 'static) -> Self {
        self.discount_curves.insert(currency, Arc::new(curve));
        self
    }

    /// Adds a discount curve from a shared reference.
    #[must_use]
    pub fn discount_curve_ref(mut self, currency: Currency, curve: CurveRef) -> Self {
        self.discount_curves.insert(currency, curve);
        self
    }

    /// Adds a forward curve for a rate index.
    #[must_use]
    pub fn forward_curve(mut self, index: RateIndex, curve: impl Curve + 'static) -> Self {
        self.forward_curves.insert(index, Arc::new(curve));
        self
    }

    /// Adds a forward curve from a shared reference.
    #[must_use]
    pub fn forward_curve_ref(mut self, index: RateIndex, curve: CurveRef) -> Self {
        self.forward_curves.insert(index, curve);
        self
    }

    /// Uses one curve to discount in the index currency and to forecast the
    /// overnight index.
    #[must_use]
    pub fn ois_curve(mut self, index: RateIndex, curve: impl Curve + 'static) -> Self {
        let curve: CurveRef = Arc::new(curve);
        self.discount_curves.insert(index.currency(), Arc::clone(&curve));
        self.forward_curves.insert(index, curve);
        self
    }

    /// Adds a spot rate: one unit of `pair.base()` in `pair.counter()`.
    #[must_use]
    pub fn fx_rate(mut self, pair: CurrencyPair, rate: f64) -> Self {
        self.fx_rates.insert(pair, rate);
        self
    }

    /// Adds a historic fixing.
    #[must_use]
    pub fn fixing(mut self, index: RateIndex, date: Date, rate: f64) -> Self {
        self.fixings.entry(index).or_default().insert(date, rate);
        self
    }

    /// Adds a series of historic fixings.
    #[must_use]
    pub fn fixings(mut self, index: RateIndex, series: impl IntoIterator<Item = (Date, f64)>) -> Self {
        self.fixings.entry(index).or_default().extend(series);
        self
    }

    /// Builds the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a spot rate is not finite and positive, if a pair
    /// and its inverse are both quoted, if a fixing is not finite, or if a
    /// curve's reference date differs from the valuation date.
    pub fn build(self) -> CurveResult<ImmutablePricingEnvironment> {
        for (pair, rate) in &self.fx_rates {
            if !rate.is_finite() || *rate <= 0.0 {
                return Err(CurveError::builder_error(format!(
                    "FX rate for {pair} must be finite and positive, was {rate}"
                )));
            }
            if pair.is_identity() {
                return Err(CurveError::builder_error(format!(
                    "FX rate quoted for identity pair {pair}"
                )));
            }
            if pair.base() < pair.counter() && self.fx_rates.contains_key(&pair.inverse()) {
                return Err(CurveError::builder_error(format!(
                    "FX rate for {pair} quoted in both directions"
                )));
            }
        }

        for (index, series) in &self.fixings {
            if let Some((date, rate)) = series.iter().find(|(_, r)| !r.is_finite()) {
                return Err(CurveError::builder_error(format!(
                    "{index} fixing on {date} is not finite: {rate}"
                )));
            }
        }

        let curves = self
            .discount_curves
            .values()
            .chain(self.forward_curves.values());
        for curve in curves {
            if curve.reference_date() != self.valuation_date {
                return Err(CurveError::reference_date_mismatch(
                    self.valuation_date,
                    curve.reference_date(),
                ));
            }
        }

        debug!(
            valuation_date = %self.valuation_date,
            curve_group = %self.curve_group,
            discount_curves = self.discount_curves.len(),
            forward_curves = self.forward_curves.len(),
            fx_rates = self.fx_rates.len(),
            "built pricing environment"
        );

        Ok(ImmutablePricingEnvironment {
            valuation_date: self.valuation_date,
            curve_group: self.curve_group,
            discount_curves: self.discount_curves,
            forward_curves: self.forward_curves,
            fx_rates: self.fx_rates,
            fixings: self.fixings,
        })
    }
}
