//! Collections of point sensitivities.

use meridian_core::Currency;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::PointSensitivity;

/// A list of point sensitivities.
///
/// The list may hold several entries with the same key until it is
/// [`normalized`](PointSensitivities::normalized).
///
/// # Example
///
/// ```rust
/// use meridian_core::{Currency, Date};
/// use meridian_curves::sensitivity::{PointSensitivities, ZeroRateSensitivity};
///
/// let date = Date::from_ymd(2026, 1, 2).unwrap();
/// let a = PointSensitivities::of(vec![ZeroRateSensitivity::of(Currency::USD, date, 1.0).into()]);
/// let b = PointSensitivities::of(vec![ZeroRateSensitivity::of(Currency::USD, date, 2.0).into()]);
///
/// let merged = a.combined_with(&b).normalized();
/// assert_eq!(merged.len(), 1);
/// assert_eq!(merged.sensitivities()[0].sensitivity(), 3.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointSensitivities {
    sensitivities: Vec<PointSensitivity>,
}

impl PointSensitivities {
    /// Creates an empty list.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a list from sensitivities.
    #[must_use]
    pub fn of(sensitivities: Vec<PointSensitivity>) -> Self {
        Self { sensitivities }
    }

    /// Returns the sensitivities in stored order.
    #[must_use]
    pub fn sensitivities(&self) -> &[PointSensitivity] {
        &self.sensitivities
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sensitivities.len()
    }

    /// Checks if the list has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sensitivities.is_empty()
    }

    /// Iterates the entries in stored order.
    pub fn iter(&self) -> impl Iterator<Item = &PointSensitivity> {
        self.sensitivities.iter()
    }

    /// Returns the concatenation of this list and another.
    #[must_use]
    pub fn combined_with(&self, other: &PointSensitivities) -> Self {
        let mut sensitivities = Vec::with_capacity(self.len() + other.len());
        sensitivities.extend_from_slice(&self.sensitivities);
        sensitivities.extend_from_slice(&other.sensitivities);
        Self { sensitivities }
    }

    /// Returns a copy with every value scaled by `factor`.
    #[must_use]
    pub fn multiplied_by(&self, factor: f64) -> Self {
        Self {
            sensitivities: self
                .sensitivities
                .iter()
                .map(|s| s.multiplied_by(factor))
                .collect(),
        }
    }

    /// Returns a copy with every forward sensitivity expressed in `currency`.
    ///
    /// See [`PointSensitivity::with_currency`].
    #[must_use]
    pub fn with_currency(&self, currency: Currency) -> Self {
        Self {
            sensitivities: self
                .sensitivities
                .iter()
                .map(|s| s.with_currency(currency))
                .collect(),
        }
    }

    /// Sorts by key and sums the values of entries sharing a key.
    ///
    /// No entry is dropped, including those whose sum is zero.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut sorted = self.sensitivities.clone();
        sorted.sort_by(PointSensitivity::compare_key);

        let mut merged: Vec<PointSensitivity> = Vec::with_capacity(sorted.len());
        for s in sorted {
            match merged.last_mut() {
                Some(last) if last.compare_key(&s) == Ordering::Equal => {
                    *last = last.with_sensitivity(last.sensitivity() + s.sensitivity());
                }
                _ => merged.push(s),
            }
        }
        Self {
            sensitivities: merged,
        }
    }

    /// Checks if both lists normalize to the same keys with values within
    /// `tolerance` of each other.
    #[must_use]
    pub fn equal_within_tolerance(&self, other: &PointSensitivities, tolerance: f64) -> bool {
        let left = self.normalized();
        let right = other.normalized();
        left.len() == right.len()
            && left.iter().zip(right.iter()).all(|(a, b)| {
                a.compare_key(b) == Ordering::Equal
                    && (a.sensitivity() - b.sensitivity()).abs() <= tolerance
            })
    }

    /// Merges many lists in parallel and normalizes the result.
    #[must_use]
    pub fn merge_all(lists: Vec<PointSensitivities>) -> Self {
        lists
            .into_par_iter()
            .map(|list| list.normalized())
            .reduce(Self::empty, |a, b| a.combined_with(&b).normalized())
    }
}

impl From<Vec<PointSensitivity>> for PointSensitivities {
    fn from(sensitivities: Vec<PointSensitivity>) -> Self {
        Self::of(sensitivities)
    }
}

impl FromIterator<PointSensitivity> for PointSensitivities {
    fn from_iter<I: IntoIterator<Item = PointSensitivity>>(iter: I) -> Self {
        Self::of(iter.into_iter().collect())
    }
}

impl Extend<PointSensitivity> for PointSensitivities {
    fn extend<I: IntoIterator<Item = PointSensitivity>>(&mut self, iter: I) {
        self.sensitivities.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::RateIndex;
    use crate::sensitivity::{IborRateSensitivity, OvernightRateSensitivity, ZeroRateSensitivity};
    use approx::assert_relative_eq;
    use meridian_core::{Currency, Date};
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_normalized_sorts_and_sums() {
        let d1 = date(2026, 1, 2);
        let d2 = date(2027, 1, 4);
        let list = PointSensitivities::of(vec![
            ZeroRateSensitivity::of(Currency::USD, d2, 1.0).into(),
            IborRateSensitivity::of(RateIndex::UsdLibor3M, d1, 5.0).into(),
            ZeroRateSensitivity::of(Currency::USD, d1, 2.0).into(),
            ZeroRateSensitivity::of(Currency::USD, d2, 3.0).into(),
        ]);

        let normalized = list.normalized();
        assert_eq!(normalized.len(), 3);
        let values: Vec<f64> = normalized.iter().map(PointSensitivity::sensitivity).collect();
        // "USD" sorts before "USD LIBOR 3M"
        assert_eq!(values, vec![2.0, 4.0, 5.0]);
    }

    #[test]
    fn test_normalized_keeps_zero_sums() {
        let d = date(2026, 1, 2);
        let list = PointSensitivities::of(vec![
            ZeroRateSensitivity::of(Currency::EUR, d, 1.0).into(),
            ZeroRateSensitivity::of(Currency::EUR, d, -1.0).into(),
        ]);
        let normalized = list.normalized();
        assert_eq!(normalized.len(), 1);
        assert_eq!(normalized.sensitivities()[0].sensitivity(), 0.0);
    }

    #[test]
    fn test_multiplied_and_combined() {
        let d = date(2026, 1, 2);
        let a = PointSensitivities::of(vec![ZeroRateSensitivity::of(Currency::EUR, d, 1.5).into()]);
        let b = PointSensitivities::of(vec![
            OvernightRateSensitivity::of_fixing(RateIndex::Estr, Currency::EUR, d, 2.0).into(),
        ]);
        let combined = a.combined_with(&b).multiplied_by(2.0);
        assert_eq!(combined.len(), 2);
        assert_eq!(combined.sensitivities()[0].sensitivity(), 3.0);
        assert_eq!(combined.sensitivities()[1].sensitivity(), 4.0);
    }

    #[test]
    fn test_equal_within_tolerance() {
        let d = date(2026, 1, 2);
        let a = PointSensitivities::of(vec![
            ZeroRateSensitivity::of(Currency::EUR, d, 1.0).into(),
            ZeroRateSensitivity::of(Currency::EUR, d, 1.0).into(),
        ]);
        let b = PointSensitivities::of(vec![ZeroRateSensitivity::of(Currency::EUR, d, 2.0 + 1e-12).into()]);
        assert!(a.equal_within_tolerance(&b, 1e-10));
        assert!(!a.equal_within_tolerance(&b, 1e-14));
        assert!(!a.equal_within_tolerance(&PointSensitivities::empty(), 1.0));
    }

    #[test]
    fn test_merge_all() {
        let d = date(2026, 1, 2);
        let lists: Vec<PointSensitivities> = (0..50)
            .map(|i| {
                PointSensitivities::of(vec![
                    ZeroRateSensitivity::of(Currency::USD, d, f64::from(i)).into(),
                    IborRateSensitivity::of(RateIndex::Euribor6M, d, 1.0).into(),
                ])
            })
            .collect();

        let merged = PointSensitivities::merge_all(lists);
        assert_eq!(merged.len(), 2);
        assert_relative_eq!(merged.sensitivities()[0].sensitivity(), 50.0);
        assert_relative_eq!(merged.sensitivities()[1].sensitivity(), 1225.0);
    }

    fn arb_sensitivity() -> impl Strategy<Value = PointSensitivity> {
        (0usize..3, 0i64..5, -100.0..100.0f64).prop_map(|(kind, offset, value)| {
            let d = date(2026, 1, 5).add_days(offset);
            match kind {
                0 => ZeroRateSensitivity::of(Currency::USD, d, value).into(),
                1 => IborRateSensitivity::of(RateIndex::UsdLibor3M, d, value).into(),
                _ => OvernightRateSensitivity::of_fixing(RateIndex::Sofr, Currency::USD, d, value).into(),
            }
        })
    }

    proptest! {
        #[test]
        fn prop_normalized_is_sorted_unique_and_preserves_total(
            items in prop::collection::vec(arb_sensitivity(), 0..40)
        ) {
            let list = PointSensitivities::of(items.clone());
            let normalized = list.normalized();

            for pair in normalized.sensitivities().windows(2) {
                prop_assert_eq!(pair[0].compare_key(&pair[1]), Ordering::Less);
            }

            let before: f64 = items.iter().map(PointSensitivity::sensitivity).sum();
            let after: f64 = normalized.iter().map(PointSensitivity::sensitivity).sum();
            prop_assert!((before - after).abs() < 1e-9);
            prop_assert!(normalized.equal_within_tolerance(&list, 1e-9));
        }
    }
}
