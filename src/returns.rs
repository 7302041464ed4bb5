//! # Return Series
//!
//! $$
//! r_t=\frac{P_t-P_{t-1}}{P_{t-1}}
//! $$
//!
//! Daily return construction from unordered close-price history.

use chrono::NaiveDate;

use crate::types::PricePoint;

/// One daily return keyed by the later of the two trading dates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReturnObservation {
  /// Date of the later close in the pair.
  pub date: NaiveDate,
  /// Simple daily return.
  pub value: f64,
}

/// Ordered daily return series for a single asset.
#[derive(Clone, Debug, Default)]
pub struct ReturnSeries {
  /// Asset identifier.
  pub symbol: String,
  /// Observations ascending by date.
  pub observations: Vec<ReturnObservation>,
}

impl ReturnSeries {
  /// Number of observations.
  pub fn len(&self) -> usize {
    self.observations.len()
  }

  /// True when the series holds no observations.
  pub fn is_empty(&self) -> bool {
    self.observations.is_empty()
  }

  /// Sample mean of the return values; zero for an empty series.
  pub fn mean(&self) -> f64 {
    if self.observations.is_empty() {
      0.0
    } else {
      let sum: f64 = self.observations.iter().map(|o| o.value).sum();
      sum / self.observations.len() as f64
    }
  }
}

/// Build a daily return series from possibly unordered price points.
///
/// Points are sorted ascending by date first. A pair is skipped, not
/// zero-filled, when the previous close is non-finite or exactly zero.
/// Fewer than two points yield an empty series; downstream code treats that
/// as a normal outcome, not an error.
pub fn build_return_series(symbol: &str, prices: &[PricePoint]) -> ReturnSeries {
  let mut sorted: Vec<&PricePoint> = prices.iter().collect();
  sorted.sort_by_key(|p| p.date);

  let mut observations = Vec::with_capacity(sorted.len().saturating_sub(1));
  for pair in sorted.windows(2) {
    let prev = pair[0].close;
    if !prev.is_finite() || prev == 0.0 {
      continue;
    }
    observations.push(ReturnObservation {
      date: pair[1].date,
      value: (pair[1].close - prev) / prev,
    });
  }

  ReturnSeries {
    symbol: symbol.to_string(),
    observations,
  }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;

  fn day(i: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, i).unwrap()
  }

  #[test]
  fn constant_closes_yield_all_zero_returns() {
    let prices: Vec<PricePoint> = (1..=5).map(|i| PricePoint::close_only(day(i), 50.0)).collect();
    let series = build_return_series("FLAT", &prices);

    assert_eq!(series.len(), 4);
    assert!(series.observations.iter().all(|o| o.value == 0.0));
  }

  #[test]
  fn fewer_than_two_points_is_empty() {
    assert!(build_return_series("X", &[]).is_empty());

    let one = [PricePoint::close_only(day(1), 10.0)];
    assert!(build_return_series("X", &one).is_empty());
  }

  #[test]
  fn unsorted_input_is_sorted_before_differencing() {
    let prices = [
      PricePoint::close_only(day(3), 110.0),
      PricePoint::close_only(day(1), 100.0),
      PricePoint::close_only(day(2), 105.0),
    ];
    let series = build_return_series("ACME", &prices);

    assert_eq!(series.len(), 2);
    assert_eq!(series.observations[0].date, day(2));
    assert!((series.observations[0].value - 0.05).abs() < 1e-12);
    assert!((series.observations[1].value - 5.0 / 105.0).abs() < 1e-12);
  }

  #[test]
  fn zero_or_non_finite_previous_close_is_skipped() {
    let prices = [
      PricePoint::close_only(day(1), 0.0),
      PricePoint::close_only(day(2), 100.0),
      PricePoint::close_only(day(3), f64::NAN),
      PricePoint::close_only(day(4), 100.0),
      PricePoint::close_only(day(5), 102.0),
    ];
    let series = build_return_series("GAPPY", &prices);

    let dates: Vec<NaiveDate> = series.observations.iter().map(|o| o.date).collect();
    assert_eq!(dates, vec![day(3), day(5)]);
    assert!((series.observations[1].value - 0.02).abs() < 1e-12);
  }

  #[test]
  fn mean_of_empty_series_is_zero() {
    assert_eq!(ReturnSeries::default().mean(), 0.0);
  }
}
