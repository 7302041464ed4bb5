//! # Covariance
//!
//! $$
//! \sigma_{xy}=\frac{1}{n-1}\sum_{i=1}^{n}(x_i-\bar x)(y_i-\bar y)
//! $$
//!
//! Pairwise covariance over date-aligned daily return series. Trading
//! calendars differ across assets, so two series are paired on the
//! intersection of their date keys rather than by positional index.

use crate::returns::ReturnSeries;

fn sample_mean(xs: &[f64]) -> f64 {
  if xs.is_empty() {
    0.0
  } else {
    xs.iter().sum::<f64>() / xs.len() as f64
  }
}

/// Inner join of two date-sorted series; returns the paired return values.
fn paired_values(a: &ReturnSeries, b: &ReturnSeries) -> (Vec<f64>, Vec<f64>) {
  let mut xs = Vec::new();
  let mut ys = Vec::new();
  let mut i = 0;
  let mut j = 0;

  while i < a.observations.len() && j < b.observations.len() {
    let da = a.observations[i].date;
    let db = b.observations[j].date;

    if da < db {
      i += 1;
    } else if db < da {
      j += 1;
    } else {
      xs.push(a.observations[i].value);
      ys.push(b.observations[j].value);
      i += 1;
      j += 1;
    }
  }

  (xs, ys)
}

/// Covariance of two series over the intersection of their trading dates.
///
/// Means are taken over the paired values only, not each asset's full
/// series. Fewer than two shared dates define the covariance as zero.
/// Applied to a series against itself this is the ordinary sample variance.
pub fn pair_covariance(a: &ReturnSeries, b: &ReturnSeries) -> f64 {
  let (xs, ys) = paired_values(a, b);
  let n = xs.len();
  if n < 2 {
    return 0.0;
  }

  let mx = sample_mean(&xs);
  let my = sample_mean(&ys);

  let mut acc = 0.0;
  for k in 0..n {
    acc += (xs[k] - mx) * (ys[k] - my);
  }

  acc / (n - 1) as f64
}

/// Symmetric covariance matrix over a fixed asset ordering.
///
/// Built once per optimization run and indexed by asset position, so every
/// sampled weight vector reuses it in `O(assets²)`.
pub fn covariance_matrix(series: &[ReturnSeries]) -> Vec<Vec<f64>> {
  let n = series.len();
  let mut cov = vec![vec![0.0; n]; n];

  for i in 0..n {
    for j in i..n {
      let c = pair_covariance(&series[i], &series[j]);
      cov[i][j] = c;
      cov[j][i] = c;
    }
  }

  cov
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;
  use chrono::NaiveDate;

  use super::*;
  use crate::returns::build_return_series;
  use crate::types::PricePoint;

  fn day(i: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, i).unwrap()
  }

  fn series(symbol: &str, start_day: u32, closes: &[f64]) -> ReturnSeries {
    let prices: Vec<PricePoint> = closes
      .iter()
      .enumerate()
      .map(|(i, &c)| PricePoint::close_only(day(start_day + i as u32), c))
      .collect();
    build_return_series(symbol, &prices)
  }

  #[test]
  fn self_covariance_matches_hand_derived_sample_variance() {
    let s = series("ACME", 1, &[100.0, 102.0, 99.0, 105.0, 103.0]);
    let var = pair_covariance(&s, &s);

    // Direct sample variance of the four daily returns.
    let returns = [2.0 / 100.0, -3.0 / 102.0, 6.0 / 99.0, -2.0 / 105.0];
    let mean: f64 = returns.iter().sum::<f64>() / 4.0;
    let expected: f64 = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / 3.0;

    assert_abs_diff_eq!(var, expected, epsilon = 1e-12);
    assert_abs_diff_eq!(var, 0.001681, epsilon = 1e-6);
  }

  #[test]
  fn disjoint_calendars_give_zero_covariance() {
    let a = series("A", 1, &[100.0, 101.0, 102.0, 103.0]);
    let b = series("B", 10, &[50.0, 51.0, 50.0, 52.0]);

    assert_eq!(pair_covariance(&a, &b), 0.0);
  }

  #[test]
  fn pairing_uses_the_date_intersection_only() {
    // B misses day 3, so the day-3 return of A must not be paired.
    let a = series("A", 1, &[100.0, 102.0, 101.0, 104.0]);
    let b_prices = [
      PricePoint::close_only(day(1), 40.0),
      PricePoint::close_only(day(2), 41.0),
      PricePoint::close_only(day(4), 42.0),
    ];
    let b = build_return_series("B", &b_prices);

    let (xs, ys) = paired_values(&a, &b);
    assert_eq!(xs.len(), 2);
    assert_eq!(ys.len(), 2);
    // Shared return dates are day 2 and day 4.
    assert!((xs[0] - 0.02).abs() < 1e-12);
    assert!((xs[1] - 3.0 / 101.0).abs() < 1e-12);
  }

  #[test]
  fn matrix_is_symmetric_with_variances_on_the_diagonal() {
    let a = series("A", 1, &[100.0, 102.0, 99.0, 105.0, 103.0]);
    let b = series("B", 1, &[50.0, 49.0, 51.0, 50.0, 52.0]);
    let cov = covariance_matrix(&[a.clone(), b.clone()]);

    assert_eq!(cov[0][1], cov[1][0]);
    assert!((cov[0][0] - pair_covariance(&a, &a)).abs() < 1e-15);
    assert!((cov[1][1] - pair_covariance(&b, &b)).abs() < 1e-15);
  }

  #[test]
  fn single_shared_date_yields_zero() {
    let a = series("A", 1, &[100.0, 101.0]);
    let b = series("B", 1, &[50.0, 51.0]);
    // Exactly one shared return date.
    assert_eq!(pair_covariance(&a, &b), 0.0);
  }
}
