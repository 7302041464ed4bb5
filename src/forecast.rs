//! # Forecasting
//!
//! $$
//! \hat y=\beta_0+\beta_1 x,\qquad R^2=1-\frac{SS_{res}}{SS_{tot}}
//! $$
//!
//! Least squares price trend extrapolation and its sentiment-tilted
//! variant. Both are best-effort: insufficient input yields
//! [`Computed::Unavailable`] rather than an error, so a dashboard widget can
//! degrade without taking the page down.

use chrono::Duration;
use linreg::linear_regression;
use tracing::debug;

use crate::types::Computed;
use crate::types::ForecastMethod;
use crate::types::ForecastPoint;
use crate::types::PricePoint;
use crate::types::SentimentLabel;
use crate::types::UnavailableReason;

/// Window and adjustment parameters for the forecasters.
#[derive(Clone, Copy, Debug)]
pub struct ForecastConfig {
  /// Most recent price points fed into the regression.
  pub trend_window: usize,
  /// Minimum points required before fitting.
  pub min_points: usize,
  /// Most recent sentiment labels considered.
  pub sentiment_window: usize,
  /// Price tilt per unit of average sentiment.
  pub sentiment_tilt: f64,
}

impl Default for ForecastConfig {
  fn default() -> Self {
    Self {
      trend_window: 90,
      min_points: 7,
      sentiment_window: 10,
      sentiment_tilt: 0.05,
    }
  }
}

/// Forecast forward prices with the default configuration.
pub fn forecast_trend(prices: &[PricePoint], days_ahead: usize) -> Computed<Vec<ForecastPoint>> {
  forecast_trend_with(prices, days_ahead, &ForecastConfig::default())
}

/// Ordinary least squares trend forecast.
///
/// The most recent `trend_window` points are regressed oldest-first against
/// the integer time index. Confidence is `R²` clamped to `[0, 1]`; a flat
/// series has no variance to explain and reports zero. Forecast dates step
/// in calendar days from the last observed date, and predicted prices are
/// floored at zero.
pub fn forecast_trend_with(
  prices: &[PricePoint],
  days_ahead: usize,
  config: &ForecastConfig,
) -> Computed<Vec<ForecastPoint>> {
  let mut sorted: Vec<&PricePoint> = prices.iter().collect();
  sorted.sort_by_key(|p| p.date);

  let window_start = sorted.len().saturating_sub(config.trend_window);
  let window = &sorted[window_start..];
  let n = window.len();
  if n < config.min_points {
    return Computed::Unavailable(UnavailableReason::NotEnoughPricePoints {
      required: config.min_points,
      actual: n,
    });
  }

  let xs: Vec<f64> = (0..n).map(|i| i as f64).collect();
  let ys: Vec<f64> = window.iter().map(|p| p.close).collect();

  let (slope, intercept): (f64, f64) = match linear_regression(&xs, &ys) {
    Ok(fit) => fit,
    Err(_) => return Computed::Unavailable(UnavailableReason::DegenerateSeries),
  };

  let confidence = clamp_confidence(r_squared(&xs, &ys, slope, intercept));
  let last_date = window[n - 1].date;
  debug!(points = n, slope, confidence, "fitted price trend");

  let points = (1..=days_ahead)
    .map(|i| {
      let x = (n + i - 1) as f64;
      ForecastPoint {
        date: last_date + Duration::days(i as i64),
        predicted_price: (slope * x + intercept).max(0.0),
        confidence,
        method: ForecastMethod::Linear,
      }
    })
    .collect();

  Computed::Available(points)
}

/// Forecast with sentiment adjustment using the default configuration.
pub fn forecast_with_sentiment(
  prices: &[PricePoint],
  labels: &[SentimentLabel],
  days_ahead: usize,
) -> Computed<Vec<ForecastPoint>> {
  forecast_with_sentiment_config(prices, labels, days_ahead, &ForecastConfig::default())
}

/// Sentiment-adjusted trend forecast.
///
/// Averages up to `sentiment_window` most recent labels (supplied
/// newest-first) into a score in `[-1, 1]`, then tilts every trend forecast:
/// price scales by `1 + score · sentiment_tilt` (floored at zero) and
/// confidence by `0.8 + |score| · 0.2`, with a floor of `0.1`.
pub fn forecast_with_sentiment_config(
  prices: &[PricePoint],
  labels: &[SentimentLabel],
  days_ahead: usize,
  config: &ForecastConfig,
) -> Computed<Vec<ForecastPoint>> {
  if labels.is_empty() {
    return Computed::Unavailable(UnavailableReason::NoSentimentLabels);
  }

  let base = match forecast_trend_with(prices, days_ahead, config) {
    Computed::Available(points) => points,
    unavailable => return unavailable,
  };

  let recent = &labels[..labels.len().min(config.sentiment_window)];
  let avg: f64 = recent.iter().map(|l| l.score()).sum::<f64>() / recent.len() as f64;

  let adjusted = base
    .into_iter()
    .map(|p| ForecastPoint {
      date: p.date,
      predicted_price: (p.predicted_price * (1.0 + avg * config.sentiment_tilt)).max(0.0),
      confidence: (p.confidence * (0.8 + avg.abs() * 0.2)).max(0.1),
      method: ForecastMethod::SentimentWeighted,
    })
    .collect();

  Computed::Available(adjusted)
}

fn r_squared(xs: &[f64], ys: &[f64], slope: f64, intercept: f64) -> f64 {
  let n = ys.len();
  if n == 0 {
    return 0.0;
  }

  let mean_y: f64 = ys.iter().sum::<f64>() / n as f64;
  let ss_tot: f64 = ys.iter().map(|y| (y - mean_y).powi(2)).sum();
  if ss_tot < 1e-12 {
    return 0.0;
  }

  let ss_res: f64 = xs
    .iter()
    .zip(ys.iter())
    .map(|(&x, &y)| (y - (slope * x + intercept)).powi(2))
    .sum();

  1.0 - ss_res / ss_tot
}

fn clamp_confidence(r2: f64) -> f64 {
  if r2.is_finite() {
    r2.clamp(0.0, 1.0)
  } else {
    0.0
  }
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;
  use chrono::NaiveDate;

  use super::*;

  fn day(i: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, i).unwrap()
  }

  fn prices(closes: &[f64]) -> Vec<PricePoint> {
    closes
      .iter()
      .enumerate()
      .map(|(i, &c)| PricePoint::close_only(day(1 + i as u32), c))
      .collect()
  }

  const SCENARIO: [f64; 7] = [100.0, 102.0, 101.0, 105.0, 107.0, 106.0, 110.0];

  #[test]
  fn seven_point_scenario_matches_closed_form_ols() {
    // slope = 44/28, intercept = 731/7 - 3·slope, prediction at x = 7.
    let result = forecast_trend(&prices(&SCENARIO), 1);
    let points = result.into_option().unwrap();

    assert_eq!(points.len(), 1);
    let p = points[0];
    assert_eq!(p.date, day(8));
    assert_eq!(p.method, ForecastMethod::Linear);
    assert_abs_diff_eq!(p.predicted_price, 110.7143, epsilon = 1e-4);
    assert_abs_diff_eq!(p.confidence, 0.8897, epsilon = 1e-4);
  }

  #[test]
  fn fewer_than_seven_points_is_unavailable() {
    let result = forecast_trend(&prices(&[100.0, 101.0, 102.0]), 5);
    assert_eq!(
      result,
      Computed::Unavailable(UnavailableReason::NotEnoughPricePoints {
        required: 7,
        actual: 3
      })
    );
  }

  #[test]
  fn flat_series_forecasts_with_zero_confidence() {
    let result = forecast_trend(&prices(&[50.0; 10]), 2);
    let points = result.into_option().unwrap();

    assert_eq!(points.len(), 2);
    for p in points {
      assert!((p.predicted_price - 50.0).abs() < 1e-9);
      assert_eq!(p.confidence, 0.0);
    }
  }

  #[test]
  fn steep_downtrend_floors_prices_at_zero() {
    let closes: Vec<f64> = (0..10).map(|i| 90.0 - 10.0 * i as f64).collect();
    let points = forecast_trend(&prices(&closes), 3).into_option().unwrap();

    for p in points {
      assert!(p.predicted_price >= 0.0);
    }
  }

  #[test]
  fn window_keeps_only_the_most_recent_points() {
    // 12 points with a regime change; a window of 7 sees only the late flat leg.
    let closes = [1.0, 2.0, 3.0, 4.0, 5.0, 20.0, 20.0, 20.0, 20.0, 20.0, 20.0, 20.0];
    let config = ForecastConfig {
      trend_window: 7,
      ..ForecastConfig::default()
    };
    let points = forecast_trend_with(&prices(&closes), 1, &config)
      .into_option()
      .unwrap();

    assert!((points[0].predicted_price - 20.0).abs() < 1e-9);
  }

  #[test]
  fn positive_sentiment_lifts_price_and_keeps_confidence() {
    let labels = [SentimentLabel::Positive];
    let points = forecast_with_sentiment(&prices(&SCENARIO), &labels, 1)
      .into_option()
      .unwrap();

    let p = points[0];
    assert_eq!(p.method, ForecastMethod::SentimentWeighted);
    // avg = +1: price scales by 1.05, confidence multiplier is exactly 1.
    assert!((p.predicted_price - 110.714286 * 1.05).abs() < 1e-4);
    assert!((p.confidence - 0.8897).abs() < 1e-4);
  }

  #[test]
  fn mixed_sentiment_dampens_confidence_with_a_floor() {
    // One of each label: avg = 0, so confidence scales by 0.8.
    let labels = [
      SentimentLabel::Positive,
      SentimentLabel::Negative,
      SentimentLabel::Neutral,
    ];
    let points = forecast_with_sentiment(&prices(&SCENARIO), &labels, 1)
      .into_option()
      .unwrap();

    let p = points[0];
    assert!((p.predicted_price - 110.7143).abs() < 1e-4);
    assert!((p.confidence - 0.8897 * 0.8).abs() < 1e-4);
    assert!(p.confidence >= 0.1);
  }

  #[test]
  fn sentiment_without_labels_is_unavailable() {
    let result = forecast_with_sentiment(&prices(&SCENARIO), &[], 1);
    assert_eq!(
      result,
      Computed::Unavailable(UnavailableReason::NoSentimentLabels)
    );
  }

  #[test]
  fn sentiment_average_uses_at_most_ten_labels() {
    // Ten positives newest-first, then a tail of negatives that must be ignored.
    let mut labels = vec![SentimentLabel::Positive; 10];
    labels.extend(vec![SentimentLabel::Negative; 5]);

    let points = forecast_with_sentiment(&prices(&SCENARIO), &labels, 1)
      .into_option()
      .unwrap();
    assert!((points[0].predicted_price - 110.714286 * 1.05).abs() < 1e-4);
  }
}
