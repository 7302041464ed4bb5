//! # Types
//!
//! $$
//! r_t=\frac{P_t-P_{t-1}}{P_{t-1}}
//! $$
//!
//! Shared input and result containers for the analytics engine.

use std::collections::HashMap;
use std::fmt::Display;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;

/// One daily bar of an asset's price history.
///
/// Arrival order is not guaranteed; consumers sort ascending by date before
/// processing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PricePoint {
  /// Trading date of the bar.
  pub date: NaiveDate,
  /// Closing price.
  pub close: f64,
  /// Opening price, when the feed supplies it.
  pub open: Option<f64>,
  /// Session high.
  pub high: Option<f64>,
  /// Session low.
  pub low: Option<f64>,
  /// Traded volume.
  pub volume: Option<f64>,
}

impl PricePoint {
  /// Build a close-only point; the remaining bar fields stay unset.
  pub fn close_only(date: NaiveDate, close: f64) -> Self {
    Self {
      date,
      close,
      open: None,
      high: None,
      low: None,
      volume: None,
    }
  }
}

/// One portfolio position: an asset symbol, its raw (unnormalized) weight
/// and its price history.
#[derive(Clone, Debug)]
pub struct Holding {
  /// Asset identifier.
  pub symbol: String,
  /// Raw weight; normalization happens at consumption time.
  pub weight: f64,
  /// Daily price history for the asset.
  pub prices: Vec<PricePoint>,
}

/// Sentiment classification label supplied by an external classifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SentimentLabel {
  Positive,
  Negative,
  Neutral,
}

impl SentimentLabel {
  /// Parse a label from a classifier string, defaulting to neutral.
  pub fn from_str(s: &str) -> Self {
    match s.to_lowercase().as_str() {
      "positive" | "pos" | "bullish" => Self::Positive,
      "negative" | "neg" | "bearish" => Self::Negative,
      _ => Self::Neutral,
    }
  }

  /// Numeric score used for averaging: +1, -1 or 0.
  pub fn score(self) -> f64 {
    match self {
      Self::Positive => 1.0,
      Self::Negative => -1.0,
      Self::Neutral => 0.0,
    }
  }
}

/// Forecasting method that produced a [`ForecastPoint`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForecastMethod {
  /// Plain least squares trend extrapolation.
  Linear,
  /// Trend extrapolation tilted by recent sentiment.
  SentimentWeighted,
}

impl Display for ForecastMethod {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ForecastMethod::Linear => write!(f, "linear"),
      ForecastMethod::SentimentWeighted => write!(f, "sentimentWeighted"),
    }
  }
}

/// One forecasted price for a future calendar date.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForecastPoint {
  /// Forecast date.
  pub date: NaiveDate,
  /// Predicted closing price, floored at zero.
  pub predicted_price: f64,
  /// Model confidence in `[0, 1]`.
  pub confidence: f64,
  /// Method that produced the point.
  pub method: ForecastMethod,
}

/// Risk/return statistics of one weight vector.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PortfolioMoments {
  /// Expected portfolio return `w·μ`.
  pub expected_return: f64,
  /// Portfolio variance `wᵀΣw`, clamped to be non-negative.
  pub variance: f64,
  /// Portfolio volatility `sqrt(variance)`.
  pub volatility: f64,
  /// Sharpe ratio `μ_p/σ_p`; no risk-free rate is subtracted.
  pub sharpe_ratio: f64,
}

/// One retained Pareto-efficient sample on the frontier.
#[derive(Clone, Debug, PartialEq)]
pub struct FrontierPoint {
  /// Portfolio volatility of the sample.
  pub risk: f64,
  /// Expected portfolio return of the sample.
  pub expected_return: f64,
  /// Normalized weight per asset symbol.
  pub weights: HashMap<String, f64>,
}

/// Output of one efficient frontier sampling run.
///
/// Persistence collaborators store one result per portfolio and replace it
/// on each run.
#[derive(Clone, Debug)]
pub struct OptimizationResult {
  /// Weights of the candidate maximizing return over risk.
  pub max_sharpe_weights: HashMap<String, f64>,
  /// Weights of the candidate with the smallest risk.
  pub min_variance_weights: HashMap<String, f64>,
  /// Retained frontier, ascending by risk, at most 40 points.
  pub efficient_frontier: Vec<FrontierPoint>,
  /// Wall-clock time of the run.
  pub calculated_at: DateTime<Utc>,
}

/// Outcome of a best-effort computation that degrades instead of raising.
///
/// Distinguishes a genuinely empty result from one that could not be
/// computed at all, so callers never have to guess what an empty sequence
/// means.
#[derive(Clone, Debug, PartialEq)]
pub enum Computed<T> {
  /// The computation ran and produced a value.
  Available(T),
  /// The computation could not run on the supplied inputs.
  Unavailable(UnavailableReason),
}

impl<T> Computed<T> {
  /// True when a value is present.
  pub fn is_available(&self) -> bool {
    matches!(self, Computed::Available(_))
  }

  /// Borrow the value, if any.
  pub fn as_available(&self) -> Option<&T> {
    match self {
      Computed::Available(value) => Some(value),
      Computed::Unavailable(_) => None,
    }
  }

  /// Consume into an [`Option`], dropping the reason.
  pub fn into_option(self) -> Option<T> {
    match self {
      Computed::Available(value) => Some(value),
      Computed::Unavailable(_) => None,
    }
  }
}

/// Why a best-effort computation declined to produce a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnavailableReason {
  /// The price history is shorter than the method requires.
  NotEnoughPricePoints { required: usize, actual: usize },
  /// Sentiment adjustment needs at least one label.
  NoSentimentLabels,
  /// The series was numerically unusable for regression.
  DegenerateSeries,
}

impl Display for UnavailableReason {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      UnavailableReason::NotEnoughPricePoints { required, actual } => {
        write!(f, "needs at least {required} price points, found {actual}")
      }
      UnavailableReason::NoSentimentLabels => write!(f, "no sentiment labels supplied"),
      UnavailableReason::DegenerateSeries => write!(f, "series is numerically degenerate"),
    }
  }
}
