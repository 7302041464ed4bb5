//! # Analytics Engine
//!
//! $$
//! \text{prices, weights, sentiment}\to\text{frontier, forecasts, comparison}
//! $$
//!
//! Single entry-point facade over the analytics components. The engine owns
//! no state beyond its configuration and performs no I/O; callers fetch all
//! inputs up front and consume the returned values.

use rand::Rng;

use crate::error::OptimizeError;
use crate::forecast::forecast_trend_with;
use crate::forecast::forecast_with_sentiment_config;
use crate::forecast::ForecastConfig;
use crate::frontier::equal_weights;
use crate::frontier::sample_frontier_with;
use crate::frontier::FrontierConfig;
use crate::market::compare_to_market;
use crate::market::MarketComparison;
use crate::types::Computed;
use crate::types::ForecastPoint;
use crate::types::Holding;
use crate::types::OptimizationResult;
use crate::types::PricePoint;
use crate::types::SentimentLabel;

/// Runtime configuration for [`AnalyticsEngine`].
#[derive(Clone, Copy, Debug, Default)]
pub struct AnalyticsConfig {
  /// Frontier sampling parameters.
  pub frontier: FrontierConfig,
  /// Forecast window and adjustment parameters.
  pub forecast: ForecastConfig,
}

/// Facade bundling the optimizer, forecasters and market comparator behind
/// one configuration.
#[derive(Clone, Debug, Default)]
pub struct AnalyticsEngine {
  config: AnalyticsConfig,
}

impl AnalyticsEngine {
  /// Construct an engine with explicit configuration.
  pub fn new(config: AnalyticsConfig) -> Self {
    Self { config }
  }

  /// Borrow the engine configuration.
  pub fn config(&self) -> &AnalyticsConfig {
    &self.config
  }

  /// Sample the efficient frontier using the system random source.
  pub fn optimize(&self, holdings: &[Holding]) -> Result<OptimizationResult, OptimizeError> {
    self.optimize_with_rng(holdings, &mut rand::thread_rng())
  }

  /// Sample the efficient frontier with an injected random source; tests
  /// pass a seeded generator for deterministic output.
  pub fn optimize_with_rng<R: Rng + ?Sized>(
    &self,
    holdings: &[Holding],
    rng: &mut R,
  ) -> Result<OptimizationResult, OptimizeError> {
    sample_frontier_with(holdings, &self.config.frontier, rng)
  }

  /// Equal-split weights over the holdings; `None` for an empty portfolio.
  pub fn equal_weights(
    &self,
    holdings: &[Holding],
  ) -> Option<std::collections::HashMap<String, f64>> {
    equal_weights(holdings)
  }

  /// Least squares trend forecast over the configured window.
  pub fn forecast_trend(
    &self,
    prices: &[PricePoint],
    days_ahead: usize,
  ) -> Computed<Vec<ForecastPoint>> {
    forecast_trend_with(prices, days_ahead, &self.config.forecast)
  }

  /// Sentiment-adjusted trend forecast.
  pub fn forecast_with_sentiment(
    &self,
    prices: &[PricePoint],
    labels: &[SentimentLabel],
    days_ahead: usize,
  ) -> Computed<Vec<ForecastPoint>> {
    forecast_with_sentiment_config(prices, labels, days_ahead, &self.config.forecast)
  }

  /// Trailing-return comparison of a company against tracked indices.
  pub fn compare_to_market(
    &self,
    company: &[PricePoint],
    indices: &[(String, Vec<PricePoint>)],
    days_back: usize,
  ) -> Computed<MarketComparison> {
    compare_to_market(company, indices, days_back)
  }
}
