//! # Efficient Frontier
//!
//! $$
//! \mathbf w^\*=\arg\max_{\mathbf w}\ \frac{\mathbb E[R_p]}{\sigma_p}
//! $$
//!
//! Monte Carlo weight sampling, epsilon-tolerant Pareto boundary extraction
//! and max-Sharpe/min-variance selection, plus the trivial equal-split
//! allocator.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::Utc;
use rand::Rng;
use rand_distr::Distribution;
use rand_distr::Uniform;
use tracing::debug;

use crate::covariance::covariance_matrix;
use crate::error::OptimizeError;
use crate::moments::normalize_weights;
use crate::moments::portfolio_moments;
use crate::returns::build_return_series;
use crate::types::FrontierPoint;
use crate::types::Holding;
use crate::types::OptimizationResult;

/// Sampling and extraction parameters for [`sample_frontier`].
#[derive(Clone, Copy, Debug)]
pub struct FrontierConfig {
  /// Minimum sorted price points each asset must contribute.
  pub min_price_points: usize,
  /// Minimum daily return observations each asset must contribute.
  pub min_return_observations: usize,
  /// Hard cap on random weight vectors per run.
  pub max_samples: usize,
  /// Random weight vectors drawn per asset, before the cap.
  pub samples_per_asset: usize,
  /// Maximum number of retained frontier points.
  pub frontier_cap: usize,
  /// Return tolerance of the Pareto sweep.
  pub frontier_epsilon: f64,
}

impl Default for FrontierConfig {
  fn default() -> Self {
    Self {
      min_price_points: 45,
      min_return_observations: 30,
      max_samples: 500,
      samples_per_asset: 160,
      frontier_cap: 40,
      frontier_epsilon: 1e-4,
    }
  }
}

/// Minimum holdings a portfolio needs before a frontier exists.
pub const MIN_HOLDINGS: usize = 2;

struct Candidate {
  weights: Vec<f64>,
  risk: f64,
  ret: f64,
}

impl Candidate {
  fn is_finite(&self) -> bool {
    self.risk.is_finite() && self.ret.is_finite()
  }

  /// Selection score: return over risk, raw return at zero risk.
  fn sharpe_score(&self) -> f64 {
    if self.risk > 0.0 {
      self.ret / self.risk
    } else {
      self.ret
    }
  }
}

fn evaluate(raw: &[f64], mean_returns: &[f64], cov: &[Vec<f64>]) -> Candidate {
  let weights = normalize_weights(raw);
  let moments = portfolio_moments(&weights, mean_returns, cov);
  Candidate {
    weights,
    risk: moments.volatility,
    ret: moments.expected_return,
  }
}

fn weight_map(holdings: &[Holding], weights: &[f64]) -> HashMap<String, f64> {
  holdings
    .iter()
    .zip(weights.iter())
    .map(|(h, &w)| (h.symbol.clone(), w))
    .collect()
}

/// Sample the efficient frontier for a portfolio with the default
/// configuration (see [`FrontierConfig`]).
pub fn sample_frontier<R: Rng + ?Sized>(
  holdings: &[Holding],
  rng: &mut R,
) -> Result<OptimizationResult, OptimizeError> {
  sample_frontier_with(holdings, &FrontierConfig::default(), rng)
}

/// Sample the efficient frontier for a portfolio.
///
/// The candidate pool is the portfolio's own normalized weights (when their
/// raw sum is positive) plus `min(max_samples, assets · samples_per_asset)`
/// random vectors. Each random vector draws one uniform(0,1) value per asset
/// and rescales the draw to sum to one. That is deliberately *not* a uniform
/// sample over the weight simplex; the corner bias of rescale-after-draw is
/// load-bearing for the frontier shape and must not be replaced by a
/// Dirichlet draw.
///
/// The covariance matrix is estimated once per call and shared by every
/// candidate evaluation, keeping the run at `O(samples · assets²)`.
///
/// Randomness is injected through `rng`, so tests pass a seeded generator
/// and production callers can hand over `rand::thread_rng()`.
pub fn sample_frontier_with<R: Rng + ?Sized>(
  holdings: &[Holding],
  config: &FrontierConfig,
  rng: &mut R,
) -> Result<OptimizationResult, OptimizeError> {
  if holdings.len() < MIN_HOLDINGS {
    return Err(OptimizeError::InsufficientHoldings {
      required: MIN_HOLDINGS,
      actual: holdings.len(),
    });
  }

  if let Some(bad) = holdings.iter().find(|h| !h.weight.is_finite()) {
    return Err(OptimizeError::NonFiniteWeight {
      symbol: bad.symbol.clone(),
    });
  }

  let mut series = Vec::with_capacity(holdings.len());
  let mut short_history = Vec::new();
  for holding in holdings {
    let s = build_return_series(&holding.symbol, &holding.prices);
    if holding.prices.len() < config.min_price_points || s.len() < config.min_return_observations {
      short_history.push(holding.symbol.clone());
    }
    series.push(s);
  }
  if !short_history.is_empty() {
    return Err(OptimizeError::InsufficientHistory {
      symbols: short_history,
    });
  }

  let mean_returns: Vec<f64> = series.iter().map(|s| s.mean()).collect();
  let cov = covariance_matrix(&series);

  let n = holdings.len();
  let sample_count = config.max_samples.min(n * config.samples_per_asset);
  let mut candidates = Vec::with_capacity(sample_count + 1);

  let current: Vec<f64> = holdings.iter().map(|h| h.weight).collect();
  if current.iter().sum::<f64>() > 0.0 {
    candidates.push(evaluate(&current, &mean_returns, &cov));
  }

  let unit = Uniform::new(0.0, 1.0);
  for _ in 0..sample_count {
    let draw: Vec<f64> = (0..n).map(|_| unit.sample(rng)).collect();
    candidates.push(evaluate(&draw, &mean_returns, &cov));
  }

  let finite: Vec<&Candidate> = candidates.iter().filter(|c| c.is_finite()).collect();
  if finite.is_empty() {
    return Err(OptimizeError::EmptyFrontier);
  }

  // Selection runs over the full finite pool, not just the retained frontier.
  let max_sharpe = finite
    .iter()
    .max_by(|a, b| {
      a.sharpe_score()
        .partial_cmp(&b.sharpe_score())
        .unwrap_or(Ordering::Equal)
    })
    .map(|c| weight_map(holdings, &c.weights))
    .unwrap_or_default();

  let min_variance = finite
    .iter()
    .min_by(|a, b| a.risk.partial_cmp(&b.risk).unwrap_or(Ordering::Equal))
    .map(|c| weight_map(holdings, &c.weights))
    .unwrap_or_default();

  let mut by_risk = finite;
  by_risk.sort_by(|a, b| a.risk.partial_cmp(&b.risk).unwrap_or(Ordering::Equal));

  let mut frontier = Vec::new();
  let mut best_return = f64::NEG_INFINITY;
  for candidate in by_risk {
    if candidate.ret >= best_return - config.frontier_epsilon {
      frontier.push(FrontierPoint {
        risk: candidate.risk,
        expected_return: candidate.ret,
        weights: weight_map(holdings, &candidate.weights),
      });
      best_return = best_return.max(candidate.ret);
    }
    if frontier.len() == config.frontier_cap {
      break;
    }
  }

  debug!(
    assets = n,
    candidates = candidates.len(),
    retained = frontier.len(),
    "sampled efficient frontier"
  );

  Ok(OptimizationResult {
    max_sharpe_weights: max_sharpe,
    min_variance_weights: min_variance,
    efficient_frontier: frontier,
    calculated_at: Utc::now(),
  })
}

/// Assign every holding the same weight, rounded to four decimals.
///
/// Returns `None` for an empty portfolio. Idempotent: reapplying to an
/// already equal-weighted portfolio reproduces the same weights.
pub fn equal_weights(holdings: &[Holding]) -> Option<HashMap<String, f64>> {
  if holdings.is_empty() {
    return None;
  }

  let w = round4(1.0 / holdings.len() as f64);
  Some(
    holdings
      .iter()
      .map(|h| (h.symbol.clone(), w))
      .collect(),
  )
}

fn round4(x: f64) -> f64 {
  (x * 10_000.0).round() / 10_000.0
}
