//! # Portfolio Moments
//!
//! $$
//! \mathbb E[R_p]=\mathbf w^\top\mu,\qquad \sigma_p^2=\mathbf w^\top\Sigma\mathbf w
//! $$
//!
//! Expected return, variance, volatility and Sharpe ratio for one weight
//! vector over a fixed asset ordering.

use crate::types::PortfolioMoments;

fn dot(a: &[f64], b: &[f64]) -> f64 {
  a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Normalize raw weights to sum to one.
///
/// A zero (or numerically vanishing) raw sum falls back to equal weights
/// across the assets.
pub fn normalize_weights(raw: &[f64]) -> Vec<f64> {
  let n = raw.len();
  if n == 0 {
    return Vec::new();
  }

  let total: f64 = raw.iter().sum();
  if !total.is_finite() || total.abs() < 1e-12 {
    vec![1.0 / n as f64; n]
  } else {
    raw.iter().map(|&w| w / total).collect()
  }
}

/// Compute portfolio moments for a raw weight vector.
///
/// Weights are normalized first. Variance is clamped at zero to absorb
/// floating-point cancellation in `wᵀΣw`. The Sharpe ratio divides expected
/// return by volatility with no risk-free rate subtracted; callers that
/// need an excess-return Sharpe must adjust the mean returns themselves.
pub fn portfolio_moments(
  raw_weights: &[f64],
  mean_returns: &[f64],
  cov: &[Vec<f64>],
) -> PortfolioMoments {
  let w = normalize_weights(raw_weights);
  let n = w.len();

  let expected_return = dot(&w, mean_returns);

  let mut variance = 0.0;
  for i in 0..n {
    for j in 0..n {
      let c = cov
        .get(i)
        .and_then(|row| row.get(j))
        .copied()
        .unwrap_or(0.0);
      variance += w[i] * w[j] * c;
    }
  }
  let variance = variance.max(0.0);

  let volatility = variance.sqrt();
  let sharpe_ratio = if volatility > 0.0 {
    expected_return / volatility
  } else {
    0.0
  };

  PortfolioMoments {
    expected_return,
    variance,
    volatility,
    sharpe_ratio,
  }
}
