//! # Errors
//!
//! $$
//! \text{inputs}\to\text{typed failure}\ \cup\ \text{result}
//! $$
//!
//! Failure taxonomy for the optimization surface. Forecasting and market
//! comparison never raise; they return
//! [`Computed::Unavailable`](crate::types::Computed) instead, because their
//! output feeds dashboards where availability beats strictness. The frontier
//! sampler is the one component allowed to fail loudly: its output becomes a
//! persisted, user-visible artifact.

use thiserror::Error;

/// Errors raised by the efficient frontier sampler.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum OptimizeError {
  /// A frontier needs at least two holdings to trade off against each other.
  #[error("portfolio must contain at least {required} holdings, found {actual}")]
  InsufficientHoldings { required: usize, actual: usize },

  /// One or more assets lack the price history required for sampling; every
  /// offending symbol is named.
  #[error("insufficient price history for: {}", .symbols.join(", "))]
  InsufficientHistory { symbols: Vec<String> },

  /// A holding carries a weight that is NaN or infinite.
  #[error("holding {symbol} has a non-finite weight")]
  NonFiniteWeight { symbol: String },

  /// No sampled allocation produced finite risk and return. Expected only on
  /// malformed input.
  #[error("no sampled allocation produced finite risk and return")]
  EmptyFrontier,
}

impl OptimizeError {
  /// True for failures the caller cannot correct by fixing inputs; calling
  /// layers map these to 5xx-class responses and the rest to 4xx.
  pub fn is_internal(&self) -> bool {
    matches!(self, Self::EmptyFrontier)
  }
}
