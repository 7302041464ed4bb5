//! # Market Comparison
//!
//! $$
//! R_{\text{period}}=\frac{P_{\text{now}}-P_{\text{then}}}{P_{\text{then}}}
//! $$
//!
//! Trailing simple (non-compounded) return of a company against tracked
//! market indices.

use crate::types::Computed;
use crate::types::PricePoint;
use crate::types::UnavailableReason;

/// Result of comparing a company's trailing return against tracked indices.
#[derive(Clone, Debug, PartialEq)]
pub struct MarketComparison {
  /// Company simple return over the window.
  pub company_return: f64,
  /// Per-index simple return over the window, in input order.
  pub index_returns: Vec<(String, f64)>,
  /// Indices the company beat (index return strictly below the company's).
  pub outperformed: Vec<String>,
  /// Indices that beat the company (index return strictly above).
  pub underperformed: Vec<String>,
}

/// Simple return over a newest-first window of at most `days_back + 1`
/// points. `None` when fewer than two points are available; zero when the
/// oldest close cannot serve as a divisor.
fn period_return(prices: &[PricePoint], days_back: usize) -> Option<f64> {
  let window = &prices[..prices.len().min(days_back + 1)];
  if window.len() < 2 {
    return None;
  }

  let newest = window[0].close;
  let oldest = window[window.len() - 1].close;
  if !oldest.is_finite() || oldest == 0.0 {
    return Some(0.0);
  }

  Some((newest - oldest) / oldest)
}

/// Compare a company's trailing return against each tracked index.
///
/// Price slices are newest-first. A company with fewer than two points
/// yields [`Computed::Unavailable`]; an index with fewer than two points has
/// its return recorded as zero and still participates in the comparison.
/// Out/underperformance uses strict inequality, so ties count as neither.
pub fn compare_to_market(
  company: &[PricePoint],
  indices: &[(String, Vec<PricePoint>)],
  days_back: usize,
) -> Computed<MarketComparison> {
  let company_return = match period_return(company, days_back) {
    Some(r) => r,
    None => {
      return Computed::Unavailable(UnavailableReason::NotEnoughPricePoints {
        required: 2,
        actual: company.len(),
      })
    }
  };

  let index_returns: Vec<(String, f64)> = indices
    .iter()
    .map(|(symbol, prices)| {
      (
        symbol.clone(),
        period_return(prices, days_back).unwrap_or(0.0),
      )
    })
    .collect();

  let outperformed = index_returns
    .iter()
    .filter(|(_, r)| *r < company_return)
    .map(|(s, _)| s.clone())
    .collect();
  let underperformed = index_returns
    .iter()
    .filter(|(_, r)| *r > company_return)
    .map(|(s, _)| s.clone())
    .collect();

  Computed::Available(MarketComparison {
    company_return,
    index_returns,
    outperformed,
    underperformed,
  })
}
