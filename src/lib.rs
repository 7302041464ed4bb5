//! # Quantfolio
//!
//! $$
//! \max_{\mathbf w}\ \frac{\mathbb E[R_p]}{\sigma_p}\quad\text{s.t.}\quad \sum_i w_i=1
//! $$
//!
//! Portfolio analytics and optimization engine: daily return construction,
//! date-aligned covariance estimation, Monte Carlo efficient frontier
//! sampling with max-Sharpe/min-variance selection, and regression based
//! price forecasts (plain and sentiment-adjusted).
//!
//! The crate is a pure, synchronous library: it performs no I/O and assumes
//! callers supply already-fetched price histories, holding weights and
//! sentiment labels, then persist or present the results themselves.

pub mod covariance;
pub mod engine;
pub mod error;
pub mod forecast;
pub mod frontier;
pub mod market;
pub mod moments;
pub mod returns;
pub mod types;

pub use covariance::covariance_matrix;
pub use covariance::pair_covariance;
pub use engine::AnalyticsConfig;
pub use engine::AnalyticsEngine;
pub use error::OptimizeError;
pub use forecast::forecast_trend;
pub use forecast::forecast_with_sentiment;
pub use forecast::ForecastConfig;
pub use frontier::equal_weights;
pub use frontier::sample_frontier;
pub use frontier::FrontierConfig;
pub use market::compare_to_market;
pub use market::MarketComparison;
pub use moments::normalize_weights;
pub use moments::portfolio_moments;
pub use returns::build_return_series;
pub use returns::ReturnObservation;
pub use returns::ReturnSeries;
pub use types::Computed;
pub use types::ForecastMethod;
pub use types::ForecastPoint;
pub use types::FrontierPoint;
pub use types::Holding;
pub use types::OptimizationResult;
pub use types::PortfolioMoments;
pub use types::PricePoint;
pub use types::SentimentLabel;
pub use types::UnavailableReason;
