//! Signal detection, backtesting, scoring and aggregation.

pub mod aggregation;
pub mod backtest;
pub mod crossover;
pub mod evaluator;
pub mod scoring;

pub use aggregation::*;
pub use backtest::*;
pub use crossover::*;
pub use evaluator::*;
pub use scoring::*;
