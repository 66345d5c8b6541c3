//! Deterministic backtest replay
//!
//! Reuses the live classify → evaluate → arbitrate pipeline over a historical
//! series with a synthetic clock. No wall-clock reads, no randomness:
//! identical inputs yield byte-identical serialized reports.

pub mod engine;
pub mod report;
pub mod trade;

pub use engine::{run_backtest, BacktestEngine};
pub use report::{BacktestReport, GroupStats};
pub use trade::{CloseReason, ClosedTrade, OpenTrade};
