//! Voltrix: adaptive signal generation and risk management
//!
//! Classifies market regimes, evaluates mutually exclusive strategies
//! (baseline trend, high-volatility suite, scheduled-news suite) through a
//! priority arbiter, maps every strategy to a deterministic risk policy, and
//! replays the same pipeline over historical data for backtesting.

pub mod arbiter;
pub mod backtest;
pub mod calendar;
pub mod common;
pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod models;
pub mod regime;
pub mod risk;
pub mod services;
pub mod strategies;

pub use arbiter::SignalArbiter;
pub use backtest::{run_backtest, BacktestEngine, BacktestReport};
pub use config::EngineConfig;
pub use error::EngineError;
pub use models::event::{EconomicEvent, EventKind, ImpactLevel, Phase};
pub use models::market::{PriceBar, Regime};
pub use models::risk::{RiskPolicy, Severity};
pub use models::signal::{Direction, Signal, StrategyKind};
pub use regime::classify_regime;
pub use risk::risk_policy;

use calendar::EconomicCalendar;

/// One-shot signal query with default configuration. Stateless: cooldown and
/// open-position tracking need a long-lived [`SignalArbiter`]. The clock is
/// the last bar's timestamp, keeping the call deterministic.
pub fn get_signal(
    symbol: &str,
    window: &[PriceBar],
    calendar: Option<&EconomicCalendar>,
) -> Result<Option<Signal>, EngineError> {
    let now = window
        .last()
        .map(|b| b.timestamp)
        .ok_or(EngineError::InsufficientData {
            required: regime::MIN_BARS,
            actual: 0,
        })?;
    SignalArbiter::new(EngineConfig::default()).get_signal(symbol, window, now, calendar)
}
