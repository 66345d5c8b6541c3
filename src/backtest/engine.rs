//! Bar-by-bar replay engine

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info};

use crate::arbiter::SignalArbiter;
use crate::backtest::report::BacktestReport;
use crate::backtest::trade::{CloseReason, ClosedTrade, OpenTrade};
use crate::calendar::EconomicCalendar;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::models::event::EconomicEvent;
use crate::models::market::PriceBar;
use crate::models::risk::Severity;
use crate::regime::classify_regime;
use crate::risk::risk_policy;

/// Run one replay with default engine construction.
pub fn run_backtest(
    symbol: &str,
    bars: &[PriceBar],
    events: Vec<EconomicEvent>,
    initial_balance: f64,
    config: &EngineConfig,
) -> Result<BacktestReport, EngineError> {
    BacktestEngine::new(config.clone()).run(symbol, bars, events, initial_balance)
}

/// Drives the live pipeline over a historical series with a synthetic clock.
/// Sequential along one symbol's timeline; independent runs share nothing and
/// parallelize freely.
pub struct BacktestEngine {
    config: EngineConfig,
    cancel: Arc<AtomicBool>,
}

impl BacktestEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Handle for cooperative cancellation; checked between simulated steps.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    pub fn run(
        &self,
        symbol: &str,
        bars: &[PriceBar],
        events: Vec<EconomicEvent>,
        initial_balance: f64,
    ) -> Result<BacktestReport, EngineError> {
        validate_series(bars)?;

        let calendar = EconomicCalendar::new(events);
        let mut arbiter = SignalArbiter::new(self.config.clone());

        let mut balance = initial_balance;
        let mut peak = initial_balance;
        let mut max_drawdown_pct = 0.0f64;
        let mut open: Option<OpenTrade> = None;
        let mut closed: Vec<ClosedTrade> = Vec::new();

        let mut settle = |trade: ClosedTrade,
                          balance: &mut f64,
                          peak: &mut f64,
                          max_dd: &mut f64,
                          arbiter: &mut SignalArbiter| {
            *balance += trade.pnl;
            if *balance > *peak {
                *peak = *balance;
            } else if *peak > 0.0 {
                let drawdown = (*peak - *balance) / *peak * 100.0;
                if drawdown > *max_dd {
                    *max_dd = drawdown;
                }
            }
            arbiter.mark_closed(&trade.symbol);
            debug!(
                strategy = trade.strategy.label(),
                pnl = trade.pnl,
                reason = ?trade.reason,
                "trade closed"
            );
            closed.push(trade);
        };

        for i in self.config.min_bars..bars.len() {
            if self.cancel.load(Ordering::Relaxed) {
                info!(symbol, step = i, "backtest cancelled");
                break;
            }
            let bar = &bars[i];

            // Manage exits before considering new entries on the same bar.
            if let Some(trade) = open.as_mut() {
                if let Some(done) = trade.manage(bar) {
                    settle(
                        done,
                        &mut balance,
                        &mut peak,
                        &mut max_drawdown_pct,
                        &mut arbiter,
                    );
                    open = None;
                }
            }

            if open.is_some() {
                continue;
            }

            let start = (i + 1).saturating_sub(self.config.window_cap);
            let window = &bars[start..=i];
            let Some(signal) = arbiter.get_signal(symbol, window, bar.timestamp, Some(&calendar))?
            else {
                continue;
            };

            let severity = match &signal.event {
                Some(event) => Severity::from(event.impact),
                None => Severity::from(classify_regime(window)?),
            };
            let policy = risk_policy(signal.strategy, severity)?;
            let stop_distance = signal.stop_distance();
            if stop_distance <= 0.0 {
                continue;
            }
            let quantity = balance * policy.size_fraction / stop_distance;
            let trailing_activation = policy.trailing_activation_r * stop_distance;
            debug!(
                strategy = signal.strategy.label(),
                entry = signal.entry,
                stop = signal.stop,
                quantity,
                "trade opened"
            );
            open = Some(OpenTrade::open(&signal, quantity, trailing_activation));
            arbiter.mark_open(symbol);
        }

        if let (Some(mut trade), Some(last)) = (open.take(), bars.last()) {
            let done = trade.close(last.close, last.timestamp, CloseReason::EndOfData);
            settle(
                done,
                &mut balance,
                &mut peak,
                &mut max_drawdown_pct,
                &mut arbiter,
            );
        }

        info!(
            symbol,
            trades = closed.len(),
            final_balance = balance,
            "backtest complete"
        );
        Ok(BacktestReport::assemble(
            symbol,
            initial_balance,
            balance,
            max_drawdown_pct,
            closed,
        ))
    }
}

/// Reject malformed input up front; replay never silently skips records.
fn validate_series(bars: &[PriceBar]) -> Result<(), EngineError> {
    for (index, bar) in bars.iter().enumerate() {
        if !bar.is_finite() {
            return Err(EngineError::MalformedSeries {
                index,
                reason: "non-finite price field".to_string(),
            });
        }
        if bar.high < bar.low {
            return Err(EngineError::MalformedSeries {
                index,
                reason: "high below low".to_string(),
            });
        }
        if index > 0 && bar.timestamp < bars[index - 1].timestamp {
            return Err(EngineError::MalformedSeries {
                index,
                reason: "non-monotonic timestamp".to_string(),
            });
        }
    }
    Ok(())
}
