//! Strategy arbitration
//!
//! The arbiter owns ordering and first-match selection, nothing else. It
//! queries evaluators in fixed priority (news, then the volatility suite,
//! then baseline) and returns the first signal, so no two strategies ever
//! trade the same instant. It also enforces the per-symbol cooldown and the
//! one-open-position rule.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::calendar::EconomicCalendar;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::models::market::{window_tail, PriceBar};
use crate::models::signal::Signal;
use crate::regime::classify_regime;
use crate::strategies::baseline::BaselineTrend;
use crate::strategies::news::NewsEventSuite;
use crate::strategies::volatility::{BreakoutFade, MeanReversion, RangeTrade, SqueezeBreakout};
use crate::strategies::{EvalContext, StrategyEvaluator};

pub struct SignalArbiter {
    config: EngineConfig,
    evaluators: Vec<Box<dyn StrategyEvaluator>>,
    last_signal_at: HashMap<String, DateTime<Utc>>,
    open_symbols: HashSet<String>,
}

impl SignalArbiter {
    /// Build the evaluator chain from configuration. Family switches are
    /// per-instance; there are no process-wide toggles.
    pub fn new(config: EngineConfig) -> Self {
        let mut evaluators: Vec<Box<dyn StrategyEvaluator>> = Vec::new();
        if config.enable_news {
            evaluators.push(Box::new(NewsEventSuite));
        }
        if config.enable_volatility {
            evaluators.push(Box::new(MeanReversion));
            evaluators.push(Box::new(BreakoutFade));
            evaluators.push(Box::new(RangeTrade));
            evaluators.push(Box::new(SqueezeBreakout));
        }
        if config.enable_baseline {
            evaluators.push(Box::new(BaselineTrend));
        }

        Self {
            config,
            evaluators,
            last_signal_at: HashMap::new(),
            open_symbols: HashSet::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolve at most one actionable signal for the symbol at `now`.
    ///
    /// Returns `Ok(None)` when nothing fires, the symbol is cooling down, or
    /// a position is already open; none of those are errors.
    pub fn get_signal(
        &mut self,
        symbol: &str,
        window: &[PriceBar],
        now: DateTime<Utc>,
        calendar: Option<&EconomicCalendar>,
    ) -> Result<Option<Signal>, EngineError> {
        if window.len() < self.config.min_bars {
            return Err(EngineError::InsufficientData {
                required: self.config.min_bars,
                actual: window.len(),
            });
        }

        if self.open_symbols.contains(symbol) {
            return Ok(None);
        }
        if let Some(last) = self.last_signal_at.get(symbol) {
            if now - *last < Duration::minutes(self.config.cooldown_minutes) {
                return Ok(None);
            }
        }

        let window = window_tail(window, self.config.window_cap);
        let regime = classify_regime(window)?;
        let ctx = EvalContext {
            symbol,
            window,
            regime,
            now,
            calendar,
        };

        for evaluator in &self.evaluators {
            let Some(signal) = evaluator.evaluate(&ctx) else {
                continue;
            };
            if let Some(floor) = self.config.confidence_floor {
                if signal.confidence < floor {
                    debug!(
                        evaluator = evaluator.name(),
                        confidence = signal.confidence,
                        floor,
                        "signal below confidence floor, continuing"
                    );
                    continue;
                }
            }

            debug!(
                symbol,
                evaluator = evaluator.name(),
                strategy = signal.strategy.label(),
                regime = regime.label(),
                confidence = signal.confidence,
                "signal selected"
            );
            self.last_signal_at.insert(symbol.to_string(), now);
            return Ok(Some(signal));
        }

        Ok(None)
    }

    /// Register an opened position. Further signals for the symbol are
    /// suppressed until `mark_closed`.
    pub fn mark_open(&mut self, symbol: &str) {
        self.open_symbols.insert(symbol.to_string());
    }

    pub fn mark_closed(&mut self, symbol: &str) {
        self.open_symbols.remove(symbol);
    }

    pub fn has_open_position(&self, symbol: &str) -> bool {
        self.open_symbols.contains(symbol)
    }
}
