//! Baseline trend-following strategy
//!
//! Fires only in Low/Normal regimes. Requires strict trend and momentum
//! confluence across several independent confirmations before committing.

use crate::indicators::momentum::rsi::calculate_rsi_default;
use crate::indicators::trend::ema::calculate_ema_pair;
use crate::indicators::volatility::atr::calculate_atr_default;
use crate::models::market::Regime;
use crate::models::risk::Severity;
use crate::models::signal::{Direction, Signal, StrategyKind};
use crate::strategies::confirmation::ConfirmationSet;
use crate::strategies::{build_signal, EvalContext, StrategyEvaluator};

const EMA_FAST: u32 = 20;
const EMA_SLOW: u32 = 50;
const MOMENTUM_LOOKBACK: usize = 10;
const REQUIRED_CONFIRMATIONS: usize = 3;

pub struct BaselineTrend;

impl StrategyEvaluator for BaselineTrend {
    fn name(&self) -> &'static str {
        "baseline_trend"
    }

    fn evaluate(&self, ctx: &EvalContext<'_>) -> Option<Signal> {
        if !matches!(ctx.regime, Regime::Low | Regime::Normal) {
            return None;
        }
        if ctx.window.len() <= MOMENTUM_LOOKBACK {
            return None;
        }

        let (fast, slow) = calculate_ema_pair(ctx.window, EMA_FAST, EMA_SLOW)?;
        let rsi = calculate_rsi_default(ctx.window)?;
        let atr = calculate_atr_default(ctx.window)?;

        let close = ctx.window.last()?.close;
        let prior_close = ctx.window[ctx.window.len() - 1 - MOMENTUM_LOOKBACK].close;

        let long = ConfirmationSet::new(REQUIRED_CONFIRMATIONS)
            .check("fast ema above slow ema", fast.value > slow.value)
            .check("close above fast ema", close > fast.value)
            .check("rsi momentum aligned up", rsi.value >= 55.0)
            .check("higher close vs lookback", close > prior_close);

        if long.satisfied() {
            return build_signal(
                StrategyKind::Baseline,
                ctx,
                Direction::Buy,
                close,
                Severity::from(ctx.regime),
                atr.value,
                None,
                &long,
                None,
            );
        }

        let short = ConfirmationSet::new(REQUIRED_CONFIRMATIONS)
            .check("fast ema below slow ema", fast.value < slow.value)
            .check("close below fast ema", close < fast.value)
            .check("rsi momentum aligned down", rsi.value <= 45.0)
            .check("lower close vs lookback", close < prior_close);

        if short.satisfied() {
            return build_signal(
                StrategyKind::Baseline,
                ctx,
                Direction::Sell,
                close,
                Severity::from(ctx.regime),
                atr.value,
                None,
                &short,
                None,
            );
        }

        None
    }
}
