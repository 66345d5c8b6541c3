//! High-volatility strategy suite
//!
//! Four mutually exclusive setups, each gated to a single regime:
//! mean-reversion (Explosive), breakout-fade and range trading (High), and
//! squeeze breakouts (Elevated). The gate is the correctness property; none
//! of these may emit outside its regime.

use crate::indicators::momentum::rsi::calculate_rsi_default;
use crate::indicators::structure::support_resistance::calculate_support_resistance_default;
use crate::indicators::trend::ema::calculate_ema;
use crate::indicators::volatility::atr::calculate_atr_default;
use crate::indicators::volatility::bollinger::calculate_bollinger_bands;
use crate::models::market::{PriceBar, Regime};
use crate::models::risk::Severity;
use crate::models::signal::{Direction, Signal, StrategyKind};
use crate::strategies::confirmation::ConfirmationSet;
use crate::strategies::{build_signal, EvalContext, StrategyEvaluator};

const BAND_PERIOD: u32 = 20;
const EXTREME_BAND_SIGMA: f64 = 3.0;
const RSI_EXTREME_HIGH: f64 = 80.0;
const RSI_EXTREME_LOW: f64 = 20.0;
const RANGE_LOOKBACK: usize = 20;
const SQUEEZE_CONTRACTION: f64 = 0.75;
const SQUEEZE_SHIFT: usize = 10;

/// Fade statistical extremes in explosive conditions: price stretched beyond
/// the 3σ band while the oscillator is pinned.
pub struct MeanReversion;

impl StrategyEvaluator for MeanReversion {
    fn name(&self) -> &'static str {
        "mean_reversion"
    }

    fn evaluate(&self, ctx: &EvalContext<'_>) -> Option<Signal> {
        if ctx.regime != Regime::Explosive {
            return None;
        }

        let bands = calculate_bollinger_bands(ctx.window, BAND_PERIOD, EXTREME_BAND_SIGMA)?;
        let rsi = calculate_rsi_default(ctx.window)?;
        let atr = calculate_atr_default(ctx.window)?;
        let bar = ctx.window.last()?;

        let (direction, excursion, rsi_pinned) = if bar.close > bands.upper
            && rsi.value >= RSI_EXTREME_HIGH
        {
            (Direction::Sell, bar.close - bands.upper, rsi.value >= 85.0)
        } else if bar.close < bands.lower && rsi.value <= RSI_EXTREME_LOW {
            (Direction::Buy, bands.lower - bar.close, rsi.value <= 15.0)
        } else {
            return None;
        };

        let confirmations = ConfirmationSet::new(2)
            .check("excursion beyond band", excursion >= 0.1 * atr.value)
            .check("climax bar range", bar.range() >= atr.value)
            .check("oscillator pinned", rsi_pinned);

        if !confirmations.satisfied() {
            return None;
        }

        build_signal(
            StrategyKind::MeanReversion,
            ctx,
            direction,
            bar.close,
            Severity::from(ctx.regime),
            atr.value,
            None,
            &confirmations,
            None,
        )
    }
}

/// Fade failed breakouts at range extremes when momentum does not confirm.
pub struct BreakoutFade;

impl StrategyEvaluator for BreakoutFade {
    fn name(&self) -> &'static str {
        "breakout_fade"
    }

    fn evaluate(&self, ctx: &EvalContext<'_>) -> Option<Signal> {
        if ctx.regime != Regime::High {
            return None;
        }
        if ctx.window.len() < RANGE_LOOKBACK + 1 {
            return None;
        }

        let rsi = calculate_rsi_default(ctx.window)?;
        let atr = calculate_atr_default(ctx.window)?;
        let bar = ctx.window.last()?;
        let (prior_high, prior_low) = prior_extremes(ctx.window, RANGE_LOOKBACK)?;

        // Poke above the range that closes back inside is a failed breakout.
        if bar.high > prior_high && bar.close < prior_high {
            let upper_wick = bar.high - bar.open.max(bar.close);
            let confirmations = ConfirmationSet::new(2)
                .check("momentum divergence", rsi.value < 70.0)
                .check("rejection close", bar.close < bar.open)
                .check("long upper wick", upper_wick >= 0.5 * bar.range());
            if confirmations.satisfied() {
                return build_signal(
                    StrategyKind::BreakoutFade,
                    ctx,
                    Direction::Sell,
                    bar.close,
                    Severity::from(ctx.regime),
                    atr.value,
                    None,
                    &confirmations,
                    None,
                );
            }
        }

        if bar.low < prior_low && bar.close > prior_low {
            let lower_wick = bar.open.min(bar.close) - bar.low;
            let confirmations = ConfirmationSet::new(2)
                .check("momentum divergence", rsi.value > 30.0)
                .check("rejection close", bar.close > bar.open)
                .check("long lower wick", lower_wick >= 0.5 * bar.range());
            if confirmations.satisfied() {
                return build_signal(
                    StrategyKind::BreakoutFade,
                    ctx,
                    Direction::Buy,
                    bar.close,
                    Severity::from(ctx.regime),
                    atr.value,
                    None,
                    &confirmations,
                    None,
                );
            }
        }

        None
    }
}

/// Trade bounces off an established range boundary toward the opposite side.
pub struct RangeTrade;

impl StrategyEvaluator for RangeTrade {
    fn name(&self) -> &'static str {
        "range_trade"
    }

    fn evaluate(&self, ctx: &EvalContext<'_>) -> Option<Signal> {
        if ctx.regime != Regime::High {
            return None;
        }

        let levels = calculate_support_resistance_default(ctx.window)?;
        let rsi = calculate_rsi_default(ctx.window)?;
        let atr = calculate_atr_default(ctx.window)?;
        let bar = ctx.window.last()?;
        let proximity = 0.25 * atr.value;
        let wide_range = levels
            .range_width()
            .map(|w| w >= 2.0 * atr.value)
            .unwrap_or(false);

        if let Some(support) = levels.support_level {
            if (bar.close - support).abs() <= proximity && rsi.value <= 35.0 {
                let confirmations = ConfirmationSet::new(2)
                    .check("oscillator extreme", rsi.value <= 30.0)
                    .check("bounce bar", bar.close > bar.open)
                    .check("established range", wide_range);
                if confirmations.satisfied() {
                    return build_signal(
                        StrategyKind::RangeTrade,
                        ctx,
                        Direction::Buy,
                        bar.close,
                        Severity::from(ctx.regime),
                        atr.value,
                        None,
                        &confirmations,
                        None,
                    );
                }
            }
        }

        if let Some(resistance) = levels.resistance_level {
            if (resistance - bar.close).abs() <= proximity && rsi.value >= 65.0 {
                let confirmations = ConfirmationSet::new(2)
                    .check("oscillator extreme", rsi.value >= 70.0)
                    .check("rejection bar", bar.close < bar.open)
                    .check("established range", wide_range);
                if confirmations.satisfied() {
                    return build_signal(
                        StrategyKind::RangeTrade,
                        ctx,
                        Direction::Sell,
                        bar.close,
                        Severity::from(ctx.regime),
                        atr.value,
                        None,
                        &confirmations,
                        None,
                    );
                }
            }
        }

        None
    }
}

/// Band contraction followed by directional momentum buildup; trade the
/// breakout direction.
pub struct SqueezeBreakout;

impl StrategyEvaluator for SqueezeBreakout {
    fn name(&self) -> &'static str {
        "squeeze_breakout"
    }

    fn evaluate(&self, ctx: &EvalContext<'_>) -> Option<Signal> {
        if ctx.regime != Regime::Elevated {
            return None;
        }
        if ctx.window.len() < BAND_PERIOD as usize + SQUEEZE_SHIFT {
            return None;
        }

        let bands_now = calculate_bollinger_bands(ctx.window, BAND_PERIOD, 2.0)?;
        let earlier = &ctx.window[..ctx.window.len() - SQUEEZE_SHIFT];
        let bands_prior = calculate_bollinger_bands(earlier, BAND_PERIOD, 2.0)?;
        if bands_prior.bandwidth() <= 0.0
            || bands_now.bandwidth() >= SQUEEZE_CONTRACTION * bands_prior.bandwidth()
        {
            return None;
        }

        let rsi = calculate_rsi_default(ctx.window)?;
        let atr = calculate_atr_default(ctx.window)?;
        let closes: Vec<f64> = ctx
            .window
            .iter()
            .rev()
            .take(4)
            .rev()
            .map(|b| b.close)
            .collect();
        let rising = closes.windows(2).all(|p| p[1] > p[0]);
        let falling = closes.windows(2).all(|p| p[1] < p[0]);
        let bar = ctx.window.last()?;
        let ema_now = calculate_ema(ctx.window, BAND_PERIOD)?;
        let ema_prior = calculate_ema(&ctx.window[..ctx.window.len() - 5], BAND_PERIOD)?;
        let ranges: Vec<f64> = ctx.window.iter().map(|b| b.range()).collect();
        let avg_range = crate::common::math::sma(&ranges, 14).unwrap_or(0.0);

        if rising && rsi.value >= 55.0 {
            let confirmations = ConfirmationSet::new(2)
                .check("close above middle band", bar.close > bands_now.middle)
                .check("ema slope up", ema_now.value > ema_prior.value)
                .check("range expansion", bar.range() > avg_range);
            if confirmations.satisfied() {
                return build_signal(
                    StrategyKind::SqueezeBreakout,
                    ctx,
                    Direction::Buy,
                    bar.close,
                    Severity::from(ctx.regime),
                    atr.value,
                    None,
                    &confirmations,
                    None,
                );
            }
        }

        if falling && rsi.value <= 45.0 {
            let confirmations = ConfirmationSet::new(2)
                .check("close below middle band", bar.close < bands_now.middle)
                .check("ema slope down", ema_now.value < ema_prior.value)
                .check("range expansion", bar.range() > avg_range);
            if confirmations.satisfied() {
                return build_signal(
                    StrategyKind::SqueezeBreakout,
                    ctx,
                    Direction::Sell,
                    bar.close,
                    Severity::from(ctx.regime),
                    atr.value,
                    None,
                    &confirmations,
                    None,
                );
            }
        }

        None
    }
}

/// Largest high/low over the trailing `lookback` bars excluding the last.
pub(crate) fn prior_extremes(bars: &[PriceBar], lookback: usize) -> Option<(f64, f64)> {
    if bars.len() < lookback + 1 {
        return None;
    }
    let prior = &bars[bars.len() - 1 - lookback..bars.len() - 1];
    let high = prior.iter().map(|b| b.high).fold(f64::MIN, f64::max);
    let low = prior.iter().map(|b| b.low).fold(f64::MAX, f64::min);
    Some((high, low))
}
