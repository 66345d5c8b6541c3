//! Scheduled-news-event strategy suite
//!
//! Five sub-strategies, each owning one slice of the event lifecycle:
//! pre-positioning before release, straddle/scalp at release, momentum-follow
//! through the initial move, and fading the overshoot in the reversal phase.
//! Gating is by phase alone; the phase is recomputed from the clock on every
//! query. Without calendar data the whole suite declines.

use chrono::{DateTime, Utc};

use crate::calendar::phase_at;
use crate::indicators::momentum::rsi::calculate_rsi_default;
use crate::indicators::trend::ema::calculate_ema_pair;
use crate::indicators::volatility::atr::calculate_atr_default;
use crate::models::event::{EconomicEvent, Phase};
use crate::models::market::PriceBar;
use crate::models::risk::Severity;
use crate::models::signal::{Direction, Signal, StrategyKind};
use crate::strategies::confirmation::ConfirmationSet;
use crate::strategies::{build_signal, EvalContext, StrategyEvaluator};

/// Fraction of the expected move that confirms a tradable initial move.
const MOMENTUM_TRIGGER: f64 = 0.6;
/// Fraction of the expected move past which the move is a fade candidate.
const FADE_TRIGGER: f64 = 1.2;
/// Deep-overshoot confirmation threshold for fades.
const FADE_OVERSHOOT: f64 = 1.4;
/// Bars of pre-release trade defining the straddle range.
const STRADDLE_RANGE_BARS: usize = 12;

pub struct NewsEventSuite;

impl StrategyEvaluator for NewsEventSuite {
    fn name(&self) -> &'static str {
        "news_event_suite"
    }

    fn evaluate(&self, ctx: &EvalContext<'_>) -> Option<Signal> {
        // No calendar: degrade by skipping news strategies entirely.
        let calendar = ctx.calendar?;
        let event = calendar.active_event(ctx.symbol, ctx.now)?.clone();

        match phase_at(ctx.now, &event) {
            Phase::PreEvent => self.pre_position(ctx, event),
            Phase::Release => self
                .straddle(ctx, &event)
                .or_else(|| self.scalp(ctx, event.clone())),
            Phase::InitialMove | Phase::FollowThrough => self.momentum_follow(ctx, event),
            Phase::Reversal => self.fade(ctx, event),
            Phase::None => None,
        }
    }
}

impl NewsEventSuite {
    /// Position ahead of the release on technical bias, sized for the event.
    fn pre_position(&self, ctx: &EvalContext<'_>, event: EconomicEvent) -> Option<Signal> {
        let (fast, slow) = calculate_ema_pair(ctx.window, 20, 50)?;
        let rsi = calculate_rsi_default(ctx.window)?;
        let atr = calculate_atr_default(ctx.window)?;
        let bar = ctx.window.last()?;

        let direction = if fast.value > slow.value {
            Direction::Buy
        } else if fast.value < slow.value {
            Direction::Sell
        } else {
            return None;
        };

        let aligned_up = direction == Direction::Buy;
        let confirmations = ConfirmationSet::new(2)
            .check(
                "oscillator aligned with bias",
                if aligned_up {
                    rsi.value >= 55.0
                } else {
                    rsi.value <= 45.0
                },
            )
            .check(
                "close aligned with bias",
                if aligned_up {
                    bar.close > fast.value
                } else {
                    bar.close < fast.value
                },
            )
            .check(
                "expected move dwarfs noise",
                event.expected_move >= 2.0 * atr.value,
            );

        if !confirmations.satisfied() {
            return None;
        }

        let severity = Severity::from(event.impact);
        let expected = Some(event.expected_move);
        build_signal(
            StrategyKind::NewsPrePosition,
            ctx,
            direction,
            bar.close,
            severity,
            atr.value,
            expected,
            &confirmations,
            Some(event),
        )
    }

    /// Enter in the breakout direction once price clears the pre-release range.
    fn straddle(&self, ctx: &EvalContext<'_>, event: &EconomicEvent) -> Option<Signal> {
        let atr = calculate_atr_default(ctx.window)?;
        let bar = ctx.window.last()?;
        let (range_high, range_low) =
            pre_release_range(ctx.window, event.release_time, STRADDLE_RANGE_BARS)?;

        let (direction, margin) = if bar.close > range_high {
            (Direction::Buy, bar.close - range_high)
        } else if bar.close < range_low {
            (Direction::Sell, range_low - bar.close)
        } else {
            return None;
        };

        let confirmations = ConfirmationSet::new(2)
            .check("clean break of range", margin >= 0.1 * event.expected_move)
            .check(
                "release bar expansion",
                bar.range() >= 0.3 * event.expected_move,
            )
            .check(
                "bar closes with the break",
                (bar.close - bar.open) * direction.sign() > 0.0,
            );

        if !confirmations.satisfied() {
            return None;
        }

        let severity = Severity::from(event.impact);
        build_signal(
            StrategyKind::NewsStraddle,
            ctx,
            direction,
            bar.close,
            severity,
            atr.value,
            Some(event.expected_move),
            &confirmations,
            Some(event.clone()),
        )
    }

    /// Tight-stop scalp of the release spike when no range break is on.
    fn scalp(&self, ctx: &EvalContext<'_>, event: EconomicEvent) -> Option<Signal> {
        let atr = calculate_atr_default(ctx.window)?;
        let rsi = calculate_rsi_default(ctx.window)?;
        let bar = ctx.window.last()?;

        let body = bar.close - bar.open;
        if body == 0.0 {
            return None;
        }
        let direction = if body > 0.0 {
            Direction::Buy
        } else {
            Direction::Sell
        };

        let confirmations = ConfirmationSet::new(2)
            .check(
                "release volatility present",
                bar.range() >= 0.5 * event.expected_move,
            )
            .check("decisive bar body", body.abs() >= 0.25 * bar.range())
            .check(
                "oscillator aligned",
                if direction == Direction::Buy {
                    rsi.value >= 55.0
                } else {
                    rsi.value <= 45.0
                },
            );

        if !confirmations.satisfied() {
            return None;
        }

        let severity = Severity::from(event.impact);
        let expected = Some(event.expected_move);
        build_signal(
            StrategyKind::NewsScalp,
            ctx,
            direction,
            bar.close,
            severity,
            atr.value,
            expected,
            &confirmations,
            Some(event),
        )
    }

    /// Follow a confirmed post-release move once it clears the trigger
    /// fraction of the expected move.
    fn momentum_follow(&self, ctx: &EvalContext<'_>, event: EconomicEvent) -> Option<Signal> {
        let atr = calculate_atr_default(ctx.window)?;
        let rsi = calculate_rsi_default(ctx.window)?;
        let bar = ctx.window.last()?;
        let reference = reference_price(ctx.window, event.release_time)?;

        let displacement = bar.close - reference;
        if displacement.abs() < MOMENTUM_TRIGGER * event.expected_move {
            return None;
        }
        let direction = if displacement > 0.0 {
            Direction::Buy
        } else {
            Direction::Sell
        };

        let last_closes: Vec<f64> = ctx
            .window
            .iter()
            .rev()
            .take(3)
            .rev()
            .map(|b| b.close)
            .collect();
        let persistent = if direction == Direction::Buy {
            last_closes.windows(2).all(|p| p[1] >= p[0])
        } else {
            last_closes.windows(2).all(|p| p[1] <= p[0])
        };

        let confirmations = ConfirmationSet::new(2)
            .check(
                "move within historical bounds",
                displacement.abs() <= event.max_historical_move,
            )
            .check(
                "oscillator aligned",
                if direction == Direction::Buy {
                    rsi.value >= 55.0
                } else {
                    rsi.value <= 45.0
                },
            )
            .check("persistent closes", persistent);

        if !confirmations.satisfied() {
            return None;
        }

        let severity = Severity::from(event.impact);
        let expected = Some(event.expected_move);
        build_signal(
            StrategyKind::NewsMomentum,
            ctx,
            direction,
            bar.close,
            severity,
            atr.value,
            expected,
            &confirmations,
            Some(event),
        )
    }

    /// Fade an overextended move once the reversal phase begins.
    fn fade(&self, ctx: &EvalContext<'_>, event: EconomicEvent) -> Option<Signal> {
        let atr = calculate_atr_default(ctx.window)?;
        let rsi = calculate_rsi_default(ctx.window)?;
        let bar = ctx.window.last()?;
        let reference = reference_price(ctx.window, event.release_time)?;

        let displacement = bar.close - reference;
        if displacement.abs() < FADE_TRIGGER * event.expected_move {
            return None;
        }
        // Counter-trend: trade against the post-release move.
        let direction = if displacement > 0.0 {
            Direction::Sell
        } else {
            Direction::Buy
        };

        let stalled = if ctx.window.len() >= 4 {
            let earlier = ctx.window[ctx.window.len() - 4].close;
            (bar.close - earlier) * displacement.signum() <= 0.0
        } else {
            false
        };

        let confirmations = ConfirmationSet::new(2)
            .check(
                "oscillator exhausted",
                if displacement > 0.0 {
                    rsi.value >= 70.0
                } else {
                    rsi.value <= 30.0
                },
            )
            .check("move has stalled", stalled)
            .check(
                "deep overshoot",
                displacement.abs() >= FADE_OVERSHOOT * event.expected_move,
            );

        if !confirmations.satisfied() {
            return None;
        }

        let severity = Severity::from(event.impact);
        let expected = Some(event.expected_move);
        build_signal(
            StrategyKind::NewsFade,
            ctx,
            direction,
            bar.close,
            severity,
            atr.value,
            expected,
            &confirmations,
            Some(event),
        )
    }
}

/// Close of the last bar printed before the release.
fn reference_price(window: &[PriceBar], release: DateTime<Utc>) -> Option<f64> {
    window
        .iter()
        .rev()
        .find(|b| b.timestamp < release)
        .map(|b| b.close)
}

/// High/low of the last `bars` pre-release bars.
fn pre_release_range(
    window: &[PriceBar],
    release: DateTime<Utc>,
    bars: usize,
) -> Option<(f64, f64)> {
    let pre: Vec<&PriceBar> = window.iter().filter(|b| b.timestamp < release).collect();
    if pre.is_empty() {
        return None;
    }
    let tail = &pre[pre.len().saturating_sub(bars)..];
    let high = tail.iter().map(|b| b.high).fold(f64::MIN, f64::max);
    let low = tail.iter().map(|b| b.low).fold(f64::MAX, f64::min);
    Some((high, low))
}
