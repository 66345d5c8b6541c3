//! Strategy evaluators
//!
//! Each evaluator implements one `evaluate` contract and is gated to a
//! declared regime/phase domain; emitting outside that domain is a bug. The
//! arbiter holds an ordered list of these, so new strategies slot in without
//! touching the selection logic.

pub mod baseline;
pub mod confirmation;
pub mod news;
pub mod volatility;

use chrono::{DateTime, Utc};

use crate::calendar::EconomicCalendar;
use crate::models::event::EconomicEvent;
use crate::models::market::{PriceBar, Regime};
use crate::models::risk::Severity;
use crate::models::signal::{Direction, Signal, StrategyKind, TakeProfit};
use crate::risk::risk_policy;
use crate::strategies::confirmation::{composite_confidence, ConfirmationSet};

/// Everything an evaluator may look at for one query. Borrowed, immutable.
pub struct EvalContext<'a> {
    pub symbol: &'a str,
    pub window: &'a [PriceBar],
    pub regime: Regime,
    pub now: DateTime<Utc>,
    pub calendar: Option<&'a EconomicCalendar>,
}

pub trait StrategyEvaluator: Send + Sync {
    fn name(&self) -> &'static str;

    /// Emit a candidate signal, or decline. Declining is the normal path;
    /// evaluators never error.
    fn evaluate(&self, ctx: &EvalContext<'_>) -> Option<Signal>;
}

/// Assemble a signal from a passed confirmation set and the strategy's risk
/// policy. Returns `None` when the policy cannot produce a positive stop
/// distance for the available inputs.
#[allow(clippy::too_many_arguments)]
pub(crate) fn build_signal(
    kind: StrategyKind,
    ctx: &EvalContext<'_>,
    direction: Direction,
    entry: f64,
    severity: Severity,
    atr: f64,
    expected_move: Option<f64>,
    confirmations: &ConfirmationSet,
    event: Option<EconomicEvent>,
) -> Option<Signal> {
    let policy = risk_policy(kind, severity).ok()?;
    let stop_distance = policy.stop_distance(atr, expected_move)?;
    if stop_distance <= 0.0 || !stop_distance.is_finite() {
        return None;
    }

    let sign = direction.sign();
    let stop = entry - sign * stop_distance;
    let targets: Vec<TakeProfit> = policy
        .targets
        .iter()
        .map(|t| TakeProfit {
            price: entry + sign * t.distance_r * stop_distance,
            allocation: t.allocation,
        })
        .collect();

    let confidence = composite_confidence(
        confirmations.strength(),
        kind.historical_win_rate(),
        policy.reward_multiple(),
    );

    Some(Signal {
        strategy: kind,
        symbol: ctx.symbol.to_string(),
        direction,
        entry,
        stop,
        targets,
        confidence,
        max_hold_minutes: policy.max_hold_minutes,
        rationale: confirmations.rationale(kind.label()),
        event,
        generated_at: ctx.now,
    })
}
