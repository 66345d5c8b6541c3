//! Risk and trade-management rules
//!
//! A pure mapping from (strategy kind, severity) to a sizing/exit bundle.
//! Live arbitration and the backtest engine query the same table; there is
//! no hidden risk state anywhere else.

use crate::error::EngineError;
use crate::models::risk::{RiskPolicy, Severity, StopRule, TargetRule};
use crate::models::signal::{StrategyFamily, StrategyKind};

/// Three-level exit split.
const SPLIT_40_40_20: [TargetRule; 3] = [
    TargetRule::new(1.0, 0.40),
    TargetRule::new(2.0, 0.40),
    TargetRule::new(3.0, 0.20),
];

/// Fraction of balance risked per trade, inversely scaled with severity.
fn size_fraction(severity: Severity) -> f64 {
    match severity {
        Severity::Low => 0.020,
        Severity::Normal => 0.015,
        Severity::Elevated => 0.010,
        Severity::High => 0.0075,
        Severity::Extreme => 0.005,
    }
}

fn split_50_50(first_r: f64, second_r: f64) -> Vec<TargetRule> {
    vec![
        TargetRule::new(first_r, 0.50),
        TargetRule::new(second_r, 0.50),
    ]
}

/// Look up the policy for a strategy at a given severity. Combinations
/// outside the strategy's operating domain are a configuration error.
pub fn risk_policy(
    strategy: StrategyKind,
    severity: Severity,
) -> Result<RiskPolicy, EngineError> {
    if !severity_in_domain(strategy, severity) {
        return Err(EngineError::InvalidPolicy { strategy, severity });
    }

    let (stop, targets, trailing_activation_r, max_hold_minutes) = match strategy {
        StrategyKind::Baseline => (
            StopRule::AtrMultiple(0.75),
            SPLIT_40_40_20.to_vec(),
            1.0,
            180,
        ),
        StrategyKind::MeanReversion => {
            (StopRule::AtrMultiple(0.50), split_50_50(1.5, 3.0), 1.0, 45)
        }
        StrategyKind::BreakoutFade => {
            (StopRule::AtrMultiple(0.50), split_50_50(1.5, 2.5), 1.0, 60)
        }
        StrategyKind::RangeTrade => {
            (StopRule::AtrMultiple(0.40), split_50_50(1.5, 2.5), 1.0, 60)
        }
        StrategyKind::SqueezeBreakout => (
            StopRule::AtrMultiple(0.60),
            SPLIT_40_40_20.to_vec(),
            1.0,
            90,
        ),
        StrategyKind::NewsPrePosition => (
            StopRule::ExpectedMoveFraction(0.40),
            split_50_50(1.0, 2.0),
            1.0,
            90,
        ),
        StrategyKind::NewsStraddle => (
            StopRule::ExpectedMoveFraction(0.30),
            split_50_50(1.5, 2.5),
            0.8,
            30,
        ),
        StrategyKind::NewsMomentum => (
            StopRule::ExpectedMoveFraction(0.30),
            SPLIT_40_40_20.to_vec(),
            1.0,
            45,
        ),
        StrategyKind::NewsFade => (
            StopRule::ExpectedMoveFraction(0.35),
            split_50_50(1.5, 3.0),
            1.0,
            60,
        ),
        StrategyKind::NewsScalp => (
            StopRule::ExpectedMoveFraction(0.15),
            vec![TargetRule::new(1.0, 1.0)],
            0.8,
            15,
        ),
    };

    Ok(RiskPolicy {
        strategy,
        severity,
        size_fraction: size_fraction(severity),
        stop,
        targets,
        trailing_activation_r,
        max_hold_minutes,
    })
}

/// The severities a strategy can legitimately be asked to size for, mirroring
/// the evaluator gating table.
pub fn severity_in_domain(strategy: StrategyKind, severity: Severity) -> bool {
    match strategy.family() {
        StrategyFamily::Baseline => matches!(severity, Severity::Low | Severity::Normal),
        StrategyFamily::Volatility => match strategy {
            StrategyKind::MeanReversion => severity == Severity::Extreme,
            StrategyKind::BreakoutFade | StrategyKind::RangeTrade => severity == Severity::High,
            StrategyKind::SqueezeBreakout => severity == Severity::Elevated,
            _ => false,
        },
        // News severities derive from event impact, never from regime.
        StrategyFamily::News => matches!(
            severity,
            Severity::Elevated | Severity::High | Severity::Extreme
        ),
    }
}
