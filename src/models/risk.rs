//! Risk policy models

use serde::{Deserialize, Serialize};

use crate::models::event::ImpactLevel;
use crate::models::market::Regime;
use crate::models::signal::StrategyKind;

/// Unified severity scale for position-size scaling. Regimes and event
/// impact levels both map onto it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Normal,
    Elevated,
    High,
    Extreme,
}

impl From<Regime> for Severity {
    fn from(regime: Regime) -> Self {
        match regime {
            Regime::Low => Severity::Low,
            Regime::Normal => Severity::Normal,
            Regime::Elevated => Severity::Elevated,
            Regime::High => Severity::High,
            Regime::Explosive => Severity::Extreme,
        }
    }
}

impl From<ImpactLevel> for Severity {
    fn from(impact: ImpactLevel) -> Self {
        match impact {
            ImpactLevel::Medium => Severity::Elevated,
            ImpactLevel::High => Severity::High,
            ImpactLevel::Extreme => Severity::Extreme,
        }
    }
}

/// How the stop distance is derived for a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StopRule {
    /// Multiple of the current ATR. Technical strategies.
    AtrMultiple(f64),
    /// Fraction of the event's expected move. News strategies.
    ExpectedMoveFraction(f64),
}

/// One exit level expressed in R multiples (multiples of the stop distance).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetRule {
    pub distance_r: f64,
    pub allocation: f64,
}

impl TargetRule {
    pub const fn new(distance_r: f64, allocation: f64) -> Self {
        Self {
            distance_r,
            allocation,
        }
    }
}

/// Sizing and exit parameter bundle for one (strategy, severity) pair.
/// A pure, deterministic mapping; no mutable state behind it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskPolicy {
    pub strategy: StrategyKind,
    pub severity: Severity,
    /// Fraction of account balance risked per trade.
    pub size_fraction: f64,
    pub stop: StopRule,
    pub targets: Vec<TargetRule>,
    /// Profit, in R multiples, at which the trailing stop arms.
    pub trailing_activation_r: f64,
    pub max_hold_minutes: i64,
}

impl RiskPolicy {
    /// Resolve the stop distance in price units. `expected_move` is required
    /// for news policies and ignored otherwise.
    pub fn stop_distance(&self, atr: f64, expected_move: Option<f64>) -> Option<f64> {
        match self.stop {
            StopRule::AtrMultiple(mult) => (atr > 0.0).then(|| mult * atr),
            StopRule::ExpectedMoveFraction(frac) => {
                expected_move.filter(|m| *m > 0.0).map(|m| frac * m)
            }
        }
    }

    /// Allocation-weighted reward in R multiples, the risk/reward input to
    /// confidence scoring.
    pub fn reward_multiple(&self) -> f64 {
        self.targets
            .iter()
            .map(|t| t.distance_r * t.allocation)
            .sum()
    }

    pub fn allocation_total(&self) -> f64 {
        self.targets.iter().map(|t| t.allocation).sum()
    }
}
