//! Trade signal models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::event::EconomicEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Buy,
    Sell,
}

impl Direction {
    /// +1.0 for Buy, -1.0 for Sell. Multiplies price offsets and P&L.
    pub fn sign(&self) -> f64 {
        match self {
            Direction::Buy => 1.0,
            Direction::Sell => -1.0,
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Buy => Direction::Sell,
            Direction::Sell => Direction::Buy,
        }
    }
}

/// Strategy families queried by the arbiter, in priority order News >
/// Volatility > Baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StrategyFamily {
    News,
    Volatility,
    Baseline,
}

/// Concrete strategy identifiers. Each maps to exactly one evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StrategyKind {
    Baseline,
    MeanReversion,
    BreakoutFade,
    RangeTrade,
    SqueezeBreakout,
    NewsPrePosition,
    NewsStraddle,
    NewsMomentum,
    NewsFade,
    NewsScalp,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 10] = [
        StrategyKind::Baseline,
        StrategyKind::MeanReversion,
        StrategyKind::BreakoutFade,
        StrategyKind::RangeTrade,
        StrategyKind::SqueezeBreakout,
        StrategyKind::NewsPrePosition,
        StrategyKind::NewsStraddle,
        StrategyKind::NewsMomentum,
        StrategyKind::NewsFade,
        StrategyKind::NewsScalp,
    ];

    pub fn family(&self) -> StrategyFamily {
        match self {
            StrategyKind::Baseline => StrategyFamily::Baseline,
            StrategyKind::MeanReversion
            | StrategyKind::BreakoutFade
            | StrategyKind::RangeTrade
            | StrategyKind::SqueezeBreakout => StrategyFamily::Volatility,
            StrategyKind::NewsPrePosition
            | StrategyKind::NewsStraddle
            | StrategyKind::NewsMomentum
            | StrategyKind::NewsFade
            | StrategyKind::NewsScalp => StrategyFamily::News,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StrategyKind::Baseline => "baseline_trend",
            StrategyKind::MeanReversion => "mean_reversion",
            StrategyKind::BreakoutFade => "breakout_fade",
            StrategyKind::RangeTrade => "range_trade",
            StrategyKind::SqueezeBreakout => "squeeze_breakout",
            StrategyKind::NewsPrePosition => "news_pre_position",
            StrategyKind::NewsStraddle => "news_straddle",
            StrategyKind::NewsMomentum => "news_momentum",
            StrategyKind::NewsFade => "news_fade",
            StrategyKind::NewsScalp => "news_scalp",
        }
    }

    /// Long-run win rate observed for the strategy, one input to the
    /// composite confidence score.
    pub fn historical_win_rate(&self) -> f64 {
        match self {
            StrategyKind::Baseline => 0.55,
            StrategyKind::MeanReversion => 0.62,
            StrategyKind::BreakoutFade => 0.58,
            StrategyKind::RangeTrade => 0.60,
            StrategyKind::SqueezeBreakout => 0.52,
            StrategyKind::NewsPrePosition => 0.48,
            StrategyKind::NewsStraddle => 0.50,
            StrategyKind::NewsMomentum => 0.65,
            StrategyKind::NewsFade => 0.68,
            StrategyKind::NewsScalp => 0.45,
        }
    }
}

/// One exit level. Allocations across a signal's targets sum to 1.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TakeProfit {
    pub price: f64,
    pub allocation: f64,
}

/// An actionable trade signal. Created by exactly one evaluator, consumed by
/// the arbiter, never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    pub strategy: StrategyKind,
    pub symbol: String,
    pub direction: Direction,
    pub entry: f64,
    pub stop: f64,
    pub targets: Vec<TakeProfit>,
    /// Advisory confidence in [0, 1]; enforcement is the caller's decision.
    pub confidence: f64,
    pub max_hold_minutes: i64,
    pub rationale: String,
    /// The triggering release, present on news-family signals only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<EconomicEvent>,
    pub generated_at: DateTime<Utc>,
}

impl Signal {
    pub fn stop_distance(&self) -> f64 {
        (self.entry - self.stop).abs()
    }

    pub fn allocation_total(&self) -> f64 {
        self.targets.iter().map(|t| t.allocation).sum()
    }
}
