//! Scheduled economic event models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Scheduled high-impact release types tracked by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EventKind {
    NonFarmPayrolls,
    FomcRate,
    EcbRate,
    BoeRate,
    Cpi,
    Gdp,
}

impl EventKind {
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::NonFarmPayrolls => "nfp",
            EventKind::FomcRate => "fomc_rate",
            EventKind::EcbRate => "ecb_rate",
            EventKind::BoeRate => "boe_rate",
            EventKind::Cpi => "cpi",
            EventKind::Gdp => "gdp",
        }
    }
}

/// Expected market impact of a release, used for position-size scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ImpactLevel {
    Medium,
    High,
    Extreme,
}

/// A scheduled release with its historical move profile. Immutable once
/// scheduled; its lifecycle ends `LOOKAHEAD_MINUTES` after release.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomicEvent {
    pub kind: EventKind,
    pub symbol: String,
    pub release_time: DateTime<Utc>,
    /// Historical average price displacement for this event type, in price units.
    pub expected_move: f64,
    /// Largest historical displacement, bounds how far momentum entries chase.
    pub max_historical_move: f64,
    pub impact: ImpactLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<f64>,
}

impl EconomicEvent {
    pub fn new(
        kind: EventKind,
        symbol: impl Into<String>,
        release_time: DateTime<Utc>,
        expected_move: f64,
        max_historical_move: f64,
        impact: ImpactLevel,
    ) -> Self {
        Self {
            kind,
            symbol: symbol.into(),
            release_time,
            expected_move,
            max_historical_move,
            impact,
            forecast: None,
            previous: None,
        }
    }

    pub fn with_figures(mut self, forecast: f64, previous: f64) -> Self {
        self.forecast = Some(forecast);
        self.previous = Some(previous);
        self
    }
}

/// Event-relative trading stage. Always recomputed from `(now, release_time)`;
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    PreEvent,
    Release,
    InitialMove,
    FollowThrough,
    Reversal,
    None,
}

impl Phase {
    pub fn is_active(&self) -> bool {
        !matches!(self, Phase::None)
    }
}
