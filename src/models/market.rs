//! Price history primitives

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single OHLC bar. Immutable once recorded; sequences are ordered by
/// monotonic non-decreasing timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceBar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

impl PriceBar {
    pub fn new(open: f64, high: f64, low: f64, close: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume: None,
        }
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }

    /// High-to-low extent of the bar.
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    pub fn is_finite(&self) -> bool {
        self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite()
    }
}

/// Discretized market-volatility state, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Regime {
    Low,
    Normal,
    Elevated,
    High,
    Explosive,
}

impl Regime {
    pub fn label(&self) -> &'static str {
        match self {
            Regime::Low => "low",
            Regime::Normal => "normal",
            Regime::Elevated => "elevated",
            Regime::High => "high",
            Regime::Explosive => "explosive",
        }
    }
}

/// Trailing view of a bar series, capped at `cap` bars. Windows are borrowed
/// and never mutated in place.
pub fn window_tail(bars: &[PriceBar], cap: usize) -> &[PriceBar] {
    if bars.len() > cap {
        &bars[bars.len() - cap..]
    } else {
        bars
    }
}
