//! Async provider traits for market data, calendars and history
//!
//! The engine treats these as synchronous read-only inputs; their freshness
//! and latency are the transport layer's problem. In-memory implementations
//! back the demo binary and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::EngineError;
use crate::models::event::EconomicEvent;
use crate::models::market::{window_tail, PriceBar};

#[async_trait]
pub trait PriceHistoryProvider: Send + Sync {
    /// Trailing window of up to `bars` bars for the symbol, oldest first.
    async fn market_window(&self, symbol: &str, bars: usize)
        -> Result<Vec<PriceBar>, EngineError>;
}

#[async_trait]
pub trait CalendarProvider: Send + Sync {
    /// Events relevant to `symbol` around `now`, including recent releases
    /// still inside their lookahead window.
    async fn events(
        &self,
        symbol: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<EconomicEvent>, EngineError>;
}

#[async_trait]
pub trait HistoricalDataProvider: Send + Sync {
    async fn bar_series(&self, symbol: &str) -> Result<Vec<PriceBar>, EngineError>;
    async fn event_series(&self, symbol: &str) -> Result<Vec<EconomicEvent>, EngineError>;
}

/// In-memory provider for tests and the demo binary.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMarketData {
    bars: HashMap<String, Vec<PriceBar>>,
    events: HashMap<String, Vec<EconomicEvent>>,
}

impl InMemoryMarketData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bars(mut self, symbol: impl Into<String>, bars: Vec<PriceBar>) -> Self {
        self.bars.insert(symbol.into(), bars);
        self
    }

    pub fn with_events(mut self, symbol: impl Into<String>, events: Vec<EconomicEvent>) -> Self {
        self.events.insert(symbol.into(), events);
        self
    }
}

#[async_trait]
impl PriceHistoryProvider for InMemoryMarketData {
    async fn market_window(
        &self,
        symbol: &str,
        bars: usize,
    ) -> Result<Vec<PriceBar>, EngineError> {
        let series = self
            .bars
            .get(symbol)
            .ok_or(EngineError::InsufficientData {
                required: bars,
                actual: 0,
            })?;
        Ok(window_tail(series, bars).to_vec())
    }
}

#[async_trait]
impl CalendarProvider for InMemoryMarketData {
    async fn events(
        &self,
        symbol: &str,
        _now: DateTime<Utc>,
    ) -> Result<Vec<EconomicEvent>, EngineError> {
        self.events
            .get(symbol)
            .cloned()
            .ok_or(EngineError::CalendarUnavailable)
    }
}

#[async_trait]
impl HistoricalDataProvider for InMemoryMarketData {
    async fn bar_series(&self, symbol: &str) -> Result<Vec<PriceBar>, EngineError> {
        self.bars
            .get(symbol)
            .cloned()
            .ok_or(EngineError::InsufficientData {
                required: 1,
                actual: 0,
            })
    }

    async fn event_series(&self, symbol: &str) -> Result<Vec<EconomicEvent>, EngineError> {
        Ok(self.events.get(symbol).cloned().unwrap_or_default())
    }
}
