//! Backtest performance accounting

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::backtest::trade::ClosedTrade;

/// Win/loss/P&L tally for one breakdown bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupStats {
    pub trades: u64,
    pub wins: u64,
    pub losses: u64,
    pub pnl: f64,
}

impl GroupStats {
    pub fn record(&mut self, pnl: f64) {
        self.trades += 1;
        if pnl > 0.0 {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
        self.pnl += pnl;
    }

    pub fn win_rate(&self) -> f64 {
        if self.trades == 0 {
            return 0.0;
        }
        self.wins as f64 / self.trades as f64
    }
}

/// The durable output of a replay run. BTreeMap breakdowns keep serialization
/// order stable so identical runs serialize identically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestReport {
    pub symbol: String,
    pub initial_balance: f64,
    pub final_balance: f64,
    pub total_trades: u64,
    pub wins: u64,
    pub losses: u64,
    pub win_rate: f64,
    pub gross_profit: f64,
    pub gross_loss: f64,
    pub profit_factor: f64,
    pub max_drawdown_pct: f64,
    pub by_strategy: BTreeMap<String, GroupStats>,
    pub by_event: BTreeMap<String, GroupStats>,
    pub trades: Vec<ClosedTrade>,
}

impl BacktestReport {
    pub(crate) fn assemble(
        symbol: &str,
        initial_balance: f64,
        final_balance: f64,
        max_drawdown_pct: f64,
        trades: Vec<ClosedTrade>,
    ) -> Self {
        let mut wins = 0u64;
        let mut losses = 0u64;
        let mut gross_profit = 0.0;
        let mut gross_loss = 0.0;
        let mut by_strategy: BTreeMap<String, GroupStats> = BTreeMap::new();
        let mut by_event: BTreeMap<String, GroupStats> = BTreeMap::new();

        for trade in &trades {
            if trade.pnl > 0.0 {
                wins += 1;
                gross_profit += trade.pnl;
            } else {
                losses += 1;
                gross_loss += trade.pnl.abs();
            }
            by_strategy
                .entry(trade.strategy.label().to_string())
                .or_default()
                .record(trade.pnl);
            if let Some(kind) = trade.event_kind {
                by_event
                    .entry(kind.label().to_string())
                    .or_default()
                    .record(trade.pnl);
            }
        }

        let total_trades = trades.len() as u64;
        let win_rate = if total_trades > 0 {
            wins as f64 / total_trades as f64
        } else {
            0.0
        };
        let profit_factor = if gross_loss > 0.0 {
            gross_profit / gross_loss
        } else {
            0.0
        };

        Self {
            symbol: symbol.to_string(),
            initial_balance,
            final_balance,
            total_trades,
            wins,
            losses,
            win_rate,
            gross_profit,
            gross_loss,
            profit_factor,
            max_drawdown_pct,
            by_strategy,
            by_event,
            trades,
        }
    }
}
