//! Simulated trade lifecycle

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::event::EventKind;
use crate::models::market::PriceBar;
use crate::models::signal::{Direction, Signal, StrategyKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloseReason {
    StopLoss,
    TrailingStop,
    TimeStop,
    FinalTarget,
    EndOfData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetState {
    pub price: f64,
    pub allocation: f64,
    pub filled: bool,
}

/// A position owned by the backtest engine for its simulated holding period.
/// The stop is the only field that moves (breakeven shift and trailing);
/// everything else is fixed at open.
#[derive(Debug, Clone)]
pub struct OpenTrade {
    pub symbol: String,
    pub strategy: StrategyKind,
    pub event_kind: Option<EventKind>,
    pub direction: Direction,
    pub opened_at: DateTime<Utc>,
    pub entry: f64,
    pub stop: f64,
    initial_stop_distance: f64,
    pub quantity: f64,
    remaining_fraction: f64,
    targets: Vec<TargetState>,
    /// Favorable excursion, in price units, at which the trailing stop arms.
    trailing_activation: f64,
    trailing_armed: bool,
    best_price: f64,
    realized_pnl: f64,
    max_hold_minutes: i64,
}

/// Archived result of a closed trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosedTrade {
    pub symbol: String,
    pub strategy: StrategyKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_kind: Option<EventKind>,
    pub direction: Direction,
    pub opened_at: DateTime<Utc>,
    pub closed_at: DateTime<Utc>,
    pub entry: f64,
    pub exit: f64,
    pub quantity: f64,
    pub pnl: f64,
    pub reason: CloseReason,
}

impl OpenTrade {
    pub fn open(signal: &Signal, quantity: f64, trailing_activation: f64) -> Self {
        Self {
            symbol: signal.symbol.clone(),
            strategy: signal.strategy,
            event_kind: signal.event.as_ref().map(|e| e.kind),
            direction: signal.direction,
            opened_at: signal.generated_at,
            entry: signal.entry,
            stop: signal.stop,
            initial_stop_distance: signal.stop_distance(),
            quantity,
            remaining_fraction: 1.0,
            targets: signal
                .targets
                .iter()
                .map(|t| TargetState {
                    price: t.price,
                    allocation: t.allocation,
                    filled: false,
                })
                .collect(),
            trailing_activation,
            trailing_armed: false,
            best_price: signal.entry,
            realized_pnl: 0.0,
            max_hold_minutes: signal.max_hold_minutes,
        }
    }

    /// Advance the trade by one bar. Exit checks run in fixed priority:
    /// stop-loss, then time-stop, then targets. A bar that would touch both
    /// stop and target resolves as a stop; bar data carries no intrabar
    /// ordering to prove otherwise.
    pub fn manage(&mut self, bar: &PriceBar) -> Option<ClosedTrade> {
        let sign = self.direction.sign();

        let stop_touched = match self.direction {
            Direction::Buy => bar.low <= self.stop,
            Direction::Sell => bar.high >= self.stop,
        };
        if stop_touched {
            let reason = if self.trailing_armed {
                CloseReason::TrailingStop
            } else {
                CloseReason::StopLoss
            };
            return Some(self.close(self.stop, bar.timestamp, reason));
        }

        if bar.timestamp - self.opened_at >= Duration::minutes(self.max_hold_minutes) {
            return Some(self.close(bar.close, bar.timestamp, CloseReason::TimeStop));
        }

        let mut any_fill = false;
        for idx in 0..self.targets.len() {
            if self.targets[idx].filled {
                continue;
            }
            let target = self.targets[idx].price;
            let touched = match self.direction {
                Direction::Buy => bar.high >= target,
                Direction::Sell => bar.low <= target,
            };
            if !touched {
                break;
            }
            let allocation = self.targets[idx].allocation;
            self.realized_pnl += self.quantity * allocation * (target - self.entry) * sign;
            self.remaining_fraction -= allocation;
            self.targets[idx].filled = true;
            any_fill = true;
        }
        if any_fill {
            // First scale-out moves the stop to breakeven.
            self.stop = match self.direction {
                Direction::Buy => self.stop.max(self.entry),
                Direction::Sell => self.stop.min(self.entry),
            };
        }
        if self.remaining_fraction <= 1e-9 {
            let last_fill = self
                .targets
                .iter()
                .rev()
                .find(|t| t.filled)
                .map(|t| t.price)
                .unwrap_or(bar.close);
            self.remaining_fraction = 0.0;
            return Some(self.finish(last_fill, bar.timestamp, CloseReason::FinalTarget));
        }

        self.update_trailing(bar);
        None
    }

    /// Close whatever remains at `price`.
    pub fn close(&mut self, price: f64, at: DateTime<Utc>, reason: CloseReason) -> ClosedTrade {
        let sign = self.direction.sign();
        self.realized_pnl += self.quantity * self.remaining_fraction * (price - self.entry) * sign;
        self.remaining_fraction = 0.0;
        self.finish(price, at, reason)
    }

    fn finish(&self, exit: f64, at: DateTime<Utc>, reason: CloseReason) -> ClosedTrade {
        ClosedTrade {
            symbol: self.symbol.clone(),
            strategy: self.strategy,
            event_kind: self.event_kind,
            direction: self.direction,
            opened_at: self.opened_at,
            closed_at: at,
            entry: self.entry,
            exit,
            quantity: self.quantity,
            pnl: self.realized_pnl,
            reason,
        }
    }

    fn update_trailing(&mut self, bar: &PriceBar) {
        self.best_price = match self.direction {
            Direction::Buy => self.best_price.max(bar.high),
            Direction::Sell => self.best_price.min(bar.low),
        };
        let favorable = (self.best_price - self.entry) * self.direction.sign();
        if !self.trailing_armed && favorable >= self.trailing_activation {
            self.trailing_armed = true;
        }
        if self.trailing_armed {
            let candidate = match self.direction {
                Direction::Buy => self.best_price - self.initial_stop_distance,
                Direction::Sell => self.best_price + self.initial_stop_distance,
            };
            self.stop = match self.direction {
                Direction::Buy => self.stop.max(candidate),
                Direction::Sell => self.stop.min(candidate),
            };
        }
    }
}
