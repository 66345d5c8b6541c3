//! ATR (Average True Range) indicator

use crate::common::math;
use crate::models::indicators::AtrIndicator;
use crate::models::market::PriceBar;

/// Calculate ATR (Average True Range)
///
/// ATR measures market volatility by averaging true range over a period
pub fn calculate_atr(bars: &[PriceBar], period: u32) -> Option<AtrIndicator> {
    if bars.len() < period as usize + 1 {
        return None;
    }

    let mut tr_values = Vec::new();

    for i in 1..bars.len() {
        let tr = math::true_range(bars[i].high, bars[i].low, bars[i - 1].close);
        tr_values.push(tr);
    }

    if tr_values.len() < period as usize {
        return None;
    }

    let atr_value = math::sma(&tr_values, period as usize)?;

    Some(AtrIndicator {
        value: atr_value,
        period,
    })
}

/// Calculate ATR with default period (14)
pub fn calculate_atr_default(bars: &[PriceBar]) -> Option<AtrIndicator> {
    calculate_atr(bars, 14)
}
