//! EMA (Exponential Moving Average) indicator

use crate::models::indicators::EmaIndicator;
use crate::models::market::PriceBar;

/// Calculate EMA over the full window, seeded with the first close.
pub fn calculate_ema(bars: &[PriceBar], period: u32) -> Option<EmaIndicator> {
    if period == 0 || bars.len() < period as usize {
        return None;
    }

    let alpha = 2.0 / (period as f64 + 1.0);
    let mut ema = bars[0].close;
    for bar in &bars[1..] {
        ema = alpha * bar.close + (1.0 - alpha) * ema;
    }

    Some(EmaIndicator { value: ema, period })
}

/// Fast/slow EMA pair for trend confluence checks.
pub fn calculate_ema_pair(
    bars: &[PriceBar],
    fast: u32,
    slow: u32,
) -> Option<(EmaIndicator, EmaIndicator)> {
    let fast_ema = calculate_ema(bars, fast)?;
    let slow_ema = calculate_ema(bars, slow)?;
    Some((fast_ema, slow_ema))
}
