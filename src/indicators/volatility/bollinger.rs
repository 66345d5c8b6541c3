//! Bollinger Bands indicator

use crate::common::math;
use crate::models::indicators::BollingerBandsIndicator;
use crate::models::market::PriceBar;

/// Calculate Bollinger Bands
///
/// Middle Band = SMA(period)
/// Upper Band = Middle + (std_dev * standard deviation)
/// Lower Band = Middle - (std_dev * standard deviation)
pub fn calculate_bollinger_bands(
    bars: &[PriceBar],
    period: u32,
    std_dev: f64,
) -> Option<BollingerBandsIndicator> {
    if bars.len() < period as usize {
        return None;
    }

    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let middle = math::sma(&closes, period as usize)?;
    let std = math::standard_deviation(&closes, period as usize)?;

    let upper = middle + (std_dev * std);
    let lower = middle - (std_dev * std);

    Some(BollingerBandsIndicator {
        upper,
        middle,
        lower,
        period,
        std_dev,
    })
}

/// Calculate Bollinger Bands with default parameters (20 SMA, 2σ)
pub fn calculate_bollinger_bands_default(bars: &[PriceBar]) -> Option<BollingerBandsIndicator> {
    calculate_bollinger_bands(bars, 20, 2.0)
}
