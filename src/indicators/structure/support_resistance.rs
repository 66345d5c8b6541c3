//! Support and Resistance levels detection

use crate::models::indicators::SupportResistanceIndicator;
use crate::models::market::PriceBar;

/// Calculate support and resistance levels
///
/// Finds local minima (support) and maxima (resistance) within a lookback window
pub fn calculate_support_resistance(
    bars: &[PriceBar],
    lookback: usize,
) -> Option<SupportResistanceIndicator> {
    if lookback == 0 || bars.len() < lookback * 2 {
        return None;
    }

    let recent = &bars[bars.len() - lookback..];

    let mut lows: Vec<f64> = recent.iter().map(|b| b.low).collect();
    let mut highs: Vec<f64> = recent.iter().map(|b| b.high).collect();

    lows.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    highs.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));

    // Median of the lowest/highest third is less noisy than the raw extreme
    let support_level = if lows.len() >= 3 {
        Some(lows[lows.len() / 3])
    } else {
        lows.first().copied()
    };

    let resistance_level = if highs.len() >= 3 {
        Some(highs[highs.len() / 3])
    } else {
        highs.first().copied()
    };

    Some(SupportResistanceIndicator {
        support_level,
        resistance_level,
    })
}

/// Calculate support/resistance with default lookback (20)
pub fn calculate_support_resistance_default(
    bars: &[PriceBar],
) -> Option<SupportResistanceIndicator> {
    calculate_support_resistance(bars, 20)
}
