//! Volatility regime classification
//!
//! A pure function of the price window: realized volatility is measured as
//! the standard deviation of close-to-close returns (in percent) and bucketed
//! through fixed, non-overlapping thresholds. Nothing is cached between
//! calls.

use crate::common::math;
use crate::error::EngineError;
use crate::models::market::{PriceBar, Regime};

/// Minimum history required for a stable volatility estimate.
pub const MIN_BARS: usize = 50;

/// Regime thresholds, in percent realized volatility.
const EXPLOSIVE_ABOVE: f64 = 3.0;
const HIGH_ABOVE: f64 = 2.0;
const ELEVATED_ABOVE: f64 = 1.5;
const NORMAL_ABOVE: f64 = 0.5;

/// Classify the market regime for a window. Deterministic and idempotent:
/// identical windows always yield the same regime.
pub fn classify_regime(window: &[PriceBar]) -> Result<Regime, EngineError> {
    if window.len() < MIN_BARS {
        return Err(EngineError::InsufficientData {
            required: MIN_BARS,
            actual: window.len(),
        });
    }

    Ok(regime_for_volatility(realized_volatility(window)))
}

/// Standard deviation of close-to-close returns over the window, in percent.
pub fn realized_volatility(window: &[PriceBar]) -> f64 {
    let closes: Vec<f64> = window.iter().map(|b| b.close).collect();
    let returns = math::percent_returns(&closes);
    if returns.is_empty() {
        return 0.0;
    }
    math::standard_deviation(&returns, returns.len()).unwrap_or(0.0)
}

/// Map a realized-volatility figure to its regime bucket.
pub fn regime_for_volatility(vol_pct: f64) -> Regime {
    if vol_pct > EXPLOSIVE_ABOVE {
        Regime::Explosive
    } else if vol_pct > HIGH_ABOVE {
        Regime::High
    } else if vol_pct > ELEVATED_ABOVE {
        Regime::Elevated
    } else if vol_pct > NORMAL_ABOVE {
        Regime::Normal
    } else {
        Regime::Low
    }
}
