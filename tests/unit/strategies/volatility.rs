//! Behavior tests for the high-volatility suite

use chrono::{DateTime, Duration, TimeZone, Utc};
use voltrix::models::market::{PriceBar, Regime};
use voltrix::models::signal::{Direction, StrategyKind};
use voltrix::regime::classify_regime;
use voltrix::strategies::volatility::{BreakoutFade, MeanReversion, RangeTrade, SqueezeBreakout};
use voltrix::strategies::{EvalContext, StrategyEvaluator};

fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

/// Calm tape, an accelerating ramp, then a climactic blow-off bar well beyond
/// the 3-sigma band.
fn blowoff_bars() -> Vec<PriceBar> {
    let start = start_time();
    let mut bars: Vec<PriceBar> = (0..40)
        .map(|i| {
            PriceBar::new(
                100.0,
                100.1,
                99.9,
                100.0,
                start + Duration::minutes(i as i64),
            )
        })
        .collect();
    let ramp = [103.0, 107.0, 112.0, 118.0, 124.0, 131.0, 139.0, 148.0, 158.0];
    let mut prev = 100.0;
    for (i, close) in ramp.into_iter().enumerate() {
        bars.push(PriceBar::new(
            prev,
            close + 0.5,
            prev - 0.5,
            close,
            start + Duration::minutes(40 + i as i64),
        ));
        prev = close;
    }
    bars.push(PriceBar::new(
        158.0,
        198.0,
        157.0,
        197.0,
        start + Duration::minutes(49),
    ));
    bars
}

fn ctx<'a>(window: &'a [PriceBar], regime: Regime) -> EvalContext<'a> {
    EvalContext {
        symbol: "EURUSD",
        window,
        regime,
        now: window.last().unwrap().timestamp,
        calendar: None,
    }
}

#[test]
fn test_blowoff_classifies_explosive() {
    let window = blowoff_bars();
    assert_eq!(classify_regime(&window).unwrap(), Regime::Explosive);
}

#[test]
fn test_mean_reversion_fades_upside_climax() {
    let window = blowoff_bars();
    let signal = MeanReversion
        .evaluate(&ctx(&window, Regime::Explosive))
        .expect("blow-off bar should qualify");

    assert_eq!(signal.strategy, StrategyKind::MeanReversion);
    assert_eq!(signal.direction, Direction::Sell);
    assert_eq!(signal.entry, 197.0);
    // Counter-trend short: protective stop sits above the entry.
    assert!(signal.stop > signal.entry);
    assert!(signal.confidence > 0.0 && signal.confidence <= 1.0);
    assert!((signal.allocation_total() - 1.0).abs() < 1e-9);
    // All targets are below entry for a short.
    assert!(signal.targets.iter().all(|t| t.price < signal.entry));
}

#[test]
fn test_mean_reversion_fades_downside_climax() {
    let mut window = blowoff_bars();
    // Mirror the tape around 150: upside climax becomes a downside flush.
    for bar in &mut window {
        let (open, high, low, close) = (bar.open, bar.high, bar.low, bar.close);
        bar.open = 300.0 - open;
        bar.close = 300.0 - close;
        bar.high = 300.0 - low;
        bar.low = 300.0 - high;
    }
    let signal = MeanReversion
        .evaluate(&ctx(&window, Regime::Explosive))
        .expect("mirrored flush should qualify");
    assert_eq!(signal.direction, Direction::Buy);
    assert!(signal.stop < signal.entry);
}

#[test]
fn test_mean_reversion_declines_inside_bands() {
    let start = start_time();
    let window: Vec<PriceBar> = (0..60)
        .map(|i| {
            PriceBar::new(
                100.0,
                100.2,
                99.8,
                100.0,
                start + Duration::minutes(i as i64),
            )
        })
        .collect();
    assert!(MeanReversion
        .evaluate(&ctx(&window, Regime::Explosive))
        .is_none());
}

#[test]
fn test_breakout_fade_shorts_failed_break() {
    let start = start_time();
    // Established range 99.0..101.0, then a poke above that closes back inside
    // on a rejection bar with a long upper wick.
    let mut window: Vec<PriceBar> = (0..59)
        .map(|i| {
            let up = i % 2 == 0;
            let (open, close) = if up { (99.2, 100.8) } else { (100.8, 99.2) };
            PriceBar::new(
                open,
                101.0,
                99.0,
                close,
                start + Duration::minutes(i as i64),
            )
        })
        .collect();
    window.push(PriceBar::new(
        100.8,
        102.5,
        100.2,
        100.4,
        start + Duration::minutes(59),
    ));

    let signal = BreakoutFade
        .evaluate(&ctx(&window, Regime::High))
        .expect("failed break should qualify");
    assert_eq!(signal.strategy, StrategyKind::BreakoutFade);
    assert_eq!(signal.direction, Direction::Sell);
    assert!(signal.stop > signal.entry);
}

/// Wide chop, then a tight contraction, then four rising closes with an
/// expanding final bar: the classic squeeze-and-go tape.
fn squeeze_bars() -> Vec<PriceBar> {
    let start = start_time();
    let mut bars = Vec::new();
    let mut prev = 100.0;
    for i in 0..30 {
        let close = if i % 2 == 0 { 98.0 } else { 102.0 };
        bars.push(PriceBar::new(
            prev,
            prev.max(close) + 0.3,
            prev.min(close) - 0.3,
            close,
            start + Duration::minutes(i),
        ));
        prev = close;
    }
    for i in 30..46 {
        let close = if i % 2 == 0 { 99.95 } else { 100.05 };
        bars.push(PriceBar::new(
            prev,
            prev.max(close) + 0.05,
            prev.min(close) - 0.05,
            close,
            start + Duration::minutes(i),
        ));
        prev = close;
    }
    let buildup = [
        (100.3, 100.5, 99.95),
        (100.7, 100.9, 100.2),
        (101.2, 101.4, 100.6),
        (101.8, 102.1, 101.1),
    ];
    for (j, (close, high, low)) in buildup.into_iter().enumerate() {
        bars.push(PriceBar::new(
            prev,
            high,
            low,
            close,
            start + Duration::minutes(46 + j as i64),
        ));
        prev = close;
    }
    bars
}

#[test]
fn test_squeeze_breakout_fires_on_contraction_and_buildup() {
    let window = squeeze_bars();
    let signal = SqueezeBreakout
        .evaluate(&ctx(&window, Regime::Elevated))
        .expect("contraction plus rising closes should qualify");

    assert_eq!(signal.strategy, StrategyKind::SqueezeBreakout);
    assert_eq!(signal.direction, Direction::Buy);
    assert_eq!(signal.entry, 101.8);
    assert!(signal.stop < signal.entry);
    assert!((signal.allocation_total() - 1.0).abs() < 1e-9);
}

#[test]
fn test_squeeze_declines_without_contraction() {
    // Same chop throughout: bandwidth never contracts, so no squeeze.
    let start = start_time();
    let mut prev = 100.0;
    let window: Vec<PriceBar> = (0..50)
        .map(|i| {
            let close = if i % 2 == 0 { 98.0 } else { 102.0 };
            let bar = PriceBar::new(
                prev,
                prev.max(close) + 0.3,
                prev.min(close) - 0.3,
                close,
                start + Duration::minutes(i),
            );
            prev = close;
            bar
        })
        .collect();
    assert!(SqueezeBreakout
        .evaluate(&ctx(&window, Regime::Elevated))
        .is_none());
}

#[test]
fn test_range_trade_declines_mid_range() {
    let start = start_time();
    // Wide range but last close sits in the middle, far from either boundary.
    let window: Vec<PriceBar> = (0..60)
        .map(|i| {
            let phase = i % 4;
            let (open, close) = match phase {
                0 => (95.0, 105.0),
                1 => (105.0, 100.0),
                2 => (100.0, 95.0),
                _ => (95.0, 100.0),
            };
            PriceBar::new(
                open,
                open.max(close) + 0.2,
                open.min(close) - 0.2,
                close,
                start + Duration::minutes(i as i64),
            )
        })
        .collect();
    assert!(RangeTrade.evaluate(&ctx(&window, Regime::High)).is_none());
}
