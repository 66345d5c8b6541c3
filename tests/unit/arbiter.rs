//! Arbitration tests: first-match priority, cooldown, and position gating

use chrono::{DateTime, Duration, TimeZone, Utc};
use voltrix::arbiter::SignalArbiter;
use voltrix::config::EngineConfig;
use voltrix::models::market::PriceBar;
use voltrix::models::signal::StrategyKind;
use voltrix::EngineError;

fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

/// Steady uptrend in a calm regime: the baseline evaluator fires on it.
fn trending_bars(count: usize) -> Vec<PriceBar> {
    let start = start_time();
    let mut close = 100.0;
    (0..count)
        .map(|i| {
            let open = close;
            close = open + 0.3;
            PriceBar::new(
                open,
                close + 0.1,
                open - 0.1,
                close,
                start + Duration::minutes(i as i64),
            )
        })
        .collect()
}

fn flat_bars(count: usize) -> Vec<PriceBar> {
    let start = start_time();
    (0..count)
        .map(|i| {
            PriceBar::new(
                100.0,
                100.1,
                99.9,
                100.0,
                start + Duration::minutes(i as i64),
            )
        })
        .collect()
}

#[test]
fn test_short_window_errors() {
    let mut arbiter = SignalArbiter::new(EngineConfig::default());
    let window = flat_bars(30);
    let err = arbiter
        .get_signal("EURUSD", &window, start_time(), None)
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::InsufficientData {
            required: 50,
            actual: 30,
        }
    );
}

#[test]
fn test_quiet_market_yields_nothing() {
    let mut arbiter = SignalArbiter::new(EngineConfig::default());
    let window = flat_bars(100);
    let now = window.last().unwrap().timestamp;
    assert!(arbiter.get_signal("EURUSD", &window, now, None).unwrap().is_none());
}

#[test]
fn test_trend_selects_baseline() {
    let mut arbiter = SignalArbiter::new(EngineConfig::default());
    let window = trending_bars(60);
    let now = window.last().unwrap().timestamp;

    let signal = arbiter
        .get_signal("EURUSD", &window, now, None)
        .unwrap()
        .expect("trend should fire");
    assert_eq!(signal.strategy, StrategyKind::Baseline);
}

#[test]
fn test_cooldown_suppresses_repeat_signals() {
    let mut arbiter = SignalArbiter::new(EngineConfig::default());
    let window = trending_bars(60);
    let now = window.last().unwrap().timestamp;

    assert!(arbiter.get_signal("EURUSD", &window, now, None).unwrap().is_some());
    // Inside the cooldown window: suppressed, not an error.
    let again = arbiter
        .get_signal("EURUSD", &window, now + Duration::minutes(5), None)
        .unwrap();
    assert!(again.is_none());
    // Cooldown elapsed: signals flow again.
    let later = arbiter
        .get_signal("EURUSD", &window, now + Duration::minutes(15), None)
        .unwrap();
    assert!(later.is_some());
}

#[test]
fn test_cooldown_is_per_symbol() {
    let mut arbiter = SignalArbiter::new(EngineConfig::default());
    let window = trending_bars(60);
    let now = window.last().unwrap().timestamp;

    assert!(arbiter.get_signal("EURUSD", &window, now, None).unwrap().is_some());
    assert!(arbiter.get_signal("GBPUSD", &window, now, None).unwrap().is_some());
}

#[test]
fn test_open_position_blocks_new_signals() {
    let mut arbiter = SignalArbiter::new(EngineConfig::default());
    let window = trending_bars(60);
    let now = window.last().unwrap().timestamp;

    arbiter.mark_open("EURUSD");
    assert!(arbiter.has_open_position("EURUSD"));
    assert!(arbiter.get_signal("EURUSD", &window, now, None).unwrap().is_none());

    arbiter.mark_closed("EURUSD");
    assert!(!arbiter.has_open_position("EURUSD"));
    assert!(arbiter.get_signal("EURUSD", &window, now, None).unwrap().is_some());
}

#[test]
fn test_disabled_family_never_fires() {
    let config = EngineConfig {
        enable_baseline: false,
        ..EngineConfig::default()
    };
    let mut arbiter = SignalArbiter::new(config);
    let window = trending_bars(60);
    let now = window.last().unwrap().timestamp;
    assert!(arbiter.get_signal("EURUSD", &window, now, None).unwrap().is_none());
}

#[test]
fn test_confidence_floor_filters_signals() {
    let config = EngineConfig {
        confidence_floor: Some(0.99),
        ..EngineConfig::default()
    };
    let mut arbiter = SignalArbiter::new(config);
    let window = trending_bars(60);
    let now = window.last().unwrap().timestamp;

    // Baseline composite confidence tops out well below 0.99.
    assert!(arbiter.get_signal("EURUSD", &window, now, None).unwrap().is_none());
    // A filtered signal does not start the cooldown.
    let relaxed = EngineConfig::default();
    let mut arbiter = SignalArbiter::new(relaxed);
    assert!(arbiter.get_signal("EURUSD", &window, now, None).unwrap().is_some());
}
