//! Provider and pipeline tests

use chrono::{DateTime, Duration, TimeZone, Utc};
use voltrix::config::EngineConfig;
use voltrix::core::pipeline::SymbolPipeline;
use voltrix::models::event::{EconomicEvent, EventKind, ImpactLevel};
use voltrix::models::market::PriceBar;
use voltrix::models::signal::StrategyKind;
use voltrix::services::providers::{
    CalendarProvider, InMemoryMarketData, PriceHistoryProvider,
};
use voltrix::EngineError;

fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

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

#[tokio::test]
async fn test_market_window_caps_and_orders() {
    let provider = InMemoryMarketData::new().with_bars("EURUSD", trending_bars(300));
    let window = provider.market_window("EURUSD", 200).await.unwrap();
    assert_eq!(window.len(), 200);
    assert!(window.windows(2).all(|p| p[0].timestamp < p[1].timestamp));
}

#[tokio::test]
async fn test_unknown_symbol_is_insufficient_data() {
    let provider = InMemoryMarketData::new();
    let err = provider.market_window("EURUSD", 200).await.unwrap_err();
    assert!(matches!(err, EngineError::InsufficientData { actual: 0, .. }));
}

#[tokio::test]
async fn test_missing_calendar_is_unavailable() {
    let provider = InMemoryMarketData::new().with_bars("EURUSD", trending_bars(60));
    let err = provider.events("EURUSD", start_time()).await.unwrap_err();
    assert_eq!(err, EngineError::CalendarUnavailable);
}

#[tokio::test]
async fn test_pipeline_emits_signal_on_trend() {
    let provider = InMemoryMarketData::new().with_bars("EURUSD", trending_bars(80));
    let pipeline = SymbolPipeline::new(EngineConfig::default());

    let signal = pipeline
        .evaluate_once("EURUSD", &provider, None)
        .await
        .unwrap()
        .expect("trend should fire");
    assert_eq!(signal.strategy, StrategyKind::Baseline);
    assert_eq!(signal.symbol, "EURUSD");
}

#[tokio::test]
async fn test_pipeline_degrades_without_calendar() {
    // Calendar provider has no entry for the symbol: news strategies are
    // skipped, the rest of the pipeline still runs.
    let provider = InMemoryMarketData::new().with_bars("EURUSD", trending_bars(80));
    let calendar_source = InMemoryMarketData::new();

    let pipeline = SymbolPipeline::new(EngineConfig::default());
    let signal = pipeline
        .evaluate_once("EURUSD", &provider, Some(&calendar_source))
        .await
        .unwrap()
        .expect("calendar failure must not block technical strategies");
    assert_eq!(signal.strategy, StrategyKind::Baseline);
}

#[tokio::test]
async fn test_pipeline_respects_open_positions() {
    let provider = InMemoryMarketData::new().with_bars("EURUSD", trending_bars(80));
    let pipeline = SymbolPipeline::new(EngineConfig::default());

    pipeline.mark_open("EURUSD").await;
    let signal = pipeline.evaluate_once("EURUSD", &provider, None).await.unwrap();
    assert!(signal.is_none());

    pipeline.mark_closed("EURUSD").await;
    let signal = pipeline.evaluate_once("EURUSD", &provider, None).await.unwrap();
    assert!(signal.is_some());
}

#[tokio::test]
async fn test_event_series_defaults_to_empty() {
    use voltrix::services::providers::HistoricalDataProvider;

    let event = EconomicEvent::new(
        EventKind::Cpi,
        "EURUSD",
        start_time(),
        0.0150,
        0.0250,
        ImpactLevel::High,
    );
    let provider = InMemoryMarketData::new().with_events("EURUSD", vec![event]);
    assert_eq!(provider.event_series("EURUSD").await.unwrap().len(), 1);
    assert!(provider.event_series("GBPUSD").await.unwrap().is_empty());
}
