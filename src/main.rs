use chrono::{Duration, TimeZone, Utc};
use voltrix::config::EngineConfig;
use voltrix::logging::init_logging;
use voltrix::models::event::{EconomicEvent, EventKind, ImpactLevel};
use voltrix::models::market::PriceBar;
use voltrix::run_backtest;

/// Demo replay: a quiet morning, an NFP release with a strong initial move,
/// and the drift that follows. Fully synthetic and deterministic.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = EngineConfig::from_env();
    let start = Utc.with_ymd_and_hms(2024, 11, 1, 12, 0, 0).unwrap();
    let release = start + Duration::minutes(120);

    let mut bars = Vec::new();
    let mut price = 1.1000;
    for i in 0..300i64 {
        let timestamp = start + Duration::minutes(i);
        let drift = if timestamp < release {
            // Calm pre-release tape.
            0.00002 * ((i % 7) - 3) as f64
        } else if timestamp < release + Duration::minutes(12) {
            // Release spike: ~180 pips over twelve minutes.
            0.0015
        } else {
            // Slow bleed back.
            -0.0002 + 0.00004 * ((i % 5) - 2) as f64
        };
        let open = price;
        price += drift;
        let high = open.max(price) + 0.00015;
        let low = open.min(price) - 0.00015;
        bars.push(PriceBar::new(open, high, low, price, timestamp).with_volume(1_000.0));
    }

    let events = vec![EconomicEvent::new(
        EventKind::NonFarmPayrolls,
        "EURUSD",
        release,
        0.0150,
        0.0250,
        ImpactLevel::Extreme,
    )
    .with_figures(205_000.0, 185_000.0)];

    let report = run_backtest("EURUSD", &bars, events, 10_000.0, &config)?;

    println!("Backtest: {}", report.symbol);
    println!(
        "  Balance: {:.2} -> {:.2}",
        report.initial_balance, report.final_balance
    );
    println!(
        "  Trades: {} (win rate {:.1}%)",
        report.total_trades,
        report.win_rate * 100.0
    );
    println!("  Profit factor: {:.2}", report.profit_factor);
    println!("  Max drawdown: {:.2}%", report.max_drawdown_pct);
    println!("  By strategy:");
    for (strategy, stats) in &report.by_strategy {
        println!(
            "    {}: {} trades, pnl {:.2}",
            strategy, stats.trades, stats.pnl
        );
    }
    println!("  By event:");
    for (event, stats) in &report.by_event {
        println!("    {}: {} trades, pnl {:.2}", event, stats.trades, stats.pnl);
    }
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
