//! Per-symbol evaluation runtime
//!
//! One logical pipeline per symbol: symbols share nothing, so they evaluate
//! in parallel freely. Each pipeline's arbiter sits behind a mutex, the only
//! cross-call state (cooldown and open-position bookkeeping).

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::arbiter::SignalArbiter;
use crate::calendar::EconomicCalendar;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::models::signal::Signal;
use crate::services::providers::{CalendarProvider, PriceHistoryProvider};

/// Synchronous pipeline instance for one symbol.
pub struct SymbolPipeline {
    config: EngineConfig,
    arbiter: Mutex<SignalArbiter>,
}

impl SymbolPipeline {
    pub fn new(config: EngineConfig) -> Self {
        let arbiter = Mutex::new(SignalArbiter::new(config.clone()));
        Self { config, arbiter }
    }

    /// Fetch inputs and run one classify → evaluate → arbitrate pass.
    /// Calendar failures degrade to running without news strategies.
    pub async fn evaluate_once(
        &self,
        symbol: &str,
        history: &dyn PriceHistoryProvider,
        calendar_source: Option<&dyn CalendarProvider>,
    ) -> Result<Option<Signal>, EngineError> {
        let bars = history.market_window(symbol, self.config.window_cap).await?;
        let now = bars
            .last()
            .map(|b| b.timestamp)
            .ok_or(EngineError::InsufficientData {
                required: self.config.min_bars,
                actual: 0,
            })?;

        let calendar = match calendar_source {
            Some(source) => match source.events(symbol, now).await {
                Ok(events) => Some(EconomicCalendar::new(events)),
                Err(err) => {
                    warn!(symbol, %err, "calendar unavailable, skipping news strategies");
                    None
                }
            },
            None => None,
        };

        let mut arbiter = self.arbiter.lock().await;
        arbiter.get_signal(symbol, &bars, now, calendar.as_ref())
    }

    pub async fn mark_open(&self, symbol: &str) {
        self.arbiter.lock().await.mark_open(symbol);
    }

    pub async fn mark_closed(&self, symbol: &str) {
        self.arbiter.lock().await.mark_closed(symbol);
    }
}

/// Spawns one worker task per symbol, each re-evaluating on a fixed interval
/// and forwarding signals to the returned channel. Handles are returned for
/// graceful shutdown.
pub struct EvaluationRuntime {
    pipelines: HashMap<String, Arc<SymbolPipeline>>,
    interval: std::time::Duration,
}

impl EvaluationRuntime {
    pub fn new(config: EngineConfig, symbols: &[String], interval: std::time::Duration) -> Self {
        let pipelines = symbols
            .iter()
            .map(|s| (s.clone(), Arc::new(SymbolPipeline::new(config.clone()))))
            .collect();
        Self {
            pipelines,
            interval,
        }
    }

    pub fn pipeline(&self, symbol: &str) -> Option<Arc<SymbolPipeline>> {
        self.pipelines.get(symbol).cloned()
    }

    pub fn start_workers(
        &self,
        history: Arc<dyn PriceHistoryProvider>,
        calendar: Option<Arc<dyn CalendarProvider>>,
    ) -> (mpsc::Receiver<Signal>, Vec<JoinHandle<()>>) {
        let (tx, rx) = mpsc::channel(64);
        let mut handles = Vec::new();

        info!(
            symbols = self.pipelines.len(),
            "starting per-symbol evaluation workers"
        );

        for (symbol, pipeline) in &self.pipelines {
            let symbol = symbol.clone();
            let pipeline = Arc::clone(pipeline);
            let history = Arc::clone(&history);
            let calendar = calendar.clone();
            let tx = tx.clone();
            let interval = self.interval;

            handles.push(tokio::spawn(async move {
                let mut ticker = tokio::time::interval(interval);
                loop {
                    ticker.tick().await;
                    let result = pipeline
                        .evaluate_once(&symbol, history.as_ref(), calendar.as_deref())
                        .await;
                    match result {
                        Ok(Some(signal)) => {
                            if tx.send(signal).await.is_err() {
                                break;
                            }
                        }
                        Ok(None) => {}
                        Err(EngineError::InsufficientData { required, actual }) => {
                            warn!(symbol, required, actual, "not enough history yet");
                        }
                        Err(err) => {
                            warn!(symbol, %err, "evaluation failed");
                        }
                    }
                }
            }));
        }

        (rx, handles)
    }
}
