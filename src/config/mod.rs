//! Engine configuration
//!
//! All strategy-family switches live here and are passed into the arbiter at
//! construction; there are no process-wide toggles.

use std::env;

/// Deployment environment, read from `VOLTRIX_ENV` (defaults to sandbox).
pub fn get_environment() -> String {
    env::var("VOLTRIX_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Minimum bars required before classification and evaluation run.
    pub min_bars: usize,
    /// Maximum bars handed to evaluators per query.
    pub window_cap: usize,
    /// Per-symbol quiet period after any signal, regardless of source.
    pub cooldown_minutes: i64,
    pub enable_baseline: bool,
    pub enable_volatility: bool,
    pub enable_news: bool,
    /// Optional minimum confidence the arbiter enforces. Confidence is
    /// advisory by default; callers that want a floor opt in here.
    pub confidence_floor: Option<f64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_bars: 50,
            window_cap: 200,
            cooldown_minutes: 15,
            enable_baseline: true,
            enable_volatility: true,
            enable_news: true,
            confidence_floor: None,
        }
    }
}

impl EngineConfig {
    /// Load configuration from the environment, falling back to defaults
    /// field by field. Reads a `.env` file when present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let defaults = Self::default();
        Self {
            min_bars: env_parse("VOLTRIX_MIN_BARS", defaults.min_bars),
            window_cap: env_parse("VOLTRIX_WINDOW_CAP", defaults.window_cap),
            cooldown_minutes: env_parse("VOLTRIX_COOLDOWN_MINUTES", defaults.cooldown_minutes),
            enable_baseline: env_parse("VOLTRIX_ENABLE_BASELINE", defaults.enable_baseline),
            enable_volatility: env_parse("VOLTRIX_ENABLE_VOLATILITY", defaults.enable_volatility),
            enable_news: env_parse("VOLTRIX_ENABLE_NEWS", defaults.enable_news),
            confidence_floor: env::var("VOLTRIX_CONFIDENCE_FLOOR")
                .ok()
                .and_then(|v| v.parse().ok()),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
