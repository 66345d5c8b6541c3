//! Engine error taxonomy

use thiserror::Error;

use crate::models::risk::Severity;
use crate::models::signal::StrategyKind;

/// Errors surfaced by the core pipeline. Absence of a signal is never an
/// error; these cover genuinely exceptional inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// The window is shorter than the minimum required history. Non-fatal:
    /// retry with more bars.
    #[error("insufficient data: {required} bars required, {actual} provided")]
    InsufficientData { required: usize, actual: usize },

    /// A risk policy was requested for a combination outside any evaluator's
    /// operating domain. Configuration error, fatal to that call only.
    #[error("no risk policy for strategy {strategy:?} at severity {severity:?}")]
    InvalidPolicy {
        strategy: StrategyKind,
        severity: Severity,
    },

    /// Calendar data could not be obtained. News strategies are skipped;
    /// arbitration itself continues.
    #[error("economic calendar unavailable")]
    CalendarUnavailable,

    /// A historical series failed validation. The replay run aborts with the
    /// offending record identified; data is never silently skipped.
    #[error("malformed series at index {index}: {reason}")]
    MalformedSeries { index: usize, reason: String },
}
