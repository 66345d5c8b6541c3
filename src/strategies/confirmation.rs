//! Confirmation counting and composite confidence
//!
//! Every evaluator runs its setup through an N-of-M confirmation filter
//! before emitting. Confidence blends confirmation strength, the strategy's
//! historical win rate, and the policy's risk/reward.

const WEIGHT_CONFIRMATION: f64 = 0.4;
const WEIGHT_WIN_RATE: f64 = 0.3;
const WEIGHT_RISK_REWARD: f64 = 0.3;

/// Reward multiple treated as a "full" risk/reward score.
const RISK_REWARD_CAP: f64 = 3.0;

#[derive(Debug, Clone)]
struct Confirmation {
    description: &'static str,
    passed: bool,
}

/// Accumulates independent confirmations for one setup.
#[derive(Debug, Clone)]
pub struct ConfirmationSet {
    required: usize,
    checks: Vec<Confirmation>,
}

impl ConfirmationSet {
    pub fn new(required: usize) -> Self {
        Self {
            required,
            checks: Vec::new(),
        }
    }

    pub fn check(mut self, description: &'static str, passed: bool) -> Self {
        self.checks.push(Confirmation {
            description,
            passed,
        });
        self
    }

    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    pub fn total(&self) -> usize {
        self.checks.len()
    }

    /// True when at least N of the M registered checks passed.
    pub fn satisfied(&self) -> bool {
        self.passed_count() >= self.required
    }

    /// Fraction of checks that passed, in [0, 1].
    pub fn strength(&self) -> f64 {
        if self.checks.is_empty() {
            return 0.0;
        }
        self.passed_count() as f64 / self.checks.len() as f64
    }

    /// Human-readable setup summary for the signal's rationale field.
    pub fn rationale(&self, header: &str) -> String {
        let passed: Vec<&str> = self
            .checks
            .iter()
            .filter(|c| c.passed)
            .map(|c| c.description)
            .collect();
        format!(
            "{}: {}/{} confirmations ({})",
            header,
            self.passed_count(),
            self.total(),
            passed.join(", ")
        )
    }
}

/// Weighted blend of confirmation strength, historical win rate and
/// risk/reward, clamped to [0, 1].
pub fn composite_confidence(strength: f64, win_rate: f64, reward_multiple: f64) -> f64 {
    let rr_component = (reward_multiple / RISK_REWARD_CAP).clamp(0.0, 1.0);
    (WEIGHT_CONFIRMATION * strength
        + WEIGHT_WIN_RATE * win_rate.clamp(0.0, 1.0)
        + WEIGHT_RISK_REWARD * rr_component)
        .clamp(0.0, 1.0)
}
