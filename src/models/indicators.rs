use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RsiIndicator {
    pub value: f64,
    pub period: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtrIndicator {
    pub value: f64,
    pub period: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmaIndicator {
    pub value: f64,
    pub period: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BollingerBandsIndicator {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
    pub period: u32,
    pub std_dev: f64,
}

impl BollingerBandsIndicator {
    /// Band width relative to the middle band. Shrinks during squeezes.
    pub fn bandwidth(&self) -> f64 {
        if self.middle == 0.0 {
            return 0.0;
        }
        (self.upper - self.lower) / self.middle.abs()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportResistanceIndicator {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_level: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resistance_level: Option<f64>,
}

impl SupportResistanceIndicator {
    pub fn range_width(&self) -> Option<f64> {
        match (self.support_level, self.resistance_level) {
            (Some(sup), Some(res)) if res > sup => Some(res - sup),
            _ => None,
        }
    }
}
