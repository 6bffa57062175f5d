use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const MIN_BUCKETS: usize = 7;
pub const MAX_BUCKETS: usize = 12;

pub const DEFAULT_LABELS: [&str; 12] = [
    "12 AM", "2 AM", "4 AM", "6 AM", "8 AM", "10 AM", "12 PM", "2 PM", "4 PM", "6 PM", "8 PM",
    "10 PM",
];

pub const DEFAULT_WEIGHTS: [f64; 12] = [
    0.02, 0.02, 0.02, 0.03, 0.05, 0.08, 0.10, 0.12, 0.15, 0.17, 0.12, 0.12,
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngagementCurve {
    pub labels: Vec<String>,
    pub weights: Vec<f64>,
}

impl Default for EngagementCurve {
    fn default() -> Self {
        Self {
            labels: DEFAULT_LABELS.iter().map(|label| label.to_string()).collect(),
            weights: DEFAULT_WEIGHTS.to_vec(),
        }
    }
}

impl EngagementCurve {
    pub fn new(labels: Vec<String>, weights: Vec<f64>) -> Result<Self, ConfigError> {
        let curve = Self { labels, weights };
        curve.validate()?;
        Ok(curve)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.labels.len() != self.weights.len() {
            return Err(ConfigError::Invalid(format!(
                "curve has {} labels but {} weights",
                self.labels.len(),
                self.weights.len()
            )));
        }
        if !(MIN_BUCKETS..=MAX_BUCKETS).contains(&self.weights.len()) {
            return Err(ConfigError::Invalid(format!(
                "curve needs {}-{} buckets, got {}",
                MIN_BUCKETS,
                MAX_BUCKETS,
                self.weights.len()
            )));
        }
        if let Some(weight) = self
            .weights
            .iter()
            .find(|weight| !weight.is_finite() || **weight < 0.0)
        {
            return Err(ConfigError::Invalid(format!(
                "curve weights must be non-negative: {}",
                weight
            )));
        }
        if self.weights.iter().sum::<f64>() <= 0.0 {
            return Err(ConfigError::Invalid("curve weights sum to zero".to_string()));
        }
        Ok(())
    }

    /// Weights rescaled to sum to 1. Negative or non-finite weights count as 0.
    pub fn normalized_weights(&self) -> Vec<f64> {
        normalize_weights(&self.weights)
    }
}

pub(crate) fn normalize_weights(weights: &[f64]) -> Vec<f64> {
    let cleaned: Vec<f64> = weights
        .iter()
        .map(|weight| if weight.is_finite() && *weight > 0.0 { *weight } else { 0.0 })
        .collect();
    let sum: f64 = cleaned.iter().sum();
    let sum = if sum > 0.0 { sum } else { 1.0 };
    cleaned.into_iter().map(|weight| weight / sum).collect()
}
