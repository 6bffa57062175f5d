use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::{MetricKind, Range};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandTier {
    pub ceiling: u64,
    pub fraction: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricScales {
    pub likes: f64,
    pub retweets: f64,
    pub replies: f64,
}

impl Default for MetricScales {
    fn default() -> Self {
        Self {
            likes: 1.0,
            retweets: 0.70,
            replies: 0.50,
        }
    }
}

impl MetricScales {
    pub fn get(&self, metric: MetricKind) -> f64 {
        match metric {
            MetricKind::Likes => self.likes,
            MetricKind::Retweets => self.retweets,
            MetricKind::Replies => self.replies,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricFloors {
    pub likes: u64,
    pub retweets: u64,
    pub replies: u64,
}

impl Default for MetricFloors {
    fn default() -> Self {
        Self {
            likes: 8,
            retweets: 5,
            replies: 2,
        }
    }
}

impl MetricFloors {
    pub fn get(&self, metric: MetricKind) -> u64 {
        match metric {
            MetricKind::Likes => self.likes,
            MetricKind::Retweets => self.retweets,
            MetricKind::Replies => self.replies,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandConfig {
    pub overflow_fraction: f64,
    pub tiers: Vec<BandTier>,
    pub scales: MetricScales,
    pub floors: MetricFloors,
}

impl Default for BandConfig {
    fn default() -> Self {
        let tiers = [
            (1_000, 0.50),
            (5_000, 0.35),
            (10_000, 0.30),
            (50_000, 0.25),
            (100_000, 0.22),
            (300_000, 0.20),
            (600_000, 0.18),
            (1_000_000, 0.16),
        ]
        .into_iter()
        .map(|(ceiling, fraction)| BandTier { ceiling, fraction })
        .collect();

        Self {
            overflow_fraction: 0.15,
            tiers,
            scales: MetricScales::default(),
            floors: MetricFloors::default(),
        }
    }
}

impl BandConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for pair in self.tiers.windows(2) {
            if pair[1].ceiling <= pair[0].ceiling {
                return Err(ConfigError::Invalid(format!(
                    "band tier ceilings must ascend: {} follows {}",
                    pair[1].ceiling, pair[0].ceiling
                )));
            }
        }
        let fractions = self
            .tiers
            .iter()
            .map(|tier| tier.fraction)
            .chain(std::iter::once(self.overflow_fraction));
        for fraction in fractions {
            if !(0.0..=1.0).contains(&fraction) {
                return Err(ConfigError::Invalid(format!(
                    "band fraction out of [0, 1]: {}",
                    fraction
                )));
            }
        }
        for metric in MetricKind::ALL {
            let scale = self.scales.get(metric);
            if !scale.is_finite() || scale < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} band scale must be non-negative: {}",
                    metric.key(),
                    scale
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct BandEstimator {
    config: BandConfig,
}

impl BandEstimator {
    pub fn new(config: BandConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BandConfig {
        &self.config
    }

    pub fn base_fraction(&self, audience: u64) -> f64 {
        let audience = audience.max(1);
        self.config
            .tiers
            .iter()
            .find(|tier| audience <= tier.ceiling)
            .map(|tier| tier.fraction)
            .unwrap_or(self.config.overflow_fraction)
    }

    pub fn fraction(&self, audience: u64, metric: MetricKind) -> f64 {
        self.base_fraction(audience) * self.config.scales.get(metric)
    }

    pub fn estimate(&self, mid: u64, audience: u64, metric: MetricKind) -> Range {
        let scaled = (mid as f64 * self.fraction(audience, metric)).round();
        let spread = if scaled.is_finite() && scaled > 0.0 {
            scaled as u64
        } else {
            0
        };
        let delta = spread.max(self.config.floors.get(metric));

        Range {
            low: mid.saturating_sub(delta),
            mid,
            high: mid.saturating_add(delta),
        }
    }
}

pub fn estimate_band(mid: u64, audience: u64, metric: MetricKind) -> Range {
    BandEstimator::default().estimate(mid, audience, metric)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_lookup_uses_inclusive_ceilings() {
        let estimator = BandEstimator::default();
        assert!((estimator.base_fraction(0) - 0.50).abs() < 1e-12);
        assert!((estimator.base_fraction(1_000) - 0.50).abs() < 1e-12);
        assert!((estimator.base_fraction(1_001) - 0.35).abs() < 1e-12);
        assert!((estimator.base_fraction(1_000_000) - 0.16).abs() < 1e-12);
        assert!((estimator.base_fraction(5_000_000) - 0.15).abs() < 1e-12);
    }

    #[test]
    fn metric_scales_narrow_retweets_and_replies() {
        let estimator = BandEstimator::default();
        assert!((estimator.fraction(500, MetricKind::Retweets) - 0.35).abs() < 1e-12);
        assert!((estimator.fraction(500, MetricKind::Replies) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn rejects_descending_tiers() {
        let mut config = BandConfig::default();
        config.tiers.swap(0, 1);
        assert!(config.validate().is_err());
    }
}
