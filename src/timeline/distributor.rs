use serde::{Deserialize, Serialize};

use crate::timeline::curve::{normalize_weights, EngagementCurve};
use crate::{coerce_count, Range};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBucket {
    pub label: String,
    pub low: u64,
    pub high: u64,
    pub delta: u64,
}

/// One bucket is emitted per weight; buckets without a label get an empty one.
pub fn distribute<S: AsRef<str>>(
    low_total: u64,
    high_total: u64,
    weights: &[f64],
    labels: &[S],
) -> Vec<TimeBucket> {
    let weights = normalize_weights(weights);
    let mut cum_low = 0.0;
    let mut cum_high = 0.0;

    weights
        .iter()
        .enumerate()
        .map(|(index, weight)| {
            cum_low += low_total as f64 * weight;
            cum_high += high_total as f64 * weight;
            let low = coerce_count(cum_low);
            let high = coerce_count(cum_high);
            TimeBucket {
                label: labels
                    .get(index)
                    .map(|label| label.as_ref().to_string())
                    .unwrap_or_default(),
                low,
                high,
                delta: high.saturating_sub(low),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Timeline {
    pub buckets: Vec<TimeBucket>,
}

impl Timeline {
    pub fn from_totals(low_total: u64, high_total: u64, curve: &EngagementCurve) -> Self {
        let buckets = distribute(low_total, high_total, &curve.weights, &curve.labels);
        tracing::trace!(buckets = buckets.len(), low_total, high_total, "distributed timeline");
        Self { buckets }
    }

    pub fn for_range(range: &Range, curve: &EngagementCurve) -> Self {
        Self::from_totals(range.low, range.high, curve)
    }

    pub fn last(&self) -> Option<&TimeBucket> {
        self.buckets.last()
    }

    pub fn axis_ceiling(&self) -> u64 {
        match self.buckets.iter().map(|bucket| bucket.low + bucket.delta).max() {
            Some(top) => top.saturating_mul(105).div_ceil(100),
            None => 100,
        }
    }
}
