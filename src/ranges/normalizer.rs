use serde::Serialize;

use crate::ranges::{BandEstimator, RawBand, RawPrediction};
use crate::{coerce_count, MetricKind, Range, RangeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BandSource {
    Upstream,
    Estimated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedRanges {
    pub ranges: RangeSet,
    pub likes: BandSource,
    pub retweets: BandSource,
    pub replies: BandSource,
}

impl NormalizedRanges {
    pub fn source(&self, metric: MetricKind) -> BandSource {
        match metric {
            MetricKind::Likes => self.likes,
            MetricKind::Retweets => self.retweets,
            MetricKind::Replies => self.replies,
        }
    }

    pub fn estimated(&self) -> Vec<MetricKind> {
        MetricKind::ALL
            .into_iter()
            .filter(|metric| self.source(*metric) == BandSource::Estimated)
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct RangeNormalizer {
    estimator: BandEstimator,
}

impl RangeNormalizer {
    pub fn new(estimator: BandEstimator) -> Self {
        Self { estimator }
    }

    pub fn estimator(&self) -> &BandEstimator {
        &self.estimator
    }

    pub fn normalize(&self, raw: &RawPrediction, audience: u64) -> RangeSet {
        self.normalize_detailed(raw, audience).ranges
    }

    pub fn normalize_detailed(&self, raw: &RawPrediction, audience: u64) -> NormalizedRanges {
        let (likes, likes_source) = self.normalize_metric(raw, audience, MetricKind::Likes);
        let (retweets, retweets_source) = self.normalize_metric(raw, audience, MetricKind::Retweets);
        let (replies, replies_source) = self.normalize_metric(raw, audience, MetricKind::Replies);

        NormalizedRanges {
            ranges: RangeSet {
                likes,
                retweets,
                replies,
            },
            likes: likes_source,
            retweets: retweets_source,
            replies: replies_source,
        }
    }

    fn normalize_metric(
        &self,
        raw: &RawPrediction,
        audience: u64,
        metric: MetricKind,
    ) -> (Range, BandSource) {
        let band = raw.band(metric).unwrap_or_default();

        match coerce_band(&band) {
            Some(range) if !range.is_collapsed() => (ordered(range), BandSource::Upstream),
            coerced => {
                let mid = coerce_count(raw.point(metric).or(band.mid).unwrap_or(0.0));
                let estimate = self.estimator.estimate(mid, audience, metric);
                tracing::debug!(
                    metric = metric.key(),
                    collapsed = coerced.is_some(),
                    mid,
                    low = estimate.low,
                    high = estimate.high,
                    "estimated fallback band"
                );
                (estimate, BandSource::Estimated)
            }
        }
    }
}

pub fn normalize(raw: &RawPrediction, audience: u64) -> RangeSet {
    RangeNormalizer::default().normalize(raw, audience)
}

fn coerce_band(band: &RawBand) -> Option<Range> {
    Some(Range {
        low: coerce_count(band.low?),
        mid: coerce_count(band.mid?),
        high: coerce_count(band.high?),
    })
}

fn ordered(range: Range) -> Range {
    if range.is_ordered() {
        return range;
    }
    let mut values = [range.low, range.mid, range.high];
    values.sort_unstable();
    Range::new(values[0], values[1], values[2])
}
