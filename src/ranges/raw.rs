use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{MetricKind, RangeSet};

/// A band as the prediction provider sent it. `None` means the field was absent or null;
/// a present value that is not a JSON number (a numeric string too) is kept as NaN and
/// coerces to 0 later.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RawBand {
    pub low: Option<f64>,
    pub mid: Option<f64>,
    pub high: Option<f64>,
}

impl RawBand {
    pub fn new(low: f64, mid: f64, high: f64) -> Self {
        Self {
            low: Some(low),
            mid: Some(mid),
            high: Some(high),
        }
    }

    pub fn from_value(value: &Value) -> Self {
        Self {
            low: field(value, "low"),
            mid: field(value, "mid"),
            high: field(value, "high"),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.low.is_some() && self.mid.is_some() && self.high.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RawPrediction {
    pub likes: Option<f64>,
    pub retweets: Option<f64>,
    pub replies: Option<f64>,
    pub ranges: RawRanges,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RawRanges {
    pub likes: Option<RawBand>,
    pub retweets: Option<RawBand>,
    pub replies: Option<RawBand>,
}

impl RawPrediction {
    pub fn from_value(value: &Value) -> Self {
        if !value.is_object() {
            tracing::warn!("prediction payload is not an object, falling back to estimates");
            return Self::default();
        }

        let ranges = value.get("ranges").filter(|ranges| ranges.is_object());
        let band = |metric: MetricKind| {
            ranges
                .and_then(|ranges| ranges.get(metric.key()))
                .filter(|band| !band.is_null())
                .map(RawBand::from_value)
        };

        Self {
            likes: field(value, MetricKind::Likes.key()),
            retweets: field(value, MetricKind::Retweets.key()),
            replies: field(value, MetricKind::Replies.key()),
            ranges: RawRanges {
                likes: band(MetricKind::Likes),
                retweets: band(MetricKind::Retweets),
                replies: band(MetricKind::Replies),
            },
        }
    }

    pub fn from_json(payload: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(payload)?;
        Ok(Self::from_value(&value))
    }

    pub fn point(&self, metric: MetricKind) -> Option<f64> {
        match metric {
            MetricKind::Likes => self.likes,
            MetricKind::Retweets => self.retweets,
            MetricKind::Replies => self.replies,
        }
    }

    pub fn band(&self, metric: MetricKind) -> Option<RawBand> {
        match metric {
            MetricKind::Likes => self.ranges.likes,
            MetricKind::Retweets => self.ranges.retweets,
            MetricKind::Replies => self.ranges.replies,
        }
    }

    pub fn set_point(&mut self, metric: MetricKind, value: Option<f64>) {
        match metric {
            MetricKind::Likes => self.likes = value,
            MetricKind::Retweets => self.retweets = value,
            MetricKind::Replies => self.replies = value,
        }
    }

    pub fn set_band(&mut self, metric: MetricKind, band: Option<RawBand>) {
        match metric {
            MetricKind::Likes => self.ranges.likes = band,
            MetricKind::Retweets => self.ranges.retweets = band,
            MetricKind::Replies => self.ranges.replies = band,
        }
    }
}

impl<'de> Deserialize<'de> for RawPrediction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

impl From<&RangeSet> for RawPrediction {
    fn from(ranges: &RangeSet) -> Self {
        let mut raw = RawPrediction::default();
        for (metric, range) in ranges.iter() {
            raw.set_point(metric, Some(range.mid as f64));
            raw.set_band(
                metric,
                Some(RawBand::new(range.low as f64, range.mid as f64, range.high as f64)),
            );
        }
        raw
    }
}

fn field(value: &Value, key: &str) -> Option<f64> {
    value.get(key).and_then(loose_number)
}

fn loose_number(value: &Value) -> Option<f64> {
    match value {
        Value::Null => None,
        Value::Number(number) => Some(number.as_f64().unwrap_or(f64::NAN)),
        // Present but not a number, including numeric strings: counts as 0.
        _ => Some(f64::NAN),
    }
}
