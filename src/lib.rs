pub mod config;
pub mod diff;
pub mod error;
pub mod ranges;
pub mod timeline;

use serde::{Deserialize, Serialize};

pub use diff::{reconcile, TextSegment};
pub use error::{ConfigError, Error, Result};
pub use ranges::{estimate_band, normalize, BandEstimator, RangeNormalizer, RawBand, RawPrediction};
pub use timeline::{distribute, EngagementCurve, TimeBucket, Timeline};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Likes,
    Retweets,
    Replies,
}

impl MetricKind {
    pub const ALL: [MetricKind; 3] = [MetricKind::Likes, MetricKind::Retweets, MetricKind::Replies];

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "likes" | "like" => Some(MetricKind::Likes),
            "retweets" | "retweet" | "reposts" | "repost" => Some(MetricKind::Retweets),
            "replies" | "reply" => Some(MetricKind::Replies),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            MetricKind::Likes => "likes",
            MetricKind::Retweets => "retweets",
            MetricKind::Replies => "replies",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MetricKind::Likes => "Likes",
            MetricKind::Retweets => "Retweets",
            MetricKind::Replies => "Replies",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Range {
    pub low: u64,
    pub mid: u64,
    pub high: u64,
}

impl Range {
    pub fn new(low: u64, mid: u64, high: u64) -> Self {
        Self { low, mid, high }
    }

    pub fn width(&self) -> u64 {
        self.high.saturating_sub(self.low)
    }

    pub fn is_collapsed(&self) -> bool {
        self.low == self.mid && self.mid == self.high
    }

    pub fn is_ordered(&self) -> bool {
        self.low <= self.mid && self.mid <= self.high
    }

    pub fn contains(&self, value: u64) -> bool {
        value >= self.low && value <= self.high
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RangeSet {
    pub likes: Range,
    pub retweets: Range,
    pub replies: Range,
}

impl RangeSet {
    pub fn get(&self, metric: MetricKind) -> Range {
        match metric {
            MetricKind::Likes => self.likes,
            MetricKind::Retweets => self.retweets,
            MetricKind::Replies => self.replies,
        }
    }

    pub fn with(mut self, metric: MetricKind, range: Range) -> Self {
        match metric {
            MetricKind::Likes => self.likes = range,
            MetricKind::Retweets => self.retweets = range,
            MetricKind::Replies => self.replies = range,
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (MetricKind, Range)> + '_ {
        MetricKind::ALL.into_iter().map(move |metric| (metric, self.get(metric)))
    }
}

/// Rounds a loosely-typed number to a non-negative count. Non-finite input becomes 0.
pub fn coerce_count(value: f64) -> u64 {
    if !value.is_finite() {
        return 0;
    }
    let rounded = value.round();
    if rounded <= 0.0 {
        0
    } else if rounded >= u64::MAX as f64 {
        u64::MAX
    } else {
        rounded as u64
    }
}

pub fn format_number(value: f64) -> String {
    let rounded = coerce_count(value);
    let mut chars: Vec<char> = rounded.to_string().chars().collect();
    let mut result = String::new();
    let mut count = 0usize;

    while let Some(ch) = chars.pop() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(ch);
        count += 1;
    }

    result.chars().rev().collect()
}

pub fn format_compact(value: f64) -> String {
    let v = if value.is_finite() { value } else { 0.0 };
    if v >= 1e6 {
        compact_unit(v, 1e6, "M")
    } else if v >= 1e3 {
        compact_unit(v, 1e3, "K")
    } else {
        format!("{}", v.round() as i64)
    }
}

fn compact_unit(value: f64, unit: f64, suffix: &str) -> String {
    if value % unit == 0.0 {
        format!("{:.0}{}", value / unit, suffix)
    } else {
        format!("{:.1}{}", value / unit, suffix)
    }
}

/// `low–high` label for a metric card. `None` (no prediction yet) renders as an em dash.
pub fn format_range(range: Option<&Range>) -> String {
    match range {
        Some(range) => format!(
            "{}\u{2013}{}",
            format_compact(range.low as f64),
            format_compact(range.high as f64)
        ),
        None => "\u{2014}".to_string(),
    }
}
