use serde::Serialize;
use engagement_core::diff::{render, render_original, revised_count};
use engagement_core::ranges::{BandSource, NormalizedRanges};
use engagement_core::{format_range, MetricKind, TextSegment, TimeBucket, Timeline};

#[derive(Debug, Serialize)]
pub struct MetricRangeReport {
    pub metric: MetricKind,
    pub low: u64,
    pub mid: u64,
    pub high: u64,
    pub label: String,
    pub source: BandSource,
}

#[derive(Debug, Serialize)]
pub struct RangeReport {
    pub followers: u64,
    pub metrics: Vec<MetricRangeReport>,
}

impl RangeReport {
    pub fn from_normalized(normalized: &NormalizedRanges, followers: u64) -> Self {
        let metrics = normalized
            .ranges
            .iter()
            .map(|(metric, range)| MetricRangeReport {
                metric,
                low: range.low,
                mid: range.mid,
                high: range.high,
                label: format_range(Some(&range)),
                source: normalized.source(metric),
            })
            .collect();
        Self { followers, metrics }
    }
}

#[derive(Debug, Serialize)]
pub struct TimelineReport {
    pub metric: Option<MetricKind>,
    pub low_total: u64,
    pub high_total: u64,
    pub axis_ceiling: u64,
    pub buckets: Vec<TimeBucket>,
}

impl TimelineReport {
    pub fn new(metric: Option<MetricKind>, low_total: u64, high_total: u64, timeline: Timeline) -> Self {
        Self {
            metric,
            low_total,
            high_total,
            axis_ceiling: timeline.axis_ceiling(),
            buckets: timeline.buckets,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DiffReport {
    pub text: String,
    pub original_text: String,
    pub revised_count: usize,
    pub segments: Vec<TextSegment>,
}

impl DiffReport {
    pub fn from_segments(segments: Vec<TextSegment>) -> Self {
        Self {
            text: render(&segments),
            original_text: render_original(&segments),
            revised_count: revised_count(&segments),
            segments,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardReport {
    pub ranges: RangeReport,
    pub timeline: TimelineReport,
}
