pub mod curve;
pub mod distributor;

pub use curve::{EngagementCurve, DEFAULT_LABELS, DEFAULT_WEIGHTS, MAX_BUCKETS, MIN_BUCKETS};
pub use distributor::{distribute, TimeBucket, Timeline};
