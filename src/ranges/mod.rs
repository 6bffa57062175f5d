pub mod estimator;
pub mod normalizer;
pub mod raw;

pub use estimator::{estimate_band, BandConfig, BandEstimator, BandTier, MetricFloors, MetricScales};
pub use normalizer::{normalize, BandSource, NormalizedRanges, RangeNormalizer};
pub use raw::{RawBand, RawPrediction, RawRanges};
