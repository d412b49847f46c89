//! Core traits for changepoint detection
//!
//! Detectors own their configuration and execution engine; callers only hand
//! in the observations.

use crate::types::ChangePointResult;
use impact_core::Result;

/// Properties of a changepoint detector that don't depend on the data
pub trait ChangePointDetectorProperties {
    /// Get the name of the detection algorithm
    fn algorithm_name(&self) -> &'static str;

    /// Get the minimum sample size for which a changepoint can be proposed
    fn minimum_sample_size(&self) -> usize;
}

/// Trait for detectors that don't need external estimators
pub trait SimpleDetector: ChangePointDetectorProperties {
    /// Detect changepoints in the given sample
    fn detect_simple(&self, sample: &[f64]) -> Result<ChangePointResult>;

    /// Process multiple datasets with the same configuration
    ///
    /// Default implementation processes sequentially
    fn detect_batch(&self, samples: &[&[f64]]) -> Result<Vec<ChangePointResult>> {
        samples
            .iter()
            .map(|sample| self.detect_simple(sample))
            .collect()
    }
}

/// Detectors whose configuration can be inspected and replaced
pub trait ConfigurableDetector {
    type Parameters;

    fn parameters(&self) -> &Self::Parameters;

    /// Replace the parameters, validating them first
    fn set_parameters(&mut self, params: Self::Parameters) -> Result<()>;
}
