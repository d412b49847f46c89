//! High-level API for impact estimation
//!
//! Plain functions over slices for callers that don't need to keep an
//! estimator around.

use crate::impact::{ImpactEstimator, ImpactParameters};
use crate::types::{Direction, ImpactReport};
use impact_core::Result;

/// Fast number of walks for quick estimates
pub const FAST_ITERATIONS: usize = 200;

/// High-precision number of walks
pub const HIGH_PRECISION_ITERATIONS: usize = 10000;

/// Estimate the probability and direction of a level change
///
/// # Arguments
/// * `before` - Observations before the suspected change
/// * `after` - Observations after it
/// * `iterations` - Number of simulated walks, at least 1
///
/// Both sequences need at least 5 observations (the default smoothing
/// window).
///
/// # Example
/// ```rust
/// use impact_bootstrap::{detect_impact, Direction};
///
/// let before: Vec<f64> = (0..20).map(|i| (i % 2) as f64 * 0.1).collect();
/// let after = vec![5.0; 10];
/// let (probability, direction) = detect_impact(&before, &after, 500).unwrap();
/// assert_eq!(direction, Direction::GreaterThan);
/// assert!(probability < 0.2);
/// ```
pub fn detect_impact(before: &[f64], after: &[f64], iterations: usize) -> Result<(f64, Direction)> {
    let estimator = ImpactEstimator::new(ImpactParameters::new(iterations))?;
    let result = estimator.estimate(before, after)?;
    Ok((result.probability, result.direction))
}

/// Like [`detect_impact`] with a fixed seed and the full report
pub fn impact_report(
    before: &[f64],
    after: &[f64],
    iterations: usize,
    seed: u64,
) -> Result<ImpactReport> {
    ImpactEstimator::new(ImpactParameters::new(iterations).with_seed(seed))?.report(before, after)
}
