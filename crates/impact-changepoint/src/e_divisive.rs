//! E-Divisive: hierarchical divisive changepoint detection
//!
//! The detector repeatedly proposes the split with the largest energy
//! statistic among all current intervals and keeps it only if a permutation
//! test finds it significant:
//!
//! 1. best split over all intervals (through the [`SplitCache`])
//! 2. no admissible split → stop
//! 3. permutation p-value above the significance level → stop, candidate
//!    discarded
//! 4. otherwise accept, invalidate the consumed interval, repeat
//!
//! Each iteration costs O(n²) for the re-scanned interval plus
//! `permutations × O(n²)` for the test.

use crate::cache::SplitCache;
use crate::distance::DistanceMatrix;
use crate::kernel::EnergyKernel;
use crate::permutation::PermutationTester;
use crate::traits::{ChangePointDetectorProperties, ConfigurableDetector, SimpleDetector};
use crate::types::{ChangePoint, ChangePointResult, ChangepointSet, Termination};
use impact_core::{auto_engine, DefaultEngine, Error, ExecutionEngine, Result, Series};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Default significance level
pub const DEFAULT_SIGNIFICANCE: f64 = 0.05;

/// Default number of permutations per significance test
pub const DEFAULT_PERMUTATIONS: usize = 1000;

/// Default minimum number of observations per cluster
pub const DEFAULT_MIN_SIZE: usize = 30;

/// E-Divisive parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyDivisiveParameters {
    /// Largest p-value at which a split is still accepted, in [0, 1]
    pub significance: f64,
    /// Permutations per significance test; 0 disables testing, so no split
    /// is ever accepted
    pub permutations: usize,
    /// Minimum cluster size, at least 2
    pub min_size: usize,
    /// Base seed for the permutation generators; random when `None`
    pub seed: Option<u64>,
}

impl Default for EnergyDivisiveParameters {
    fn default() -> Self {
        Self {
            significance: DEFAULT_SIGNIFICANCE,
            permutations: DEFAULT_PERMUTATIONS,
            min_size: DEFAULT_MIN_SIZE,
            seed: None,
        }
    }
}

impl EnergyDivisiveParameters {
    pub fn new(significance: f64, permutations: usize, min_size: usize) -> Self {
        Self {
            significance,
            permutations,
            min_size,
            seed: None,
        }
    }

    pub fn with_significance(mut self, significance: f64) -> Self {
        self.significance = significance;
        self
    }

    pub fn with_permutations(mut self, permutations: usize) -> Self {
        self.permutations = permutations;
        self
    }

    pub fn with_min_size(mut self, min_size: usize) -> Self {
        self.min_size = min_size;
        self
    }

    /// Set random seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every parameter before any computation starts
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.significance) {
            return Err(Error::out_of_unit_interval("significance", self.significance));
        }
        if self.min_size < 2 {
            return Err(Error::InvalidArgument(format!(
                "min_size ({}) must be at least 2",
                self.min_size
            )));
        }
        Ok(())
    }
}

/// Divisive energy-statistic changepoint detector
#[derive(Debug, Clone)]
pub struct EnergyDivisiveDetector<E = DefaultEngine> {
    params: EnergyDivisiveParameters,
    engine: E,
}

impl EnergyDivisiveDetector<DefaultEngine> {
    /// Create a detector running permutation tests on the default engine
    pub fn new(params: EnergyDivisiveParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            engine: auto_engine(),
        })
    }
}

impl<E: ExecutionEngine> EnergyDivisiveDetector<E> {
    /// Run permutation tests on a different engine
    pub fn with_engine<F: ExecutionEngine>(self, engine: F) -> EnergyDivisiveDetector<F> {
        EnergyDivisiveDetector {
            params: self.params,
            engine,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Detect changepoints in `sample`
    #[instrument(skip(self, sample), fields(n = sample.len(), min_size = self.params.min_size))]
    pub fn detect(&self, sample: &[f64]) -> Result<ChangePointResult> {
        self.params.validate()?;
        let series = Series::from_slice(sample)?;
        let n = series.len();

        let distances = DistanceMatrix::build(&series)?;
        let kernel = EnergyKernel::new(self.params.min_size);
        let base_seed = self.params.seed.unwrap_or_else(|| rand::thread_rng().gen());

        let mut changepoints = ChangepointSet::new(n);
        let mut cache = SplitCache::new();
        let mut accepted = Vec::new();
        let mut termination = Termination::IterationLimit;

        for iteration in 0..n {
            let Some((interval_start, candidate)) =
                cache.best_over(&kernel, &distances, &changepoints)
            else {
                debug!("No interval can be split further");
                termination = Termination::NoAdmissibleSplit;
                break;
            };
            let Some(index) = candidate.index else {
                termination = Termination::NoAdmissibleSplit;
                break;
            };

            // Separate generator streams per iteration
            let seed = base_seed.wrapping_add((iteration as u64) << 32);
            let tester = PermutationTester::new(
                kernel,
                self.params.permutations,
                seed,
                self.engine.clone(),
            );
            let outcome = tester.test(&distances, &changepoints, candidate.energy)?;

            if !outcome.was_tested() || outcome.p_value > self.params.significance {
                debug!(
                    "Rejecting candidate {index} (energy {:.6}, p = {:.4})",
                    candidate.energy, outcome.p_value
                );
                termination = Termination::NotSignificant {
                    index,
                    p_value: outcome.p_value,
                };
                break;
            }

            debug!(
                "Accepting changepoint {index} (energy {:.6}, p = {:.4})",
                candidate.energy, outcome.p_value
            );
            changepoints.insert(index);
            cache.invalidate(interval_start);
            accepted.push(ChangePoint::significant(index, candidate.energy, outcome.p_value));
        }

        let (hits, misses) = cache.stats();
        info!(
            "E-Divisive found {} changepoints in {n} observations ({hits} cache hits, {misses} interval scans)",
            accepted.len()
        );

        Ok(ChangePointResult::new(
            accepted,
            self.algorithm_name().to_string(),
            n,
            termination,
        ))
    }
}

impl<E: ExecutionEngine> ChangePointDetectorProperties for EnergyDivisiveDetector<E> {
    fn algorithm_name(&self) -> &'static str {
        "E-Divisive"
    }

    fn minimum_sample_size(&self) -> usize {
        self.params.min_size.saturating_mul(2)
    }
}

impl<E: ExecutionEngine> SimpleDetector for EnergyDivisiveDetector<E> {
    fn detect_simple(&self, sample: &[f64]) -> Result<ChangePointResult> {
        self.detect(sample)
    }
}

impl<E: ExecutionEngine> ConfigurableDetector for EnergyDivisiveDetector<E> {
    type Parameters = EnergyDivisiveParameters;

    fn parameters(&self) -> &Self::Parameters {
        &self.params
    }

    fn set_parameters(&mut self, params: Self::Parameters) -> Result<()> {
        params.validate()?;
        self.params = params;
        Ok(())
    }
}

/// Detect changepoints and return them with the `0` and `n` sentinels
///
/// # Arguments
/// * `sequence` - Observations, non-empty and finite
/// * `significance` - Largest accepted permutation p-value, in [0, 1]
/// * `permutations` - Permutations per test; 0 accepts no split
/// * `min_size` - Minimum cluster size, at least 2
///
/// # Example
/// ```rust
/// use impact_changepoint::detect_changes;
///
/// let mut data = vec![0.0; 15];
/// data.extend(vec![8.0; 15]);
/// let changes = detect_changes(&data, 0.05, 199, 3).unwrap();
/// assert_eq!(changes, vec![0, 15, 30]);
/// ```
pub fn detect_changes(
    sequence: &[f64],
    significance: f64,
    permutations: usize,
    min_size: usize,
) -> Result<Vec<usize>> {
    let params = EnergyDivisiveParameters::new(significance, permutations, min_size);
    let detector = EnergyDivisiveDetector::new(params)?;
    Ok(detector.detect(sequence)?.boundaries())
}

#[cfg(test)]
mod tests {
    use super::*;
    use impact_core::sequential;

    fn step(levels: &[(usize, f64)]) -> Vec<f64> {
        levels
            .iter()
            .flat_map(|&(len, level)| std::iter::repeat(level).take(len))
            .collect()
    }

    #[test]
    fn test_parameter_validation() {
        assert!(EnergyDivisiveParameters::default().validate().is_ok());
        assert!(matches!(
            EnergyDivisiveParameters::new(1.5, 10, 3).validate(),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            EnergyDivisiveParameters::new(-0.1, 10, 3).validate(),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            EnergyDivisiveParameters::new(f64::NAN, 10, 3).validate(),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            EnergyDivisiveParameters::new(0.05, 10, 1).validate(),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_single_shift() {
        let data = step(&[(15, 0.0), (15, 8.0)]);
        let detector = EnergyDivisiveDetector::new(
            EnergyDivisiveParameters::new(0.05, 199, 3).with_seed(1),
        )
        .unwrap()
        .with_engine(sequential());
        let result = detector.detect(&data).unwrap();
        assert_eq!(result.boundaries(), vec![0, 15, 30]);
        assert_eq!(result.algorithm(), "E-Divisive");
        let cp = &result.changepoints()[0];
        assert!(cp.p_value.unwrap() <= 0.05);
        assert!(cp.energy > 0.0);
    }

    #[test]
    fn test_two_shifts() {
        let data = step(&[(12, 0.0), (12, 6.0), (12, 0.0)]);
        let detector = EnergyDivisiveDetector::new(
            EnergyDivisiveParameters::new(0.05, 199, 4).with_seed(9),
        )
        .unwrap();
        let result = detector.detect(&data).unwrap();
        assert_eq!(result.boundaries(), vec![0, 12, 24, 36]);
        assert!(matches!(
            result.termination(),
            Termination::NotSignificant { .. } | Termination::NoAdmissibleSplit
        ));
    }

    #[test]
    fn test_too_short_for_any_split() {
        let detector =
            EnergyDivisiveDetector::new(EnergyDivisiveParameters::new(0.05, 10, 5)).unwrap();
        let result = detector.detect(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(result.boundaries(), vec![0, 6]);
        assert_eq!(result.termination(), Termination::NoAdmissibleSplit);
        assert_eq!(detector.minimum_sample_size(), 10);
    }

    #[test]
    fn test_zero_permutations_accepts_nothing() {
        let data = step(&[(15, 0.0), (15, 8.0)]);
        assert_eq!(detect_changes(&data, 0.05, 0, 3).unwrap(), vec![0, 30]);
    }

    #[test]
    fn test_significance_one_accepts_every_candidate() {
        let data: Vec<f64> = (0..24).map(|i| ((i * 7) % 5) as f64).collect();
        let detector = EnergyDivisiveDetector::new(
            EnergyDivisiveParameters::new(1.0, 9, 3).with_seed(2),
        )
        .unwrap();
        let result = detector.detect(&data).unwrap();
        assert_eq!(result.termination(), Termination::NoAdmissibleSplit);
        // Every remaining interval is too short to split again
        let bounds = result.boundaries();
        for pair in bounds.windows(2) {
            assert!(pair[1] - pair[0] >= 3);
            assert!(pair[1] - pair[0] < 6);
        }
    }

    #[test]
    fn test_configurable() {
        let mut detector = EnergyDivisiveDetector::new(EnergyDivisiveParameters::default()).unwrap();
        assert!(detector
            .set_parameters(EnergyDivisiveParameters::default().with_min_size(1))
            .is_err());
        assert_eq!(detector.parameters().min_size, DEFAULT_MIN_SIZE);
        detector
            .set_parameters(EnergyDivisiveParameters::default().with_min_size(4))
            .unwrap();
        assert_eq!(detector.parameters().min_size, 4);
    }
}
