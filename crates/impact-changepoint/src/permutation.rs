//! Permutation significance test for proposed changepoints
//!
//! Under the null hypothesis the current clusters are homogeneous, so
//! observations may be relabelled freely *within* each cluster. Every
//! repetition relabels a private copy of the distance matrix, recomputes the
//! best split energy over all clusters, and counts how often it reaches the
//! observed energy. Ties count against the candidate, so a split of a
//! constant cluster (energy 0 under every relabelling) is never significant.

use crate::distance::DistanceMatrix;
use crate::kernel::EnergyKernel;
use crate::types::ChangepointSet;
use impact_core::{ExecutionEngine, Result};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, instrument};

/// Outcome of one permutation test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PermutationOutcome {
    /// `(reached + 1) / (permutations + 1)`, or 1.0 when untested
    pub p_value: f64,
    /// Repetitions whose best energy reached the observed energy (ties
    /// included)
    pub reached: usize,
    /// Repetitions performed
    pub permutations: usize,
}

impl PermutationOutcome {
    /// Sentinel for `permutations == 0`: never significant
    pub fn untested() -> Self {
        Self {
            p_value: 1.0,
            reached: 0,
            permutations: 0,
        }
    }

    pub fn was_tested(&self) -> bool {
        self.permutations > 0
    }
}

/// Within-cluster permutation tester
#[derive(Debug, Clone)]
pub struct PermutationTester<E> {
    kernel: EnergyKernel,
    permutations: usize,
    seed: u64,
    engine: E,
}

impl<E: ExecutionEngine> PermutationTester<E> {
    pub fn new(kernel: EnergyKernel, permutations: usize, seed: u64, engine: E) -> Self {
        Self {
            kernel,
            permutations,
            seed,
            engine,
        }
    }

    /// Test `observed_energy` against the clusters defined by `changepoints`
    ///
    /// Repetition `i` draws from its own generator seeded `seed + i`, so the
    /// result does not depend on how the engine schedules repetitions.
    #[instrument(skip(self, distances, changepoints),
                 fields(n = distances.len(), clusters = changepoints.cluster_count(), permutations = self.permutations))]
    pub fn test(
        &self,
        distances: &DistanceMatrix,
        changepoints: &ChangepointSet,
        observed_energy: f64,
    ) -> Result<PermutationOutcome> {
        if self.permutations == 0 {
            debug!("No permutations requested, candidate treated as not significant");
            return Ok(PermutationOutcome::untested());
        }

        let kernel = self.kernel;
        let seed = self.seed;
        let reached_flags: Vec<Result<bool>> = self.engine.execute_batch(self.permutations, |i| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(i as u64));
            let permutation = within_cluster_permutation(changepoints, &mut rng);
            let permuted = distances.permuted(&permutation)?;
            let best = kernel
                .best_over(&permuted, changepoints)
                .map_or(f64::NEG_INFINITY, |(_, split)| split.energy);
            Ok(best >= observed_energy)
        });

        let mut reached = 0;
        for flag in reached_flags {
            if flag? {
                reached += 1;
            }
        }

        let p_value = (reached + 1) as f64 / (self.permutations + 1) as f64;
        debug!("{reached} of {} permutations reached {observed_energy:.6}, p = {p_value:.4}", self.permutations);

        Ok(PermutationOutcome {
            p_value,
            reached,
            permutations: self.permutations,
        })
    }
}

/// Identity permutation shuffled independently inside each cluster
pub fn within_cluster_permutation<R: rand::Rng + ?Sized>(
    changepoints: &ChangepointSet,
    rng: &mut R,
) -> Vec<usize> {
    let mut permutation: Vec<usize> = (0..changepoints.series_len()).collect();
    for (start, end) in changepoints.intervals() {
        permutation[start..end].shuffle(rng);
    }
    permutation
}

#[cfg(test)]
mod tests {
    use super::*;
    use impact_core::sequential;

    const SERIES: [f64; 20] = [
        0.2, 0.0, 0.4, 0.0, 0.1, 0.5, 0.2, 0.4, 0.0, 0.0, 0.1, 0.6, 0.1, 0.3, 0.1, 0.1, 0.2, 0.3,
        0.1, 0.1,
    ];

    #[test]
    fn test_permutation_stays_within_clusters() {
        let mut set = ChangepointSet::new(30);
        set.insert(10);
        set.insert(17);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..20 {
            let perm = within_cluster_permutation(&set, &mut rng);
            for (start, end) in set.intervals() {
                let mut block: Vec<usize> = perm[start..end].to_vec();
                block.sort_unstable();
                assert_eq!(block, (start..end).collect::<Vec<_>>());
            }
        }
    }

    #[test]
    fn test_zero_permutations_is_not_significant() {
        let distances = DistanceMatrix::from_slice(&SERIES).unwrap();
        let tester = PermutationTester::new(EnergyKernel::new(3), 0, 1, sequential());
        let outcome = tester
            .test(&distances, &ChangepointSet::new(SERIES.len()), 0.26)
            .unwrap();
        assert_eq!(outcome, PermutationOutcome::untested());
        assert!(!outcome.was_tested());
    }

    #[test]
    fn test_p_value_is_never_zero() {
        let x: Vec<f64> = (0..24).map(|i| if i < 12 { 0.0 } else { 10.0 }).collect();
        let distances = DistanceMatrix::from_slice(&x).unwrap();
        let kernel = EnergyKernel::new(3);
        let set = ChangepointSet::new(x.len());
        let observed = kernel.best_over(&distances, &set).unwrap().1.energy;
        let tester = PermutationTester::new(kernel, 99, 3, sequential());
        let outcome = tester.test(&distances, &set, observed).unwrap();
        assert!(outcome.p_value >= 1.0 / 100.0);
        assert!(outcome.p_value <= 0.05);
    }

    #[test]
    fn test_canonical_matrix_untouched() {
        let distances = DistanceMatrix::from_slice(&SERIES).unwrap();
        let snapshot = distances.clone();
        let tester = PermutationTester::new(EnergyKernel::new(3), 25, 11, sequential());
        tester
            .test(&distances, &ChangepointSet::new(SERIES.len()), 0.26)
            .unwrap();
        assert_eq!(distances, snapshot);
        assert!(distances.as_matrix().is_symmetric_hollow(0.0));
    }

    #[test]
    fn test_reproducible_for_fixed_seed() {
        let distances = DistanceMatrix::from_slice(&SERIES).unwrap();
        let set = ChangepointSet::new(SERIES.len());
        let a = PermutationTester::new(EnergyKernel::new(3), 50, 42, sequential())
            .test(&distances, &set, 0.26)
            .unwrap();
        let b = PermutationTester::new(EnergyKernel::new(3), 50, 42, impact_core::auto_engine())
            .test(&distances, &set, 0.26)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_constant_cluster_is_never_significant() {
        let x = [3.0; 16];
        let distances = DistanceMatrix::from_slice(&x).unwrap();
        let outcome = PermutationTester::new(EnergyKernel::new(3), 19, 0, sequential())
            .test(&distances, &ChangepointSet::new(x.len()), 0.0)
            .unwrap();
        assert_eq!(outcome.reached, 19);
        assert_eq!(outcome.p_value, 1.0);
    }

    #[test]
    fn test_noise_is_not_significant() {
        let distances = DistanceMatrix::from_slice(&SERIES).unwrap();
        let kernel = EnergyKernel::new(3);
        let set = ChangepointSet::new(SERIES.len());
        let observed = kernel.best_over(&distances, &set).unwrap().1.energy;
        let outcome = PermutationTester::new(kernel, 199, 5, sequential())
            .test(&distances, &set, observed)
            .unwrap();
        assert!(outcome.p_value > 0.05, "p = {}", outcome.p_value);
    }
}
