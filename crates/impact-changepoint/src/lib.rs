//! Divisive energy-statistic changepoint detection
//!
//! This crate implements E-Divisive, a nonparametric detector that finds
//! changes in the *distribution* of a sequence, not only its mean. It
//! repeatedly splits the interval with the largest energy distance between
//! its two halves and stops once a within-cluster permutation test no longer
//! finds the best candidate significant.
//!
//! # Building blocks
//!
//! - [`DistanceMatrix`]: pairwise `|x[i] - x[j]|`, built once per run
//! - [`EnergyKernel`]: incremental O(n²) best-split search for one interval
//! - [`SplitCache`]: best splits of intervals untouched since the last
//!   accepted changepoint
//! - [`PermutationTester`]: p-value of a candidate, repetitions run on an
//!   [`ExecutionEngine`](impact_core::ExecutionEngine)
//! - [`EnergyDivisiveDetector`]: the ACTIVE → DONE loop tying them together
//!
//! ## Usage
//!
//! ```rust
//! use impact_changepoint::{EnergyDivisiveDetector, EnergyDivisiveParameters, SimpleDetector};
//!
//! let data: Vec<f64> = (0..40).map(|i| if i < 20 { 0.0 } else { 5.0 }).collect();
//!
//! let params = EnergyDivisiveParameters::new(0.05, 199, 5).with_seed(7);
//! let detector = EnergyDivisiveDetector::new(params).unwrap();
//! let result = detector.detect_simple(&data).unwrap();
//!
//! assert_eq!(result.boundaries(), vec![0, 20, 40]);
//! ```

pub mod cache;
pub mod distance;
pub mod e_divisive;
pub mod kernel;
pub mod permutation;
pub mod traits;
pub mod types;

pub use cache::SplitCache;
pub use distance::DistanceMatrix;
pub use e_divisive::{
    detect_changes, EnergyDivisiveDetector, EnergyDivisiveParameters, DEFAULT_MIN_SIZE,
    DEFAULT_PERMUTATIONS, DEFAULT_SIGNIFICANCE,
};
pub use kernel::{energy_statistic, EnergyKernel};
pub use permutation::{within_cluster_permutation, PermutationOutcome, PermutationTester};

pub use traits::{ChangePointDetectorProperties, ConfigurableDetector, SimpleDetector};

pub use types::{ChangePoint, ChangePointResult, ChangeType, ChangepointSet, Splitter, Termination};
