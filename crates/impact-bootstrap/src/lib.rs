//! Bootstrap random-walk impact estimation
//!
//! Given the observations before and after a suspected change, this crate
//! asks how likely the observed "after" level would be if the series had
//! simply kept wandering the way it did before:
//!
//! 1. both sequences are smoothed with a centered moving average
//!    ([`smoother`]), by default across the join
//! 2. the successive differences of the smoothed "before" sequence form the
//!    step population
//! 3. many random walks ([`BootstrapWalker`]) resample those steps from the
//!    last smoothed "before" value, as many steps as the "after" sequence is
//!    long
//! 4. the fraction of walks ending below / above the last smoothed "after"
//!    value gives the lower / upper tail; the rarer tail wins
//!
//! Walks run on an [`ExecutionEngine`](impact_core::ExecutionEngine), each
//! with its own generator seeded from the base seed and its index.
//!
//! # Example
//!
//! ```rust
//! use impact_bootstrap::{ImpactEstimator, ImpactParameters};
//!
//! let before = [3.0, 3.1, 2.9, 3.0, 3.2, 3.1, 2.9, 3.0];
//! let after = [3.0, 3.1, 3.0, 2.9, 3.1, 3.0];
//!
//! let estimator = ImpactEstimator::new(ImpactParameters::new(500).with_seed(1)).unwrap();
//! let report = estimator.report(&before, &after).unwrap();
//! assert!((0.0..=1.0).contains(&report.probability()));
//! ```

pub mod api;
pub mod impact;
pub mod smoother;
pub mod types;
pub mod walk;

pub use api::{detect_impact, impact_report, FAST_ITERATIONS, HIGH_PRECISION_ITERATIONS};
pub use impact::{ImpactEstimator, ImpactParameters, DEFAULT_HALF_WINDOW, DEFAULT_ITERATIONS};
pub use smoother::{smooth_joint, smooth_pair, BoundaryMode};
pub use types::{Direction, ImpactReport, ImpactResult};
pub use walk::BootstrapWalker;
