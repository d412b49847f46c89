//! Monte-Carlo impact estimation
//!
//! The "before" sequence is smoothed, differenced, and the differences are
//! resampled into random walks as long as the "after" sequence. Where the
//! smoothed "after" sequence actually ended, relative to those simulated
//! continuations, measures how surprising the change is.

use crate::smoother::{smooth_pair, BoundaryMode};
use crate::types::{ImpactReport, ImpactResult};
use crate::walk::BootstrapWalker;
use impact_core::utils::{count_greater, count_less, mean};
use impact_core::{auto_engine, DefaultEngine, Error, ExecutionEngine, Result, Series};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Default number of simulated walks
pub const DEFAULT_ITERATIONS: usize = 1000;

/// Default smoothing half window
pub const DEFAULT_HALF_WINDOW: usize = 2;

/// Impact estimation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpactParameters {
    /// Number of simulated walks, at least 1
    pub iterations: usize,
    /// Points on each side of the smoothing window center
    pub half_window: usize,
    pub boundary: BoundaryMode,
    /// Base seed; walk `i` uses `seed + i`. Random when `None`.
    pub seed: Option<u64>,
}

impl Default for ImpactParameters {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            half_window: DEFAULT_HALF_WINDOW,
            boundary: BoundaryMode::default(),
            seed: None,
        }
    }
}

impl ImpactParameters {
    pub fn new(iterations: usize) -> Self {
        Self {
            iterations,
            ..Self::default()
        }
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_half_window(mut self, half_window: usize) -> Self {
        self.half_window = half_window;
        self
    }

    pub fn with_boundary(mut self, boundary: BoundaryMode) -> Self {
        self.boundary = boundary;
        self
    }

    /// Set random seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Smallest sequence length the smoothing window accepts
    pub fn window_width(&self) -> usize {
        2 * self.half_window + 1
    }

    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(Error::InvalidArgument(
                "iterations must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Bootstrap random-walk impact estimator
#[derive(Debug, Clone)]
pub struct ImpactEstimator<E = DefaultEngine> {
    params: ImpactParameters,
    engine: E,
}

impl ImpactEstimator<DefaultEngine> {
    /// Create an estimator running walks on the default engine
    pub fn new(params: ImpactParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            engine: auto_engine(),
        })
    }
}

impl<E: ExecutionEngine> ImpactEstimator<E> {
    /// Run walks on a different engine
    pub fn with_engine<F: ExecutionEngine>(self, engine: F) -> ImpactEstimator<F> {
        ImpactEstimator {
            params: self.params,
            engine,
        }
    }

    pub fn parameters(&self) -> &ImpactParameters {
        &self.params
    }

    /// Probability and direction of the change from `before` to `after`
    pub fn estimate(&self, before: &[f64], after: &[f64]) -> Result<ImpactResult> {
        Ok(self.report(before, after)?.result)
    }

    /// Estimate with both tails and the walk summary
    #[instrument(skip(self, before, after),
                 fields(before = before.len(), after = after.len(), iterations = self.params.iterations))]
    pub fn report(&self, before: &[f64], after: &[f64]) -> Result<ImpactReport> {
        self.params.validate()?;
        let before = Series::from_slice(before)?;
        let after = Series::from_slice(after)?;

        let width = self.params.window_width();
        for (name, series) in [("before", &before), ("after", &after)] {
            if series.len() < width {
                return Err(Error::InvalidArgument(format!(
                    "{name} sequence has {} observations, the smoothing window needs {width}",
                    series.len()
                )));
            }
        }

        let (smoothed_before, smoothed_after) =
            smooth_pair(&before, &after, self.params.half_window, self.params.boundary)?;
        let steps = smoothed_before.diff();
        let walker = BootstrapWalker::new(&steps)?;

        let start = smoothed_before.last();
        let observed = smoothed_after.last();
        let n_steps = after.len();
        let iterations = self.params.iterations;
        let seed = self.params.seed.unwrap_or_else(|| rand::thread_rng().gen());

        debug!("Simulating {iterations} walks of {n_steps} steps from {start:.6}");

        let destinations = self.engine.execute_batch(iterations, |i| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(i as u64));
            walker.simulate(start, n_steps, &mut rng)
        });

        let p_lower = count_less(observed, &destinations) as f64 / iterations as f64;
        let p_upper = count_greater(observed, &destinations) as f64 / iterations as f64;
        let result = ImpactResult::from_tails(p_lower, p_upper);

        debug!(
            "Observed {observed:.6}: lower tail {p_lower:.4}, upper tail {p_upper:.4} -> {}",
            result
        );

        Ok(ImpactReport {
            result,
            p_lower,
            p_upper,
            start,
            observed,
            mean_destination: mean(&destinations),
            iterations,
            steps_per_walk: n_steps,
        })
    }
}
