//! Bootstrap random walk
//!
//! A walk starts at a fixed value and adds steps drawn uniformly with
//! replacement from an observed step population. Only the destination is
//! kept.

use impact_core::{Error, Result};
use rand::Rng;

/// Random walk over a borrowed step population
#[derive(Debug, Clone, Copy)]
pub struct BootstrapWalker<'a> {
    steps: &'a [f64],
}

impl<'a> BootstrapWalker<'a> {
    /// Fails with `InsufficientData` if there is no step to draw
    pub fn new(steps: &'a [f64]) -> Result<Self> {
        if steps.is_empty() {
            return Err(Error::InsufficientData {
                expected: 1,
                actual: 0,
            });
        }
        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[f64] {
        self.steps
    }

    /// Final value of an `n_steps` walk from `start`
    #[inline]
    pub fn simulate<R: Rng + ?Sized>(&self, start: f64, n_steps: usize, rng: &mut R) -> f64 {
        let n = self.steps.len();
        let mut value = start;
        for _ in 0..n_steps {
            value += self.steps[rng.gen_range(0..n)];
        }
        value
    }
}
