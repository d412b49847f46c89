//! Pairwise distance matrix for energy statistics

use impact_core::{DenseMatrix, Result, Series};
use tracing::debug;

/// Symmetric matrix of absolute differences `|x[i] - x[j]|`
///
/// The canonical matrix of a detection run is never mutated; permutation
/// tests work on [`DistanceMatrix::permuted`] copies.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    distances: DenseMatrix,
}

impl DistanceMatrix {
    /// Build the matrix for a validated series. O(n²) time and memory.
    pub fn build(series: &Series) -> Result<Self> {
        let x = series.as_slice();
        let n = x.len();
        debug!("Building {n}x{n} distance matrix");
        let distances = DenseMatrix::from_fn(n, n, |i, j| (x[i] - x[j]).abs())?;
        Ok(Self { distances })
    }

    /// Validate raw observations and build their matrix
    pub fn from_slice(x: &[f64]) -> Result<Self> {
        Self::build(&Series::from_slice(x)?)
    }

    /// Number of observations
    pub fn len(&self) -> usize {
        self.distances.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.distances.get(i, j)
    }

    pub fn as_matrix(&self) -> &DenseMatrix {
        &self.distances
    }

    /// Copy with observations relabelled by `permutation`
    ///
    /// Element `(i, j)` of the copy is the distance between the observations
    /// `permutation[i]` and `permutation[j]`, which is what recomputing the
    /// matrix over the permuted sequence would produce.
    pub fn permuted(&self, permutation: &[usize]) -> Result<Self> {
        Ok(Self {
            distances: self.distances.permuted(permutation)?,
        })
    }
}
