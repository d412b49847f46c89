//! Dense square/rectangular matrix backed by `nalgebra`
//!
//! Only the operations the energy statistics need are exposed: element
//! access, full copies, column and block reductions, and symmetric
//! row/column permutation into a fresh matrix.

use crate::error::{Error, Result};
use nalgebra::DMatrix;
use std::ops::Range;

/// Dense matrix of `f64`
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    inner: DMatrix<f64>,
}

impl DenseMatrix {
    /// Allocate a zero-filled matrix
    ///
    /// Fails with `Error::Computation` if `rows * cols` cannot be addressed.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        check_capacity(rows, cols)?;
        Ok(Self {
            inner: DMatrix::zeros(rows, cols),
        })
    }

    /// Build a matrix by evaluating `f(row, col)` for every element
    pub fn from_fn<F>(rows: usize, cols: usize, f: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> f64,
    {
        check_capacity(rows, cols)?;
        Ok(Self {
            inner: DMatrix::from_fn(rows, cols, f),
        })
    }

    pub fn nrows(&self) -> usize {
        self.inner.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.inner.ncols()
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.inner[(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.inner[(row, col)] = value;
    }

    /// Sum of one column
    pub fn column_sum(&self, col: usize) -> f64 {
        self.inner.column(col).sum()
    }

    /// Sum of the sub-block `rows × cols`; empty ranges sum to zero
    pub fn block_sum(&self, rows: Range<usize>, cols: Range<usize>) -> f64 {
        if rows.is_empty() || cols.is_empty() {
            return 0.0;
        }
        self.inner
            .slice((rows.start, cols.start), (rows.len(), cols.len()))
            .sum()
    }

    /// Sum of `row` over the column range `cols`
    #[inline]
    pub fn row_sum(&self, row: usize, cols: Range<usize>) -> f64 {
        self.block_sum(row..row + 1, cols)
    }

    /// Total of all elements
    pub fn total(&self) -> f64 {
        (0..self.ncols()).map(|c| self.column_sum(c)).sum()
    }

    /// New square matrix with rows and columns reordered by `permutation`
    ///
    /// Element `(i, j)` of the result is element
    /// `(permutation[i], permutation[j])` of `self`. `self` is left untouched.
    pub fn permuted(&self, permutation: &[usize]) -> Result<Self> {
        let n = self.nrows();
        if self.ncols() != n {
            return Err(Error::InvalidArgument(format!(
                "cannot permute a non-square {}x{} matrix",
                n,
                self.ncols()
            )));
        }
        if permutation.len() != n {
            return Err(Error::size_mismatch(n, permutation.len(), "permutation"));
        }
        Ok(Self {
            inner: DMatrix::from_fn(n, n, |i, j| self.inner[(permutation[i], permutation[j])]),
        })
    }

    /// True when the matrix is square, symmetric within `tolerance`, and has
    /// a zero diagonal
    pub fn is_symmetric_hollow(&self, tolerance: f64) -> bool {
        let n = self.nrows();
        if self.ncols() != n {
            return false;
        }
        (0..n).all(|i| {
            self.get(i, i).abs() <= tolerance
                && (i + 1..n).all(|j| (self.get(i, j) - self.get(j, i)).abs() <= tolerance)
        })
    }
}

fn check_capacity(rows: usize, cols: usize) -> Result<()> {
    let elements = rows.checked_mul(cols).ok_or_else(|| {
        Error::Computation(format!("matrix of {rows}x{cols} elements overflows usize"))
    })?;
    let max_elements = isize::MAX as usize / std::mem::size_of::<f64>();
    if elements > max_elements {
        return Err(Error::Computation(format!(
            "matrix of {rows}x{cols} elements exceeds addressable memory"
        )));
    }
    Ok(())
}
