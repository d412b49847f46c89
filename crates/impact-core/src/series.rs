//! Validated one-dimensional numeric sequences
//!
//! `Series` is the entry point for all caller-supplied data. Construction
//! rejects empty input and non-finite values, so every algorithm downstream
//! can assume a non-empty slice of finite reals.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// An ordered, immutable sequence of finite observations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Series {
    values: Vec<f64>,
}

impl Series {
    /// Create a series, validating that it is non-empty and finite
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::empty_input("series"));
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(Error::non_finite("series", index));
        }
        Ok(Self { values })
    }

    /// Create a series from a borrowed slice
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        Self::new(values.to_vec())
    }

    /// Number of observations
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; kept for API symmetry with slices
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }

    /// Last observation
    pub fn last(&self) -> f64 {
        // Non-empty by construction
        self.values[self.values.len() - 1]
    }

    /// Arithmetic mean of the observations
    pub fn mean(&self) -> f64 {
        crate::utils::mean(&self.values)
    }

    /// Successive differences `x[i + 1] - x[i]`
    ///
    /// The result has exactly `len() - 1` elements and is empty for a
    /// single-observation series.
    pub fn diff(&self) -> Vec<f64> {
        self.values.windows(2).map(|w| w[1] - w[0]).collect()
    }

    /// Concatenate two series into a new one
    pub fn concat(&self, other: &Series) -> Series {
        let mut values = Vec::with_capacity(self.len() + other.len());
        values.extend_from_slice(&self.values);
        values.extend_from_slice(&other.values);
        Series { values }
    }

    /// Moving-average smoothing with `left` points before and `right` points
    /// after each interior observation
    ///
    /// Interior points `i ∈ [left, n - right)` are replaced by the mean of
    /// `x[i - left ..= i + right]`. The first `left` and last `right` entries
    /// repeat the nearest interior average. Fails with `InvalidArgument` when
    /// the series is too short to have a single interior point.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use impact_core::Series;
    ///
    /// let series = Series::new(vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
    /// let smoothed = series.smooth(1, 1).unwrap();
    /// assert_eq!(smoothed.as_slice(), &[2.0, 2.0, 3.0, 4.0, 4.0]);
    /// ```
    pub fn smooth(&self, left: usize, right: usize) -> Result<Series> {
        let n = self.len();
        let width = left + right + 1;
        if n < width {
            return Err(Error::InvalidArgument(format!(
                "cannot smooth {n} observations with a window of {width}"
            )));
        }

        let first_interior = left;
        let last_interior = n - right - 1;
        let mut smoothed = vec![0.0; n];

        for i in first_interior..=last_interior {
            let window = &self.values[i - left..=i + right];
            smoothed[i] = window.iter().sum::<f64>() / width as f64;
        }

        let head = smoothed[first_interior];
        smoothed[..first_interior].fill(head);
        let tail = smoothed[last_interior];
        smoothed[last_interior + 1..].fill(tail);

        Ok(Series { values: smoothed })
    }
}

impl TryFrom<Vec<f64>> for Series {
    type Error = Error;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Series::new(values)
    }
}

impl From<Series> for Vec<f64> {
    fn from(series: Series) -> Self {
        series.values
    }
}

impl AsRef<[f64]> for Series {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rejects_empty() {
        let err = Series::new(vec![]).unwrap_err();
        assert!(matches!(err, Error::NumericInput(_)));
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(matches!(
            Series::new(vec![1.0, f64::NAN]).unwrap_err(),
            Error::NumericInput(_)
        ));
        assert!(matches!(
            Series::new(vec![f64::INFINITY]).unwrap_err(),
            Error::NumericInput(_)
        ));
        assert!(matches!(
            Series::new(vec![0.0, 1.0, f64::NEG_INFINITY]).unwrap_err(),
            Error::NumericInput(_)
        ));
    }

    #[test]
    fn test_diff_length() {
        for len in 1..20 {
            let series = Series::new((0..len).map(|i| (i * i) as f64).collect()).unwrap();
            assert_eq!(series.diff().len(), len - 1);
        }
    }

    #[test]
    fn test_diff_values() {
        let series = Series::new(vec![1.0, 4.0, 2.0, 2.0]).unwrap();
        assert_eq!(series.diff(), vec![3.0, -2.0, 0.0]);
    }

    #[test]
    fn test_smooth_constant_is_fixed_point() {
        let series = Series::new(vec![0.1; 12]).unwrap();
        let smoothed = series.smooth(2, 2).unwrap();
        for &v in smoothed.as_slice() {
            assert_relative_eq!(v, 0.1, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_smooth_replicates_edges() {
        let series = Series::new(vec![0.0, 0.0, 5.0, 10.0, 10.0, 10.0, 0.0]).unwrap();
        let smoothed = series.smooth(2, 2).unwrap();
        let s = smoothed.as_slice();
        assert_eq!(s.len(), 7);
        assert_relative_eq!(s[2], 5.0);
        assert_relative_eq!(s[3], 7.0);
        assert_relative_eq!(s[4], 7.0);
        assert_eq!(s[0], s[2]);
        assert_eq!(s[1], s[2]);
        assert_eq!(s[5], s[4]);
        assert_eq!(s[6], s[4]);
    }

    #[test]
    fn test_smooth_too_short() {
        let series = Series::new(vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert!(matches!(
            series.smooth(2, 2).unwrap_err(),
            Error::InvalidArgument(_)
        ));
    }

    #[test]
    fn test_smooth_zero_window_is_identity() {
        let series = Series::new(vec![3.0, 1.0, 4.0]).unwrap();
        assert_eq!(series.smooth(0, 0).unwrap(), series);
    }

    #[test]
    fn test_concat() {
        let a = Series::new(vec![1.0, 2.0]).unwrap();
        let b = Series::new(vec![3.0]).unwrap();
        assert_eq!(a.concat(&b).as_slice(), &[1.0, 2.0, 3.0]);
        assert_eq!(a.last(), 2.0);
    }
}
