//! Types used for changepoint detection

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Best known split of one interval
///
/// The default value (`index: None`, `energy: -inf`) means no admissible
/// split has been found.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Splitter {
    /// Absolute index of the first observation of the right cluster
    pub index: Option<usize>,
    /// Energy released by splitting at `index`
    pub energy: f64,
}

impl Default for Splitter {
    fn default() -> Self {
        Self {
            index: None,
            energy: f64::NEG_INFINITY,
        }
    }
}

impl Splitter {
    pub fn new(index: usize, energy: f64) -> Self {
        Self {
            index: Some(index),
            energy,
        }
    }

    /// Whether a split location was found
    pub fn is_valid(&self) -> bool {
        self.index.is_some()
    }

    /// Replace the current split if `energy` is strictly larger
    #[inline]
    pub(crate) fn consider(&mut self, index: usize, energy: f64) {
        if energy > self.energy {
            self.index = Some(index);
            self.energy = energy;
        }
    }
}

/// Ordered set of changepoints, always bounded by the sentinels `0` and `n`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangepointSet {
    points: BTreeSet<usize>,
    len: usize,
}

impl ChangepointSet {
    /// Set for a series of `len` observations holding only the sentinels
    pub fn new(len: usize) -> Self {
        let points = [0, len].into_iter().collect();
        Self { points, len }
    }

    /// Insert an interior changepoint; returns false if already present or
    /// outside `(0, n)`
    pub fn insert(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.len {
            return false;
        }
        self.points.insert(index)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.points.contains(&index)
    }

    /// Length of the underlying series
    pub fn series_len(&self) -> usize {
        self.len
    }

    /// Number of intervals (clusters) the set defines
    pub fn cluster_count(&self) -> usize {
        self.points.len() - 1
    }

    /// Adjacent `(start, end)` pairs, `end` exclusive, in ascending order
    pub fn intervals(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.points.iter().zip(self.points.iter().skip(1)).map(|(&s, &e)| (s, e))
    }

    /// All points including sentinels, ascending
    pub fn to_vec(&self) -> Vec<usize> {
        self.points.iter().copied().collect()
    }
}

/// Represents a detected changepoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangePoint {
    /// Index in the time series where the change occurred
    pub index: usize,
    /// Confidence score for this changepoint (0.0 to 1.0)
    pub confidence: f64,
    /// Energy statistic of the accepted split
    pub energy: f64,
    /// Permutation p-value, `None` when the split was not tested
    pub p_value: Option<f64>,
    /// Optional description of the type of change detected
    pub change_type: Option<ChangeType>,
}

impl ChangePoint {
    /// Create a changepoint accepted by a permutation test
    pub fn significant(index: usize, energy: f64, p_value: f64) -> Self {
        Self {
            index,
            confidence: 1.0 - p_value,
            energy,
            p_value: Some(p_value),
            change_type: Some(ChangeType::DistributionShift),
        }
    }
}

impl fmt::Display for ChangePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.p_value {
            Some(p) => write!(
                f,
                "ChangePoint {{ index: {}, energy: {:.4}, p: {:.4} }}",
                self.index, self.energy, p
            ),
            None => write!(
                f,
                "ChangePoint {{ index: {}, energy: {:.4} }}",
                self.index, self.energy
            ),
        }
    }
}

/// Types of changes that can be detected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeType {
    /// Change anywhere in the distribution (energy statistics are not
    /// restricted to the mean)
    DistributionShift,
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeType::DistributionShift => write!(f, "Distribution Shift"),
        }
    }
}

/// Why the divisive search stopped
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Termination {
    /// Every interval is shorter than twice the minimum cluster size
    NoAdmissibleSplit,
    /// The best remaining candidate failed the significance test
    NotSignificant { index: usize, p_value: f64 },
    /// One changepoint per observation has been accepted
    IterationLimit,
}

/// Result of changepoint detection
#[derive(Debug, Clone)]
pub struct ChangePointResult {
    /// Accepted changepoints in ascending index order
    changepoints: Vec<ChangePoint>,
    /// Algorithm used for detection
    algorithm: String,
    /// Total number of data points analyzed
    sample_size: usize,
    /// Why detection stopped
    termination: Termination,
}

impl ChangePointResult {
    /// Create a new changepoint result; changepoints are sorted by index
    pub fn new(
        mut changepoints: Vec<ChangePoint>,
        algorithm: String,
        sample_size: usize,
        termination: Termination,
    ) -> Self {
        changepoints.sort_by_key(|cp| cp.index);
        Self {
            changepoints,
            algorithm,
            sample_size,
            termination,
        }
    }

    /// Get the detected changepoints
    pub fn changepoints(&self) -> &[ChangePoint] {
        &self.changepoints
    }

    /// Interior indices plus the `0` and `n` sentinels, ascending
    pub fn boundaries(&self) -> Vec<usize> {
        let mut boundaries = Vec::with_capacity(self.changepoints.len() + 2);
        boundaries.push(0);
        boundaries.extend(self.changepoints.iter().map(|cp| cp.index));
        boundaries.push(self.sample_size);
        boundaries
    }

    /// Get the number of detected changepoints
    pub fn count(&self) -> usize {
        self.changepoints.len()
    }

    /// Check if any changepoints were detected
    pub fn has_changepoints(&self) -> bool {
        !self.changepoints.is_empty()
    }

    /// Get the algorithm name used for detection
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Get the sample size that was analyzed
    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }

    /// Energy statistic of each accepted changepoint, in index order
    pub fn statistics(&self) -> Vec<f64> {
        self.changepoints.iter().map(|cp| cp.energy).collect()
    }

    /// Get changepoints with confidence above a threshold
    pub fn confident_changepoints(&self, min_confidence: f64) -> Vec<&ChangePoint> {
        self.changepoints
            .iter()
            .filter(|cp| cp.confidence >= min_confidence)
            .collect()
    }
}

impl fmt::Display for ChangePointResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ChangePoint Detection Result:")?;
        writeln!(f, "  Algorithm: {}", self.algorithm)?;
        writeln!(f, "  Sample size: {}", self.sample_size)?;
        writeln!(f, "  Changepoints detected: {}", self.count())?;

        if !self.changepoints.is_empty() {
            writeln!(f, "  Detected changepoints:")?;
            for cp in &self.changepoints {
                writeln!(f, "    {}", cp)?;
            }
        }

        Ok(())
    }
}
