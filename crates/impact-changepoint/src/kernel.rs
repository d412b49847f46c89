//! Energy statistic kernel for divisive changepoint detection
//!
//! For an interval `[start, end)` the kernel searches every left cluster
//! `[start, start + tau1)` and right cluster `[start + tau1, start + tau2)`
//! and returns the `tau1` with the largest weighted energy distance
//!
//! ```text
//! energy = (2·AB/(tau1·m) − 2·B/(m·(m−1)) − 2·A/(tau1·(tau1−1))) · tau1·m/tau2
//! ```
//!
//! with `m = tau2 − tau1`, `A`/`B` the within-cluster distance sums (each
//! pair counted once) and `AB` the between-cluster sum.
//!
//! The within/between sums are carried across candidates: advancing `tau2`
//! adds one row of distances, advancing `tau1` moves one observation from
//! the right cluster to the left. One interval costs O(n²) instead of the
//! O(n³) of recomputing every block.

use crate::distance::DistanceMatrix;
use crate::types::{ChangepointSet, Splitter};

/// Weighted two-sample energy statistic
///
/// `within_left`/`within_right` count each pair once. Requires both clusters
/// to hold at least two observations.
#[inline]
pub fn energy_statistic(
    within_left: f64,
    within_right: f64,
    between: f64,
    tau1: usize,
    tau2: usize,
) -> f64 {
    let left = tau1 as f64;
    let right = (tau2 - tau1) as f64;
    let scale_left = 2.0 * within_left / (left * (left - 1.0));
    let scale_right = 2.0 * within_right / ((right - 1.0) * right);
    let scale_between = 2.0 * between / (right * left);
    let info = scale_between - scale_right - scale_left;
    info * left * right / tau2 as f64
}

/// Finds best split points under a minimum cluster size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnergyKernel {
    min_size: usize,
}

impl EnergyKernel {
    /// `min_size` must be at least 2; callers validate through the detector
    /// parameters
    pub fn new(min_size: usize) -> Self {
        debug_assert!(min_size >= 2, "min_size must be at least 2");
        Self { min_size }
    }

    pub fn min_size(&self) -> usize {
        self.min_size
    }

    /// Best split of `[start, end)`, or the default splitter when the
    /// interval holds fewer than `2 × min_size` observations
    pub fn best_split(&self, distances: &DistanceMatrix, start: usize, end: usize) -> Splitter {
        let min_size = self.min_size;
        let mut best = Splitter::default();
        if end <= start || (end - start) / 2 < min_size {
            return best;
        }

        let d = distances.as_matrix();
        let len = end - start;
        // Absolute row/column of relative position `i`
        let at = |i: usize| start + i;

        let mut tau1 = min_size;
        let tau2 = 2 * min_size;

        let mut within_left = d.block_sum(at(0)..at(tau1), at(0)..at(tau1)) / 2.0;
        let initial_right = d.block_sum(at(tau1)..at(tau2), at(tau1)..at(tau2)) / 2.0;
        let initial_between = d.block_sum(at(0)..at(tau1), at(tau1)..at(tau2));

        best.consider(
            at(tau1),
            energy_statistic(within_left, initial_right, initial_between, tau1, tau2),
        );

        // within_right[t]/between[t]: sums for a right cluster ending at t
        let mut within_right = vec![initial_right; len + 1];
        let mut between = vec![initial_between; len + 1];

        for t2 in tau2 + 1..=len {
            let row = at(t2 - 1);
            within_right[t2] = within_right[t2 - 1] + d.row_sum(row, at(tau1)..at(t2 - 1));
            between[t2] = between[t2 - 1] + d.row_sum(row, at(0)..at(tau1));
            best.consider(
                at(tau1),
                energy_statistic(within_left, within_right[t2], between[t2], tau1, t2),
            );
        }

        tau1 += 1;
        while tau1 + min_size <= len {
            // Observation tau1 - 1 moves from the right cluster to the left
            let moved = at(tau1 - 1);
            let add_left = d.row_sum(moved, at(0)..at(tau1 - 1));
            let mut add_right = d.row_sum(moved, at(tau1)..at(tau1 + min_size - 1));
            within_left += add_left;

            for t2 in tau1 + min_size..=len {
                add_right += d.get(moved, at(t2 - 1));
                within_right[t2] -= add_right;
                between[t2] += add_right - add_left;
                best.consider(
                    at(tau1),
                    energy_statistic(within_left, within_right[t2], between[t2], tau1, t2),
                );
            }
            tau1 += 1;
        }

        best
    }

    /// Best split across every interval of `changepoints`, together with the
    /// start of the interval it belongs to
    pub fn best_over(
        &self,
        distances: &DistanceMatrix,
        changepoints: &ChangepointSet,
    ) -> Option<(usize, Splitter)> {
        let mut best: Option<(usize, Splitter)> = None;
        for (start, end) in changepoints.intervals() {
            let split = self.best_split(distances, start, end);
            if !split.is_valid() {
                continue;
            }
            match best {
                Some((_, current)) if current.energy >= split.energy => {}
                _ => best = Some((start, split)),
            }
        }
        best
    }
}
