//! Moving-average smoothing of a before/after pair
//!
//! Smoothing the concatenation lets the windows near the join borrow values
//! from the other side, so neither sequence gets a replicated edge at the
//! point where the walk starts or ends.

use impact_core::{Result, Series};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// How the two sequences are smoothed relative to each other
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    /// Smooth the concatenation, then split at the join
    #[default]
    Joint,
    /// Smooth each sequence on its own
    Independent,
}

/// Smooth `before` and `after` as one sequence with a centered window of
/// `2 × half_window + 1` points and split the result back
///
/// Fails with `InvalidArgument` when the two sequences together hold fewer
/// than `2 × half_window + 1` observations.
pub fn smooth_joint(before: &Series, after: &Series, half_window: usize) -> Result<(Series, Series)> {
    let joined = before.concat(after).smooth(half_window, half_window)?;
    let mut values = joined.into_vec();
    let tail = values.split_off(before.len());
    trace!(
        "Joint smoothing of {} + {} observations, half window {half_window}",
        before.len(),
        after.len()
    );
    Ok((Series::new(values)?, Series::new(tail)?))
}

/// Smooth both sequences with the selected boundary mode
pub fn smooth_pair(
    before: &Series,
    after: &Series,
    half_window: usize,
    mode: BoundaryMode,
) -> Result<(Series, Series)> {
    match mode {
        BoundaryMode::Joint => smooth_joint(before, after, half_window),
        BoundaryMode::Independent => Ok((
            before.smooth(half_window, half_window)?,
            after.smooth(half_window, half_window)?,
        )),
    }
}
