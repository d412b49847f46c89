//! Memo of best splits per open interval
//!
//! Intervals are keyed by their left boundary. Accepting a changepoint only
//! changes the interval it falls in, so only that entry is invalidated; the
//! new right-hand interval starts at the new changepoint and has no entry
//! yet.

use crate::distance::DistanceMatrix;
use crate::kernel::EnergyKernel;
use crate::types::{ChangepointSet, Splitter};
use std::collections::HashMap;
use tracing::trace;

/// Best split per interval left boundary
#[derive(Debug, Clone, Default)]
pub struct SplitCache {
    entries: HashMap<usize, Splitter>,
    hits: usize,
    misses: usize,
}

impl SplitCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, interval_start: usize) -> Option<Splitter> {
        self.entries.get(&interval_start).copied()
    }

    pub fn set(&mut self, interval_start: usize, splitter: Splitter) {
        self.entries.insert(interval_start, splitter);
    }

    pub fn invalidate(&mut self, interval_start: usize) {
        self.entries.remove(&interval_start);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(hits, misses)` of [`SplitCache::best_split`] lookups
    pub fn stats(&self) -> (usize, usize) {
        (self.hits, self.misses)
    }

    /// Cached best split of `[start, end)`, computing and storing it on a miss
    pub fn best_split(
        &mut self,
        kernel: &EnergyKernel,
        distances: &DistanceMatrix,
        start: usize,
        end: usize,
    ) -> Splitter {
        if let Some(split) = self.get(start) {
            self.hits += 1;
            return split;
        }
        self.misses += 1;
        trace!("Evaluating interval [{start}, {end})");
        let split = kernel.best_split(distances, start, end);
        self.set(start, split);
        split
    }

    /// Best split over every interval of `changepoints`, with the start of
    /// its interval. Ties keep the leftmost interval.
    pub fn best_over(
        &mut self,
        kernel: &EnergyKernel,
        distances: &DistanceMatrix,
        changepoints: &ChangepointSet,
    ) -> Option<(usize, Splitter)> {
        let mut best: Option<(usize, Splitter)> = None;
        for (start, end) in changepoints.intervals() {
            let split = self.best_split(kernel, distances, start, end);
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_invalidate() {
        let mut cache = SplitCache::new();
        assert!(cache.get(0).is_none());
        cache.set(0, Splitter::new(5, 1.0));
        assert_eq!(cache.get(0), Some(Splitter::new(5, 1.0)));
        cache.invalidate(0);
        assert!(cache.get(0).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_untouched_intervals_are_not_rescanned() {
        let x: Vec<f64> = (0..40)
            .map(|i| match i {
                0..=9 => 0.0,
                10..=19 => 5.0,
                20..=29 => 0.0,
                _ => 5.0,
            })
            .collect();
        let distances = DistanceMatrix::from_slice(&x).unwrap();
        let kernel = EnergyKernel::new(3);
        let mut cache = SplitCache::new();
        let mut set = ChangepointSet::new(x.len());

        let (start, split) = cache.best_over(&kernel, &distances, &set).unwrap();
        assert_eq!(cache.stats(), (0, 1));

        set.insert(split.index.unwrap());
        cache.invalidate(start);
        cache.best_over(&kernel, &distances, &set).unwrap();
        // Both intervals are new: two misses
        assert_eq!(cache.stats(), (0, 3));

        // Nothing changed: every lookup hits
        cache.best_over(&kernel, &distances, &set).unwrap();
        assert_eq!(cache.stats(), (2, 3));
    }

    #[test]
    fn test_cached_result_matches_kernel() {
        let x = [0.2, 0.0, 0.4, 0.0, 0.1, 0.5, 0.2, 0.4, 0.0, 0.0, 0.1, 0.6];
        let distances = DistanceMatrix::from_slice(&x).unwrap();
        let kernel = EnergyKernel::new(2);
        let set = ChangepointSet::new(x.len());
        let mut cache = SplitCache::new();
        assert_eq!(
            cache.best_over(&kernel, &distances, &set),
            kernel.best_over(&distances, &set)
        );
    }
}
