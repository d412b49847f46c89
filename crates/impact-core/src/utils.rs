//! Utility functions for working with data slices

/// Calculate the mean of a slice
///
/// Returns 0.0 for empty slices.
///
/// # Examples
///
/// ```rust
/// use impact_core::utils::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
/// assert_eq!(mean(&[]), 0.0);
/// ```
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Count the members of `population` strictly greater than `x`
///
/// # Examples
///
/// ```rust
/// use impact_core::utils::count_greater;
///
/// assert_eq!(count_greater(2.0, &[1.0, 2.0, 3.0, 4.0]), 2);
/// ```
pub fn count_greater(x: f64, population: &[f64]) -> usize {
    population.iter().filter(|&&value| value > x).count()
}

/// Count the members of `population` strictly less than `x`
pub fn count_less(x: f64, population: &[f64]) -> usize {
    population.iter().filter(|&&value| value < x).count()
}
