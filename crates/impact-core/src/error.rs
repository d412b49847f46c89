//! Error types for impact analysis
//!
//! Provides a unified error type for all impact-stats crates.

use thiserror::Error;

/// Core error type for changepoint and impact operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid argument provided to a detector or estimator
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Input sequence rejected by the numeric containers
    #[error("Invalid numeric input: {0}")]
    NumericInput(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} samples, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// Threading or parallelization error
    #[error("Execution error: {0}")]
    Execution(String),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for empty input
    pub fn empty_input(context: &str) -> Self {
        Self::NumericInput(format!("{context} is empty"))
    }

    /// Create an error for a probability-like argument outside [0, 1]
    pub fn out_of_unit_interval(name: &str, value: f64) -> Self {
        Self::InvalidArgument(format!("{name} ({value}) must be in [0, 1]"))
    }

    /// Create an error for size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::InvalidArgument(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str, index: usize) -> Self {
        Self::NumericInput(format!(
            "{context} contains a NaN or infinite value at index {index}"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidArgument("min_size must be at least 2".to_string());
        assert_eq!(err.to_string(), "Invalid argument: min_size must be at least 2");

        let err = Error::NumericInput("series is empty".to_string());
        assert_eq!(err.to_string(), "Invalid numeric input: series is empty");

        let err = Error::InsufficientData { expected: 10, actual: 5 };
        assert_eq!(err.to_string(), "Insufficient data: expected at least 10 samples, got 5");

        let err = Error::Execution("thread pool exhausted".to_string());
        assert_eq!(err.to_string(), "Execution error: thread pool exhausted");
    }

    #[test]
    fn test_error_helper_functions() {
        let err = Error::empty_input("series");
        assert!(matches!(err, Error::NumericInput(_)));
        assert_eq!(err.to_string(), "Invalid numeric input: series is empty");

        let err = Error::out_of_unit_interval("significance", 1.5);
        assert_eq!(err.to_string(), "Invalid argument: significance (1.5) must be in [0, 1]");

        let err = Error::size_mismatch(100, 50, "permutation");
        assert_eq!(
            err.to_string(),
            "Invalid argument: Size mismatch in permutation: expected 100, got 50"
        );

        let err = Error::non_finite("series", 3);
        assert_eq!(
            err.to_string(),
            "Invalid numeric input: series contains a NaN or infinite value at index 3"
        );
    }

    #[test]
    fn test_error_from_anyhow() {
        let anyhow_err = anyhow::anyhow!("custom error message");
        let err: Error = anyhow_err.into();

        match err {
            Error::Other(_) => {
                assert!(err.to_string().contains("custom error message"));
            }
            _ => panic!("Wrong error type"),
        }
    }

    #[test]
    fn test_error_patterns() {
        fn check_sample_size(data: &[f64], min_size: usize) -> Result<()> {
            if data.len() < min_size {
                return Err(Error::InsufficientData {
                    expected: min_size,
                    actual: data.len(),
                });
            }
            Ok(())
        }

        assert!(check_sample_size(&[1.0, 2.0], 5).is_err());
        assert!(check_sample_size(&[1.0, 2.0, 3.0, 4.0, 5.0], 5).is_ok());
    }
}
