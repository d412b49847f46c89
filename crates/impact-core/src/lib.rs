//! Core types for changepoint and impact analysis
//!
//! This crate provides the foundation shared by the detection and estimation
//! crates:
//!
//! - [`Series`]: validated, non-empty sequences of finite observations with
//!   moving-average smoothing and successive differencing
//! - [`DenseMatrix`]: a dense matrix with the copy/reduction/permutation
//!   operations the energy statistics rely on
//! - [`execution`]: sequential and Rayon-backed engines for batches of
//!   independent Monte-Carlo tasks
//! - [`Error`]/[`Result`]: the error taxonomy used across the workspace
//!
//! # Example
//!
//! ```rust
//! use impact_core::{execution::{sequential, ExecutionEngine}, Series};
//!
//! let series = Series::new(vec![1.0, 3.0, 2.0, 5.0, 4.0]).unwrap();
//! assert_eq!(series.diff(), vec![2.0, -1.0, 3.0, -1.0]);
//!
//! let engine = sequential();
//! let doubled = engine.execute_batch(3, |i| i * 2);
//! assert_eq!(doubled, vec![0, 2, 4]);
//! ```

pub mod error;
pub mod execution;
pub mod matrix;
pub mod series;
pub mod utils;

// Re-export core types
pub use error::{Error, Result};

pub use execution::{
    auto_engine, sequential, DefaultEngine, ExecutionEngine, ExecutionStrategy, SequentialEngine,
};
#[cfg(feature = "parallel")]
pub use execution::{parallel, ParallelEngine};

pub use matrix::DenseMatrix;
pub use series::Series;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::execution::{auto_engine, sequential, ExecutionEngine, SequentialEngine};
    #[cfg(feature = "parallel")]
    pub use crate::execution::ParallelEngine;
    pub use crate::{DenseMatrix, Result, Series};
}
