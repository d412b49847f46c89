//! Changepoint detection and impact estimation for time series
//!
//! This crate re-exports the workspace crates:
//!
//! - [`impact_core`]: validated series, dense matrices, execution engines,
//!   errors
//! - [`impact_changepoint`]: E-Divisive energy-statistic changepoint
//!   detection
//! - [`impact_bootstrap`]: bootstrap random-walk estimation of the size and
//!   direction of a level change
//!
//! A typical pipeline finds where a series changed and then asks how
//! surprising the change was:
//!
//! ```rust
//! use impact_stats::prelude::*;
//!
//! let mut data = vec![1.0; 30];
//! data.extend(vec![4.0; 20]);
//!
//! let boundaries = detect_changes(&data, 0.05, 199, 5).unwrap();
//! assert_eq!(boundaries, vec![0, 30, 50]);
//!
//! let (before, after) = data.split_at(boundaries[1]);
//! let (_, direction) = detect_impact(before, after, 500).unwrap();
//! assert_eq!(direction, Direction::GreaterThan);
//! ```

pub use impact_bootstrap;
pub use impact_changepoint;
pub use impact_core;

pub use impact_bootstrap::{detect_impact, Direction, ImpactEstimator, ImpactParameters};
pub use impact_changepoint::{detect_changes, EnergyDivisiveDetector, EnergyDivisiveParameters};
pub use impact_core::{Error, Result, Series};

/// Prelude module for convenient imports
pub mod prelude {
    pub use impact_bootstrap::{
        detect_impact, BoundaryMode, Direction, ImpactEstimator, ImpactParameters, ImpactReport,
        ImpactResult,
    };
    pub use impact_changepoint::{
        detect_changes, ChangePoint, ChangePointDetectorProperties, ChangePointResult,
        ConfigurableDetector, EnergyDivisiveDetector, EnergyDivisiveParameters, SimpleDetector,
        Termination,
    };
    pub use impact_core::prelude::*;
}
