//! Result types for impact estimation

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of the level change between the two sequences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    /// Both tails are equally likely; no evidence of a change
    Equals,
    /// The "after" sequence ended above the simulated continuations
    GreaterThan,
    /// The "after" sequence ended below the simulated continuations
    LessThan,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Equals => write!(f, "EQUALS"),
            Direction::GreaterThan => write!(f, "GREATER_THAN"),
            Direction::LessThan => write!(f, "LESS_THAN"),
        }
    }
}

/// Probability of the observed level under the bootstrap walk, and the side
/// it falls on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactResult {
    /// Fraction of simulations at least as extreme on the reported side,
    /// in [0, 1]; 1.0 for [`Direction::Equals`]
    pub probability: f64,
    pub direction: Direction,
}

impl ImpactResult {
    /// Pick the rarer tail; ties report no change
    pub fn from_tails(p_lower: f64, p_upper: f64) -> Self {
        if p_lower < p_upper {
            Self {
                probability: p_lower,
                direction: Direction::LessThan,
            }
        } else if p_upper < p_lower {
            Self {
                probability: p_upper,
                direction: Direction::GreaterThan,
            }
        } else {
            Self {
                probability: 1.0,
                direction: Direction::Equals,
            }
        }
    }

    /// Check whether the change is significant at level `alpha`
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.direction != Direction::Equals && self.probability < alpha
    }
}

impl fmt::Display for ImpactResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (p = {:.4})", self.direction, self.probability)
    }
}

/// Full account of one impact estimation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactReport {
    pub result: ImpactResult,
    /// Fraction of simulated destinations below the observed value
    pub p_lower: f64,
    /// Fraction of simulated destinations above the observed value
    pub p_upper: f64,
    /// Last smoothed "before" value; every walk starts here
    pub start: f64,
    /// Last smoothed "after" value
    pub observed: f64,
    /// Mean of the simulated destinations
    pub mean_destination: f64,
    /// Number of simulated walks
    pub iterations: usize,
    /// Steps per walk
    pub steps_per_walk: usize,
}

impl ImpactReport {
    pub fn probability(&self) -> f64 {
        self.result.probability
    }

    pub fn direction(&self) -> Direction {
        self.result.direction
    }
}

impl fmt::Display for ImpactReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Impact Estimate:")?;
        writeln!(f, "  Result: {}", self.result)?;
        writeln!(f, "  Walk start: {:.6}", self.start)?;
        writeln!(f, "  Observed: {:.6}", self.observed)?;
        writeln!(f, "  Mean simulated: {:.6}", self.mean_destination)?;
        writeln!(
            f,
            "  Tails: lower {:.4}, upper {:.4} over {} walks of {} steps",
            self.p_lower, self.p_upper, self.iterations, self.steps_per_walk
        )
    }
}
