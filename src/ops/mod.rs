//! Genetic operators and problem abstractions.
//!
//! This module groups the traits that describe how the NSGA-II engine
//! interacts with the problem and how it produces offspring. Each sub-module
//! focuses on a particular aspect of the optimization workflow so the
//! implementations can stay lightweight and single-purpose.

pub mod crossover;
pub mod mutation;
pub mod problem;
pub mod selection;

pub use crossover::{CrossoverOperator, SimulatedBinaryCrossover};
pub use mutation::{MutationOperator, PolynomialMutation};
pub use problem::{
    objective_for_id, BiObjectiveProblem, Objective, ProblemBounds, ProblemError, ProblemResult,
    SquaredNorm, SquaredOffset,
};
pub use selection::{SelectionOperator, UniformSelection};

use crate::core::BoundsError;
use rand::{Rng, RngCore};
use thiserror::Error;

/// Errors raised while constructing operators.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OperatorError {
    /// Distribution index used by SBX or polynomial mutation was invalid.
    #[error("{operator} distribution index must be positive (received {value})")]
    InvalidDistributionIndex {
        /// Operator reporting the error.
        operator: &'static str,
        /// Offending value.
        value: f64,
    },
    /// A rate was outside `[0, 1]`.
    #[error("{operator} rate must be within [0, 1] (received {value})")]
    InvalidProbability {
        /// Operator reporting the error.
        operator: &'static str,
        /// Offending value.
        value: f64,
    },
    /// Bound vectors handed to the operator were inconsistent.
    #[error(transparent)]
    Bounds(#[from] BoundsError),
}

pub(crate) fn check_distribution_index(
    operator: &'static str,
    value: f64,
) -> Result<(), OperatorError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(OperatorError::InvalidDistributionIndex { operator, value })
    }
}

pub(crate) fn check_probability(operator: &'static str, value: f64) -> Result<(), OperatorError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(OperatorError::InvalidProbability { operator, value })
    }
}

/// Uniform draw from `[0, 1)`.
pub(crate) fn random_unit(rng: &mut dyn RngCore) -> f64 {
    rng.gen::<f64>()
}
