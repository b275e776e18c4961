//! Objective functions and the bi-objective problem consumed by the engine.
//!
//! An [`Objective`] is a scalar function of the decision vector together with
//! the box bounds it is defined on. The built-in benchmark is Schaffer's SCH
//! problem generalised to any number of variables: [`SquaredNorm`] and
//! [`SquaredOffset`], addressed by the integer ids 1 and 2.

use crate::core::Objectives;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Lower bound shared by both benchmark objectives.
pub const SCHAFFER_LOWER_BOUND: f64 = -1000.0;
/// Upper bound shared by both benchmark objectives.
pub const SCHAFFER_UPPER_BOUND: f64 = 1000.0;

/// Convenience alias used by the problem types.
pub type ProblemResult<T> = Result<T, ProblemError>;

/// Errors produced when a candidate or a problem definition is invalid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProblemError {
    /// The candidate contains the wrong number of decision variables.
    #[error("candidate has {found} decision variables but problem expects {expected}")]
    DimensionMismatch {
        /// Number of variables expected by the problem.
        expected: usize,
        /// Number of variables provided by the candidate solution.
        found: usize,
    },
    /// The lower and upper bounds do not align with the expected dimensionality.
    #[error("bounds lengths ({lower}, {upper}) do not match problem dimensionality ({expected})")]
    BoundsLengthMismatch {
        /// Expected dimensionality of the problem.
        expected: usize,
        /// Number of lower bounds provided.
        lower: usize,
        /// Number of upper bounds provided.
        upper: usize,
    },
    /// A problem must have at least one decision variable.
    #[error("problem must have at least one decision variable")]
    NoDecisionVariables,
    /// The two objectives share no feasible interval.
    #[error("objective bounds [{lower}, {upper}] are empty")]
    DisjointBounds {
        /// Largest of the objectives' lower bounds.
        lower: f64,
        /// Smallest of the objectives' upper bounds.
        upper: f64,
    },
    /// No objective is registered under the requested identifier.
    #[error("unknown objective id {0}")]
    UnknownObjective(u32),
}

/// Scalar objective to be minimised, defined on a box shared by every variable.
///
/// # Examples
/// ```
/// use nsga2_sch::ops::Objective;
///
/// struct Linear;
///
/// impl Objective for Linear {
///     fn evaluate(&self, genes: &[f64]) -> f64 { genes.iter().sum() }
///     fn bounds(&self) -> (f64, f64) { (0.0, 1.0) }
/// }
///
/// assert_eq!(Linear.evaluate(&[0.25, 0.5]), 0.75);
/// ```
pub trait Objective: Send + Sync {
    /// Evaluates the objective at `genes`.
    fn evaluate(&self, genes: &[f64]) -> f64;

    /// Lower and upper bound of every decision variable.
    fn bounds(&self) -> (f64, f64);
}

impl<T: Objective + ?Sized> Objective for &T {
    fn evaluate(&self, genes: &[f64]) -> f64 {
        (**self).evaluate(genes)
    }

    fn bounds(&self) -> (f64, f64) {
        (**self).bounds()
    }
}

impl<T: Objective + ?Sized> Objective for Box<T> {
    fn evaluate(&self, genes: &[f64]) -> f64 {
        (**self).evaluate(genes)
    }

    fn bounds(&self) -> (f64, f64) {
        (**self).bounds()
    }
}

impl<T: Objective + ?Sized> Objective for Arc<T> {
    fn evaluate(&self, genes: &[f64]) -> f64 {
        (**self).evaluate(genes)
    }

    fn bounds(&self) -> (f64, f64) {
        (**self).bounds()
    }
}

/// Sum of squares of the decision variables (benchmark objective 1).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SquaredNorm;

impl Objective for SquaredNorm {
    fn evaluate(&self, genes: &[f64]) -> f64 {
        genes.iter().map(|x| x * x).sum()
    }

    fn bounds(&self) -> (f64, f64) {
        (SCHAFFER_LOWER_BOUND, SCHAFFER_UPPER_BOUND)
    }
}

/// Sum of squared deviations from a fixed offset (benchmark objective 2 uses 2).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SquaredOffset {
    offset: f64,
}

impl SquaredOffset {
    /// Creates the objective `Σ (xᵢ - offset)²`.
    #[must_use]
    pub fn new(offset: f64) -> Self {
        Self { offset }
    }
}

impl Default for SquaredOffset {
    fn default() -> Self {
        Self::new(2.0)
    }
}

impl Objective for SquaredOffset {
    fn evaluate(&self, genes: &[f64]) -> f64 {
        genes.iter().map(|x| (x - self.offset).powi(2)).sum()
    }

    fn bounds(&self) -> (f64, f64) {
        (SCHAFFER_LOWER_BOUND, SCHAFFER_UPPER_BOUND)
    }
}

/// Looks up a benchmark objective by its integer identifier.
///
/// # Errors
/// Returns [`ProblemError::UnknownObjective`] for identifiers other than 1 and 2.
///
/// # Examples
/// ```
/// use nsga2_sch::ops::objective_for_id;
/// let objective = objective_for_id(2).unwrap();
/// assert_eq!(objective.evaluate(&[2.0, 2.0]), 0.0);
/// assert!(objective_for_id(3).is_err());
/// ```
pub fn objective_for_id(id: u32) -> ProblemResult<Box<dyn Objective>> {
    match id {
        1 => Ok(Box::new(SquaredNorm)),
        2 => Ok(Box::new(SquaredOffset::default())),
        other => Err(ProblemError::UnknownObjective(other)),
    }
}

/// Shared domain metadata of a problem.
pub trait ProblemBounds {
    /// Returns the number of decision variables handled by the problem.
    fn dimensions(&self) -> usize;

    /// Returns the lower bounds used to clamp candidate solutions.
    fn lower_bounds(&self) -> &[f64];

    /// Returns the upper bounds used to clamp candidate solutions.
    fn upper_bounds(&self) -> &[f64];

    /// Ensures that all bound arrays match the reported dimensionality.
    ///
    /// # Errors
    /// Returns [`ProblemError::BoundsLengthMismatch`] when the provided bound
    /// vectors do not align with [`Self::dimensions`].
    fn validate_bounds(&self) -> ProblemResult<()> {
        let expected = self.dimensions();
        let lower = self.lower_bounds().len();
        let upper = self.upper_bounds().len();
        if expected != lower || expected != upper {
            return Err(ProblemError::BoundsLengthMismatch {
                expected,
                lower,
                upper,
            });
        }
        Ok(())
    }

    /// Ensures that a candidate with the provided length is valid for the problem.
    ///
    /// # Errors
    /// Returns [`ProblemError::DimensionMismatch`] when the candidate contains
    /// the wrong number of decision variables.
    fn validate_candidate_length(&self, candidate_len: usize) -> ProblemResult<()> {
        let expected = self.dimensions();
        if candidate_len != expected {
            return Err(ProblemError::DimensionMismatch {
                expected,
                found: candidate_len,
            });
        }
        Ok(())
    }
}

/// Two objectives evaluated over the same decision vector.
///
/// Each variable is bounded by the intersection of both objectives' bounds.
///
/// # Examples
/// ```
/// use nsga2_sch::ops::{BiObjectiveProblem, ProblemBounds};
/// let problem = BiObjectiveProblem::schaffer(3).unwrap();
/// assert_eq!(problem.dimensions(), 3);
/// let objectives = problem.evaluate(&[1.0, 1.0, 1.0]).unwrap();
/// assert_eq!((objectives.f1, objectives.f2), (3.0, 3.0));
/// ```
pub struct BiObjectiveProblem {
    first: Box<dyn Objective>,
    second: Box<dyn Objective>,
    lower_bounds: Vec<f64>,
    upper_bounds: Vec<f64>,
}

impl BiObjectiveProblem {
    /// Pairs two objectives over `dimensions` decision variables.
    ///
    /// # Errors
    /// Returns [`ProblemError::NoDecisionVariables`] when `dimensions` is zero
    /// and [`ProblemError::DisjointBounds`] when the objectives' bounds do not
    /// overlap.
    pub fn new(
        first: impl Objective + 'static,
        second: impl Objective + 'static,
        dimensions: usize,
    ) -> ProblemResult<Self> {
        if dimensions == 0 {
            return Err(ProblemError::NoDecisionVariables);
        }
        let (first_lower, first_upper) = first.bounds();
        let (second_lower, second_upper) = second.bounds();
        let lower = first_lower.max(second_lower);
        let upper = first_upper.min(second_upper);
        if !(lower <= upper) {
            return Err(ProblemError::DisjointBounds { lower, upper });
        }
        Ok(Self {
            first: Box::new(first),
            second: Box::new(second),
            lower_bounds: vec![lower; dimensions],
            upper_bounds: vec![upper; dimensions],
        })
    }

    /// Builds a problem from two registered objective identifiers.
    ///
    /// # Errors
    /// Propagates [`objective_for_id`] and [`Self::new`] failures.
    pub fn from_ids(first_id: u32, second_id: u32, dimensions: usize) -> ProblemResult<Self> {
        Self::new(
            objective_for_id(first_id)?,
            objective_for_id(second_id)?,
            dimensions,
        )
    }

    /// The built-in benchmark: objectives 1 and 2.
    ///
    /// # Errors
    /// Returns [`ProblemError::NoDecisionVariables`] when `dimensions` is zero.
    pub fn schaffer(dimensions: usize) -> ProblemResult<Self> {
        Self::from_ids(1, 2, dimensions)
    }

    /// Evaluates both objectives at `genes`.
    ///
    /// # Errors
    /// Returns [`ProblemError::DimensionMismatch`] when `genes` has the wrong length.
    pub fn evaluate(&self, genes: &[f64]) -> ProblemResult<Objectives> {
        self.validate_candidate_length(genes.len())?;
        Ok(Objectives::new(
            self.first.evaluate(genes),
            self.second.evaluate(genes),
        ))
    }
}

impl ProblemBounds for BiObjectiveProblem {
    fn dimensions(&self) -> usize {
        self.lower_bounds.len()
    }

    fn lower_bounds(&self) -> &[f64] {
        &self.lower_bounds
    }

    fn upper_bounds(&self) -> &[f64] {
        &self.upper_bounds
    }
}

impl fmt::Debug for BiObjectiveProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BiObjectiveProblem")
            .field("dimensions", &self.dimensions())
            .field("lower_bounds", &self.lower_bounds)
            .field("upper_bounds", &self.upper_bounds)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Narrow(f64, f64);

    impl Objective for Narrow {
        fn evaluate(&self, genes: &[f64]) -> f64 {
            genes[0]
        }

        fn bounds(&self) -> (f64, f64) {
            (self.0, self.1)
        }
    }

    #[test]
    fn schaffer_objectives_match_closed_form() {
        assert_eq!(SquaredNorm.evaluate(&[1.0, -2.0]), 5.0);
        assert_eq!(SquaredOffset::default().evaluate(&[1.0, -2.0]), 17.0);
        assert_eq!(SquaredNorm.bounds(), (-1000.0, 1000.0));
    }

    #[test]
    fn bounds_are_intersected() {
        let problem = BiObjectiveProblem::new(Narrow(-1.0, 5.0), Narrow(0.0, 10.0), 2).unwrap();
        assert_eq!(problem.lower_bounds(), &[0.0, 0.0]);
        assert_eq!(problem.upper_bounds(), &[5.0, 5.0]);
        assert!(problem.validate_bounds().is_ok());
    }

    #[test]
    fn disjoint_bounds_are_rejected() {
        let err = BiObjectiveProblem::new(Narrow(0.0, 1.0), Narrow(2.0, 3.0), 1).unwrap_err();
        assert_eq!(err, ProblemError::DisjointBounds { lower: 2.0, upper: 1.0 });
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(
            BiObjectiveProblem::schaffer(0).unwrap_err(),
            ProblemError::NoDecisionVariables
        );
    }

    #[test]
    fn evaluate_checks_candidate_length() {
        let problem = BiObjectiveProblem::schaffer(2).unwrap();
        assert_eq!(
            problem.evaluate(&[1.0]).unwrap_err(),
            ProblemError::DimensionMismatch {
                expected: 2,
                found: 1
            }
        );
    }
}
