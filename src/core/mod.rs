//! Core data model shared by the operators and the NSGA-II engine.
//!
//! An [`Individual`] couples a decision vector with its two objective values
//! and the transient ranking data (Pareto rank and crowding distance) that
//! the engine recomputes on every pass. A [`Population`] is an index-stable
//! collection of individuals.

pub mod experiment;

pub use experiment::{ExperimentMetadata, ExperimentResult, RunResult, RunStats};

use rand::distributions::Uniform;
use rand::Rng;
use thiserror::Error;

/// Scalar type used to represent a single decision variable.
pub type Gene = f64;

/// Objective values of a bi-objective minimisation problem.
///
/// # Examples
/// ```
/// use nsga2_sch::Objectives;
/// let a = Objectives::new(1.0, 2.0);
/// let b = Objectives::new(1.0, 3.0);
/// assert!(a.dominates(&b));
/// assert!(!b.dominates(&a));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Objectives {
    /// Value of the first objective.
    pub f1: f64,
    /// Value of the second objective.
    pub f2: f64,
}

impl Objectives {
    /// Creates an objective pair.
    #[must_use]
    pub fn new(f1: f64, f2: f64) -> Self {
        Self { f1, f2 }
    }

    /// Returns `true` when `self` Pareto-dominates `other` under minimisation.
    ///
    /// Pairs that are equal on both objectives dominate neither way.
    #[must_use]
    pub fn dominates(&self, other: &Self) -> bool {
        (self.f1 < other.f1 && self.f2 <= other.f2) || (self.f1 <= other.f1 && self.f2 < other.f2)
    }

    /// Euclidean distance between two points in objective space.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        ((self.f1 - other.f1).powi(2) + (self.f2 - other.f2).powi(2)).sqrt()
    }
}

/// A candidate solution together with its evaluation and ranking data.
///
/// # Examples
/// ```
/// use nsga2_sch::Individual;
/// let individual = Individual::new(vec![0.0, 1.0]);
/// assert_eq!(individual.genes(), &[0.0, 1.0]);
/// assert!(individual.rank().is_none());
/// assert_eq!(individual.crowding_distance(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    genes: Vec<Gene>,
    objectives: Objectives,
    rank: Option<usize>,
    crowding_distance: f64,
}

impl Individual {
    /// Creates an unevaluated, unranked individual from raw genes.
    #[must_use]
    pub fn new(genes: Vec<Gene>) -> Self {
        Self {
            genes,
            objectives: Objectives::default(),
            rank: None,
            crowding_distance: 0.0,
        }
    }

    /// Creates an individual with known objective values.
    #[must_use]
    pub fn with_objectives(genes: Vec<Gene>, objectives: Objectives) -> Self {
        Self {
            objectives,
            ..Self::new(genes)
        }
    }

    /// Draws an individual uniformly at random within the provided bounds.
    ///
    /// # Errors
    /// Returns [`BoundsError`] when the bounds have mismatched lengths or when
    /// any lower bound exceeds the corresponding upper bound.
    pub fn random_with_bounds<R: Rng + ?Sized>(
        lower_bounds: &[Gene],
        upper_bounds: &[Gene],
        rng: &mut R,
    ) -> Result<Self, BoundsError> {
        validate_bounds(lower_bounds, upper_bounds)?;
        let genes = lower_bounds
            .iter()
            .zip(upper_bounds.iter())
            .map(|(&lower, &upper)| {
                let value: f64 = rng.sample(Uniform::new_inclusive(lower, upper));
                value.clamp(lower, upper)
            })
            .collect();
        Ok(Self::new(genes))
    }

    /// Decision variables of the individual.
    #[must_use]
    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    /// Mutable access to the decision variables.
    pub fn genes_mut(&mut self) -> &mut [Gene] {
        &mut self.genes
    }

    /// Objective values recorded by the last evaluation.
    #[must_use]
    pub fn objectives(&self) -> Objectives {
        self.objectives
    }

    /// Records the objective values produced by an evaluation.
    pub fn set_objectives(&mut self, objectives: Objectives) {
        self.objectives = objectives;
    }

    /// Pareto rank assigned by the last sort pass (1 is the non-dominated front).
    #[must_use]
    pub fn rank(&self) -> Option<usize> {
        self.rank
    }

    pub(crate) fn set_rank(&mut self, rank: Option<usize>) {
        self.rank = rank;
    }

    /// Crowding distance assigned by the last crowding pass.
    #[must_use]
    pub fn crowding_distance(&self) -> f64 {
        self.crowding_distance
    }

    pub(crate) fn set_crowding_distance(&mut self, distance: f64) {
        self.crowding_distance = distance;
    }
}

/// Index-stable collection of individuals.
///
/// # Examples
/// ```
/// use nsga2_sch::{Individual, Population};
/// let mut population = Population::empty();
/// population.push(Individual::new(vec![1.0]));
/// assert_eq!(population.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Creates an empty population.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Samples `size` individuals uniformly within the bounds.
    ///
    /// # Errors
    /// Propagates [`BoundsError`] from [`Individual::random_with_bounds`].
    pub fn random<R: Rng + ?Sized>(
        size: usize,
        lower_bounds: &[Gene],
        upper_bounds: &[Gene],
        rng: &mut R,
    ) -> Result<Self, BoundsError> {
        let individuals = (0..size)
            .map(|_| Individual::random_with_bounds(lower_bounds, upper_bounds, rng))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { individuals })
    }

    /// Number of individuals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Whether the population holds no individuals.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Appends an individual.
    pub fn push(&mut self, individual: Individual) {
        self.individuals.push(individual);
    }

    /// Moves every individual of `other` to the end of this population.
    pub fn append(&mut self, other: &mut Self) {
        self.individuals.append(&mut other.individuals);
    }

    /// Shared view of the individuals.
    #[must_use]
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Mutable view of the individuals.
    pub fn individuals_mut(&mut self) -> &mut [Individual] {
        &mut self.individuals
    }

    /// Consumes the population and returns its individuals.
    #[must_use]
    pub fn into_individuals(self) -> Vec<Individual> {
        self.individuals
    }

    /// Objective values of every individual holding `rank`.
    #[must_use]
    pub fn front_objectives(&self, rank: usize) -> Vec<Objectives> {
        self.individuals
            .iter()
            .filter(|individual| individual.rank == Some(rank))
            .map(Individual::objectives)
            .collect()
    }
}

impl From<Vec<Individual>> for Population {
    fn from(individuals: Vec<Individual>) -> Self {
        Self { individuals }
    }
}

/// Errors produced when validating bound vectors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoundsError {
    /// The number of provided bounds entries does not match the expected
    /// dimensionality.
    #[error("expected {expected} bounds but found {found}")]
    DimensionMismatch {
        /// Number of dimensions specified by the caller.
        expected: usize,
        /// Number of bounds entries actually provided.
        found: usize,
    },
    /// One of the dimensions has an invalid lower/upper pairing.
    #[error("dimension {dimension} has invalid bounds [{lower}, {upper}]")]
    InvalidRange {
        /// The index of the problematic dimension.
        dimension: usize,
        /// The invalid lower bound value.
        lower: Gene,
        /// The invalid upper bound value.
        upper: Gene,
    },
}

pub(crate) fn validate_bounds(lower_bounds: &[Gene], upper_bounds: &[Gene]) -> Result<(), BoundsError> {
    if lower_bounds.len() != upper_bounds.len() {
        return Err(BoundsError::DimensionMismatch {
            expected: lower_bounds.len(),
            found: upper_bounds.len(),
        });
    }
    for (dimension, (&lower, &upper)) in lower_bounds.iter().zip(upper_bounds.iter()).enumerate() {
        if !(lower.is_finite() && upper.is_finite()) || lower > upper {
            return Err(BoundsError::InvalidRange {
                dimension,
                lower,
                upper,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn dominance_requires_strict_improvement() {
        let a = Objectives::new(1.0, 1.0);
        assert!(!a.dominates(&a));
        assert!(Objectives::new(0.5, 1.0).dominates(&a));
        assert!(Objectives::new(1.0, 0.5).dominates(&a));
        assert!(!Objectives::new(0.5, 1.5).dominates(&a));
    }

    #[test]
    fn random_individual_respects_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        let lower = [-1.0, 0.0, 10.0];
        let upper = [1.0, 0.5, 10.0];
        for _ in 0..100 {
            let individual = Individual::random_with_bounds(&lower, &upper, &mut rng).unwrap();
            for ((gene, lo), hi) in individual.genes().iter().zip(&lower).zip(&upper) {
                assert!(gene >= lo && gene <= hi);
            }
            assert!(individual.rank().is_none());
        }
    }

    #[test]
    fn validate_bounds_errors() {
        assert_eq!(
            validate_bounds(&[0.0], &[1.0, 2.0]),
            Err(BoundsError::DimensionMismatch {
                expected: 1,
                found: 2
            })
        );
        assert!(matches!(
            validate_bounds(&[2.0], &[1.0]),
            Err(BoundsError::InvalidRange { dimension: 0, .. })
        ));
    }

    #[test]
    fn front_objectives_filters_by_rank() {
        let mut a = Individual::with_objectives(vec![0.0], Objectives::new(0.0, 4.0));
        let mut b = Individual::with_objectives(vec![1.0], Objectives::new(1.0, 5.0));
        a.set_rank(Some(1));
        b.set_rank(Some(2));
        let population = Population::from(vec![a, b]);
        assert_eq!(population.front_objectives(1), vec![Objectives::new(0.0, 4.0)]);
        assert_eq!(population.front_objectives(2).len(), 1);
        assert!(population.front_objectives(3).is_empty());
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Objectives::new(0.0, 0.0);
        let b = Objectives::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-12);
    }
}
