//! NSGA-II engine for the real-coded bi-objective problems of this crate.
//!
//! The [`Nsga2`] engine pairs a [`BiObjectiveProblem`] with SBX crossover,
//! polynomial mutation and uniform parent selection, and iterates until the
//! objective-call budget is spent. It is configured through [`Nsga2Builder`];
//! any operator can be swapped for a custom implementation.

pub mod crowding;
pub mod evaluation;
pub mod sorting;
pub mod survival;

pub use crowding::{assign_crowding_distance, assign_crowding_distance_to};
pub use evaluation::CountingEvaluator;
pub use sorting::non_dominated_sort;
pub use survival::select_survivors;

use crate::convergence::AnalyticalFront;
use crate::core::{BoundsError, Individual, Objectives, Population, RunResult, RunStats};
use crate::ops::crossover::DEFAULT_SBX_ETA;
use crate::ops::mutation::DEFAULT_POLY_ETA;
use crate::ops::{
    BiObjectiveProblem, CrossoverOperator, MutationOperator, OperatorError, PolynomialMutation,
    ProblemBounds, ProblemError, SelectionOperator, SimulatedBinaryCrossover, UniformSelection,
};
use rand::{Rng, RngCore};
use thiserror::Error;
use tracing::{debug, instrument};

const DEFAULT_POPULATION_SIZE: usize = 100;
const DEFAULT_MAX_EVALUATIONS: usize = 10_000;
const DEFAULT_CROSSOVER_RATE: f64 = 0.9;
const DEFAULT_MUTATION_RATE: f64 = 0.1;

/// Which individuals share a crowding-distance computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CrowdingScope {
    /// One computation over the whole population, regardless of rank.
    #[default]
    Population,
    /// One computation per dominance front.
    PerFront,
}

/// Errors produced by the [`Nsga2`] engine.
#[derive(Debug, Error)]
pub enum Nsga2Error {
    /// Population size must be greater than zero.
    #[error("population size must be greater than zero (received {0})")]
    InvalidPopulationSize(usize),
    /// The evaluation budget must be positive.
    #[error("evaluation budget must be positive (received {0})")]
    InvalidEvaluationBudget(usize),
    /// A default operator rejected its parameters.
    #[error(transparent)]
    Operator(#[from] OperatorError),
    /// The problem reported inconsistent bounds.
    #[error(transparent)]
    Bounds(#[from] BoundsError),
    /// The problem reported an error.
    #[error(transparent)]
    Problem(#[from] ProblemError),
    /// The selection operator returned an index outside the parent population.
    #[error("selection returned index {index} for a population of {size}")]
    SelectionOutOfRange {
        /// Index returned by the operator.
        index: usize,
        /// Size of the parent population.
        size: usize,
    },
}

/// Report returned by [`Nsga2::run`].
#[derive(Debug, Clone)]
pub struct Nsga2Report {
    /// Objective values of the final non-dominated front.
    pub final_front: Vec<Objectives>,
    /// Final population, ranked and crowded.
    pub final_population: Population,
    /// Objective calls consumed by the run.
    pub evaluations: usize,
    /// Per-generation metrics.
    pub stats: RunStats,
}

impl Nsga2Report {
    /// Number of generations executed.
    #[must_use]
    pub fn generations(&self) -> usize {
        self.stats.generations()
    }

    /// Freezes the report into a [`RunResult`] scored against `reference`.
    #[must_use]
    pub fn run_result(&self, reference: &AnalyticalFront) -> RunResult {
        RunResult::new(
            self.final_front.clone(),
            reference.mean_distance(&self.final_front),
            self.evaluations,
            self.generations(),
        )
    }
}

/// Builder used to configure an [`Nsga2`] engine.
pub struct Nsga2Builder {
    problem: BiObjectiveProblem,
    population_size: usize,
    max_evaluations: usize,
    crossover_rate: f64,
    mutation_rate: f64,
    crowding_scope: CrowdingScope,
    crossover: Option<Box<dyn CrossoverOperator>>,
    mutation: Option<Box<dyn MutationOperator>>,
    selection: Option<Box<dyn SelectionOperator>>,
}

impl Nsga2Builder {
    /// Configures the population size.
    #[must_use]
    pub fn population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Configures the objective-call budget of a run.
    #[must_use]
    pub fn max_evaluations(mut self, budget: usize) -> Self {
        self.max_evaluations = budget;
        self
    }

    /// Probability that a selected pair is recombined by the default SBX.
    #[must_use]
    pub fn crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Per-gene probability used by the default polynomial mutation.
    #[must_use]
    pub fn mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Selects how crowding distances are grouped.
    #[must_use]
    pub fn crowding_scope(mut self, scope: CrowdingScope) -> Self {
        self.crowding_scope = scope;
        self
    }

    /// Replaces the crossover operator.
    #[must_use]
    pub fn crossover(mut self, operator: impl CrossoverOperator + 'static) -> Self {
        self.crossover = Some(Box::new(operator));
        self
    }

    /// Replaces the mutation operator.
    #[must_use]
    pub fn mutation(mut self, operator: impl MutationOperator + 'static) -> Self {
        self.mutation = Some(Box::new(operator));
        self
    }

    /// Replaces the parent selection operator.
    #[must_use]
    pub fn selection(mut self, operator: impl SelectionOperator + 'static) -> Self {
        self.selection = Some(Box::new(operator));
        self
    }

    /// Finalizes the builder into an [`Nsga2`] engine.
    ///
    /// # Errors
    /// Returns [`Nsga2Error`] when the population size or budget is zero, when
    /// the problem bounds are inconsistent, or when a default operator rejects
    /// its rate.
    pub fn build(self) -> Result<Nsga2, Nsga2Error> {
        if self.population_size == 0 {
            return Err(Nsga2Error::InvalidPopulationSize(0));
        }
        if self.max_evaluations == 0 {
            return Err(Nsga2Error::InvalidEvaluationBudget(0));
        }
        let problem = self.problem;
        problem.validate_bounds()?;
        let lower_bounds = problem.lower_bounds().to_vec();
        let upper_bounds = problem.upper_bounds().to_vec();

        let crossover: Box<dyn CrossoverOperator> = match self.crossover {
            Some(operator) => operator,
            None => Box::new(SimulatedBinaryCrossover::new(
                lower_bounds.clone(),
                upper_bounds.clone(),
                DEFAULT_SBX_ETA,
                self.crossover_rate,
            )?),
        };
        let mutation: Box<dyn MutationOperator> = match self.mutation {
            Some(operator) => operator,
            None => Box::new(PolynomialMutation::new(
                lower_bounds,
                upper_bounds,
                DEFAULT_POLY_ETA,
                self.mutation_rate,
            )?),
        };
        let selection = self
            .selection
            .unwrap_or_else(|| Box::new(UniformSelection));

        Ok(Nsga2 {
            problem,
            population_size: self.population_size,
            max_evaluations: self.max_evaluations,
            crowding_scope: self.crowding_scope,
            crossover,
            mutation,
            selection,
        })
    }
}

/// NSGA-II engine bounded by an objective-call budget.
///
/// # Examples
/// ```
/// use nsga2_sch::nsga2::Nsga2;
/// use nsga2_sch::ops::BiObjectiveProblem;
/// use rand::SeedableRng;
///
/// let problem = BiObjectiveProblem::schaffer(2).unwrap();
/// let engine = Nsga2::builder(problem)
///     .population_size(10)
///     .max_evaluations(200)
///     .build()
///     .unwrap();
/// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
/// let report = engine.run(&mut rng).unwrap();
/// assert_eq!(report.final_population.len(), 10);
/// assert!(report.evaluations >= 200);
/// assert!(!report.final_front.is_empty());
/// ```
pub struct Nsga2 {
    problem: BiObjectiveProblem,
    population_size: usize,
    max_evaluations: usize,
    crowding_scope: CrowdingScope,
    crossover: Box<dyn CrossoverOperator>,
    mutation: Box<dyn MutationOperator>,
    selection: Box<dyn SelectionOperator>,
}

impl Nsga2 {
    /// Creates a builder used to configure the engine.
    #[must_use]
    pub fn builder(problem: BiObjectiveProblem) -> Nsga2Builder {
        Nsga2Builder {
            problem,
            population_size: DEFAULT_POPULATION_SIZE,
            max_evaluations: DEFAULT_MAX_EVALUATIONS,
            crossover_rate: DEFAULT_CROSSOVER_RATE,
            mutation_rate: DEFAULT_MUTATION_RATE,
            crowding_scope: CrowdingScope::default(),
            crossover: None,
            mutation: None,
            selection: None,
        }
    }

    /// Problem being optimised.
    #[must_use]
    pub fn problem(&self) -> &BiObjectiveProblem {
        &self.problem
    }

    /// Configured population size.
    #[must_use]
    pub fn population_size(&self) -> usize {
        self.population_size
    }

    /// Configured objective-call budget.
    #[must_use]
    pub fn max_evaluations(&self) -> usize {
        self.max_evaluations
    }

    /// Executes one independent run.
    ///
    /// The evaluation counter starts at zero, so the initial population's
    /// evaluation counts toward the budget. Generations continue while the
    /// counter is below the budget; the last one may overshoot it.
    ///
    /// # Errors
    /// Returns [`Nsga2Error`] when evaluation fails or a custom selection
    /// operator returns an invalid index.
    #[instrument(
        level = "debug",
        skip(self, rng),
        fields(
            population_size = self.population_size,
            max_evaluations = self.max_evaluations
        )
    )]
    pub fn run<R: Rng>(&self, rng: &mut R) -> Result<Nsga2Report, Nsga2Error> {
        let mut evaluator = CountingEvaluator::new(&self.problem);
        let mut population = Population::random(
            self.population_size,
            self.problem.lower_bounds(),
            self.problem.upper_bounds(),
            rng,
        )?;
        evaluator.evaluate_all(population.individuals_mut())?;

        let mut stats = RunStats::new();
        while evaluator.evaluations() < self.max_evaluations {
            self.rank_and_crowd(population.individuals_mut());
            let mut offspring = self.recombine(population.individuals(), rng)?;
            self.mutate(offspring.individuals_mut(), rng);
            evaluator.evaluate_all(offspring.individuals_mut())?;

            population.append(&mut offspring);
            self.rank_and_crowd(population.individuals_mut());
            population = Population::from(select_survivors(
                population.into_individuals(),
                self.population_size,
            ));

            let front_size = population
                .individuals()
                .iter()
                .filter(|individual| individual.rank() == Some(1))
                .count();
            stats.record(front_size, evaluator.evaluations());
            debug!(
                generation = stats.generations(),
                evaluations = evaluator.evaluations(),
                front_size,
                "generation complete"
            );
        }

        self.rank_and_crowd(population.individuals_mut());
        let final_front = population.front_objectives(1);
        debug!(
            generations = stats.generations(),
            evaluations = evaluator.evaluations(),
            front_size = final_front.len(),
            "final population ranked"
        );
        Ok(Nsga2Report {
            final_front,
            final_population: population,
            evaluations: evaluator.evaluations(),
            stats,
        })
    }

    fn rank_and_crowd(&self, individuals: &mut [Individual]) {
        let fronts = non_dominated_sort(individuals);
        match self.crowding_scope {
            CrowdingScope::Population => assign_crowding_distance(individuals),
            CrowdingScope::PerFront => {
                for front in &fronts {
                    assign_crowding_distance_to(individuals, front);
                }
            }
        }
    }

    /// Produces as many children as there are parents. The second child of
    /// the last pair is dropped when the parent count is odd.
    fn recombine(
        &self,
        parents: &[Individual],
        rng: &mut dyn RngCore,
    ) -> Result<Population, Nsga2Error> {
        let target = parents.len();
        let mut offspring = Population::empty();
        while offspring.len() < target {
            let Some((a, b)) = self.selection.select_pair(parents, rng) else {
                break;
            };
            let parent_a = Self::parent(parents, a)?;
            let parent_b = Self::parent(parents, b)?;
            let (child_a, child_b) = self.crossover.crossover_individuals(parent_a, parent_b, rng);
            offspring.push(child_a);
            if offspring.len() < target {
                offspring.push(child_b);
            }
        }
        Ok(offspring)
    }

    fn parent(parents: &[Individual], index: usize) -> Result<&Individual, Nsga2Error> {
        parents.get(index).ok_or(Nsga2Error::SelectionOutOfRange {
            index,
            size: parents.len(),
        })
    }

    fn mutate(&self, offspring: &mut [Individual], rng: &mut dyn RngCore) {
        for child in offspring {
            self.mutation.mutate_individual(child, rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn engine(population_size: usize, budget: usize) -> Nsga2 {
        Nsga2::builder(BiObjectiveProblem::schaffer(3).unwrap())
            .population_size(population_size)
            .max_evaluations(budget)
            .build()
            .unwrap()
    }

    #[test]
    fn build_rejects_invalid_configuration() {
        let problem = || BiObjectiveProblem::schaffer(1).unwrap();
        assert!(matches!(
            Nsga2::builder(problem()).population_size(0).build(),
            Err(Nsga2Error::InvalidPopulationSize(0))
        ));
        assert!(matches!(
            Nsga2::builder(problem()).max_evaluations(0).build(),
            Err(Nsga2Error::InvalidEvaluationBudget(0))
        ));
        assert!(matches!(
            Nsga2::builder(problem()).crossover_rate(1.5).build(),
            Err(Nsga2Error::Operator(OperatorError::InvalidProbability { .. }))
        ));
        assert!(matches!(
            Nsga2::builder(problem()).mutation_rate(-0.5).build(),
            Err(Nsga2Error::Operator(OperatorError::InvalidProbability { .. }))
        ));
    }

    #[test]
    fn budget_is_consumed_in_generation_steps() {
        let engine = engine(10, 100);
        let report = engine.run(&mut StdRng::seed_from_u64(1)).unwrap();
        // 20 calls for initialization, then 20 per generation.
        assert_eq!(report.evaluations, 100);
        assert_eq!(report.generations(), 4);
        assert_eq!(report.stats.evaluations, vec![40, 60, 80, 100]);
    }

    #[test]
    fn budget_below_initialization_runs_no_generation() {
        let engine = engine(10, 5);
        let report = engine.run(&mut StdRng::seed_from_u64(2)).unwrap();
        assert_eq!(report.evaluations, 20);
        assert_eq!(report.generations(), 0);
        assert!(report
            .final_population
            .individuals()
            .iter()
            .all(|individual| individual.rank().is_some()));
    }

    #[test]
    fn odd_population_keeps_its_size() {
        let engine = engine(7, 200);
        let report = engine.run(&mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(report.final_population.len(), 7);
        assert!(report.evaluations >= 200);
        assert!(report.evaluations < 200 + 14);
    }

    #[test]
    fn per_front_scope_runs() {
        let engine = Nsga2::builder(BiObjectiveProblem::schaffer(2).unwrap())
            .population_size(12)
            .max_evaluations(240)
            .crowding_scope(CrowdingScope::PerFront)
            .build()
            .unwrap();
        let report = engine.run(&mut StdRng::seed_from_u64(4)).unwrap();
        assert_eq!(report.final_population.len(), 12);
        assert_eq!(
            report.final_front.len(),
            report.final_population.front_objectives(1).len()
        );
    }

    #[test]
    fn out_of_range_selection_is_reported() {
        struct PastTheEnd;

        impl SelectionOperator for PastTheEnd {
            fn select_index(
                &self,
                population: &[Individual],
                _rng: &mut dyn RngCore,
            ) -> Option<usize> {
                Some(population.len())
            }
        }

        let engine = Nsga2::builder(BiObjectiveProblem::schaffer(1).unwrap())
            .population_size(4)
            .max_evaluations(50)
            .selection(PastTheEnd)
            .build()
            .unwrap();
        assert!(matches!(
            engine.run(&mut StdRng::seed_from_u64(5)),
            Err(Nsga2Error::SelectionOutOfRange { index: 4, size: 4 })
        ));
    }

    #[test]
    fn run_result_scores_the_front() {
        let engine = engine(10, 400);
        let report = engine.run(&mut StdRng::seed_from_u64(6)).unwrap();
        let result = report.run_result(&AnalyticalFront::schaffer(3, 10));
        assert_eq!(result.final_front(), report.final_front.as_slice());
        assert!(result.mean_distance() >= 0.0);
        assert_eq!(result.evaluations(), report.evaluations);
    }
}
