//! Sequential multi-run driver.

use crate::config::{ConfigError, RunConfig};
use crate::core::{ExperimentMetadata, ExperimentResult, RunResult};
use crate::nsga2::{Nsga2, Nsga2Error};
use crate::ops::ProblemBounds;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, instrument};

/// Creates the process-wide generator: seeded when `seed` is given,
/// otherwise from operating-system entropy.
#[must_use]
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Runs the configured number of independent NSGA-II runs.
///
/// Runs share only the random generator handed to [`Experiment::run`].
///
/// # Examples
/// ```
/// use nsga2_sch::config::RunConfig;
/// use nsga2_sch::runner::{seeded_rng, Experiment};
///
/// let config = RunConfig::default()
///     .with_runs(2)
///     .with_max_evaluations(200)
///     .with_dimensions(2)
///     .with_population_size(10)
///     .with_seed(Some(3));
/// let experiment = Experiment::new(config).unwrap();
/// let result = experiment.run(&mut seeded_rng(Some(3))).unwrap();
/// assert_eq!(result.runs.len(), 2);
/// assert!(result.grand_mean_distance() >= 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct Experiment {
    config: RunConfig,
}

impl Experiment {
    /// Validates `config` and wraps it.
    ///
    /// # Errors
    /// Returns the [`ConfigError`] reported by [`RunConfig::validate`].
    pub fn new(config: RunConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Validated configuration.
    #[must_use]
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Builds the engine shared by every run.
    ///
    /// # Errors
    /// Propagates problem and engine construction failures.
    pub fn engine(&self) -> Result<Nsga2, Nsga2Error> {
        let config = &self.config;
        let problem = config.benchmark.problem(config.dimensions)?;
        Nsga2::builder(problem)
            .population_size(config.population_size)
            .max_evaluations(config.max_evaluations)
            .crossover_rate(config.crossover_rate)
            .mutation_rate(config.mutation_rate)
            .crowding_scope(config.crowding_scope)
            .build()
    }

    /// Executes every run.
    ///
    /// # Errors
    /// Stops at the first run that fails.
    pub fn run<R: Rng>(&self, rng: &mut R) -> Result<ExperimentResult, Nsga2Error> {
        self.run_with(rng, |_, _| {})
    }

    /// Executes every run, handing each finished [`RunResult`] and its
    /// zero-based index to `on_run` before starting the next one.
    ///
    /// # Errors
    /// Stops at the first run that fails.
    #[instrument(
        skip(self, rng, on_run),
        fields(
            runs = self.config.runs,
            benchmark = self.config.benchmark.id(),
            max_evaluations = self.config.max_evaluations
        )
    )]
    pub fn run_with<R, F>(&self, rng: &mut R, mut on_run: F) -> Result<ExperimentResult, Nsga2Error>
    where
        R: Rng,
        F: FnMut(usize, &RunResult),
    {
        let config = &self.config;
        let engine = self.engine()?;
        info!(
            population_size = engine.population_size(),
            max_evaluations = engine.max_evaluations(),
            dimensions = engine.problem().dimensions(),
            "engine ready"
        );
        let reference = config
            .benchmark
            .reference_front(config.dimensions, config.front_samples());

        let mut runs = Vec::with_capacity(config.runs);
        for run_index in 0..config.runs {
            let report = engine.run(rng)?;
            let result = report.run_result(&reference);
            info!(
                run = run_index + 1,
                front_size = result.final_front().len(),
                mean_distance = result.mean_distance(),
                evaluations = result.evaluations(),
                generations = result.generations(),
                "run complete"
            );
            on_run(run_index, &result);
            runs.push(result);
        }

        Ok(ExperimentResult {
            runs,
            metadata: ExperimentMetadata::new(config.runs, config.max_evaluations, config.seed),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RunConfig {
        RunConfig::default()
            .with_runs(3)
            .with_max_evaluations(120)
            .with_dimensions(2)
            .with_population_size(6)
    }

    #[test]
    fn invalid_config_is_rejected() {
        assert_eq!(
            Experiment::new(config().with_runs(0)).err(),
            Some(ConfigError::NoRuns)
        );
    }

    #[test]
    fn engine_follows_config() {
        let experiment = Experiment::new(config().with_population_size(14)).unwrap();
        let engine = experiment.engine().unwrap();
        assert_eq!(engine.population_size(), 14);
        assert_eq!(engine.max_evaluations(), 120);
        assert_eq!(engine.problem().dimensions(), 2);
    }

    #[test]
    fn observer_sees_every_run_in_order() {
        let experiment = Experiment::new(config()).unwrap();
        let mut seen = Vec::new();
        let result = experiment
            .run_with(&mut seeded_rng(Some(1)), |index, run| {
                seen.push((index, run.final_front().len()));
            })
            .unwrap();
        assert_eq!(seen.len(), 3);
        assert_eq!(
            seen.iter().map(|&(index, _)| index).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert_eq!(result.metadata.runs, 3);
        assert_eq!(result.metadata.rng_seed, None);
    }

    #[test]
    fn same_seed_reproduces_results() {
        let experiment = Experiment::new(config()).unwrap();
        let first = experiment.run(&mut seeded_rng(Some(9))).unwrap();
        let second = experiment.run(&mut seeded_rng(Some(9))).unwrap();
        assert_eq!(first.runs, second.runs);
    }

    #[test]
    fn shared_generator_differs_between_runs() {
        let experiment = Experiment::new(config().with_runs(2)).unwrap();
        let result = experiment.run(&mut seeded_rng(Some(10))).unwrap();
        assert_ne!(result.runs[0].final_front(), result.runs[1].final_front());
    }
}
