//! Experiment configuration.
//!
//! [`RunConfig`] gathers everything the command line provides. Setters never
//! clamp; out-of-range values are reported by [`RunConfig::validate`].

use crate::convergence::{AnalyticalFront, DEFAULT_FRONT_SAMPLES};
use crate::nsga2::CrowdingScope;
use crate::ops::{BiObjectiveProblem, ProblemResult};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised by invalid experiment settings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Only benchmark 1 is available.
    #[error("Invalid func_id! Only func_id=1 supported.")]
    UnsupportedBenchmark(u32),
    /// At least one run is required.
    #[error("run count must be positive")]
    NoRuns,
    /// The evaluation budget must be positive.
    #[error("max evaluations must be positive")]
    ZeroBudget,
    /// The problem needs at least one decision variable.
    #[error("dimensionality must be positive")]
    NoDimensions,
    /// Selection and crossover need at least two individuals.
    #[error("population size must be at least 2 (received {0})")]
    PopulationTooSmall(usize),
    /// A probability was outside `[0, 1]`.
    #[error("{name} must be within [0, 1] (received {value})")]
    InvalidRate {
        /// Setting that failed.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
}

/// Benchmarks selectable by numeric identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchmarkId {
    /// Schaffer's problem: `sum x^2` against `sum (x - 2)^2`.
    Schaffer,
}

impl BenchmarkId {
    /// Resolves a command-line identifier.
    ///
    /// # Errors
    /// Returns [`ConfigError::UnsupportedBenchmark`] for anything but `1`.
    pub fn from_id(id: u32) -> Result<Self, ConfigError> {
        match id {
            1 => Ok(Self::Schaffer),
            other => Err(ConfigError::UnsupportedBenchmark(other)),
        }
    }

    /// Numeric identifier.
    #[must_use]
    pub fn id(self) -> u32 {
        match self {
            Self::Schaffer => 1,
        }
    }

    /// Builds the benchmark over `dimensions` variables.
    ///
    /// # Errors
    /// Propagates problem construction failures.
    pub fn problem(self, dimensions: usize) -> ProblemResult<BiObjectiveProblem> {
        match self {
            Self::Schaffer => BiObjectiveProblem::schaffer(dimensions),
        }
    }

    /// Samples the benchmark's analytical front.
    #[must_use]
    pub fn reference_front(self, dimensions: usize, samples: usize) -> AnalyticalFront {
        match self {
            Self::Schaffer => AnalyticalFront::schaffer(dimensions, samples),
        }
    }
}

/// Settings of a multi-run experiment.
///
/// # Examples
/// ```
/// use nsga2_sch::config::RunConfig;
/// use nsga2_sch::convergence::DEFAULT_FRONT_SAMPLES;
///
/// let config = RunConfig::default()
///     .with_runs(3)
///     .with_population_size(40)
///     .with_seed(Some(7));
/// assert!(config.validate().is_ok());
/// assert_eq!(config.front_samples(), DEFAULT_FRONT_SAMPLES);
/// assert!(config.clone().with_mutation_rate(1.5).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Independent runs to execute.
    pub runs: usize,
    /// Benchmark to optimise.
    pub benchmark: BenchmarkId,
    /// Objective-call budget of each run.
    pub max_evaluations: usize,
    /// Decision variables.
    pub dimensions: usize,
    /// Individuals per generation.
    pub population_size: usize,
    /// Probability that a parent pair is recombined.
    pub crossover_rate: f64,
    /// Per-gene mutation probability.
    pub mutation_rate: f64,
    /// Seed of the shared generator; entropy when absent.
    pub seed: Option<u64>,
    /// Directory receiving the front files.
    pub output_dir: PathBuf,
    /// Analytical front sample count; [`DEFAULT_FRONT_SAMPLES`] when absent.
    pub front_samples: Option<usize>,
    /// Crowding-distance grouping used by the engine.
    pub crowding_scope: CrowdingScope,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            runs: 1,
            benchmark: BenchmarkId::Schaffer,
            max_evaluations: 2000,
            dimensions: 5,
            population_size: 20,
            crossover_rate: 0.9,
            mutation_rate: 0.1,
            seed: None,
            output_dir: PathBuf::from("."),
            front_samples: None,
            crowding_scope: CrowdingScope::Population,
        }
    }
}

impl RunConfig {
    /// Sets the number of runs.
    #[must_use]
    pub fn with_runs(mut self, runs: usize) -> Self {
        self.runs = runs;
        self
    }

    /// Sets the benchmark.
    #[must_use]
    pub fn with_benchmark(mut self, benchmark: BenchmarkId) -> Self {
        self.benchmark = benchmark;
        self
    }

    /// Sets the evaluation budget of each run.
    #[must_use]
    pub fn with_max_evaluations(mut self, budget: usize) -> Self {
        self.max_evaluations = budget;
        self
    }

    /// Sets the number of decision variables.
    #[must_use]
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Sets the population size.
    #[must_use]
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the crossover rate.
    #[must_use]
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the mutation rate.
    #[must_use]
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets or clears the generator seed.
    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the output directory.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Sets or clears the analytical front sample count.
    #[must_use]
    pub fn with_front_samples(mut self, samples: Option<usize>) -> Self {
        self.front_samples = samples;
        self
    }

    /// Sets the crowding-distance grouping.
    #[must_use]
    pub fn with_crowding_scope(mut self, scope: CrowdingScope) -> Self {
        self.crowding_scope = scope;
        self
    }

    /// Effective analytical front sample count.
    #[must_use]
    pub fn front_samples(&self) -> usize {
        self.front_samples.unwrap_or(DEFAULT_FRONT_SAMPLES)
    }

    /// Checks every setting.
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.runs == 0 {
            return Err(ConfigError::NoRuns);
        }
        if self.max_evaluations == 0 {
            return Err(ConfigError::ZeroBudget);
        }
        if self.dimensions == 0 {
            return Err(ConfigError::NoDimensions);
        }
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall(self.population_size));
        }
        check_rate("crossover rate", self.crossover_rate)?;
        check_rate("mutation rate", self.mutation_rate)?;
        Ok(())
    }
}

fn check_rate(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidRate { name, value })
    }
}
