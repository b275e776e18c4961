//! Run results, per-generation metrics and experiment metadata.
//!
//! These types are the payload handed from the engine to the reporting
//! layer. A [`RunResult`] is frozen once created: it only exposes accessors.

use crate::core::Objectives;

/// Mean distance reported for a run whose front is empty.
pub const EMPTY_FRONT_SENTINEL: f64 = -1.0;

/// Time-series metrics captured during a single run.
///
/// # Examples
/// ```
/// use nsga2_sch::RunStats;
/// let mut stats = RunStats::new();
/// stats.record(12, 80);
/// assert_eq!(stats.generations(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunStats {
    /// Size of the non-dominated front after each generation's selection.
    pub front_sizes: Vec<usize>,
    /// Evaluation counter at the end of each generation.
    pub evaluations: Vec<usize>,
}

impl RunStats {
    /// Creates an empty set of run statistics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the metrics of one generation.
    pub fn record(&mut self, front_size: usize, evaluations: usize) {
        self.front_sizes.push(front_size);
        self.evaluations.push(evaluations);
    }

    /// Number of generations tracked so far.
    #[must_use]
    pub fn generations(&self) -> usize {
        self.front_sizes.len()
    }
}

/// Outcome of one independent run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    final_front: Vec<Objectives>,
    mean_distance: f64,
    evaluations: usize,
    generations: usize,
}

impl RunResult {
    /// Freezes the outcome of a run.
    #[must_use]
    pub fn new(
        final_front: Vec<Objectives>,
        mean_distance: f64,
        evaluations: usize,
        generations: usize,
    ) -> Self {
        Self {
            final_front,
            mean_distance,
            evaluations,
            generations,
        }
    }

    /// Objective values of the final non-dominated front.
    #[must_use]
    pub fn final_front(&self) -> &[Objectives] {
        &self.final_front
    }

    /// Mean distance from the front to the analytical optimum, or
    /// [`EMPTY_FRONT_SENTINEL`] when the front was empty.
    #[must_use]
    pub fn mean_distance(&self) -> f64 {
        self.mean_distance
    }

    /// Objective-function calls consumed by the run.
    #[must_use]
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// Generations executed by the run.
    #[must_use]
    pub fn generations(&self) -> usize {
        self.generations
    }
}

/// Metadata describing an executed experiment.
///
/// # Examples
/// ```
/// use nsga2_sch::ExperimentMetadata;
/// let metadata = ExperimentMetadata::new(3, 2000, Some(7));
/// assert_eq!(metadata.runs, 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentMetadata {
    /// Number of independent runs requested.
    pub runs: usize,
    /// Evaluation budget of each run.
    pub max_evaluations: usize,
    /// Seed of the shared generator, when one was supplied.
    pub rng_seed: Option<u64>,
}

impl ExperimentMetadata {
    /// Creates a new metadata record.
    #[must_use]
    pub fn new(runs: usize, max_evaluations: usize, rng_seed: Option<u64>) -> Self {
        Self {
            runs,
            max_evaluations,
            rng_seed,
        }
    }
}

/// Results of every run of an experiment.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentResult {
    /// One entry per run, in execution order.
    pub runs: Vec<RunResult>,
    /// Settings the experiment was executed with.
    pub metadata: ExperimentMetadata,
}

impl ExperimentResult {
    /// Arithmetic mean of the per-run mean distances.
    ///
    /// Returns [`EMPTY_FRONT_SENTINEL`] when no run was recorded.
    ///
    /// # Examples
    /// ```
    /// use nsga2_sch::{ExperimentMetadata, ExperimentResult, RunResult};
    /// let result = ExperimentResult {
    ///     runs: vec![RunResult::new(vec![], 1.0, 10, 1), RunResult::new(vec![], 3.0, 10, 1)],
    ///     metadata: ExperimentMetadata::new(2, 10, None),
    /// };
    /// assert_eq!(result.grand_mean_distance(), 2.0);
    /// ```
    #[must_use]
    pub fn grand_mean_distance(&self) -> f64 {
        if self.runs.is_empty() {
            return EMPTY_FRONT_SENTINEL;
        }
        let total: f64 = self.runs.iter().map(RunResult::mean_distance).sum();
        #[allow(clippy::cast_precision_loss)]
        let count = self.runs.len() as f64;
        total / count
    }
}
