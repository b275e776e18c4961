//! NSGA-II for real-coded, bi-objective minimisation, with Schaffer's problem
//! as the built-in benchmark.
//!
//! The crate is organised bottom-up:
//!
//! - [`core`]: individuals, populations, objective vectors and run results.
//! - [`ops`]: objectives, problems, and the SBX, polynomial mutation and
//!   uniform selection operators.
//! - [`nsga2`]: non-dominated sorting, crowding distance, environmental
//!   selection and the budgeted [`Nsga2`] engine.
//! - [`convergence`]: distance of a front to the analytical optimum.
//! - [`config`], [`runner`] and [`output`]: multi-run experiments and CSV
//!   export, as used by the `nsga2-sch` binary.
//!
//! ```
//! use nsga2_sch::config::RunConfig;
//! use nsga2_sch::runner::{seeded_rng, Experiment};
//!
//! let config = RunConfig::default().with_max_evaluations(400).with_seed(Some(1));
//! let experiment = Experiment::new(config).unwrap();
//! let result = experiment.run(&mut seeded_rng(Some(1))).unwrap();
//! assert_eq!(result.runs.len(), 1);
//! assert!(!result.runs[0].final_front().is_empty());
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod convergence;
pub mod core;
pub mod nsga2;
pub mod ops;
pub mod output;
pub mod runner;

pub use crate::config::{BenchmarkId, ConfigError, RunConfig};
pub use crate::core::experiment::EMPTY_FRONT_SENTINEL;
pub use crate::core::{
    BoundsError, ExperimentMetadata, ExperimentResult, Individual, Objectives, Population,
    RunResult, RunStats,
};
pub use crate::nsga2::{CrowdingScope, Nsga2, Nsga2Builder, Nsga2Error, Nsga2Report};
pub use crate::output::{FrontWriter, OutputError};
pub use crate::runner::Experiment;
