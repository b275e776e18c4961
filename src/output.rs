//! CSV export of final Pareto fronts.

use crate::core::{Objectives, RunResult};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use thiserror::Error;

/// Header row of every front file.
pub const FRONT_FILE_HEADER: &str = "f1,f2";

/// Errors raised while writing front files.
#[derive(Debug, Error)]
pub enum OutputError {
    /// The file or its directory could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        /// Destination that failed.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

/// File name for the run at zero-based `run_index`; names are 1-based.
///
/// ```
/// assert_eq!(nsga2_sch::output::front_file_name(0), "pareto_run1.csv");
/// ```
#[must_use]
pub fn front_file_name(run_index: usize) -> String {
    format!("pareto_run{}.csv", run_index + 1)
}

/// Writes `front` as CSV: the header row, then one `f1,f2` row per point
/// with ten decimals.
///
/// # Errors
/// Propagates failures of the underlying writer.
pub fn write_front<W: Write>(mut writer: W, front: &[Objectives]) -> io::Result<()> {
    writeln!(writer, "{FRONT_FILE_HEADER}")?;
    for point in front {
        writeln!(writer, "{:.10},{:.10}", point.f1, point.f2)?;
    }
    writer.flush()
}

/// Writes one front file per run into a directory.
#[derive(Debug, Clone)]
pub struct FrontWriter {
    directory: PathBuf,
}

impl FrontWriter {
    /// Targets `directory`; it is created on first write if missing.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Destination of the run at zero-based `run_index`.
    #[must_use]
    pub fn path_for(&self, run_index: usize) -> PathBuf {
        self.directory.join(front_file_name(run_index))
    }

    /// Writes the final front of `run`, replacing any existing file.
    ///
    /// # Errors
    /// Returns [`OutputError::Io`] naming the path that could not be written.
    pub fn write_run(&self, run_index: usize, run: &RunResult) -> Result<PathBuf, OutputError> {
        let path = self.path_for(run_index);
        fs::create_dir_all(&self.directory).map_err(|source| OutputError::Io {
            path: self.directory.clone(),
            source,
        })?;
        File::create(&path)
            .and_then(|file| write_front(BufWriter::new(file), run.final_front()))
            .map_err(|source| OutputError::Io {
                path: path.clone(),
                source,
            })?;
        Ok(path)
    }
}
