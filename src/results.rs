use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::{BenchError, Result};

/// One (file size, chunk size) measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trial {
    pub size_mb: usize,
    pub chunk_size: usize,
    pub elapsed_secs: f64,
}

impl fmt::Display for Trial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {:.6}",
            self.size_mb, self.chunk_size, self.elapsed_secs
        )
    }
}

pub struct ResultsLog {
    path: PathBuf,
}

impl ResultsLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ResultsLog { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Removes any log left by a previous run. A missing file is not an error.
    pub fn reset(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }

    /// Appends one line for `trial`. The file is opened and closed per call.
    pub fn append(&self, trial: &Trial) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| BenchError::OpenFailed {
                path: self.path.clone(),
                source,
            })?;

        writeln!(file, "{}", trial).map_err(|source| BenchError::WriteFailed {
            path: self.path.clone(),
            source,
        })
    }
}
