use std::path::{Path, PathBuf};

/// Smallest generated file, in MB.
pub const MIN_FILE_SIZE_MB: usize = 1;
/// Largest generated file, in MB.
pub const MAX_FILE_SIZE_MB: usize = 128;

/// One MB is a binary mebibyte.
pub const BYTES_IN_MB: usize = 1_048_576;

/// Buffer ceiling used when no valid argument is given.
pub const DEFAULT_MAX_BUFFER_BYTES: usize = 1024;

pub const FILENAME_MAX_LEN: usize = 32;
/// Zero padding applied to the size in generated filenames.
pub const SIZE_PAD_WIDTH: usize = 4;

pub const COPY_FILENAME: &str = "temp_copy.txt";
pub const OUTPUT_FILENAME: &str = "trial_stats.txt";
pub const ENTROPY_SOURCE: &str = "/dev/urandom";

/// Environment override for the working directory, used when `--dir` is absent.
pub const WORK_DIR_ENV: &str = "CPBENCH_DIR";

#[derive(Debug, Clone)]
pub struct BenchConfig {
    pub work_dir: PathBuf,
    pub max_buffer: usize,
    pub min_size_mb: usize,
    pub max_size_mb: usize,
    pub entropy_source: PathBuf,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            work_dir: PathBuf::from("."),
            max_buffer: DEFAULT_MAX_BUFFER_BYTES,
            min_size_mb: MIN_FILE_SIZE_MB,
            max_size_mb: MAX_FILE_SIZE_MB,
            entropy_source: PathBuf::from(ENTROPY_SOURCE),
        }
    }
}

impl BenchConfig {
    pub fn copy_path(&self) -> PathBuf {
        self.work_dir.join(COPY_FILENAME)
    }

    pub fn results_path(&self) -> PathBuf {
        self.work_dir.join(OUTPUT_FILENAME)
    }

    pub fn source_path(&self, filename: &str) -> PathBuf {
        self.work_dir.join(filename)
    }
}

/// Picks the working directory: explicit flag, then `CPBENCH_DIR`, then cwd.
pub fn resolve_work_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }
    match std::env::var(WORK_DIR_ENV) {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => PathBuf::from("."),
    }
}

/// Parses the buffer ceiling argument.
///
/// Returns the ceiling to use and, when a value was supplied but rejected,
/// the warning to show the user.
pub fn parse_max_buffer(arg: Option<&str>) -> (usize, Option<String>) {
    let Some(raw) = arg else {
        return (DEFAULT_MAX_BUFFER_BYTES, None);
    };

    match raw.trim().parse::<usize>() {
        Ok(value) if value > 0 => (value, None),
        _ => (
            DEFAULT_MAX_BUFFER_BYTES,
            Some(format!(
                "Error! Invalid max RAM argument provided: {}. Defaulting to {}.",
                raw, DEFAULT_MAX_BUFFER_BYTES
            )),
        ),
    }
}
