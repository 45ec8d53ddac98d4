use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use crate::buffer;
use crate::config::SIZE_PAD_WIDTH;
use crate::debug_log;
use crate::error::{BenchError, Result};
use crate::sizes::bytes_in_mb;

/// Filename for a generated file, e.g. `0001MB.txt` for 1 MB.
pub fn filename_for_size(size_mb: usize) -> String {
    format!("{:0width$}MB.txt", size_mb, width = SIZE_PAD_WIDTH)
}

/// Fills `path` with exactly `size_mb` MB read from `entropy_source`.
///
/// No single read or write moves more than `max_buffer` bytes. On error the
/// destination may be left truncated.
pub fn generate_random_file(
    path: &Path,
    size_mb: usize,
    max_buffer: usize,
    entropy_source: &Path,
) -> Result<Duration> {
    let start = Instant::now();
    let bytes_needed = bytes_in_mb(size_mb)?;

    let mut output = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|source| BenchError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;

    let mut buffer = buffer::allocate(max_buffer.max(1).min(bytes_needed))?;

    let mut entropy =
        File::open(entropy_source).map_err(|source| BenchError::EntropyUnavailable {
            path: entropy_source.to_path_buf(),
            source,
        })?;

    let mut total_written = 0;
    while total_written < bytes_needed {
        let want = buffer.len().min(bytes_needed - total_written);
        let read = match entropy.read(&mut buffer[..want]) {
            Ok(0) => {
                return Err(BenchError::SourceExhausted {
                    path: entropy_source.to_path_buf(),
                    copied: total_written,
                    expected: bytes_needed,
                })
            }
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(source) => {
                return Err(BenchError::ReadFailed {
                    path: entropy_source.to_path_buf(),
                    source,
                })
            }
        };

        output
            .write_all(&buffer[..read])
            .map_err(|source| BenchError::WriteFailed {
                path: path.to_path_buf(),
                source,
            })?;
        total_written += read;
    }

    output.flush()?;
    debug_log!(
        "generated {} ({} bytes, buffer {})",
        path.display(),
        total_written,
        buffer.len()
    );
    Ok(start.elapsed())
}
