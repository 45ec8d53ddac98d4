use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Read, Write};
use std::path::Path;
use std::time::Instant;

use crate::buffer;
use crate::debug_log;
use crate::error::{BenchError, Result};
use crate::sizes::bytes_in_mb;

/// Copies `source` to `dest` reading at most `chunk_size` bytes per call and
/// returns the elapsed seconds of the read/write loop.
///
/// The byte count comes from `size_mb`, not from the file's metadata. The
/// scratch `dest` is removed afterwards whether or not the copy succeeded.
///
/// Memory use scales with the file, not the chunk: the whole file is read
/// into one buffer of `size_mb` MB, each read landing at the current offset.
pub fn copy_file_by_chunk(
    source: &Path,
    dest: &Path,
    chunk_size: usize,
    size_mb: usize,
) -> Result<f64> {
    let result =
        bytes_in_mb(size_mb).and_then(|total| timed_copy(source, dest, chunk_size.max(1), total));

    if let Err(e) = fs::remove_file(dest) {
        if e.kind() != ErrorKind::NotFound {
            debug_log!("failed to remove {}: {}", dest.display(), e);
        }
    }

    result
}

fn timed_copy(source: &Path, dest: &Path, chunk_size: usize, total: usize) -> Result<f64> {
    let mut input = File::open(source).map_err(|e| BenchError::OpenFailed {
        path: source.to_path_buf(),
        source: e,
    })?;

    let mut output = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(dest)
        .map_err(|e| BenchError::OpenFailed {
            path: dest.to_path_buf(),
            source: e,
        })?;

    let mut buffer = buffer::allocate(total)?;

    let start = Instant::now();

    let mut copied = 0;
    while copied < total {
        let end = (copied + chunk_size).min(total);
        let read = match input.read(&mut buffer[copied..end]) {
            Ok(0) => {
                return Err(BenchError::SourceExhausted {
                    path: source.to_path_buf(),
                    copied,
                    expected: total,
                })
            }
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(BenchError::ReadFailed {
                    path: source.to_path_buf(),
                    source: e,
                })
            }
        };

        output
            .write_all(&buffer[copied..copied + read])
            .map_err(|e| BenchError::WriteFailed {
                path: dest.to_path_buf(),
                source: e,
            })?;
        copied += read;
    }

    let elapsed = start.elapsed().as_secs_f64();
    debug_log!(
        "copied {} bytes of {} in {}-byte chunks",
        copied,
        source.display(),
        chunk_size
    );
    Ok(elapsed)
}
