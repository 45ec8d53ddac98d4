use std::fs;
use std::io::{ErrorKind, Write};
use std::mem;
use std::path::PathBuf;

use crate::config::{BenchConfig, COPY_FILENAME};
use crate::copier::copy_file_by_chunk;
use crate::debug_log;
use crate::error::{BenchError, Result};
use crate::generator::{filename_for_size, generate_random_file};
use crate::results::{ResultsLog, Trial};
use crate::sizes::{chunk_sizes, file_count, Doubling};

#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub filename: String,
    pub path: PathBuf,
    pub size_mb: usize,
    /// False when generation failed and the file may be short or missing.
    pub complete: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub files_generated: usize,
    pub generation_failures: usize,
    pub trials_recorded: usize,
    pub trials_dropped: usize,
    pub copies_aborted: usize,
}

/// Runs the whole benchmark, writing progress to `out`.
pub fn run<W: Write>(config: &BenchConfig, out: &mut W) -> Result<RunSummary> {
    debug_log!(
        "run start: dir={} max_buffer={} sizes={}..{} MB",
        config.work_dir.display(),
        config.max_buffer,
        config.min_size_mb,
        config.max_size_mb
    );

    fs::create_dir_all(&config.work_dir)?;

    let results = ResultsLog::new(config.results_path());
    if let Err(e) = results.reset() {
        writeln!(
            out,
            "Warning: could not remove old {}: {}",
            results.path().display(),
            e
        )?;
    }

    let mut summary = RunSummary::default();
    let mut files = allocate_file_table(config)?;

    // Generated files are removed even when progress output fails midway.
    let outcome = generate_and_benchmark(config, &results, out, &mut files, &mut summary);
    remove_generated_files(&files);
    outcome?;

    writeln!(
        out,
        "Recorded {} trial(s) for {} file(s) in {}",
        summary.trials_recorded,
        summary.files_generated,
        results.path().display()
    )?;
    debug_log!("run finished: {:?}", summary);
    Ok(summary)
}

fn generate_and_benchmark<W: Write>(
    config: &BenchConfig,
    results: &ResultsLog,
    out: &mut W,
    files: &mut Vec<GeneratedFile>,
    summary: &mut RunSummary,
) -> Result<()> {
    generate_all_files(config, out, files, summary)?;

    for file in files.iter() {
        if !file.complete {
            writeln!(out, "Skipping {}: generation did not complete.", file.filename)?;
            continue;
        }
        benchmark_file(config, file, results, out, summary)?;
    }
    Ok(())
}

/// Reserves the per-file bookkeeping up front. Failure here is fatal.
pub fn allocate_file_table(config: &BenchConfig) -> Result<Vec<GeneratedFile>> {
    let count = file_count(config.min_size_mb, config.max_size_mb);
    let mut files: Vec<GeneratedFile> = Vec::new();
    files
        .try_reserve_exact(count)
        .map_err(|_| BenchError::Allocation(count * mem::size_of::<GeneratedFile>()))?;
    Ok(files)
}

/// Generates one file per size in the configured range, recording each in
/// `files` before reporting on it.
///
/// Failed generations are kept in `files` so the possibly truncated file is
/// still cleaned up.
pub fn generate_all_files<W: Write>(
    config: &BenchConfig,
    out: &mut W,
    files: &mut Vec<GeneratedFile>,
    summary: &mut RunSummary,
) -> Result<()> {
    for size_mb in Doubling::new(config.min_size_mb, config.max_size_mb) {
        let filename = filename_for_size(size_mb);
        let path = config.source_path(&filename);

        write!(
            out,
            "Generating file {} of size {:04} MB... ",
            filename, size_mb
        )?;
        out.flush()?;

        let outcome = generate_random_file(
            &path,
            size_mb,
            config.max_buffer,
            &config.entropy_source,
        );
        files.push(GeneratedFile {
            filename: filename.clone(),
            path,
            size_mb,
            complete: outcome.is_ok(),
        });

        match outcome {
            Ok(elapsed) => {
                summary.files_generated += 1;
                writeln!(out, "Took {:.6} seconds.", elapsed.as_secs_f64())?;
            }
            Err(e) => {
                debug_log!("generation of {} failed: {}", filename, e);
                summary.generation_failures += 1;
                writeln!(out, "Error! {}. Exiting generator.", e)?;
            }
        }
    }

    Ok(())
}

/// Copies `file` once per chunk size up to the buffer ceiling, logging each
/// trial. The first failed copy ends the file's trials.
pub fn benchmark_file<W: Write>(
    config: &BenchConfig,
    file: &GeneratedFile,
    results: &ResultsLog,
    out: &mut W,
    summary: &mut RunSummary,
) -> Result<()> {
    let copy_path = config.copy_path();
    writeln!(out, "Copying {} to {}...", file.filename, COPY_FILENAME)?;

    for chunk_size in chunk_sizes(config.max_buffer) {
        write!(out, "... {:05} byte(s) at a time... ", chunk_size)?;
        out.flush()?;

        let elapsed_secs =
            match copy_file_by_chunk(&file.path, &copy_path, chunk_size, file.size_mb) {
                Ok(secs) => secs,
                Err(e) => {
                    writeln!(out, "{}! Aborting copy.", e)?;
                    debug_log!(
                        "copy of {} at {} bytes failed: {}",
                        file.filename,
                        chunk_size,
                        e
                    );
                    summary.copies_aborted += 1;
                    return Ok(());
                }
            };

        writeln!(out, "Took {:.6} seconds!", elapsed_secs)?;

        let trial = Trial {
            size_mb: file.size_mb,
            chunk_size,
            elapsed_secs,
        };
        match results.append(&trial) {
            Ok(()) => summary.trials_recorded += 1,
            Err(e) => {
                writeln!(out, "Error! {}", e)?;
                summary.trials_dropped += 1;
            }
        }
    }

    writeln!(out)?;
    Ok(())
}

/// Deletes every generated source file. Missing files are ignored.
pub fn remove_generated_files(files: &[GeneratedFile]) {
    for file in files {
        match fs::remove_file(&file.path) {
            Ok(()) => debug_log!("removed {}", file.path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => debug_log!("failed to remove {}: {}", file.path.display(), e),
        }
    }
}
