use clap::Parser;
use copy_bench::config::{
    parse_max_buffer, resolve_work_dir, BenchConfig, ENTROPY_SOURCE, MAX_FILE_SIZE_MB,
    MIN_FILE_SIZE_MB,
};
use copy_bench::{debug_logger, runner, Result};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cpbench")]
#[command(about = "Copy Bench - file copy throughput across chunk sizes", long_about = None)]
#[command(version)]
struct Cli {
    /// Largest read/write size in bytes, used for generation and as the
    /// chunk-size ceiling (invalid or zero falls back to 1024)
    #[arg(allow_hyphen_values = true)]
    max_buffer: Option<String>,

    /// Directory for generated files, the scratch copy and the results
    /// (defaults to $CPBENCH_DIR, then the current directory)
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Smallest generated file in MB
    #[arg(long, default_value_t = MIN_FILE_SIZE_MB)]
    min_size_mb: usize,

    /// Largest generated file in MB
    #[arg(long, default_value_t = MAX_FILE_SIZE_MB)]
    max_size_mb: usize,

    /// Random byte stream used to fill generated files
    #[arg(long, default_value = ENTROPY_SOURCE)]
    entropy_source: PathBuf,

    /// Append a timestamped trace of the run to this file
    #[arg(long)]
    debug_log: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (max_buffer, warning) = parse_max_buffer(cli.max_buffer.as_deref());
    if let Some(warning) = warning {
        println!("{}", warning);
    }
    println!(
        "Using Max RAM size of {}B for file generation/copying...",
        max_buffer
    );

    if let Some(ref path) = cli.debug_log {
        debug_logger::init_debug_log(path)?;
    }

    let config = BenchConfig {
        work_dir: resolve_work_dir(cli.dir.as_deref()),
        max_buffer,
        min_size_mb: cli.min_size_mb,
        max_size_mb: cli.max_size_mb,
        entropy_source: cli.entropy_source,
    };

    let result = runner::run(&config, &mut io::stdout().lock());
    debug_logger::close_debug_log();

    match result {
        Ok(_) => Ok(()),
        Err(e) if e.is_fatal() => {
            println!("{}", e);
            std::process::exit(1);
        }
        Err(e) => Err(e),
    }
}
