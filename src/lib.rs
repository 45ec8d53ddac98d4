pub mod buffer;
pub mod config;
pub mod copier;
pub mod debug_logger;
pub mod error;
pub mod generator;
pub mod results;
pub mod runner;
pub mod sizes;


pub use config::{parse_max_buffer, BenchConfig};
pub use copier::copy_file_by_chunk;
pub use error::{BenchError, Result};
pub use generator::{filename_for_size, generate_random_file};
pub use results::{ResultsLog, Trial};
pub use runner::{run, GeneratedFile, RunSummary};
pub use sizes::{bytes_in_mb, chunk_sizes, file_count, size_sequence};
