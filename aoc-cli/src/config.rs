//! Configuration resolution from CLI args

use crate::cli::{Args, LogLevel, ParallelizeBy};
use crate::error::CliError;
use std::path::{Path, PathBuf};

/// Environment variable naming the input directory when `--input-dir` is absent
pub const INPUT_DIR_ENV: &str = "AOC_INPUT_DIR";

/// Input directory used when neither the flag nor the environment names one
pub const DEFAULT_INPUT_DIR: &str = "inputs";

/// Resolved runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Year filter (None = all years)
    pub year_filter: Option<u16>,
    /// Day filter (None = all days)
    pub day_filter: Option<u8>,
    /// Part filter (None = all parts)
    pub part_filter: Option<u8>,
    /// Tags to filter solvers
    pub tags: Vec<String>,
    /// Directory holding puzzle inputs
    pub input_dir: PathBuf,
    /// Number of threads for parallel execution
    pub thread_count: usize,
    /// Parallelization level
    pub parallelize_by: ParallelizeBy,
    /// Quiet mode
    pub quiet: bool,
    /// Explicit log level, if given
    pub log_level: Option<LogLevel>,
}

impl Config {
    /// Build config from CLI args, filling gaps from the environment
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        let input_dir = resolve_input_dir(args.input_dir, std::env::var(INPUT_DIR_ENV).ok());

        let thread_count = match args.threads {
            Some(0) => {
                return Err(CliError::Config(
                    "--threads must be at least 1".to_string(),
                ));
            }
            Some(n) => n,
            None => num_cpus(),
        };

        Ok(Config {
            year_filter: args.year,
            day_filter: args.day,
            part_filter: args.part,
            tags: args.tags,
            input_dir,
            thread_count,
            parallelize_by: args.parallelize_by,
            quiet: args.quiet,
            log_level: args.log_level,
        })
    }
}

/// Flag beats environment beats default; `~` is expanded in all cases
fn resolve_input_dir(flag: Option<PathBuf>, env: Option<String>) -> PathBuf {
    let raw = flag
        .or_else(|| env.filter(|s| !s.trim().is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_DIR));
    expand_tilde(&raw)
}

/// Expand ~ to home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str()
        && let Some(home) = dirs::home_dir()
    {
        if path_str == "~" {
            return home;
        }
        if let Some(rest) = path_str.strip_prefix("~/") {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}

/// Get number of CPUs
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
