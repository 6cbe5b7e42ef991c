//! CLI argument parsing using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Parallelization level for solver execution
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum ParallelizeBy {
    /// No parallelization; execute all solvers sequentially in order
    Sequential,
    /// Parallelize across years; days and parts run sequentially within each year
    Year,
    /// Parallelize across year/day combinations; parts run sequentially (default)
    #[default]
    Day,
}

/// Log verbosity accepted by `--log-level`
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Advent of Code solver runner
#[derive(Parser, Debug)]
#[command(name = "aoc", about = "Run Advent of Code solvers", version)]
pub struct Args {
    /// Year to run (runs all years if omitted)
    #[arg(short, long)]
    pub year: Option<u16>,

    /// Day to run (runs all days if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
    pub day: Option<u8>,

    /// Part to run (runs all parts if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub part: Option<u8>,

    /// Tags to filter solvers (comma-separated, all must match)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Directory holding puzzle inputs as `{year}_day{day:02}.txt`
    /// [default: $AOC_INPUT_DIR, else `inputs`]
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// Number of threads for parallel execution
    #[arg(long)]
    pub threads: Option<usize>,

    /// Parallelization level: sequential, year or day
    #[arg(long, value_enum, default_value = "day")]
    pub parallelize_by: ParallelizeBy,

    /// Quiet mode - only output answers
    #[arg(short, long)]
    pub quiet: bool,

    /// Log level (overrides AOC_LOG)
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["aoc"]).unwrap();
        assert_eq!(args.parallelize_by, ParallelizeBy::Day);
        assert!(args.input_dir.is_none());
        assert!(args.tags.is_empty());
        assert!(!args.quiet);
    }

    #[test]
    fn test_filters_and_tags() {
        let args = Args::try_parse_from([
            "aoc", "-y", "2018", "-d", "7", "-p", "2", "--tags", "graph,scheduling",
        ])
        .unwrap();
        assert_eq!(args.year, Some(2018));
        assert_eq!(args.day, Some(7));
        assert_eq!(args.part, Some(2));
        assert_eq!(args.tags, vec!["graph", "scheduling"]);
    }

    #[test]
    fn test_out_of_range_day_rejected() {
        assert!(Args::try_parse_from(["aoc", "--day", "26"]).is_err());
        assert!(Args::try_parse_from(["aoc", "--part", "3"]).is_err());
    }

    #[test]
    fn test_log_level_and_mode() {
        let args =
            Args::try_parse_from(["aoc", "--log-level", "debug", "--parallelize-by", "year"])
                .unwrap();
        assert_eq!(args.log_level, Some(LogLevel::Debug));
        assert_eq!(args.parallelize_by, ParallelizeBy::Year);
    }
}
