//! Output formatting for solver results

use crate::executor::SolverResult;
use chrono::TimeDelta;

/// Output formatter for solver results
pub struct OutputFormatter {
    quiet: bool,
    start_time: std::time::Instant,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            start_time: std::time::Instant::now(),
        }
    }

    /// Format and print a single result
    pub fn print_result(&self, result: &SolverResult) {
        match (&result.answer, self.quiet) {
            (Ok(answer), true) => println!("{}", answer),
            (Ok(_), false) => println!("{}", format_result(result)),
            (Err(e), true) => eprintln!("Error: {}", e),
            (Err(_), false) => eprintln!("{}", format_result(result)),
        }
    }

    /// Print a summary after all results
    /// Shows both total solve time (sum of durations) and actual elapsed wall-clock time
    pub fn print_summary(&self, results: &[SolverResult]) {
        if self.quiet {
            return;
        }

        let summary = Summary::from_results(results);
        let elapsed_time = self.start_time.elapsed();

        println!();
        println!("--- Summary ---");
        println!(
            "Solvers: {} solved, {} failed",
            summary.successes, summary.failures
        );
        println!("Total parse time: {}", format_duration(summary.parse_time));
        println!("Total solve time: {}", format_duration(summary.solve_time));
        println!(
            "Elapsed wall-clock time: {}",
            format_std_duration(elapsed_time)
        );
        if !elapsed_time.is_zero() {
            let total_compute_secs = (summary.parse_time + summary.solve_time)
                .num_microseconds()
                .unwrap_or(0) as f64
                / 1_000_000.0;
            let speedup = total_compute_secs / elapsed_time.as_secs_f64();
            println!("Speedup factor: {:.2}x", speedup);
        }
    }
}

/// Totals over successful results
#[derive(Debug, PartialEq, Eq)]
struct Summary {
    successes: usize,
    failures: usize,
    parse_time: TimeDelta,
    solve_time: TimeDelta,
}

impl Summary {
    fn from_results(results: &[SolverResult]) -> Self {
        let successes = results.iter().filter(|r| r.answer.is_ok()).count();
        let ok = || results.iter().filter(|r| r.answer.is_ok());

        Self {
            successes,
            failures: results.len() - successes,
            parse_time: ok().filter_map(|r| r.parse_duration).sum(),
            solve_time: ok().map(|r| r.solve_duration).sum(),
        }
    }
}

/// `YYYY/DD Part P: answer (parse: .., solve: ..)`, or the error in place of the answer
fn format_result(result: &SolverResult) -> String {
    let prefix = format!("{}/{:02} Part {}", result.year, result.day, result.part);

    match &result.answer {
        Ok(answer) => {
            let parse_timing = result
                .parse_duration
                .map(|d| format!("parse: {}, ", format_duration(d)))
                .unwrap_or_default();
            format!(
                "{}: {} ({}solve: {})",
                prefix,
                answer,
                parse_timing,
                format_duration(result.solve_duration)
            )
        }
        Err(e) => format!("{}: Error - {}", prefix, e),
    }
}

/// Format a TimeDelta for display
fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };

    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }

    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}

/// Format a std::time::Duration for display (used for wall-clock time)
fn format_std_duration(d: std::time::Duration) -> String {
    let micros = d.as_micros();
    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::{ParseError, SolverError};

    fn ok(part: u8, answer: &str, parse_ms: Option<i64>) -> SolverResult {
        SolverResult {
            year: 2018,
            day: 7,
            part,
            answer: Ok(answer.to_string()),
            parse_duration: parse_ms.map(TimeDelta::milliseconds),
            solve_duration: TimeDelta::microseconds(250),
        }
    }

    fn failed(part: u8) -> SolverResult {
        SolverResult {
            year: 2018,
            day: 7,
            part,
            answer: Err(SolverError::ParseError(ParseError::MissingData(
                "no input".into(),
            ))),
            parse_duration: None,
            solve_duration: TimeDelta::zero(),
        }
    }

    #[test]
    fn test_format_durations() {
        assert_eq!(format_duration(TimeDelta::microseconds(999)), "999µs");
        assert_eq!(format_duration(TimeDelta::microseconds(1500)), "1.50ms");
        assert_eq!(format_duration(TimeDelta::milliseconds(2500)), "2.50s");
        assert_eq!(format_duration(TimeDelta::microseconds(-20)), "-20µs");
        assert_eq!(
            format_std_duration(std::time::Duration::from_micros(42)),
            "42µs"
        );
    }

    #[test]
    fn test_format_result_lines() {
        assert_eq!(
            format_result(&ok(1, "CABDFE", Some(3))),
            "2018/07 Part 1: CABDFE (parse: 3.00ms, solve: 250µs)"
        );
        assert_eq!(
            format_result(&ok(2, "253", None)),
            "2018/07 Part 2: 253 (solve: 250µs)"
        );
        assert!(format_result(&failed(1)).starts_with("2018/07 Part 1: Error - "));
    }

    #[test]
    fn test_summary_counts_only_successes() {
        let results = [ok(1, "CABDFE", Some(3)), ok(2, "253", None), failed(1)];
        let summary = Summary::from_results(&results);

        assert_eq!(summary.successes, 2);
        assert_eq!(summary.failures, 1);
        assert_eq!(summary.parse_time, TimeDelta::milliseconds(3));
        assert_eq!(summary.solve_time, TimeDelta::microseconds(500));
    }
}
