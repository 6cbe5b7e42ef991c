//! Error types for the CLI

use std::path::PathBuf;
use thiserror::Error;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Logging could not be initialised
    #[error("Logging setup failed: {0}")]
    Logging(String),

    /// Registration error
    #[error("Registration error: {0}")]
    Registration(#[from] aoc_solver::RegistrationError),

    /// Executor error
    #[error("{0}")]
    Executor(#[from] ExecutorError),
}

/// Executor-specific errors
#[derive(Error, Debug)]
pub enum ExecutorError {
    /// Channel send error
    #[error("Channel send error")]
    ChannelSend,

    /// Thread pool creation failed
    #[error("Thread pool creation failed: {0}")]
    ThreadPool(String),

    /// The worker thread panicked before reporting
    #[error("Executor thread panicked")]
    Panicked,

    /// Multiple errors collected during parallel execution
    #[error("Multiple errors occurred ({} total)", .0.len())]
    Multiple(Vec<ExecutorError>),
}

impl ExecutorError {
    /// Merge two errors, flattening `Multiple` on either side
    pub fn combine(first: ExecutorError, second: ExecutorError) -> ExecutorError {
        let errors = match (first, second) {
            (ExecutorError::Multiple(mut v1), ExecutorError::Multiple(v2)) => {
                v1.extend(v2);
                v1
            }
            (first, ExecutorError::Multiple(v)) => {
                let mut combined = vec![first];
                combined.extend(v);
                combined
            }
            (ExecutorError::Multiple(mut v), second) => {
                v.push(second);
                v
            }
            (first, second) => vec![first, second],
        };
        ExecutorError::Multiple(errors)
    }

    /// Combine an optional error with a new error
    pub fn combine_opt(existing: Option<ExecutorError>, new: ExecutorError) -> ExecutorError {
        match existing {
            Some(e) => Self::combine(e, new),
            None => new,
        }
    }
}

/// Input loading errors
#[derive(Error, Debug)]
pub enum InputError {
    /// No input file for the puzzle
    #[error("No input for {year}/{day:02} (expected {})", .path.display())]
    Missing { year: u16, day: u8, path: PathBuf },

    /// The file exists but could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
