//! Scheduling failures.

use thiserror::Error;

/// Error type for scheduling runs
///
/// Every variant is a caller or input bug: scheduling is a pure function of
/// its inputs, so none of these are worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// The worker pool has no slots
    #[error("Worker pool must have at least one worker")]
    NoWorkers,
    /// A step has no entry in the duration table
    #[error("No duration for step {0}")]
    MissingDuration(String),
    /// The run stopped before every step was completed (cyclic graph)
    #[error("Scheduled {scheduled} of {total} steps; the graph contains a cycle")]
    Incomplete { scheduled: usize, total: usize },
}
