//! Dependency-ordered step scheduling
//!
//! This module schedules named steps connected by precedence edges
//! ("`A` must be finished before `B` can begin") forming a directed acyclic
//! graph (DAG).
//!
//! # Schedulers
//!
//! - [`StepGraph::ordered_topological_sort`]: a single worker completes one step
//!   at a time, always picking the smallest eligible step.
//! - [`MultiWorkerScheduler`]: a fixed pool of simulated workers consumes steps
//!   in parallel, each step taking the time given by a [`DurationTable`].
//!
//! Both schedulers break ties by picking the smallest step according to its
//! `Ord` implementation, both when a step first becomes eligible and when an
//! idle worker picks from the eligible pool.
//!
//! # Warning: Cycle Behavior
//!
//! The graph does not reject cycles on insertion. Steps on a cycle never become
//! eligible, so the schedulers stop early and report
//! [`ScheduleError::Incomplete`] instead of returning a truncated order.
//! [`StepGraph::topological_sort`] does not check at all: on a cyclic graph its
//! output is simply not a topological order.
//!
//! # Example
//!
//! ```rust
//! use aoc_solutions::utils::step_graph::{DurationTable, MultiWorkerScheduler, StepGraph};
//!
//! let graph: StepGraph<char> = [
//!     ('C', 'A'),
//!     ('C', 'F'),
//!     ('A', 'B'),
//!     ('A', 'D'),
//!     ('B', 'E'),
//!     ('D', 'E'),
//!     ('F', 'E'),
//! ]
//! .into_iter()
//! .collect();
//!
//! let order: String = graph.ordered_topological_sort().unwrap().into_iter().collect();
//! assert_eq!(order, "CABDFE");
//!
//! let schedule = MultiWorkerScheduler::new(2)
//!     .run(&graph, &DurationTable::alphabetic(1))
//!     .unwrap();
//! assert_eq!(schedule.elapsed, 15);
//! assert_eq!(schedule.order, vec!['C', 'A', 'B', 'F', 'D', 'E']);
//! ```

mod durations;
mod error;
mod graph;
mod scheduler;

pub use durations::{DEFAULT_OFFSET, DurationTable};
pub use error::ScheduleError;
pub use graph::StepGraph;
pub use scheduler::{DEFAULT_WORKERS, MultiWorkerScheduler, Schedule};

#[cfg(test)]
mod tests;
