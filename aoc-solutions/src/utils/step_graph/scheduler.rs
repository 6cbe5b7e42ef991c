//! Simulated pool of workers consuming steps in dependency order.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt::Debug;

use tracing::{debug, trace};

use super::durations::DurationTable;
use super::error::ScheduleError;
use super::graph::StepGraph;

/// Worker pool size used by [`MultiWorkerScheduler::default`]
pub const DEFAULT_WORKERS: usize = 5;

/// Outcome of a timed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule<S> {
    /// Steps in the order they were completed
    pub order: Vec<S>,
    /// Ticks from the first assignment until the last step completed
    pub elapsed: u32,
}

/// State of one worker slot
enum WorkerSlot<'a, S> {
    Idle,
    Busy { step: &'a S, remaining: u32 },
}

/// Timed scheduler over a fixed number of simulated workers.
///
/// The simulation is single-threaded and advances a logical clock one tick at
/// a time. On the first tick idle workers only pick up work. On every later
/// tick each busy worker, lowest index first, spends one unit on its step;
/// a step whose remaining duration reaches zero is completed, its dependents
/// are released and the worker becomes idle in that same tick. Idle workers
/// then take the smallest eligible steps, lowest index first.
///
/// With one worker the completion order equals
/// [`StepGraph::ordered_topological_sort`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiWorkerScheduler {
    workers: usize,
}

impl MultiWorkerScheduler {
    /// Create a scheduler with `workers` parallel slots
    pub fn new(workers: usize) -> Self {
        Self { workers }
    }

    /// Number of worker slots
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Simulate the pool over `graph`.
    ///
    /// # Returns
    /// * `Ok(Schedule)` - Completion order and total elapsed ticks
    /// * `Err(ScheduleError::NoWorkers)` - The pool has zero slots
    /// * `Err(ScheduleError::MissingDuration)` - A step reached a worker without a duration
    /// * `Err(ScheduleError::Incomplete)` - Every worker went idle with steps left (cycle)
    pub fn run<S>(
        &self,
        graph: &StepGraph<S>,
        durations: &DurationTable<S>,
    ) -> Result<Schedule<S>, ScheduleError>
    where
        S: Ord + Clone + Debug,
    {
        if self.workers == 0 {
            return Err(ScheduleError::NoWorkers);
        }

        let total = graph.len();
        let mut counts = graph.precedence_counts();
        let mut eligible = StepGraph::initially_eligible(&counts);
        let mut slots: Vec<WorkerSlot<'_, S>> =
            (0..self.workers).map(|_| WorkerSlot::Idle).collect();
        let mut order = Vec::with_capacity(total);
        let mut elapsed = 0u32;

        assign(&mut slots, &mut eligible, durations, elapsed)?;

        while order.len() < total {
            if slots.iter().all(|slot| matches!(slot, WorkerSlot::Idle)) {
                return Err(ScheduleError::Incomplete {
                    scheduled: order.len(),
                    total,
                });
            }

            elapsed += 1;
            for (worker, slot) in slots.iter_mut().enumerate() {
                if let WorkerSlot::Busy { step, remaining } = slot {
                    *remaining = remaining.saturating_sub(1);
                    if *remaining == 0 {
                        let step = *step;
                        trace!(tick = elapsed, worker, ?step, "completed");
                        order.push(step.clone());
                        graph.release(step, &mut counts, &mut eligible);
                        *slot = WorkerSlot::Idle;
                    }
                }
            }

            assign(&mut slots, &mut eligible, durations, elapsed)?;
        }

        debug!(
            steps = order.len(),
            workers = self.workers,
            elapsed,
            "multi-worker schedule complete"
        );
        Ok(Schedule { order, elapsed })
    }
}

impl Default for MultiWorkerScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_WORKERS)
    }
}

/// Hand the smallest eligible steps to idle workers, lowest index first
fn assign<'a, S>(
    slots: &mut [WorkerSlot<'a, S>],
    eligible: &mut BinaryHeap<Reverse<&'a S>>,
    durations: &DurationTable<S>,
    tick: u32,
) -> Result<(), ScheduleError>
where
    S: Ord + Debug,
{
    for (worker, slot) in slots.iter_mut().enumerate() {
        if !matches!(slot, WorkerSlot::Idle) {
            continue;
        }
        let Some(Reverse(step)) = eligible.pop() else {
            break;
        };
        let remaining = durations
            .get(step)
            .ok_or_else(|| ScheduleError::MissingDuration(format!("{step:?}")))?;
        trace!(tick, worker, ?step, remaining, "assigned");
        *slot = WorkerSlot::Busy { step, remaining };
    }
    Ok(())
}
