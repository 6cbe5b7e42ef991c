//! Parallel executor for running solvers

use crate::aggregator::{ResultAggregator, ResultKey};
use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::ExecutorError;
use crate::inputs::InputStore;
use aoc_solver::{DynSolver, ParseError, SolverError, SolverRegistry};
use chrono::{TimeDelta, Utc};
use itertools::Itertools;
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::sync::mpsc::{self, Sender};
use tracing::{debug, info, warn};

/// Result from a single solver execution
#[derive(Debug)]
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, SolverError>,
    /// Set on the first part solved from a parsed input; later parts reuse it
    pub parse_duration: Option<TimeDelta>,
    pub solve_duration: TimeDelta,
}

/// Work item representing a solver to execute
#[derive(Debug, Clone)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Parallel executor for running solvers
pub struct Executor {
    registry: SolverRegistry,
    inputs: InputStore,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
    thread_pool: rayon::ThreadPool,
}

impl Executor {
    /// Create a new executor from config
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            registry,
            inputs: InputStore::new(config.input_dir.clone()),
            parallelize_by: config.parallelize_by,
            year_filter: config.year_filter,
            day_filter: config.day_filter,
            part_filter: config.part_filter,
            thread_pool,
        })
    }

    /// Input directory access, shared with the caller for up-front checks
    pub fn inputs(&self) -> &InputStore {
        &self.inputs
    }

    /// Collect work items by filtering from registry metadata
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        self.registry
            .iter_info()
            .filter(|info| self.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| self.day_filter.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: self.filter_parts(info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Filter parts based on the part filter and solver's max parts
    #[allow(clippy::reversed_empty_ranges)]
    fn filter_parts(&self, max_parts: u8) -> RangeInclusive<u8> {
        match self.part_filter {
            Some(p) if p <= max_parts => p..=p,
            Some(_) => 1..=0,
            None => 1..=max_parts,
        }
    }

    /// Run every work item and hand results to `on_result` in
    /// (year, day, part) order as soon as each becomes next in line
    pub fn run<F>(&self, mut on_result: F) -> Result<(), ExecutorError>
    where
        F: FnMut(SolverResult),
    {
        let expected: Vec<ResultKey> = self
            .collect_work_items()
            .iter()
            .flat_map(|w| {
                w.parts.clone().map(move |part| ResultKey {
                    year: w.year,
                    day: w.day,
                    part,
                })
            })
            .collect();
        info!(results = expected.len(), mode = ?self.parallelize_by, "running solvers");

        let (tx, rx) = mpsc::channel();

        std::thread::scope(|s| {
            let handle = s.spawn(move || self.execute(&tx));

            let mut aggregator = ResultAggregator::new(expected);
            for result in rx {
                for ready in aggregator.add(result) {
                    on_result(ready);
                }
            }
            for ready in aggregator.drain() {
                on_result(ready);
            }
            if !aggregator.is_complete() {
                warn!("not all expected results were received");
            }

            handle.join().map_err(|_| ExecutorError::Panicked)?
        })
    }

    /// Execute all work items and send results to channel
    pub fn execute(&self, tx: &Sender<SolverResult>) -> Result<(), ExecutorError> {
        let work_items = self.collect_work_items();

        match self.parallelize_by {
            ParallelizeBy::Sequential => {
                let mut collected_error: Option<ExecutorError> = None;
                for work in &work_items {
                    if let Err(e) = self.run_work_item(work, tx) {
                        collected_error = Some(ExecutorError::combine_opt(collected_error, e));
                    }
                }
                collected_error.map_or(Ok(()), Err)
            }
            ParallelizeBy::Year => {
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();

                self.execute_parallel_grouped(by_year, tx)
            }
            ParallelizeBy::Day => {
                let by_day = work_items.into_iter().map(|w| vec![w]).collect();
                self.execute_parallel_grouped(by_day, tx)
            }
        }
    }

    /// Execute groups in parallel; items within a group run in order
    fn execute_parallel_grouped(
        &self,
        groups: Vec<Vec<WorkItem>>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ExecutorError> {
        self.thread_pool.install(|| {
            groups
                .into_par_iter()
                .filter_map(|items| {
                    let mut err = None;
                    for work in &items {
                        if let Err(e) = self.run_work_item(work, tx) {
                            err = Some(ExecutorError::combine_opt(err, e));
                        }
                    }
                    err
                })
                .reduce_with(ExecutorError::combine)
                .map_or(Ok(()), Err)
        })
    }

    /// Load, parse and solve one year/day, sending one result per part
    fn run_work_item(
        &self,
        work: &WorkItem,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ExecutorError> {
        let (year, day) = (work.year, work.day);
        debug!(year, day, parts = ?work.parts, "starting solver");

        let input = match self.inputs.load(year, day) {
            Ok(input) => input,
            Err(e) => {
                warn!(year, day, error = %e, "input unavailable");
                let error = ParseError::MissingData(e.to_string());
                return send_errors(work, &error, tx);
            }
        };

        let mut solver = match self.registry.create_solver(year, day, &input) {
            Ok(solver) => solver,
            Err(e) => {
                warn!(year, day, error = %e, "failed to prepare solver");
                let error = match e {
                    SolverError::ParseError(parse) => parse,
                    other => ParseError::Other(other.to_string()),
                };
                return send_errors(work, &error, tx);
            }
        };

        let mut parse_duration = Some(solver.parse_duration());
        for part in work.parts.clone() {
            let result = solve_part(year, day, part, &mut *solver, parse_duration.take());
            tx.send(result).map_err(|_| ExecutorError::ChannelSend)?;
        }
        Ok(())
    }
}

/// Report the same failure for every requested part
fn send_errors(
    work: &WorkItem,
    error: &ParseError,
    tx: &Sender<SolverResult>,
) -> Result<(), ExecutorError> {
    for part in work.parts.clone() {
        tx.send(SolverResult {
            year: work.year,
            day: work.day,
            part,
            answer: Err(SolverError::ParseError(error.clone())),
            parse_duration: None,
            solve_duration: TimeDelta::zero(),
        })
        .map_err(|_| ExecutorError::ChannelSend)?;
    }
    Ok(())
}

fn solve_part(
    year: u16,
    day: u8,
    part: u8,
    solver: &mut dyn DynSolver,
    parse_duration: Option<TimeDelta>,
) -> SolverResult {
    let start = Utc::now();
    let (answer, solve_duration) = match solver.solve(part) {
        Ok(result) => {
            let duration = result.duration();
            (Ok(result.answer), duration)
        }
        Err(e) => (Err(e.into()), Utc::now() - start),
    };
    debug!(year, day, part, ok = answer.is_ok(), "part finished");

    SolverResult {
        year,
        day,
        part,
        answer,
        parse_duration,
        solve_duration,
    }
}
