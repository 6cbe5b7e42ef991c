use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::step_graph::{
    DEFAULT_OFFSET, DEFAULT_WORKERS, DurationTable, MultiWorkerScheduler, ScheduleError, StepGraph,
};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2018, day = 7, tags = ["graph", "scheduling"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    graph: StepGraph<char>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .trim()
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(line_idx, line)| {
                parse_dependency(line).map_err(|e| anyhow!("(line {}) {}", line_idx + 1, e))
            })
            .collect::<Result<StepGraph<char>, anyhow::Error>>()
            .map(|graph| SharedData { graph })
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .graph
            .ordered_topological_sort()
            .map(|order| order.into_iter().collect())
            .map_err(|e| SolveError::SolveFailed(Box::new(e)))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        multiworker_total_time(&shared.graph, DEFAULT_WORKERS, DEFAULT_OFFSET)
            .map(|elapsed| elapsed.to_string())
            .map_err(|e| SolveError::SolveFailed(Box::new(e)))
    }
}

/// Ticks `workers` workers need when step `A` takes `offset` ticks, `B` one more, and so on
pub fn multiworker_total_time(
    graph: &StepGraph<char>,
    workers: usize,
    offset: u32,
) -> Result<u32, ScheduleError> {
    MultiWorkerScheduler::new(workers)
        .run(graph, &DurationTable::alphabetic(offset))
        .map(|schedule| schedule.elapsed)
}

/// `Step C must be finished before step A can begin.` -> `('C', 'A')`
fn parse_dependency(line: &str) -> anyhow::Result<(char, char)> {
    let rest = line
        .trim()
        .strip_prefix("Step ")
        .ok_or_else(|| anyhow!("line must start with 'Step '"))?;
    let (prereq, rest) = rest
        .split_once(" must be finished before step ")
        .ok_or_else(|| anyhow!("missing 'must be finished before step'"))?;
    let dependent = rest
        .strip_suffix(" can begin.")
        .ok_or_else(|| anyhow!("line must end with 'can begin.'"))?;

    Ok((step_name(prereq)?, step_name(dependent)?))
}

fn step_name(token: &str) -> anyhow::Result<char> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(name), None) if !name.is_whitespace() => Ok(name),
        _ => Err(anyhow!("step name must be a single character, got {:?}", token)),
    }
}
