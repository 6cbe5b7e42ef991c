//! Tests for the step graph and its schedulers.

use std::collections::HashMap;

use proptest::prelude::*;

use super::*;

/// The dependency list from the 2018 day 7 puzzle description
fn example_graph() -> StepGraph<char> {
    [
        ('C', 'A'),
        ('C', 'F'),
        ('A', 'B'),
        ('A', 'D'),
        ('B', 'E'),
        ('D', 'E'),
        ('F', 'E'),
    ]
    .into_iter()
    .collect()
}

/// Panics unless every edge points forward in `order` and every step appears once
fn assert_valid_order<S: Ord + Clone + std::hash::Hash + std::fmt::Debug>(
    graph: &StepGraph<S>,
    order: &[S],
) {
    assert_eq!(order.len(), graph.len(), "order {:?} is not complete", order);
    let position: HashMap<&S, usize> = order.iter().enumerate().map(|(i, s)| (s, i)).collect();
    assert_eq!(position.len(), order.len(), "order {:?} has duplicates", order);
    for step in graph.steps() {
        for child in graph.dependents_of(step) {
            assert!(
                position[step] < position[child],
                "{:?} must come before {:?} in {:?}",
                step,
                child,
                order
            );
        }
    }
}

#[test]
fn test_example_single_worker_order() {
    let order: String = example_graph()
        .ordered_topological_sort()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(order, "CABDFE");
}

#[test]
fn test_example_two_workers() {
    let schedule = MultiWorkerScheduler::new(2)
        .run(&example_graph(), &DurationTable::alphabetic(1))
        .unwrap();

    assert_eq!(schedule.elapsed, 15);
    assert_eq!(schedule.order, vec!['C', 'A', 'B', 'F', 'D', 'E']);
}

#[test]
fn test_example_one_worker_matches_single_worker() {
    let graph = example_graph();
    let schedule = MultiWorkerScheduler::new(1)
        .run(&graph, &DurationTable::alphabetic(1))
        .unwrap();

    assert_eq!(schedule.order, graph.ordered_topological_sort().unwrap());
    // One worker never idles, so the total is the sum of 1..=6
    assert_eq!(schedule.elapsed, 21);
}

#[test]
fn test_diamond_prefers_smaller_sibling() {
    // B and C both depend only on A; C's edge is inserted first
    let graph: StepGraph<char> = [('A', 'C'), ('A', 'B'), ('C', 'D'), ('B', 'D')]
        .into_iter()
        .collect();

    assert_eq!(graph.ordered_topological_sort().unwrap(), vec!['A', 'B', 'C', 'D']);

    let schedule = MultiWorkerScheduler::new(1)
        .run(&graph, &DurationTable::alphabetic(1))
        .unwrap();
    assert_eq!(schedule.order, vec!['A', 'B', 'C', 'D']);
}

#[test]
fn test_smallest_root_goes_to_lowest_worker() {
    // Z is long, A is short: with two workers A finishes first even though
    // both start on tick 0.
    let mut graph = StepGraph::new();
    graph.add_vertex('Z');
    graph.add_vertex('A');

    let schedule = MultiWorkerScheduler::new(2)
        .run(&graph, &DurationTable::alphabetic(1))
        .unwrap();
    assert_eq!(schedule.order, vec!['A', 'Z']);
    assert_eq!(schedule.elapsed, 26);
}

#[test]
fn test_empty_graph() {
    let graph: StepGraph<char> = StepGraph::new();

    assert!(graph.is_empty());
    assert!(graph.topological_sort().is_empty());
    assert!(graph.ordered_topological_sort().unwrap().is_empty());

    let schedule = MultiWorkerScheduler::default()
        .run(&graph, &DurationTable::default())
        .unwrap();
    assert!(schedule.order.is_empty());
    assert_eq!(schedule.elapsed, 0);
}

#[test]
fn test_single_vertex() {
    let mut graph = StepGraph::new();
    graph.add_vertex('Q');

    assert_eq!(graph.ordered_topological_sort().unwrap(), vec!['Q']);

    let durations = DurationTable::default();
    let schedule = MultiWorkerScheduler::default().run(&graph, &durations).unwrap();
    assert_eq!(schedule.order, vec!['Q']);
    assert_eq!(Some(schedule.elapsed), durations.get(&'Q'));
}

#[test]
fn test_add_vertex_is_idempotent() {
    let mut graph = StepGraph::new();
    graph.add_edge('A', 'B');
    graph.add_vertex('A');
    graph.add_vertex('B');

    assert_eq!(graph.len(), 2);
    assert!(graph.contains(&'A'));
    assert_eq!(graph.dependents_of(&'A'), &['B']);
    assert!(graph.dependents_of(&'B').is_empty());
    assert!(graph.dependents_of(&'X').is_empty());
}

#[test]
fn test_duplicate_edges_are_counted_consistently() {
    let graph: StepGraph<char> = [('A', 'B'), ('A', 'B'), ('B', 'C')].into_iter().collect();

    assert_eq!(graph.dependents_of(&'A'), &['B', 'B']);
    assert_eq!(graph.ordered_topological_sort().unwrap(), vec!['A', 'B', 'C']);

    let schedule = MultiWorkerScheduler::new(3)
        .run(&graph, &DurationTable::alphabetic(1))
        .unwrap();
    assert_eq!(schedule.order, vec!['A', 'B', 'C']);
    assert_eq!(schedule.elapsed, 1 + 2 + 3);
}

#[test]
fn test_cycle_is_reported_by_single_worker() {
    let graph: StepGraph<char> = [('A', 'B'), ('B', 'A'), ('C', 'A')].into_iter().collect();

    assert_eq!(
        graph.ordered_topological_sort(),
        Err(ScheduleError::Incomplete {
            scheduled: 1,
            total: 3
        })
    );
}

#[test]
fn test_cycle_is_reported_by_multi_worker() {
    let graph: StepGraph<char> = [('A', 'B'), ('B', 'A'), ('C', 'A')].into_iter().collect();

    let result = MultiWorkerScheduler::new(2).run(&graph, &DurationTable::alphabetic(1));
    assert_eq!(
        result,
        Err(ScheduleError::Incomplete {
            scheduled: 1,
            total: 3
        })
    );
}

#[test]
fn test_no_workers() {
    let result = MultiWorkerScheduler::new(0).run(&example_graph(), &DurationTable::default());
    assert_eq!(result, Err(ScheduleError::NoWorkers));
}

#[test]
fn test_missing_duration() {
    let graph: StepGraph<char> = [('A', 'b')].into_iter().collect();

    let result = MultiWorkerScheduler::new(2).run(&graph, &DurationTable::alphabetic(1));
    assert_eq!(result, Err(ScheduleError::MissingDuration("'b'".to_string())));
}

#[test]
fn test_zero_duration_occupies_one_tick() {
    let graph: StepGraph<char> = [('A', 'B')].into_iter().collect();
    let durations: DurationTable<char> = [('A', 0), ('B', 0)].into_iter().collect();

    let schedule = MultiWorkerScheduler::new(1).run(&graph, &durations).unwrap();
    assert_eq!(schedule.order, vec!['A', 'B']);
    assert_eq!(schedule.elapsed, 2);
}

#[test]
fn test_alphabetic_durations() {
    let table = DurationTable::alphabetic(61);
    assert_eq!(table.len(), 26);
    assert_eq!(table.get(&'A'), Some(61));
    assert_eq!(table.get(&'C'), Some(63));
    assert_eq!(table.get(&'Z'), Some(86));
    assert_eq!(table, DurationTable::default());
    assert_eq!(MultiWorkerScheduler::default().workers(), DEFAULT_WORKERS);
}

#[test]
fn test_token_steps() {
    let graph: StepGraph<&str> = [("fetch", "build"), ("fetch", "audit"), ("build", "ship")]
        .into_iter()
        .collect();
    let durations: DurationTable<&str> = [("fetch", 2), ("build", 5), ("audit", 1), ("ship", 1)]
        .into_iter()
        .collect();

    assert_eq!(
        graph.ordered_topological_sort().unwrap(),
        vec!["fetch", "audit", "build", "ship"]
    );

    let schedule = MultiWorkerScheduler::new(2).run(&graph, &durations).unwrap();
    // audit finishes while build is still running
    assert_eq!(schedule.order, vec!["fetch", "audit", "build", "ship"]);
    assert_eq!(schedule.elapsed, 2 + 5 + 1);
}

#[test]
fn test_deep_chain_does_not_overflow() {
    let graph: StepGraph<u32> = (0..100_000u32).map(|i| (i, i + 1)).collect();

    let expected: Vec<u32> = (0..=100_000).collect();
    assert_eq!(graph.topological_sort(), expected);
    assert_eq!(graph.ordered_topological_sort().unwrap(), expected);
}

#[test]
fn test_topological_sort_example() {
    let graph = example_graph();
    assert_valid_order(&graph, &graph.topological_sort());
}

#[test]
fn test_runs_are_repeatable() {
    let graph = example_graph();
    let durations = DurationTable::alphabetic(1);
    let scheduler = MultiWorkerScheduler::new(2);

    assert_eq!(
        graph.ordered_topological_sort(),
        graph.ordered_topological_sort()
    );
    assert_eq!(
        scheduler.run(&graph, &durations),
        scheduler.run(&graph, &durations)
    );
}

// =============================================================================
// Property tests over random DAGs
// =============================================================================

/// Random DAG over up to 12 letters.
///
/// Letters are shuffled and every edge points from an earlier to a later
/// position in the shuffle, so the graph is acyclic while alphabetical order
/// says nothing about dependency order.
fn arb_dag() -> impl Strategy<Value = StepGraph<char>> {
    (1usize..=12)
        .prop_flat_map(|n| {
            let names = Just(('A'..='Z').take(n).collect::<Vec<char>>()).prop_shuffle();
            let edges = prop::collection::vec((0..n, 0..n), 0..=n * 2);
            (names, edges)
        })
        .prop_map(|(names, edges)| {
            let mut graph = StepGraph::new();
            for &name in &names {
                graph.add_vertex(name);
            }
            for (a, b) in edges {
                if a != b {
                    graph.add_edge(names[a.min(b)], names[a.max(b)]);
                }
            }
            graph
        })
}

/// *For any* DAG, both sorts return a permutation of the steps with every
/// prerequisite before its dependents.
mod property_1_valid_orders {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn sorts_are_topological(graph in arb_dag()) {
            assert_valid_order(&graph, &graph.topological_sort());
            assert_valid_order(&graph, &graph.ordered_topological_sort().unwrap());
        }
    }
}

/// *For any* DAG and duration table, one worker serializes to the
/// single-worker order.
mod property_2_one_worker_equivalence {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn one_worker_matches_single_worker(graph in arb_dag(), offset in 0u32..=10) {
            let schedule = MultiWorkerScheduler::new(1)
                .run(&graph, &DurationTable::alphabetic(offset))
                .unwrap();
            prop_assert_eq!(schedule.order, graph.ordered_topological_sort().unwrap());
        }
    }
}

/// *For any* DAG and worker count, the timed run completes every step in
/// precedence order, never takes longer than doing all work serially and
/// never less than the longest step.
mod property_3_timed_bounds {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn timed_run_is_complete_and_bounded(
            graph in arb_dag(),
            workers in 1usize..=5,
            offset in 1u32..=5
        ) {
            let durations = DurationTable::alphabetic(offset);
            let schedule = MultiWorkerScheduler::new(workers).run(&graph, &durations).unwrap();
            assert_valid_order(&graph, &schedule.order);

            let costs: Vec<u32> = graph.steps().filter_map(|s| durations.get(s)).collect();
            let longest = costs.iter().copied().max().unwrap_or(0);
            let serial: u32 = costs.iter().sum();
            prop_assert!(schedule.elapsed >= longest);
            prop_assert!(schedule.elapsed <= serial);

            let again = MultiWorkerScheduler::new(workers).run(&graph, &durations).unwrap();
            prop_assert_eq!(schedule, again);
        }
    }
}
