//! Append-only precedence graph.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};

use tracing::debug;

use super::error::ScheduleError;

/// Directed graph of steps keyed by step identity.
///
/// Each step maps to the steps it unlocks (its dependents). Edges are
/// append-only and duplicates are kept; every scheduler counts one
/// prerequisite per recorded edge and releases one per recorded edge, so
/// duplicates never change the outcome.
///
/// The graph is expected to be acyclic. See the [module docs](super) for what
/// happens otherwise.
#[derive(Debug, Clone)]
pub struct StepGraph<S> {
    dependents: BTreeMap<S, Vec<S>>,
}

impl<S: Ord + Clone> StepGraph<S> {
    /// Create an empty graph
    pub fn new() -> Self {
        Self {
            dependents: BTreeMap::new(),
        }
    }

    /// Insert a step with no edges. Does nothing if the step already exists.
    pub fn add_vertex(&mut self, step: S) {
        self.dependents.entry(step).or_default();
    }

    /// Record that `prereq` must be finished before `dependent` can begin.
    ///
    /// Both steps are inserted if absent.
    pub fn add_edge(&mut self, prereq: S, dependent: S) {
        self.add_vertex(dependent.clone());
        self.dependents.entry(prereq).or_default().push(dependent);
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.dependents.len()
    }

    /// Check if the graph has no steps
    pub fn is_empty(&self) -> bool {
        self.dependents.is_empty()
    }

    /// Check if a step exists
    pub fn contains(&self, step: &S) -> bool {
        self.dependents.contains_key(step)
    }

    /// All steps in ascending order
    pub fn steps(&self) -> impl Iterator<Item = &S> {
        self.dependents.keys()
    }

    /// Steps unlocked by `step`, in insertion order. Empty for unknown steps.
    pub fn dependents_of(&self, step: &S) -> &[S] {
        self.dependents
            .get(step)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of unresolved prerequisites per step, one per recorded edge.
    pub(super) fn precedence_counts(&self) -> BTreeMap<&S, usize> {
        let mut counts: BTreeMap<&S, usize> = self.dependents.keys().map(|s| (s, 0)).collect();
        for child in self.dependents.values().flatten() {
            if let Some(count) = counts.get_mut(child) {
                *count += 1;
            }
        }
        counts
    }

    /// Steps with no prerequisites, as a min-heap
    pub(super) fn initially_eligible<'a>(
        counts: &BTreeMap<&'a S, usize>,
    ) -> BinaryHeap<Reverse<&'a S>> {
        counts
            .iter()
            .filter(|(_, count)| **count == 0)
            .map(|(step, _)| Reverse(*step))
            .collect()
    }

    /// Mark `step` complete: decrement each dependent's count and push those
    /// that reach zero onto `eligible`.
    pub(super) fn release<'a>(
        &'a self,
        step: &S,
        counts: &mut BTreeMap<&'a S, usize>,
        eligible: &mut BinaryHeap<Reverse<&'a S>>,
    ) {
        for child in self.dependents_of(step) {
            if let Some(count) = counts.get_mut(child) {
                *count -= 1;
                if *count == 0 {
                    eligible.push(Reverse(child));
                }
            }
        }
    }

    /// Some topological order of all steps.
    ///
    /// Uses a depth-first postorder driven by an explicit stack, so arbitrarily
    /// long dependency chains do not grow the call stack. Which order is
    /// returned among independent steps is unspecified; use
    /// [`ordered_topological_sort`](Self::ordered_topological_sort) when it
    /// matters.
    pub fn topological_sort(&self) -> Vec<S> {
        let mut visited: BTreeSet<&S> = BTreeSet::new();
        let mut finished: Vec<S> = Vec::with_capacity(self.len());

        for root in self.dependents.keys() {
            if !visited.insert(root) {
                continue;
            }
            // (step, index of the next child to visit)
            let mut stack: Vec<(&S, usize)> = vec![(root, 0)];
            while let Some(frame) = stack.last_mut() {
                let (step, cursor) = *frame;
                frame.1 += 1;
                match self.dependents_of(step).get(cursor) {
                    Some(child) => {
                        if visited.insert(child) {
                            stack.push((child, 0));
                        }
                    }
                    None => {
                        finished.push(step.clone());
                        stack.pop();
                    }
                }
            }
        }

        finished.reverse();
        finished
    }

    /// Completion order of a single worker that always picks the smallest
    /// eligible step.
    ///
    /// # Returns
    /// * `Ok(Vec<S>)` - Every step exactly once, prerequisites first
    /// * `Err(ScheduleError::Incomplete)` - Some steps never became eligible
    pub fn ordered_topological_sort(&self) -> Result<Vec<S>, ScheduleError> {
        let mut counts = self.precedence_counts();
        let mut eligible = Self::initially_eligible(&counts);
        let mut completed = Vec::with_capacity(self.len());

        while let Some(Reverse(step)) = eligible.pop() {
            completed.push(step.clone());
            self.release(step, &mut counts, &mut eligible);
        }

        if completed.len() != self.len() {
            return Err(ScheduleError::Incomplete {
                scheduled: completed.len(),
                total: self.len(),
            });
        }

        debug!(steps = completed.len(), "single-worker schedule complete");
        Ok(completed)
    }
}

impl<S: Ord + Clone> Default for StepGraph<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Ord + Clone> Extend<(S, S)> for StepGraph<S> {
    fn extend<T: IntoIterator<Item = (S, S)>>(&mut self, edges: T) {
        for (prereq, dependent) in edges {
            self.add_edge(prereq, dependent);
        }
    }
}

impl<S: Ord + Clone> FromIterator<(S, S)> for StepGraph<S> {
    fn from_iter<T: IntoIterator<Item = (S, S)>>(edges: T) -> Self {
        let mut graph = Self::new();
        graph.extend(edges);
        graph
    }
}
