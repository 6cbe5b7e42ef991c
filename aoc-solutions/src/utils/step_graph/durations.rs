//! Per-step durations for the timed scheduler.

use std::collections::BTreeMap;

/// Base cost added to every step by [`DurationTable::alphabetic`] by default
pub const DEFAULT_OFFSET: u32 = 61;

/// Immutable mapping from step to the number of ticks it occupies a worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationTable<S> {
    durations: BTreeMap<S, u32>,
}

impl<S: Ord> DurationTable<S> {
    /// Duration of `step`, if it has one
    pub fn get(&self, step: &S) -> Option<u32> {
        self.durations.get(step).copied()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.durations.len()
    }

    /// Check if the table has no entries
    pub fn is_empty(&self) -> bool {
        self.durations.is_empty()
    }
}

impl DurationTable<char> {
    /// `'A'` takes `offset` ticks, `'B'` takes `offset + 1`, up to `'Z'`.
    ///
    /// ```rust
    /// use aoc_solutions::utils::step_graph::DurationTable;
    ///
    /// let table = DurationTable::alphabetic(61);
    /// assert_eq!(table.get(&'A'), Some(61));
    /// assert_eq!(table.get(&'Z'), Some(86));
    /// assert_eq!(table.get(&'a'), None);
    /// ```
    pub fn alphabetic(offset: u32) -> Self {
        ('A'..='Z')
            .zip(0u32..)
            .map(|(step, rank)| (step, offset.saturating_add(rank)))
            .collect()
    }
}

impl Default for DurationTable<char> {
    fn default() -> Self {
        Self::alphabetic(DEFAULT_OFFSET)
    }
}

impl<S: Ord> FromIterator<(S, u32)> for DurationTable<S> {
    fn from_iter<T: IntoIterator<Item = (S, u32)>>(entries: T) -> Self {
        Self {
            durations: entries.into_iter().collect(),
        }
    }
}
