//! Result aggregator for ordering parallel solver results
//!
//! Buffers and orders results for streaming output using two min-heaps:
//! - One for expected keys (what we're waiting for)
//! - One for received results (buffered until their turn)

use crate::executor::SolverResult;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Key for ordering results (year, day, part) - ordered ascending
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Clone, Copy)]
pub struct ResultKey {
    pub year: u16,
    pub day: u8,
    pub part: u8,
}

impl From<&SolverResult> for ResultKey {
    fn from(r: &SolverResult) -> Self {
        Self {
            year: r.year,
            day: r.day,
            part: r.part,
        }
    }
}

/// Min-heap entry: the smallest key sorts greatest
struct Pending(SolverResult);

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        ResultKey::from(&other.0).cmp(&ResultKey::from(&self.0))
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Eq for Pending {}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        ResultKey::from(&self.0) == ResultKey::from(&other.0)
    }
}

/// Aggregator that buffers results and emits them in sorted order
pub struct ResultAggregator {
    expected: BinaryHeap<Reverse<ResultKey>>,
    pending: BinaryHeap<Pending>,
}

impl ResultAggregator {
    /// Create aggregator from list of expected keys
    pub fn new(expected_keys: impl IntoIterator<Item = ResultKey>) -> Self {
        Self {
            expected: expected_keys.into_iter().map(Reverse).collect(),
            pending: BinaryHeap::new(),
        }
    }

    /// Add a result and return any results ready for output (in order)
    pub fn add(&mut self, result: SolverResult) -> Vec<SolverResult> {
        self.pending.push(Pending(result));

        let mut ready = Vec::new();
        while let (Some(Reverse(next_expected)), Some(top_pending)) =
            (self.expected.peek(), self.pending.peek())
        {
            if ResultKey::from(&top_pending.0) != *next_expected {
                break;
            }
            self.expected.pop();
            if let Some(Pending(result)) = self.pending.pop() {
                ready.push(result);
            }
        }
        ready
    }

    /// Drain remaining results in order
    pub fn drain(&mut self) -> Vec<SolverResult> {
        let mut results: Vec<_> = self.pending.drain().map(|p| p.0).collect();
        results.sort_by_key(|r| ResultKey::from(r));
        results
    }

    /// Check if all expected results have been received
    pub fn is_complete(&self) -> bool {
        self.expected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use proptest::prelude::*;

    fn key(year: u16, day: u8, part: u8) -> ResultKey {
        ResultKey { year, day, part }
    }

    fn make_result(k: ResultKey) -> SolverResult {
        SolverResult {
            year: k.year,
            day: k.day,
            part: k.part,
            answer: Ok(format!("{}_{}_{}", k.year, k.day, k.part)),
            parse_duration: None,
            solve_duration: TimeDelta::milliseconds(10),
        }
    }

    #[test]
    fn test_in_order_results() {
        let mut agg = ResultAggregator::new([key(2018, 7, 1), key(2018, 7, 2)]);

        let ready = agg.add(make_result(key(2018, 7, 1)));
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].part, 1);

        let ready = agg.add(make_result(key(2018, 7, 2)));
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].part, 2);

        assert!(agg.is_complete());
    }

    #[test]
    fn test_out_of_order_results() {
        let mut agg =
            ResultAggregator::new([key(2018, 6, 1), key(2018, 6, 2), key(2018, 7, 1)]);

        assert!(agg.add(make_result(key(2018, 6, 2))).is_empty());
        assert!(agg.add(make_result(key(2018, 7, 1))).is_empty());

        let ready = agg.add(make_result(key(2018, 6, 1)));
        let keys: Vec<_> = ready.iter().map(ResultKey::from).collect();
        assert_eq!(keys, vec![key(2018, 6, 1), key(2018, 6, 2), key(2018, 7, 1)]);
    }

    #[test]
    fn test_drain_remaining() {
        let mut agg = ResultAggregator::new([key(2018, 7, 1), key(2018, 7, 2)]);

        agg.add(make_result(key(2018, 7, 2)));
        assert!(!agg.is_complete());

        let remaining = agg.drain();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].part, 2);
    }

    fn shuffled_keys() -> impl Strategy<Value = (Vec<ResultKey>, Vec<ResultKey>)> {
        prop::collection::btree_set((2015u16..2020, 1u8..=25, 1u8..=2), 1..40).prop_flat_map(
            |set| {
                let sorted: Vec<ResultKey> =
                    set.into_iter().map(|(y, d, p)| key(y, d, p)).collect();
                (Just(sorted.clone()), Just(sorted).prop_shuffle())
            },
        )
    }

    proptest! {
        /// *For any* arrival order, results come out sorted by (year, day, part)
        /// and every expected result is emitted exactly once.
        #[test]
        fn prop_emits_in_key_order((sorted, arrival) in shuffled_keys()) {
            let mut agg = ResultAggregator::new(sorted.clone());
            let mut emitted = Vec::new();
            for k in arrival {
                emitted.extend(agg.add(make_result(k)).iter().map(ResultKey::from));
            }
            prop_assert!(agg.is_complete());
            prop_assert!(agg.drain().is_empty());
            prop_assert_eq!(emitted, sorted);
        }
    }
}
