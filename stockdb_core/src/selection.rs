// stockdb_core/src/selection.rs

//! Bounded top-k selection over a stream of records.
//!
//! Keeps at most `capacity` candidates in a min-heap ordered by strength, so the
//! root is always the weakest candidate kept so far. Each push costs O(log k).
//!
//! Tie-break: when two keys compare equal the earlier arrival is stronger. The
//! later arrival is evicted first and is listed after the earlier one.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::sync::Arc;

use crate::record::StockRecord;

/// Which end of the key range wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rank {
    Highest,
    Lowest,
}

#[derive(Debug)]
struct Candidate {
    key: f64,
    seq: u64,
    rank: Rank,
    record: Arc<StockRecord>,
}

impl Candidate {
    /// Strength order: `Greater` means `self` beats `other`.
    fn strength(&self, other: &Self) -> Ordering {
        let by_key = match self.rank {
            Rank::Highest => self.key.total_cmp(&other.key),
            Rank::Lowest => other.key.total_cmp(&self.key),
        };
        by_key.then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.strength(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.strength(other)
    }
}

#[derive(Debug)]
pub struct BoundedSelector {
    capacity: usize,
    rank: Rank,
    next_seq: u64,
    heap: BinaryHeap<Reverse<Candidate>>, // min-heap on strength via Reverse
}

impl BoundedSelector {
    pub fn new(capacity: usize, rank: Rank) -> Self {
        Self {
            capacity,
            rank,
            next_seq: 0,
            heap: BinaryHeap::with_capacity(capacity.saturating_add(1)),
        }
    }

    /// Offers a candidate.
    /// # Arguments
    /// * `record` - The candidate record.
    /// * `key` - The value it is ranked by.
    /// # Returns
    /// * The record evicted to stay within capacity, if any. May be `record` itself.
    pub fn push(&mut self, record: Arc<StockRecord>, key: f64) -> Option<Arc<StockRecord>> {
        let seq = self.next_seq;
        self.next_seq += 1;

        self.heap.push(Reverse(Candidate {
            key,
            seq,
            rank: self.rank,
            record,
        }));

        if self.heap.len() > self.capacity {
            return self.heap.pop().map(|Reverse(weakest)| weakest.record);
        }
        None
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drains the selection, strongest first.
    pub fn into_ranked(self) -> Vec<Arc<StockRecord>> {
        // Ascending `Reverse` order is descending strength.
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|Reverse(candidate)| candidate.record)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(ticker: &str, close: f64) -> Arc<StockRecord> {
        Arc::new(StockRecord::new("2024-01-01", ticker, close, close, close, close, 1.0, 0.0).unwrap())
    }

    fn tickers(records: &[Arc<StockRecord>]) -> Vec<&str> {
        records.iter().map(|r| r.ticker.as_str()).collect()
    }

    #[test]
    fn test_highest_keeps_top_k_descending() {
        let mut selector = BoundedSelector::new(3, Rank::Highest);
        for (ticker, value) in [("A", 5.0), ("B", 1.0), ("C", 9.0), ("D", 7.0), ("E", 3.0)] {
            selector.push(record(ticker, value), value);
        }
        assert_eq!(selector.len(), 3);
        assert_eq!(tickers(&selector.into_ranked()), vec!["C", "D", "A"]);
    }

    #[test]
    fn test_lowest_keeps_bottom_k_ascending() {
        let mut selector = BoundedSelector::new(2, Rank::Lowest);
        for (ticker, value) in [("A", 5.0), ("B", 1.0), ("C", 9.0), ("D", -2.0)] {
            selector.push(record(ticker, value), value);
        }
        assert_eq!(tickers(&selector.into_ranked()), vec!["D", "B"]);
    }

    #[test]
    fn test_push_reports_evicted_record() {
        let mut selector = BoundedSelector::new(1, Rank::Highest);
        assert!(selector.push(record("A", 2.0), 2.0).is_none());

        let evicted = selector.push(record("B", 3.0), 3.0).unwrap();
        assert_eq!(evicted.ticker, "A");

        let evicted = selector.push(record("C", 1.0), 1.0).unwrap();
        assert_eq!(evicted.ticker, "C");
    }

    #[test]
    fn test_ties_favour_earlier_arrival() {
        let mut selector = BoundedSelector::new(2, Rank::Highest);
        selector.push(record("A", 4.0), 4.0);
        selector.push(record("B", 4.0), 4.0);
        let evicted = selector.push(record("C", 4.0), 4.0).unwrap();

        assert_eq!(evicted.ticker, "C");
        assert_eq!(tickers(&selector.into_ranked()), vec!["A", "B"]);
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut selector = BoundedSelector::new(0, Rank::Lowest);
        let evicted = selector.push(record("A", 1.0), 1.0).unwrap();
        assert_eq!(evicted.ticker, "A");
        assert!(selector.is_empty());
        assert!(selector.into_ranked().is_empty());
    }
}
