// stockdb_core/src/query.rs

//! Read-only queries over a `StockStore`.
//!
//! Misses are never errors. Aggregates fall back to `0.0`, sequences to empty,
//! and keyed lookups return `None` instead of a magic price.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use crate::record::StockRecord;
use crate::selection::{BoundedSelector, Rank};
use crate::store::StockStore;
use crate::utils;

/// Sizes of the ranked queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SelectionLimits {
    pub top_volume: usize,
    pub bottom_close: usize,
    pub top_dividends: usize,
}

impl Default for SelectionLimits {
    fn default() -> Self {
        Self {
            top_volume: 10,
            bottom_close: 5,
            top_dividends: 5,
        }
    }
}

pub struct QueryEngine<'a> {
    store: &'a StockStore,
    limits: SelectionLimits,
}

impl<'a> QueryEngine<'a> {
    pub fn new(store: &'a StockStore) -> Self {
        Self::with_limits(store, SelectionLimits::default())
    }

    pub fn with_limits(store: &'a StockStore, limits: SelectionLimits) -> Self {
        Self { store, limits }
    }

    /// Query 1: every record observed on `date`.
    pub fn data_by_date(&self, date: &str) -> &'a [Arc<StockRecord>] {
        self.store.by_date(date)
    }

    /// Query 2: mean close of `ticker`, `0.0` when it has no records.
    pub fn average_close(&self, ticker: &str) -> f64 {
        let records = self.store.by_ticker(ticker);
        if records.is_empty() {
            return 0.0;
        }
        let sum: f64 = records.iter().map(|record| record.close).sum();
        sum / records.len() as f64
    }

    /// Query 3: highest `high` of `ticker` with `start_date <= date <= end_date`.
    /// # Returns
    /// * `None` when no record of the ticker falls in the period.
    pub fn highest_in_period(&self, ticker: &str, start_date: &str, end_date: &str) -> Option<f64> {
        self.store
            .by_ticker(ticker)
            .iter()
            .filter(|record| utils::date_in_range(&record.date, start_date, end_date))
            .map(|record| record.high)
            .reduce(f64::max)
    }

    /// Query 4
    pub fn unique_tickers(&self) -> BTreeSet<&'a str> {
        self.store.unique_tickers()
    }

    /// Query 5
    pub fn ticker_exists(&self, ticker: &str) -> bool {
        self.store.ticker_exists(ticker)
    }

    /// Query 6: number of dates where at least one record closed strictly above `threshold`.
    pub fn count_dates_above_threshold(&self, threshold: f64) -> usize {
        self.store
            .date_buckets()
            .filter(|(_date, bucket)| bucket.iter().any(|record| record.close > threshold))
            .count()
    }

    /// Query 7
    pub fn closing_price(&self, ticker: &str, date: &str) -> Option<f64> {
        self.store.get(ticker, date).map(|record| record.close)
    }

    /// Query 8: (date, close) pairs of `ticker` in insertion order.
    pub fn dates_and_closing_prices(&self, ticker: &str) -> Vec<(&'a str, f64)> {
        self.store
            .by_ticker(ticker)
            .iter()
            .map(|record| (record.date.as_str(), record.close))
            .collect()
    }

    /// Query 9: summed volume of `ticker`, `0.0` when unknown.
    pub fn total_volume(&self, ticker: &str) -> f64 {
        self.store
            .by_ticker(ticker)
            .iter()
            .map(|record| record.volume)
            .sum()
    }

    /// Query 10
    pub fn data_exists(&self, ticker: &str, date: &str) -> bool {
        self.store.data_exists(ticker, date)
    }

    /// Query 11: (open, close) from the keyed index.
    pub fn open_and_close(&self, ticker: &str, date: &str) -> Option<(f64, f64)> {
        self.store
            .get(ticker, date)
            .map(|record| (record.open, record.close))
    }

    /// Query 12
    pub fn dividend(&self, ticker: &str, date: &str) -> Option<f64> {
        self.store.get(ticker, date).map(|record| record.dividends)
    }

    /// Query 13: records on `date` with the highest volume, descending.
    pub fn top_by_volume(&self, date: &str) -> Vec<Arc<StockRecord>> {
        let mut selector = BoundedSelector::new(self.limits.top_volume, Rank::Highest);
        for record in self.store.by_date(date) {
            selector.push(Arc::clone(record), record.volume);
        }
        selector.into_ranked()
    }

    /// Query 14: lowest closes across the dataset, ascending, at most one record per ticker.
    ///
    /// A ticker is eligible again only after its candidate has been evicted, so
    /// later rows of a ticker already in the selection are skipped even when
    /// they closed lower.
    pub fn bottom_by_closing_price(&self) -> Vec<Arc<StockRecord>> {
        let mut selector = BoundedSelector::new(self.limits.bottom_close, Rank::Lowest);
        let mut represented: HashSet<&str> = HashSet::new();

        for record in self.store.all() {
            if represented.contains(record.ticker.as_str()) {
                continue;
            }
            represented.insert(&record.ticker);

            if let Some(evicted) = selector.push(Arc::clone(record), record.close) {
                represented.remove(evicted.ticker.as_str());
            }
        }

        selector.into_ranked()
    }

    /// Query 15: records with the highest dividends, descending. Not deduplicated by ticker.
    pub fn top_by_dividends(&self) -> Vec<Arc<StockRecord>> {
        let mut selector = BoundedSelector::new(self.limits.top_dividends, Rank::Highest);
        for record in self.store.all() {
            selector.push(Arc::clone(record), record.dividends);
        }
        selector.into_ranked()
    }
}
