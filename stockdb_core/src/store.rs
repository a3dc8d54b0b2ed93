// stockdb_core/src/store.rs

//! In-memory record store with three derived indexes.
//!
//! Every record lives once behind an `Arc` and is shared by four views:
//! - `all`: insertion-ordered sequence of every record (duplicates kept)
//! - `by_ticker`: ticker → records of that ticker, insertion order
//! - `by_date`: date → records observed that date, insertion order
//! - `by_ticker_date`: (ticker, date) → most recently inserted record
//!
//! Inserting a second record with an existing (ticker, date) key overwrites the
//! keyed view only; the earlier row stays in the three sequence views. This
//! mirrors the behaviour of the loader the dataset was built for and is kept as-is.
//!
//! The store has no interior locking. Mutation needs `&mut self`, so sharing it
//! across threads means wrapping it in a `RwLock` at the call site.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use crate::record::StockRecord;

#[derive(Debug, Default)]
pub struct StockStore {
    all: Vec<Arc<StockRecord>>,
    by_ticker: HashMap<String, Vec<Arc<StockRecord>>>,
    by_date: BTreeMap<String, Vec<Arc<StockRecord>>>,
    by_ticker_date: HashMap<String, HashMap<String, Arc<StockRecord>>>,
}

impl StockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an already validated record to every view.
    /// Never fails: a duplicate (ticker, date) key replaces the keyed entry.
    pub fn insert(&mut self, record: StockRecord) {
        let record = Arc::new(record);

        self.all.push(Arc::clone(&record));
        self.by_ticker
            .entry(record.ticker.clone())
            .or_default()
            .push(Arc::clone(&record));
        self.by_date
            .entry(record.date.clone())
            .or_default()
            .push(Arc::clone(&record));

        tracing::debug!(ticker = %record.ticker, date = %record.date, "Added stock data");

        self.by_ticker_date
            .entry(record.ticker.clone())
            .or_default()
            .insert(record.date.clone(), record);
    }

    /// Removes every record of `ticker` from all four views.
    /// # Arguments
    /// * `ticker` - Ticker to delete.
    /// # Returns
    /// * Number of records removed from the insertion-ordered view. `0` when the ticker is unknown.
    pub fn delete_ticker(&mut self, ticker: &str) -> usize {
        let Some(removed) = self.by_ticker.remove(ticker) else {
            tracing::warn!(ticker, "Ticker not found, nothing deleted");
            return 0;
        };

        self.all.retain(|record| record.ticker != ticker);

        // No ticker index on dates: every bucket has to be scanned.
        self.by_date.retain(|_date, bucket| {
            bucket.retain(|record| record.ticker != ticker);
            !bucket.is_empty()
        });

        self.by_ticker_date.remove(ticker);

        tracing::info!(ticker, removed = removed.len(), "Deleted all records for ticker");
        removed.len()
    }

    /// Distinct tickers across the dataset, in lexical order.
    pub fn unique_tickers(&self) -> BTreeSet<&str> {
        self.all.iter().map(|record| record.ticker.as_str()).collect()
    }

    pub fn ticker_exists(&self, ticker: &str) -> bool {
        self.by_ticker.contains_key(ticker)
    }

    pub fn data_exists(&self, ticker: &str, date: &str) -> bool {
        self.get(ticker, date).is_some()
    }

    /// Most recently inserted record for the (ticker, date) key.
    pub fn get(&self, ticker: &str, date: &str) -> Option<&StockRecord> {
        self.by_ticker_date
            .get(ticker)
            .and_then(|dates| dates.get(date))
            .map(|record| record.as_ref())
    }

    /// Records observed on `date`, empty if the date was never seen.
    pub fn by_date(&self, date: &str) -> &[Arc<StockRecord>] {
        self.by_date.get(date).map(Vec::as_slice).unwrap_or_default()
    }

    /// Records of `ticker` in insertion order, empty if the ticker is unknown.
    pub fn by_ticker(&self, ticker: &str) -> &[Arc<StockRecord>] {
        self.by_ticker.get(ticker).map(Vec::as_slice).unwrap_or_default()
    }

    /// Date buckets in ascending date order.
    pub fn date_buckets(&self) -> impl Iterator<Item = (&str, &[Arc<StockRecord>])> {
        self.by_date
            .iter()
            .map(|(date, bucket)| (date.as_str(), bucket.as_slice()))
    }

    pub fn all(&self) -> &[Arc<StockRecord>] {
        &self.all
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}
