// stockdb_core/src/loader.rs

//! CSV ingestion into a `StockStore`.
//!
//! Expected layout, header row first:
//! `Date,Ticker,Open,High,Low,Close,Volume,Dividends`
//!
//! Rows with an empty date or ticker, a missing or unparseable numeric field,
//! or a malformed date are skipped and logged. Only an unreadable source is fatal.

use anyhow::Context;

use crate::record::StockRecord;
use crate::store::StockStore;

const NUMERIC_FIELDS: [&str; 6] = ["Open", "High", "Low", "Close", "Volume", "Dividends"];

/// Reason a single row was rejected.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RowError {
    #[error("missing Date or Ticker")]
    MissingKey,

    #[error("empty {0} field")]
    EmptyField(&'static str),

    #[error("invalid {field} value '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("rejected record: {0}")]
    Rejected(String),
}

/// Outcome of one ingestion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: usize,
}

/// Turns one CSV row into a validated record.
pub fn parse_row(row: &csv::StringRecord) -> Result<StockRecord, RowError> {
    let date = row.get(0).unwrap_or_default();
    let ticker = row.get(1).unwrap_or_default();
    if date.is_empty() || ticker.is_empty() {
        return Err(RowError::MissingKey);
    }

    let mut values = [0.0_f64; NUMERIC_FIELDS.len()];
    for (i, &field) in NUMERIC_FIELDS.iter().enumerate() {
        let raw = row.get(i + 2).unwrap_or_default();
        if raw.is_empty() {
            return Err(RowError::EmptyField(field));
        }
        values[i] = raw.parse::<f64>().map_err(|_| RowError::InvalidNumber {
            field,
            value: raw.to_string(),
        })?;
    }

    let [open, high, low, close, volume, dividends] = values;
    StockRecord::new(date, ticker, open, high, low, close, volume, dividends)
        .map_err(|e| RowError::Rejected(e.to_string()))
}

/// Reads CSV rows from any reader into the store.
/// # Arguments
/// * `reader` - Source of CSV text, header row first.
/// * `store` - Store receiving every valid row.
/// # Returns
/// * `anyhow::Result<LoadReport>` with loaded and skipped row counts. Fails when the reader itself errors.
pub fn load_reader<R: std::io::Read>(reader: R, store: &mut StockStore) -> anyhow::Result<LoadReport> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut report = LoadReport::default();

    for result in csv_reader.records() {
        let row = match result {
            Ok(row) => row,
            Err(e) if e.is_io_error() => {
                return Err(anyhow::Error::new(e)).with_context(|| format!(
                    "Failed to read dataset after {} rows",
                    report.loaded + report.skipped,
                ));
            }
            Err(e) => {
                tracing::warn!("Skipping unreadable line: {}", e);
                report.skipped += 1;
                continue;
            }
        };

        match parse_row(&row) {
            Ok(record) => {
                store.insert(record);
                report.loaded += 1;
            }
            Err(reason) => {
                let line = row.position().map(|p| p.line()).unwrap_or_default();
                tracing::warn!(line, row = ?row, "Skipping line with {}", reason);
                report.skipped += 1;
            }
        }
    }

    anyhow::Ok(report)
}

/// Loads a CSV file into the store.
/// # Arguments
/// * `path` - Path to the CSV dataset.
/// * `store` - Store receiving every valid row.
/// # Returns
/// * `anyhow::Result<LoadReport>` - Fails only when the file cannot be opened or read.
pub fn load_csv<P: AsRef<std::path::Path>>(path: P, store: &mut StockStore) -> anyhow::Result<LoadReport> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open dataset '{}'", path.display()))?;

    let report = load_reader(std::io::BufReader::new(file), store)?;

    tracing::info!(
        path = %path.display(),
        loaded = report.loaded,
        skipped = report.skipped,
        "Dataset loaded"
    );

    anyhow::Ok(report)
}
