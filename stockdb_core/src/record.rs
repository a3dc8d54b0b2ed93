// stockdb_core/src/record.rs

//! A single daily observation for one ticker.

use crate::utils;

/// One (ticker, date) row of the dataset. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct StockRecord {
    pub date: String,   // "2024-01-05"
    pub ticker: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub dividends: f64,
}

impl StockRecord {
    /// Builds a validated record.
    /// # Arguments
    /// * `date` - Trading date in `YYYY-MM-DD` form.
    /// * `ticker` - Non-empty instrument identifier.
    /// * `open`, `high`, `low`, `close`, `volume`, `dividends` - Finite numeric fields.
    /// # Returns
    /// * `anyhow::Result<StockRecord>` containing the record, or the first validation failure.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        date: &str,
        ticker: &str,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        dividends: f64,
    ) -> anyhow::Result<Self> {
        let record = Self {
            date: date.to_string(),
            ticker: ticker.to_string(),
            open,
            high,
            low,
            close,
            volume,
            dividends,
        };
        record.validate()?;

        anyhow::Ok(record)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        // Validate ticker
        {
            if self.ticker.trim().is_empty() {
                anyhow::bail!("Validation error for record on '{}': empty ticker", self.date);
            }
        }

        // Validate date
        {
            utils::parse_trading_date(&self.date)?;
        }

        // Validate numeric fields
        {
            let fields = [
                ("Open", self.open),
                ("High", self.high),
                ("Low", self.low),
                ("Close", self.close),
                ("Volume", self.volume),
                ("Dividends", self.dividends),
            ];
            for (name, value) in fields {
                if !value.is_finite() {
                    anyhow::bail!(
                        "Validation error for '{}' on '{}': '{}' must be finite, got {}",
                        self.ticker,
                        self.date,
                        name,
                        value,
                    );
                }
            }
        }

        anyhow::Ok(())
    }
}
