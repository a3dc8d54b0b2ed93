// stockdb/src/menu.rs

//! Interactive query menu.
//! Reads choices line by line, runs the query and prints its elapsed time and result.

use std::io::{BufRead, Write};

use stockdb_core::{QueryEngine, SelectionLimits, StockRecord, StockStore};

const MENU: &str = "
=== Stock Database Queries ===
1. Get all stock data for a specific date
2. Calculate the average closing price for a specific ticker
3. Find the highest price for a specific ticker in a given time period
4. Identify all unique tickers in the dataset
5. Check if a specific ticker exists in the dataset
6. Count the number of dates where at least one stock had a closing price above a threshold
7. Get the closing price of a specific ticker on a specific date
8. Get all dates and corresponding closing prices for a specific ticker
9. Calculate the total trading volume for a specific ticker
10. Check if data exists for a specific date and ticker
11. Get opening and closing prices for a specific ticker and date
12. Find the dividend amount for a specific ticker on a specific date
13. Find the stocks with the highest trading volume on a specific date
14. Get the stocks with the lowest closing prices in the entire dataset
15. Get the stocks with the highest dividends paid
16. Add a stock record
17. Delete all records of a ticker
0. Exit
Enter your choice: ";

const NUMERIC_FIELDS: [&str; 6] = ["open", "high", "low", "close", "volume", "dividends"];

struct Session<'io, R, W> {
    input: &'io mut R,
    output: &'io mut W,
}

impl<R: BufRead, W: Write> Session<'_, R, W> {
    /// Prints `label` and reads one trimmed line. `None` on end of input.
    fn ask(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return anyhow::Ok(None);
        }
        anyhow::Ok(Some(line.trim().to_string()))
    }

    fn ask_number(&mut self, label: &str) -> anyhow::Result<Option<Option<f64>>> {
        let Some(raw) = self.ask(label)? else {
            return anyhow::Ok(None);
        };
        let value = raw.parse::<f64>().ok().filter(|value| value.is_finite());
        if value.is_none() {
            writeln!(self.output, "Invalid number '{}'.", raw)?;
        }
        anyhow::Ok(Some(value))
    }

    fn elapsed(&mut self, start: std::time::Instant) -> anyhow::Result<()> {
        writeln!(
            self.output,
            "Query executed in {:.3} ms",
            start.elapsed().as_secs_f64() * 1000.0,
        )?;
        anyhow::Ok(())
    }
}

/// Pulls the next answer or leaves the menu when input is exhausted.
macro_rules! ask {
    ($session:expr, $label:expr) => {
        match $session.ask($label)? {
            Some(value) => value,
            None => return anyhow::Ok(false),
        }
    };
}

/// Runs the menu until `0` or end of input.
/// # Arguments
/// * `store` - Loaded dataset; options 16 and 17 mutate it.
/// * `limits` - Sizes of the ranked queries.
/// * `input` - Source of user answers.
/// * `output` - Destination for prompts and results.
pub fn run<R: BufRead, W: Write>(
    store: &mut StockStore,
    limits: SelectionLimits,
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<()> {
    let mut session = Session { input, output };

    loop {
        let Some(choice) = session.ask(MENU)? else {
            break;
        };
        if !handle_choice(&choice, store, limits, &mut session)? {
            break;
        }
    }

    anyhow::Ok(())
}

/// Returns `false` when the menu should stop.
fn handle_choice<R: BufRead, W: Write>(
    choice: &str,
    store: &mut StockStore,
    limits: SelectionLimits,
    session: &mut Session<'_, R, W>,
) -> anyhow::Result<bool> {
    let engine = QueryEngine::with_limits(&*store, limits);

    match choice {
        "1" => {
            let date = ask!(session, "Enter date (YYYY-MM-DD): ");
            let start = std::time::Instant::now();
            let records = engine.data_by_date(&date);
            session.elapsed(start)?;
            for record in records {
                writeln!(
                    session.output,
                    "Ticker: {}, Open: {}, High: {}, Low: {}, Close: {}, Volume: {}, Dividends: {}",
                    record.ticker, record.open, record.high, record.low, record.close, record.volume, record.dividends,
                )?;
            }
        }
        "2" => {
            let ticker = ask!(session, "Enter ticker: ");
            let start = std::time::Instant::now();
            let value = engine.average_close(&ticker);
            session.elapsed(start)?;
            writeln!(session.output, "Average closing price for {}: {}", ticker, value)?;
        }
        "3" => {
            let ticker = ask!(session, "Enter ticker: ");
            let start_date = ask!(session, "Enter start date (YYYY-MM-DD): ");
            let end_date = ask!(session, "Enter end date (YYYY-MM-DD): ");
            let start = std::time::Instant::now();
            let value = engine.highest_in_period(&ticker, &start_date, &end_date);
            session.elapsed(start)?;
            match value {
                Some(high) => writeln!(
                    session.output,
                    "Highest price for {} between {} and {}: {}",
                    ticker, start_date, end_date, high,
                )?,
                None => writeln!(session.output, "Data not found.")?,
            }
        }
        "4" => {
            let start = std::time::Instant::now();
            let tickers = engine.unique_tickers();
            session.elapsed(start)?;
            writeln!(session.output, "Unique tickers:")?;
            for ticker in tickers {
                writeln!(session.output, "{}", ticker)?;
            }
        }
        "5" => {
            let ticker = ask!(session, "Enter ticker: ");
            let start = std::time::Instant::now();
            let exists = engine.ticker_exists(&ticker);
            session.elapsed(start)?;
            if exists {
                writeln!(session.output, "Ticker {} exists.", ticker)?;
            } else {
                writeln!(session.output, "Ticker {} does not exist.", ticker)?;
            }
        }
        "6" => {
            let Some(threshold) = session.ask_number("Enter threshold: ")? else {
                return anyhow::Ok(false);
            };
            if let Some(threshold) = threshold {
                let start = std::time::Instant::now();
                let count = engine.count_dates_above_threshold(threshold);
                session.elapsed(start)?;
                writeln!(
                    session.output,
                    "Number of dates with at least one stock closing above {}: {}",
                    threshold, count,
                )?;
            }
        }
        "7" => {
            let ticker = ask!(session, "Enter ticker: ");
            let date = ask!(session, "Enter date (YYYY-MM-DD): ");
            let start = std::time::Instant::now();
            let value = engine.closing_price(&ticker, &date);
            session.elapsed(start)?;
            match value {
                Some(close) => writeln!(session.output, "Closing price for {} on {}: {}", ticker, date, close)?,
                None => writeln!(session.output, "Data not found.")?,
            }
        }
        "8" => {
            let ticker = ask!(session, "Enter ticker: ");
            let start = std::time::Instant::now();
            let pairs = engine.dates_and_closing_prices(&ticker);
            session.elapsed(start)?;
            for (date, close) in pairs {
                writeln!(session.output, "Date: {}, Close: {}", date, close)?;
            }
        }
        "9" => {
            let ticker = ask!(session, "Enter ticker: ");
            let start = std::time::Instant::now();
            let value = engine.total_volume(&ticker);
            session.elapsed(start)?;
            writeln!(session.output, "Total trading volume for {}: {}", ticker, value)?;
        }
        "10" => {
            let ticker = ask!(session, "Enter ticker: ");
            let date = ask!(session, "Enter date (YYYY-MM-DD): ");
            let start = std::time::Instant::now();
            let exists = engine.data_exists(&ticker, &date);
            session.elapsed(start)?;
            if exists {
                writeln!(session.output, "Data exists for {} on {}.", ticker, date)?;
            } else {
                writeln!(session.output, "Data does not exist.")?;
            }
        }
        "11" => {
            let ticker = ask!(session, "Enter ticker: ");
            let date = ask!(session, "Enter date (YYYY-MM-DD): ");
            let start = std::time::Instant::now();
            let value = engine.open_and_close(&ticker, &date);
            session.elapsed(start)?;
            match value {
                Some((open, close)) => writeln!(session.output, "Open: {}, Close: {}", open, close)?,
                None => writeln!(session.output, "Data not found.")?,
            }
        }
        "12" => {
            let ticker = ask!(session, "Enter ticker: ");
            let date = ask!(session, "Enter date (YYYY-MM-DD): ");
            let start = std::time::Instant::now();
            let value = engine.dividend(&ticker, &date);
            session.elapsed(start)?;
            match value {
                Some(dividend) => writeln!(session.output, "Dividend for {} on {}: {}", ticker, date, dividend)?,
                None => writeln!(session.output, "Data not found.")?,
            }
        }
        "13" => {
            let date = ask!(session, "Enter date (YYYY-MM-DD): ");
            let start = std::time::Instant::now();
            let records = engine.top_by_volume(&date);
            session.elapsed(start)?;
            for record in records {
                writeln!(session.output, "Ticker: {}, Volume: {}", record.ticker, record.volume)?;
            }
        }
        "14" => {
            let start = std::time::Instant::now();
            let records = engine.bottom_by_closing_price();
            session.elapsed(start)?;
            for record in records {
                writeln!(session.output, "Ticker: {}, Close: {}", record.ticker, record.close)?;
            }
        }
        "15" => {
            let start = std::time::Instant::now();
            let records = engine.top_by_dividends();
            session.elapsed(start)?;
            for record in records {
                writeln!(session.output, "Ticker: {}, Dividends: {}", record.ticker, record.dividends)?;
            }
        }
        "16" => {
            let date = ask!(session, "Enter date (YYYY-MM-DD): ");
            let ticker = ask!(session, "Enter ticker: ");
            let mut values = [0.0_f64; NUMERIC_FIELDS.len()];
            for (i, field) in NUMERIC_FIELDS.iter().enumerate() {
                let Some(value) = session.ask_number(&format!("Enter {}: ", field))? else {
                    return anyhow::Ok(false);
                };
                match value {
                    Some(value) => values[i] = value,
                    None => return anyhow::Ok(true),
                }
            }
            let [open, high, low, close, volume, dividends] = values;
            match StockRecord::new(&date, &ticker, open, high, low, close, volume, dividends) {
                Ok(record) => {
                    store.insert(record);
                    writeln!(session.output, "Added stock data for {} on {}", ticker, date)?;
                }
                Err(e) => writeln!(session.output, "Record rejected: {}", e)?,
            }
        }
        "17" => {
            let ticker = ask!(session, "Enter ticker: ");
            let removed = store.delete_ticker(&ticker);
            if removed == 0 {
                writeln!(session.output, "Ticker {} not found.", ticker)?;
            } else {
                writeln!(session.output, "Deleted all records for ticker: {}", ticker)?;
            }
        }
        "0" => {
            writeln!(session.output, "Exiting...")?;
            return anyhow::Ok(false);
        }
        _ => {
            writeln!(session.output, "Invalid choice. Please try again.")?;
        }
    }

    anyhow::Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> StockStore {
        let mut store = StockStore::new();
        store.insert(StockRecord::new("2024-01-01", "AAPL", 98.0, 103.0, 97.0, 100.0, 5000.0, 0.0).unwrap());
        store.insert(StockRecord::new("2024-01-02", "AAPL", 99.0, 101.0, 88.0, 90.0, 7000.0, 0.24).unwrap());
        store.insert(StockRecord::new("2024-01-01", "MSFT", 79.0, 81.0, 78.0, 80.0, 3000.0, 0.75).unwrap());
        store
    }

    fn run_script(store: &mut StockStore, script: &str) -> String {
        let mut input = script.as_bytes();
        let mut output = Vec::new();
        run(store, SelectionLimits::default(), &mut input, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_lookup_queries() {
        let mut store = sample_store();
        let output = run_script(&mut store, "2\nAAPL\n7\nGOOG\n2024-01-01\n11\nMSFT\n2024-01-01\n0\n");

        assert!(output.contains("Average closing price for AAPL: 95"));
        assert!(output.contains("Data not found."));
        assert!(output.contains("Open: 79, Close: 80"));
        assert!(output.contains("Query executed in"));
        assert!(output.ends_with("Exiting...\n"));
    }

    #[test]
    fn test_ranked_queries() {
        let mut store = sample_store();
        let output = run_script(&mut store, "14\n15\n");

        let bottom = output.find("Ticker: MSFT, Close: 80").unwrap();
        let next = output.find("Ticker: AAPL, Close: 100").unwrap();
        assert!(bottom < next);
        assert!(output.contains("Ticker: MSFT, Dividends: 0.75"));
    }

    #[test]
    fn test_add_and_delete() {
        let mut store = sample_store();
        let output = run_script(
            &mut store,
            "16\n2024-01-03\nGOOG\n140\n142\n139\n141\n2000\n0\n17\nAAPL\n17\nAAPL\n0\n",
        );

        assert!(output.contains("Added stock data for GOOG on 2024-01-03"));
        assert!(output.contains("Deleted all records for ticker: AAPL"));
        assert!(output.contains("Ticker AAPL not found."));
        assert!(store.data_exists("GOOG", "2024-01-03"));
        assert!(!store.ticker_exists("AAPL"));
    }

    #[test]
    fn test_invalid_input_is_reported() {
        let mut store = sample_store();
        let output = run_script(&mut store, "42\n6\nabc\n16\n2024-13-01\nX\n1\n1\n1\n1\n1\n0\n");

        assert!(output.contains("Invalid choice. Please try again."));
        assert!(output.contains("Invalid number 'abc'."));
        assert!(output.contains("Record rejected:"));
        assert!(!store.ticker_exists("X"));
    }
}
