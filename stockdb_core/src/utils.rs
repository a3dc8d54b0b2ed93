// stockdb_core/src/utils.rs

//! Utility functions shared by ingestion and queries.
//! Includes date validation for the lexically-ordered `YYYY-MM-DD` keys.

use anyhow::Context;

/// Format every stored date must follow.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a trading date and checks it is in zero-padded `YYYY-MM-DD` form.
/// Range queries compare dates as plain strings, which is only correct for
/// fixed-width ISO dates, so `2024-1-5` is rejected even though chrono
/// would accept it.
///
/// # Arguments
/// * `string` - The date string to parse (e.g., "2024-01-05").
///
/// # Returns
/// * `anyhow::Result<chrono::NaiveDate>` - The parsed calendar date, or an error if the string is malformed.
pub fn parse_trading_date(string: &str) -> anyhow::Result<chrono::NaiveDate> {
    if string.len() != 10 {
        anyhow::bail!("Date '{}' is not in zero-padded YYYY-MM-DD form", string);
    }

    let date = chrono::NaiveDate::parse_from_str(string, DATE_FORMAT)
        .with_context(|| format!(
            "Invalid date '{}', expected format '{}'",
            string,
            DATE_FORMAT,
        ))?;

    anyhow::Ok(date)
}

/// Returns true when `date` lies in the inclusive range `[start, end]`.
/// Plain string comparison, valid for dates accepted by `parse_trading_date`.
pub fn date_in_range(date: &str, start: &str, end: &str) -> bool {
    date >= start && date <= end
}
