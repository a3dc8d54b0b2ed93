use std::io::Write;

use stockdb_core::{QueryEngine, StockStore};

const DATASET: &str = "\
Date,Ticker,Open,High,Low,Close,Volume,Dividends
2024-01-01,AAPL,98,103,97,100,5000,0
2024-01-01,MSFT,79,81,78,80,3000,0.75
2024-01-02,AAPL,99,101,88,90,7000,0.24
2024-01-02,GOOG,140,142,139,141,2000,0
2024-01-02,MSFT,,82,79,81,3100,0
2024-01-03,TSLA,250,255,240,245,9000,0
bad-date,TSLA,1,1,1,1,1,1
";

fn write_dataset(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn loaded_store() -> StockStore {
    let file = write_dataset(DATASET);
    let mut store = StockStore::new();
    let report = stockdb_core::load_csv(file.path(), &mut store).unwrap();
    assert_eq!(report.loaded, 5);
    assert_eq!(report.skipped, 2);
    store
}

#[test]
fn every_loaded_record_is_reachable() {
    let store = loaded_store();
    for record in store.all() {
        assert!(store.ticker_exists(&record.ticker));
        assert!(store.data_exists(&record.ticker, &record.date));
        assert!(store.by_date(&record.date).contains(record));
    }
}

#[test]
fn queries_over_loaded_file() {
    let store = loaded_store();
    let engine = QueryEngine::new(&store);

    assert_eq!(engine.average_close("AAPL"), 95.0);
    assert_eq!(engine.highest_in_period("AAPL", "2024-01-01", "2024-01-02"), Some(103.0));
    assert_eq!(engine.closing_price("GOOG", "2024-01-01"), None);
    assert_eq!(engine.closing_price("GOOG", "2024-01-02"), Some(141.0));
    assert_eq!(engine.count_dates_above_threshold(140.0), 2);
    assert_eq!(
        engine.unique_tickers().into_iter().collect::<Vec<_>>(),
        vec!["AAPL", "GOOG", "MSFT", "TSLA"]
    );
    assert_eq!(engine.total_volume("MSFT"), 3000.0);

    let top = engine.top_by_volume("2024-01-02");
    assert_eq!(top.iter().map(|r| r.ticker.as_str()).collect::<Vec<_>>(), vec!["AAPL", "GOOG"]);

    let bottom = engine.bottom_by_closing_price();
    assert_eq!(
        bottom.iter().map(|r| r.close).collect::<Vec<_>>(),
        vec![80.0, 100.0, 141.0, 245.0]
    );

    let dividends = engine.top_by_dividends();
    assert_eq!(dividends.len(), 5);
    assert_eq!(dividends[0].dividends, 0.75);
    assert_eq!(dividends[1].dividends, 0.24);
}

#[test]
fn delete_then_query() {
    let mut store = loaded_store();
    assert_eq!(store.delete_ticker("AAPL"), 2);
    assert_eq!(store.delete_ticker("AAPL"), 0);

    let engine = QueryEngine::new(&store);
    assert!(!engine.ticker_exists("AAPL"));
    assert_eq!(engine.average_close("AAPL"), 0.0);
    assert!(engine.dates_and_closing_prices("AAPL").is_empty());
    assert_eq!(engine.data_by_date("2024-01-01").len(), 1);
    assert_eq!(engine.bottom_by_closing_price().len(), 3);
}

#[test]
fn header_only_file_loads_nothing() {
    let file = write_dataset("Date,Ticker,Open,High,Low,Close,Volume,Dividends\n");
    let mut store = StockStore::new();
    let report = stockdb_core::load_csv(file.path(), &mut store).unwrap();

    assert_eq!(report.loaded, 0);
    assert!(store.is_empty());
    assert!(QueryEngine::new(&store).top_by_dividends().is_empty());
}
