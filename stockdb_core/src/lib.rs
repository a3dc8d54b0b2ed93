// stockdb_core/src/lib.rs

pub mod query;
pub mod store;
pub mod utils;
pub mod loader;
pub mod record;
pub mod settings;
pub mod selection;

pub use loader::{load_csv, LoadReport};
pub use query::{QueryEngine, SelectionLimits};
pub use record::StockRecord;
pub use settings::Settings;
pub use store::StockStore;
