//! Market-data providers.

pub mod provider;
pub mod synthetic;
pub mod yahoo;

pub use provider::{normalize_symbol, DataError, DataSource, FetchRequest, PriceProvider};
pub use synthetic::SyntheticProvider;
pub use yahoo::YahooProvider;
