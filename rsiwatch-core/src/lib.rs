//! RSI Watch Core: indicator, signal classification, market data and the poll cycle.
//!
//! - Domain types (price samples and series)
//! - RSI indicator behind the `Indicator` trait
//! - BUY / SELL / NONE classification against two thresholds
//! - Market-data providers (Yahoo Finance, synthetic random walk)
//! - Configuration and the single poll cycle shared by the front-ends

pub mod config;
pub mod data;
pub mod domain;
pub mod evaluate;
pub mod indicators;
pub mod poll;
pub mod signal;

pub use config::{ConfigError, WatchConfig};
pub use data::{DataError, FetchRequest, PriceProvider, SyntheticProvider, YahooProvider};
pub use domain::{PriceSample, PriceSeries};
pub use evaluate::{evaluate, Evaluation, EvaluationError};
pub use poll::{run_cycle, CycleReport, PollError};
pub use signal::{Signal, Thresholds};
