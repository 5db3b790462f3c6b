//! Data provider trait and structured error types.
//!
//! The PriceProvider trait abstracts over data sources (Yahoo Finance, the
//! synthetic random walk) so the poll cycle can swap implementations and tests
//! can script failures.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::PriceSeries;

/// Structured error types for data operations.
///
/// Every variant is fatal for the poll cycle that produced it. They are
/// displayable in both CLI and TUI contexts.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("invalid ticker symbol: '{0}'")]
    InvalidSymbol(String),

    #[error("no price data returned for {symbol}")]
    EmptyResult { symbol: String },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("HTTP {status} from provider for {symbol}")]
    Http { status: u16, symbol: String },

    #[error("data error: {0}")]
    Other(String),
}

/// Where the data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    YahooFinance,
    Synthetic,
}

/// One provider query: a symbol, how far back to reach and the bar spacing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub symbol: String,
    /// Provider range string, e.g. "1d".
    pub lookback: String,
    /// Provider interval string, e.g. "1m".
    pub interval: String,
}

/// Trait for market-data providers.
///
/// Implementations return the closing prices in chronological order. Rows the
/// source reports without a close are dropped, so the series may have gaps.
pub trait PriceProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    fn source(&self) -> DataSource;

    /// Fetch the latest closing-price series for `request.symbol`.
    fn fetch(&self, request: &FetchRequest) -> Result<PriceSeries, DataError>;
}

/// Trim and upper-case a ticker typed by the user.
///
/// Returns `None` for an empty symbol or one containing characters no
/// exchange ticker uses (index and FX tickers keep `^`, `.`, `-`, `=`).
pub fn normalize_symbol(raw: &str) -> Option<String> {
    let symbol = raw.trim().to_uppercase();
    if symbol.is_empty() {
        return None;
    }
    let valid = symbol
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '^' | '.' | '-' | '='));
    valid.then_some(symbol)
}
