//! Yahoo Finance data provider.
//!
//! Fetches intraday closes from Yahoo's v8 chart API (`range` + `interval`).
//! There is no retry: any failure is returned to the poll cycle, which halts.
//!
//! Yahoo Finance has no official API and is subject to unannounced format changes.

use std::time::Duration;

use chrono::DateTime;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::StatusCode;
use serde::Deserialize;

use super::provider::{DataError, DataSource, FetchRequest, PriceProvider};
use crate::domain::{PriceSample, PriceSeries};

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    close: Vec<Option<f64>>,
}

const BASE_URL: &str = "https://query2.finance.yahoo.com";

/// Yahoo Finance data provider.
pub struct YahooProvider {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl YahooProvider {
    pub fn new() -> Result<Self, DataError> {
        Self::with_base_url(BASE_URL)
    }

    /// Point the provider at another host (mirrors, local fixtures).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .map_err(|e| DataError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Build the chart API URL for a symbol, range and interval.
    fn chart_url(&self, request: &FetchRequest) -> String {
        format!(
            "{}/v8/finance/chart/{}?range={}&interval={}&includePrePost=false",
            self.base_url, request.symbol, request.lookback, request.interval
        )
    }

    /// Parse the chart API response into a price series.
    fn parse_response(symbol: &str, resp: ChartResponse) -> Result<PriceSeries, DataError> {
        let result = resp.chart.result.ok_or_else(|| {
            if let Some(err) = resp.chart.error {
                if err.code == "Not Found" {
                    DataError::SymbolNotFound {
                        symbol: symbol.to_string(),
                    }
                } else {
                    DataError::ResponseFormatChanged(format!("{}: {}", err.code, err.description))
                }
            } else {
                DataError::ResponseFormatChanged("empty result with no error".into())
            }
        })?;

        let data = result
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("result array is empty".into()))?;

        // A valid symbol outside trading hours comes back without timestamps.
        let Some(timestamps) = data.timestamp else {
            return Err(DataError::EmptyResult {
                symbol: symbol.to_string(),
            });
        };

        let quote = data
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("no quote data".into()))?;

        let mut samples = Vec::with_capacity(timestamps.len());
        for (i, &ts) in timestamps.iter().enumerate() {
            // Minutes without a print come back as null; they become gaps.
            let Some(close) = quote.close.get(i).copied().flatten() else {
                continue;
            };
            if !close.is_finite() {
                continue;
            }
            let timestamp = DateTime::from_timestamp(ts, 0).ok_or_else(|| {
                DataError::ResponseFormatChanged(format!("invalid timestamp: {ts}"))
            })?;
            samples.push(PriceSample::new(timestamp, close));
        }

        if samples.is_empty() {
            return Err(DataError::EmptyResult {
                symbol: symbol.to_string(),
            });
        }

        Ok(PriceSeries::new(symbol, samples))
    }

    fn parse_body(symbol: &str, body: &str) -> Result<PriceSeries, DataError> {
        let chart: ChartResponse = serde_json::from_str(body).map_err(|e| {
            DataError::ResponseFormatChanged(format!("failed to parse response for {symbol}: {e}"))
        })?;
        Self::parse_response(symbol, chart)
    }
}

impl PriceProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn source(&self) -> DataSource {
        DataSource::YahooFinance
    }

    fn fetch(&self, request: &FetchRequest) -> Result<PriceSeries, DataError> {
        let symbol = request.symbol.as_str();
        let url = self.chart_url(request);
        tracing::debug!(%url, "fetching chart");

        let resp = self.client.get(&url).send().map_err(|e| {
            if e.is_timeout() {
                DataError::Timeout(e.to_string())
            } else {
                DataError::NetworkUnreachable(e.to_string())
            }
        })?;

        if let Some(err) = status_error(resp.status(), resp.headers(), symbol) {
            return Err(err);
        }

        let body = resp
            .text()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;
        Self::parse_body(symbol, &body)
    }
}

/// Map a non-success HTTP status to a `DataError`. `None` for 2xx.
fn status_error(status: StatusCode, headers: &HeaderMap, symbol: &str) -> Option<DataError> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = headers
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(60);
        return Some(DataError::RateLimited {
            retry_after_secs: retry_after,
        });
    }

    if status == StatusCode::NOT_FOUND {
        return Some(DataError::SymbolNotFound {
            symbol: symbol.to_string(),
        });
    }

    if !status.is_success() {
        return Some(DataError::Http {
            status: status.as_u16(),
            symbol: symbol.to_string(),
        });
    }

    None
}
