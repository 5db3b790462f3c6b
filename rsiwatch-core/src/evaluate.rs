//! One evaluation: price series in, latest price / RSI / signal out.

use serde::Serialize;
use thiserror::Error;

use crate::domain::PriceSeries;
use crate::indicators::{latest_defined, rsi};
use crate::signal::{Signal, Thresholds};

#[derive(Debug, Error, PartialEq)]
pub enum EvaluationError {
    #[error("price series for {symbol} is empty")]
    EmptySeries { symbol: String },

    #[error("latest price for {symbol} is not a number")]
    NonFinitePrice { symbol: String },
}

/// The (price, RSI, signal) triple for one poll cycle.
///
/// `rsi` and `signal` are `None` while the series is shorter than
/// `required` samples; the display shows "unavailable" for that cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub price: f64,
    pub rsi: Option<f64>,
    pub signal: Option<Signal>,
    /// Samples in the fetched series.
    pub samples: usize,
    /// Samples needed for the first RSI value (period + 1).
    pub required: usize,
    /// RSI aligned with the fetched closes; NaN during warmup.
    #[serde(skip)]
    pub rsi_series: Vec<f64>,
}

impl Evaluation {
    pub fn is_available(&self) -> bool {
        self.rsi.is_some()
    }
}

/// Compute RSI over `series` and classify its latest defined value.
pub fn evaluate(
    series: &PriceSeries,
    period: usize,
    thresholds: &Thresholds,
) -> Result<Evaluation, EvaluationError> {
    let latest = series.latest().ok_or_else(|| EvaluationError::EmptySeries {
        symbol: series.symbol().to_string(),
    })?;
    if !latest.close.is_finite() {
        return Err(EvaluationError::NonFinitePrice {
            symbol: series.symbol().to_string(),
        });
    }

    let rsi_series = rsi(&series.closes(), period);
    let latest_rsi = latest_defined(&rsi_series);

    Ok(Evaluation {
        price: latest.close,
        rsi: latest_rsi,
        signal: latest_rsi.map(|v| thresholds.classify(v)),
        samples: series.len(),
        required: period + 1,
        rsi_series,
    })
}
