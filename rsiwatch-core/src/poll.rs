//! The poll cycle: fetch one symbol, evaluate it, report.
//!
//! This is the unit of work the TUI worker and the CLI watch loop repeat on a
//! fixed cadence. Every failure is returned to the caller; there is no retry.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::config::WatchConfig;
use crate::data::provider::{normalize_symbol, DataError, DataSource, PriceProvider};
use crate::evaluate::{evaluate, Evaluation, EvaluationError};

#[derive(Debug, Error)]
pub enum PollError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}

/// Outcome of one successful cycle.
#[derive(Debug, Clone, Serialize)]
pub struct CycleReport {
    pub symbol: String,
    pub fetched_at: DateTime<Utc>,
    pub source: DataSource,
    #[serde(flatten)]
    pub evaluation: Evaluation,
    /// Closing prices of this cycle's window, aligned with `evaluation.rsi_series`.
    #[serde(skip)]
    pub closes: Vec<f64>,
}

impl CycleReport {
    /// One console line: symbol, price, RSI and signal.
    pub fn summary_line(&self) -> String {
        let eval = &self.evaluation;
        match (eval.rsi, eval.signal) {
            (Some(rsi), Some(signal)) => format!(
                "{} Price: {:.2} | RSI: {:.2} | Signal: {}",
                self.symbol,
                eval.price,
                rsi,
                signal.label()
            ),
            _ => format!(
                "{} Price: {:.2} | RSI: unavailable ({}/{} samples)",
                self.symbol, eval.price, eval.samples, eval.required
            ),
        }
    }
}

/// Run one cycle for `symbol` against `provider` with `config`'s period,
/// thresholds, lookback and interval.
pub fn run_cycle(
    provider: &dyn PriceProvider,
    config: &WatchConfig,
    symbol: &str,
) -> Result<CycleReport, PollError> {
    let symbol =
        normalize_symbol(symbol).ok_or_else(|| DataError::InvalidSymbol(symbol.to_string()))?;

    let series = provider.fetch(&config.fetch_request(&symbol))?;
    let evaluation = evaluate(&series, config.period, &config.thresholds())?;

    match (evaluation.rsi, evaluation.signal) {
        (Some(rsi), Some(signal)) => tracing::info!(
            symbol = %symbol,
            price = evaluation.price,
            rsi,
            signal = %signal,
            "cycle"
        ),
        _ => tracing::info!(
            symbol = %symbol,
            price = evaluation.price,
            samples = evaluation.samples,
            required = evaluation.required,
            "cycle: rsi unavailable"
        ),
    }

    Ok(CycleReport {
        symbol,
        fetched_at: Utc::now(),
        source: provider.source(),
        closes: series.closes(),
        evaluation,
    })
}
