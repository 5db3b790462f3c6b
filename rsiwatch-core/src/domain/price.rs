//! Price samples: the unit the market-data providers hand to the indicator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One closing price at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceSample {
    pub timestamp: DateTime<Utc>,
    pub close: f64,
}

impl PriceSample {
    pub fn new(timestamp: DateTime<Utc>, close: f64) -> Self {
        Self { timestamp, close }
    }
}

/// Chronological closing prices for a single symbol, as fetched for one poll cycle.
///
/// Gaps between timestamps are allowed (halts, missing minutes). The series is
/// never mutated after construction; the next cycle fetches a fresh one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    symbol: String,
    samples: Vec<PriceSample>,
}

impl PriceSeries {
    /// Build a series, sorting samples by timestamp.
    pub fn new(symbol: impl Into<String>, mut samples: Vec<PriceSample>) -> Self {
        samples.sort_by_key(|s| s.timestamp);
        Self {
            symbol: symbol.into(),
            samples,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn samples(&self) -> &[PriceSample] {
        &self.samples
    }

    /// Closing prices in chronological order.
    pub fn closes(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.close).collect()
    }

    /// The most recent sample, if any.
    pub fn latest(&self) -> Option<&PriceSample> {
        self.samples.last()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(minute: u32, close: f64) -> PriceSample {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 14, minute, 0).unwrap();
        PriceSample::new(ts, close)
    }

    #[test]
    fn samples_are_sorted_on_construction() {
        let series = PriceSeries::new("AAPL", vec![at(32, 3.0), at(30, 1.0), at(31, 2.0)]);
        assert_eq!(series.closes(), vec![1.0, 2.0, 3.0]);
        assert_eq!(series.latest().unwrap().close, 3.0);
    }

    #[test]
    fn empty_series_has_no_latest() {
        let series = PriceSeries::new("AAPL", Vec::new());
        assert!(series.is_empty());
        assert!(series.latest().is_none());
        assert_eq!(series.symbol(), "AAPL");
    }

    #[test]
    fn gaps_are_kept() {
        let series = PriceSeries::new("MSFT", vec![at(0, 10.0), at(45, 11.0)]);
        assert_eq!(series.len(), 2);
    }
}
