//! Synthetic provider: a seeded random walk for offline runs and demos.
//!
//! Each call to `fetch` advances one step, so a watch loop sees the window
//! slide forward like a live feed. Output is fully determined by the seed, the
//! symbol and the number of previous fetches.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Duration, DurationRound, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::provider::{normalize_symbol, DataError, DataSource, FetchRequest, PriceProvider};
use crate::domain::{PriceSample, PriceSeries};

/// Samples per fetch: one US session of one-minute bars.
const SESSION_SAMPLES: usize = 390;

pub struct SyntheticProvider {
    seed: u64,
    samples: usize,
    fetches: AtomicU64,
    anchor: DateTime<Utc>,
}

impl SyntheticProvider {
    pub fn new(seed: u64) -> Self {
        let now = Utc::now();
        Self {
            seed,
            samples: SESSION_SAMPLES,
            fetches: AtomicU64::new(0),
            anchor: now.duration_trunc(Duration::minutes(1)).unwrap_or(now),
        }
    }

    /// Override the number of samples per fetch.
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// Closing prices for `symbol` on fetch number `step`.
    ///
    /// The walk is generated from the start each time and `step` extra points
    /// are appended, then the trailing window is returned.
    pub fn closes_at(&self, symbol: &str, step: u64) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(self.seed ^ symbol_hash(symbol));
        let total = self.samples + step as usize;
        let mut price = rng.gen_range(20.0..400.0_f64);
        let mut closes = Vec::with_capacity(total);
        for _ in 0..total {
            let change_pct: f64 = rng.gen_range(-0.004..0.004);
            price = (price * (1.0 + change_pct)).max(0.01);
            closes.push((price * 100.0).round() / 100.0);
        }
        closes.split_off(total - self.samples)
    }
}

impl PriceProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn source(&self) -> DataSource {
        DataSource::Synthetic
    }

    fn fetch(&self, request: &FetchRequest) -> Result<PriceSeries, DataError> {
        let symbol = normalize_symbol(&request.symbol)
            .ok_or_else(|| DataError::InvalidSymbol(request.symbol.clone()))?;
        let step = self.fetches.fetch_add(1, Ordering::Relaxed);
        let spacing = interval_duration(&request.interval);

        let closes = self.closes_at(&symbol, step);
        let overflow = || DataError::Other(format!("synthetic clock overflow for {symbol}"));
        let end = offset(spacing, step)
            .and_then(|delta| self.anchor.checked_add_signed(delta))
            .ok_or_else(overflow)?;
        let n = closes.len();
        let samples = closes
            .into_iter()
            .enumerate()
            .map(|(i, close)| {
                offset(spacing, (n - 1 - i) as u64)
                    .and_then(|back| end.checked_sub_signed(back))
                    .map(|ts| PriceSample::new(ts, close))
                    .ok_or_else(overflow)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PriceSeries::new(symbol, samples))
    }
}

/// FNV-1a over the symbol bytes, so each ticker gets its own walk.
fn symbol_hash(symbol: &str) -> u64 {
    symbol.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, b| {
        (hash ^ b as u64).wrapping_mul(0x0100_0000_01b3)
    })
}

/// `spacing * steps`, or `None` if it does not fit a `Duration`.
fn offset(spacing: Duration, steps: u64) -> Option<Duration> {
    spacing.checked_mul(i32::try_from(steps).ok()?)
}

/// Parse a provider interval like "1m", "5m", "1h", "1d".
/// Unknown or out-of-range intervals fall back to one minute.
fn interval_duration(interval: &str) -> Duration {
    let one_minute = Duration::minutes(1);
    let interval = interval.trim();
    let Some(unit) = interval.chars().last() else {
        return one_minute;
    };
    let digits = &interval[..interval.len() - unit.len_utf8()];
    let n = digits.parse::<i64>().unwrap_or(1).max(1);
    let spacing = match unit {
        'm' => Duration::try_minutes(n),
        'h' => Duration::try_hours(n),
        'd' => Duration::try_days(n),
        _ => None,
    };
    spacing.unwrap_or(one_minute)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(symbol: &str) -> FetchRequest {
        FetchRequest {
            symbol: symbol.into(),
            lookback: "1d".into(),
            interval: "1m".into(),
        }
    }

    #[test]
    fn same_seed_same_walk() {
        let a = SyntheticProvider::new(7);
        let b = SyntheticProvider::new(7);
        assert_eq!(a.closes_at("AAPL", 0), b.closes_at("AAPL", 0));
    }

    #[test]
    fn symbols_get_different_walks() {
        let p = SyntheticProvider::new(7);
        assert_ne!(p.closes_at("AAPL", 0), p.closes_at("MSFT", 0));
    }

    #[test]
    fn window_slides_by_one_per_fetch() {
        let p = SyntheticProvider::new(1).with_samples(50);
        let first = p.closes_at("AAPL", 0);
        let second = p.closes_at("AAPL", 1);
        assert_eq!(&first[1..], &second[..49]);
    }

    #[test]
    fn fetch_returns_chronological_positive_prices() {
        let p = SyntheticProvider::new(3).with_samples(30);
        let series = p.fetch(&request(" aapl ")).unwrap();
        assert_eq!(series.symbol(), "AAPL");
        assert_eq!(series.len(), 30);
        assert!(series.closes().iter().all(|c| *c > 0.0));
        let ts: Vec<_> = series.samples().iter().map(|s| s.timestamp).collect();
        assert!(ts.windows(2).all(|w| w[1] - w[0] == Duration::minutes(1)));
    }

    #[test]
    fn fetch_rejects_blank_symbol() {
        let p = SyntheticProvider::new(3);
        assert!(matches!(
            p.fetch(&request("  ")),
            Err(DataError::InvalidSymbol(_))
        ));
    }

    #[test]
    fn interval_parsing() {
        assert_eq!(interval_duration("1m"), Duration::minutes(1));
        assert_eq!(interval_duration("5m"), Duration::minutes(5));
        assert_eq!(interval_duration("1h"), Duration::hours(1));
        assert_eq!(interval_duration("1d"), Duration::days(1));
        assert_eq!(interval_duration("bogus"), Duration::minutes(1));
    }

    #[test]
    fn oversized_interval_falls_back_instead_of_panicking() {
        assert_eq!(interval_duration("200000000000d"), Duration::minutes(1));
        assert_eq!(interval_duration("99999999999999999h"), Duration::minutes(1));
        assert_eq!(interval_duration("9223372036854775807m"), Duration::minutes(1));
    }

    #[test]
    fn huge_interval_fetch_is_an_error_not_a_panic() {
        let p = SyntheticProvider::new(3).with_samples(30);
        let mut req = request("AAPL");
        // Fits a Duration on its own but not 29 steps back from now.
        req.interval = "99999999d".into();
        assert!(matches!(p.fetch(&req), Err(DataError::Other(_))));
    }

    #[test]
    fn step_offset_does_not_truncate() {
        assert_eq!(offset(Duration::minutes(1), 3), Some(Duration::minutes(3)));
        assert_eq!(offset(Duration::minutes(1), u64::from(u32::MAX)), None);
    }
}
