//! Indicator trait and concrete indicator implementations.
//!
//! Indicators are pure functions: price history in, numeric series out. The
//! output has the same length as the input and marks warmup (and any window
//! poisoned by a non-finite price) with `f64::NAN`. Nothing is cached between
//! calls, so recomputing on an overlapping window gives identical values.

pub mod rsi;

pub use rsi::{rsi, Rsi, DEFAULT_PERIOD};

use crate::domain::PriceSample;

/// Trait for indicators.
///
/// # Look-ahead guard
/// No value at index t may depend on a sample after t. Every indicator must
/// give the same value at t for the full series and for the series truncated
/// after t.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "rsi_14").
    fn name(&self) -> &str;

    /// Number of samples before the first defined output.
    fn lookback(&self) -> usize;

    /// Compute the indicator over the whole series.
    ///
    /// Returns a `Vec<f64>` of the same length as `samples`; the first
    /// `lookback()` values are `f64::NAN`.
    fn compute(&self, samples: &[PriceSample]) -> Vec<f64>;
}

/// The last finite value of an indicator series.
///
/// This is the only way indicator output reaches the signal classifier, so
/// NaN never leaks past this point.
pub fn latest_defined(values: &[f64]) -> Option<f64> {
    values.iter().rev().copied().find(|v| v.is_finite())
}

/// Number of finite values in an indicator series.
pub fn defined_count(values: &[f64]) -> usize {
    values.iter().filter(|v| v.is_finite()).count()
}

/// Create one-minute samples from close prices for testing.
#[cfg(test)]
pub fn make_samples(closes: &[f64]) -> Vec<PriceSample> {
    use chrono::TimeZone;
    let base = chrono::Utc.with_ymd_and_hms(2024, 1, 2, 14, 30, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PriceSample::new(base + chrono::Duration::minutes(i as i64), close))
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_defined_skips_trailing_nan() {
        let values = [f64::NAN, 40.0, 55.0, f64::NAN];
        assert_eq!(latest_defined(&values), Some(55.0));
    }

    #[test]
    fn latest_defined_of_warmup_only_is_none() {
        assert_eq!(latest_defined(&[f64::NAN, f64::NAN]), None);
        assert_eq!(latest_defined(&[]), None);
    }

    #[test]
    fn defined_count_ignores_nan() {
        assert_eq!(defined_count(&[f64::NAN, 1.0, 2.0]), 2);
    }
}
