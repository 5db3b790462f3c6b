//! Relative Strength Index (RSI).
//!
//! Simple moving average of gains and of losses over the trailing `period`
//! price changes, RSI = 100 - 100 / (1 + avg_gain / avg_loss).
//! Lookback: period (the first value needs period + 1 prices).
//! Edge cases: avg_loss == 0 → 100; avg_gain == 0 → 0; both zero → 50.

use super::Indicator;
use crate::domain::PriceSample;

/// Default RSI period.
pub const DEFAULT_PERIOD: usize = 14;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            name: format!("rsi_{period}"),
        }
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Default for Rsi {
    fn default() -> Self {
        Self::new(DEFAULT_PERIOD)
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, samples: &[PriceSample]) -> Vec<f64> {
        let closes: Vec<f64> = samples.iter().map(|s| s.close).collect();
        rsi(&closes, self.period)
    }
}

/// RSI over raw closing prices.
///
/// Output is aligned 1:1 with `closes`. Entries before index `period` are NaN,
/// as is every entry whose window contains a non-finite change. A `period` of
/// zero yields an all-NaN series.
pub fn rsi(closes: &[f64], period: usize) -> Vec<f64> {
    let n = closes.len();
    let mut result = vec![f64::NAN; n];

    if period == 0 || n < period + 1 {
        return result;
    }

    // changes[i] = closes[i] - closes[i - 1]; changes[0] is unused
    let mut changes = vec![f64::NAN; n];
    for i in 1..n {
        changes[i] = closes[i] - closes[i - 1];
    }

    // Each window is summed from scratch so the value at i depends only on
    // the changes i+1-period ..= i.
    for i in period..n {
        let window = &changes[(i + 1 - period)..=i];
        if window.iter().any(|ch| !ch.is_finite()) {
            continue;
        }

        let (gain_sum, loss_sum) = window.iter().fold((0.0, 0.0), |(gain, loss), &ch| {
            if ch > 0.0 {
                (gain + ch, loss)
            } else {
                (gain, loss - ch)
            }
        });

        result[i] = compute_rsi(gain_sum / period as f64, loss_sum / period as f64);
    }

    result
}

fn compute_rsi(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0 // no movement
    } else if avg_loss == 0.0 {
        100.0
    } else if avg_gain == 0.0 {
        0.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_samples, DEFAULT_EPSILON};

    #[test]
    fn rsi_all_gains() {
        let samples = make_samples(&[100.0, 101.0, 102.0, 103.0, 104.0, 105.0]);
        let result = Rsi::new(3).compute(&samples);
        // All positive changes → RSI = 100
        assert_approx(result[3], 100.0, DEFAULT_EPSILON);
        assert_approx(result[5], 100.0, DEFAULT_EPSILON);
    }

    #[test]
    fn rsi_all_losses() {
        let samples = make_samples(&[105.0, 104.0, 103.0, 102.0, 101.0, 100.0]);
        let result = Rsi::new(3).compute(&samples);
        // All negative changes → RSI = 0
        assert_approx(result[3], 0.0, DEFAULT_EPSILON);
        assert_approx(result[5], 0.0, DEFAULT_EPSILON);
    }

    #[test]
    fn rsi_flat_is_fifty() {
        let result = rsi(&[42.0; 10], 3);
        for v in &result[3..] {
            assert_approx(*v, 50.0, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn rsi_mixed() {
        // Closes: 44, 44.34, 44.09, 43.61, 44.33
        // Changes: +0.34, -0.25, -0.48, +0.72
        // period=3
        // RSI[3]: gains 0.34, losses 0.73 → 100 - 100/(1 + 0.34/0.73) = 31.7757...
        // RSI[4]: window -0.25, -0.48, +0.72 → gains 0.72, losses 0.73
        //         → 100 - 100/(1 + 0.72/0.73) = 49.6551...
        let result = rsi(&[44.0, 44.34, 44.09, 43.61, 44.33], 3);

        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert!(result[2].is_nan());
        assert_approx(result[3], 100.0 - 100.0 / (1.0 + 0.34 / 0.73), 1e-9);
        assert_approx(result[4], 100.0 - 100.0 / (1.0 + 0.72 / 0.73), 1e-9);
    }

    #[test]
    fn rsi_window_drops_old_changes() {
        // A large early drop leaves the window once period changes have passed.
        let result = rsi(&[100.0, 90.0, 91.0, 92.0, 93.0], 3);
        assert!(result[3] < 100.0);
        assert_approx(result[4], 100.0, DEFAULT_EPSILON);
    }

    #[test]
    fn rsi_too_few_samples() {
        let result = rsi(&[1.0, 2.0, 3.0], 3);
        assert_eq!(result.len(), 3);
        assert!(result.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn rsi_nan_only_poisons_its_windows() {
        let mut closes = vec![10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0, 17.0];
        closes[2] = f64::NAN;
        let result = rsi(&closes, 2);
        // changes 2 and 3 are NaN; windows ending at 2, 3, 4 contain them
        assert!(result[2].is_nan());
        assert!(result[3].is_nan());
        assert!(result[4].is_nan());
        assert_approx(result[5], 100.0, DEFAULT_EPSILON);
    }

    #[test]
    fn rsi_zero_period_is_all_nan() {
        assert!(rsi(&[1.0, 2.0, 3.0], 0).iter().all(|v| v.is_nan()));
    }

    #[test]
    #[should_panic(expected = "RSI period must be >= 1")]
    fn rsi_new_rejects_zero_period() {
        let _ = Rsi::new(0);
    }

    #[test]
    fn rsi_lookback_and_name() {
        let rsi = Rsi::default();
        assert_eq!(rsi.lookback(), 14);
        assert_eq!(rsi.name(), "rsi_14");
    }
}
