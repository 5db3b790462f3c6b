//! Property tests for RSI invariants.
//!
//! Uses proptest to verify:
//! 1. Bounds: every defined value lies in [0, 100]
//! 2. Alignment: output length equals input length, warmup is undefined
//! 3. No look-ahead: the value at i is the same on the series truncated after i
//! 4. Idempotence: two calls on the same input give identical output

use proptest::prelude::*;
use rsiwatch_core::indicators::rsi;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_closes() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec((1.0..500.0_f64).prop_map(|p| (p * 100.0).round() / 100.0), 0..80)
}

fn arb_period() -> impl Strategy<Value = usize> {
    1usize..30
}

proptest! {
    #[test]
    fn rsi_is_bounded(closes in arb_closes(), period in arb_period()) {
        for v in rsi(&closes, period) {
            if !v.is_nan() {
                prop_assert!((0.0..=100.0).contains(&v), "out of bounds: {v}");
            }
        }
    }

    #[test]
    fn rsi_is_aligned(closes in arb_closes(), period in arb_period()) {
        let result = rsi(&closes, period);
        prop_assert_eq!(result.len(), closes.len());
        for (i, v) in result.iter().enumerate() {
            prop_assert_eq!(v.is_nan(), i < period, "index {}", i);
        }
    }

    #[test]
    fn rsi_has_no_lookahead(closes in arb_closes(), period in arb_period(), cut in 0usize..80) {
        let full = rsi(&closes, period);
        let cut = cut.min(closes.len());
        let truncated = rsi(&closes[..cut], period);
        for i in 0..cut {
            prop_assert!(
                full[i] == truncated[i] || (full[i].is_nan() && truncated[i].is_nan()),
                "index {}: full={} truncated={}", i, full[i], truncated[i]
            );
        }
    }

    #[test]
    fn rsi_is_idempotent(closes in arb_closes(), period in arb_period()) {
        let a = rsi(&closes, period);
        let b = rsi(&closes, period);
        prop_assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            prop_assert!(x == y || (x.is_nan() && y.is_nan()));
        }
    }
}
