//! Signal classifier: thresholds the latest RSI value into BUY / SELL / NONE.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default oversold threshold (strictly below → BUY).
pub const DEFAULT_OVERSOLD: f64 = 30.0;
/// Default overbought threshold (strictly above → SELL).
pub const DEFAULT_OVERBOUGHT: f64 = 70.0;

/// Discrete trading recommendation derived from one RSI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Signal {
    Buy,
    Sell,
    None,
}

impl Signal {
    /// Short code for logs and machine output.
    pub fn code(self) -> &'static str {
        match self {
            Signal::Buy => "BUY",
            Signal::Sell => "SELL",
            Signal::None => "NONE",
        }
    }

    /// Label shown to the user.
    pub fn label(self) -> &'static str {
        match self {
            Signal::Buy => "BUY SIGNAL",
            Signal::Sell => "SELL SIGNAL",
            Signal::None => "No signal",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The two RSI thresholds. Boundary values classify as `Signal::None`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub oversold: f64,
    pub overbought: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            oversold: DEFAULT_OVERSOLD,
            overbought: DEFAULT_OVERBOUGHT,
        }
    }
}

impl Thresholds {
    pub fn new(oversold: f64, overbought: f64) -> Self {
        Self {
            oversold,
            overbought,
        }
    }

    /// Classify one RSI value. Non-finite input is `Signal::None`.
    pub fn classify(&self, rsi: f64) -> Signal {
        if !rsi.is_finite() {
            Signal::None
        } else if rsi < self.oversold {
            Signal::Buy
        } else if rsi > self.overbought {
            Signal::Sell
        } else {
            Signal::None
        }
    }
}

/// Classify with the default 30/70 thresholds.
pub fn classify(rsi: f64) -> Signal {
    Thresholds::default().classify(rsi)
}
