//! Watch configuration: symbol, RSI period, thresholds and poll cadence.
//!
//! Loaded from TOML. Every field has a default, so an empty file (or no file
//! at all) gives the stock setup: AAPL, RSI(14), 30/70, one-minute bars
//! polled every 60 seconds.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::provider::{normalize_symbol, FetchRequest};
use crate::indicators::rsi::DEFAULT_PERIOD;
use crate::signal::{Thresholds, DEFAULT_OVERBOUGHT, DEFAULT_OVERSOLD};

/// Default ticker symbol.
pub const DEFAULT_SYMBOL: &str = "AAPL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Ticker symbol watched at startup.
    pub symbol: String,
    /// RSI period.
    pub period: usize,
    /// RSI strictly below this is a BUY.
    pub oversold: f64,
    /// RSI strictly above this is a SELL.
    pub overbought: f64,
    /// Seconds between the starts of two poll cycles.
    pub poll_interval_secs: u64,
    /// How far back each fetch reaches (provider range, e.g. "1d").
    pub lookback: String,
    /// Sampling interval of each fetch (provider interval, e.g. "1m").
    pub interval: String,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            symbol: DEFAULT_SYMBOL.to_string(),
            period: DEFAULT_PERIOD,
            oversold: DEFAULT_OVERSOLD,
            overbought: DEFAULT_OVERBOUGHT,
            poll_interval_secs: 60,
            lookback: "1d".to_string(),
            interval: "1m".to_string(),
        }
    }
}

impl WatchConfig {
    /// Load and validate a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Serialize to TOML (`rsiwatch config` prints this).
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if normalize_symbol(&self.symbol).is_none() {
            return Err(ConfigError::Invalid("symbol must not be empty".into()));
        }
        if self.period == 0 {
            return Err(ConfigError::Invalid("period must be >= 1".into()));
        }
        if !(self.oversold.is_finite() && self.overbought.is_finite()) {
            return Err(ConfigError::Invalid("thresholds must be finite".into()));
        }
        if !(0.0..=100.0).contains(&self.oversold) || !(0.0..=100.0).contains(&self.overbought) {
            return Err(ConfigError::Invalid(
                "thresholds must lie within 0..=100".into(),
            ));
        }
        if self.oversold >= self.overbought {
            return Err(ConfigError::Invalid(format!(
                "oversold ({}) must be below overbought ({})",
                self.oversold, self.overbought
            )));
        }
        if self.poll_interval_secs == 0 {
            return Err(ConfigError::Invalid("poll_interval_secs must be > 0".into()));
        }
        if self.lookback.trim().is_empty() || self.interval.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "lookback and interval must not be empty".into(),
            ));
        }
        Ok(())
    }

    pub fn thresholds(&self) -> Thresholds {
        Thresholds::new(self.oversold, self.overbought)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// The provider request for one cycle on `symbol`.
    pub fn fetch_request(&self, symbol: &str) -> FetchRequest {
        FetchRequest {
            symbol: symbol.to_string(),
            lookback: self.lookback.clone(),
            interval: self.interval.clone(),
        }
    }

    /// Default config location: `<config dir>/rsiwatch/config.toml`.
    pub fn default_path(config_dir: &Path) -> PathBuf {
        config_dir.join("rsiwatch").join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_default() {
        let config = WatchConfig::from_toml("").unwrap();
        assert_eq!(config, WatchConfig::default());
        assert_eq!(config.symbol, "AAPL");
        assert_eq!(config.period, 14);
        assert_eq!(config.poll_interval(), Duration::from_secs(60));
    }

    #[test]
    fn partial_toml_overrides() {
        let config = WatchConfig::from_toml(
            r#"
symbol = "MSFT"
period = 9
oversold = 25.0
"#,
        )
        .unwrap();
        assert_eq!(config.symbol, "MSFT");
        assert_eq!(config.period, 9);
        assert_eq!(config.thresholds(), Thresholds::new(25.0, 70.0));
        assert_eq!(config.interval, "1m");
    }

    #[test]
    fn rejects_zero_period() {
        let err = WatchConfig::from_toml("period = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_inverted_thresholds() {
        let err = WatchConfig::from_toml("oversold = 80.0\noverbought = 20.0").unwrap_err();
        assert!(err.to_string().contains("must be below"));
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        assert!(WatchConfig::from_toml("overbought = 120.0").is_err());
    }

    #[test]
    fn rejects_blank_symbol() {
        assert!(WatchConfig::from_toml("symbol = \"   \"").is_err());
    }

    #[test]
    fn rejects_zero_interval() {
        assert!(WatchConfig::from_toml("poll_interval_secs = 0").is_err());
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = WatchConfig::from_toml("period = \"fourteen\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn toml_roundtrip() {
        let config = WatchConfig {
            symbol: "TSLA".into(),
            period: 21,
            ..WatchConfig::default()
        };
        let parsed = WatchConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn fetch_request_uses_lookback_and_interval() {
        let req = WatchConfig::default().fetch_request("NVDA");
        assert_eq!(req.symbol, "NVDA");
        assert_eq!(req.lookback, "1d");
        assert_eq!(req.interval, "1m");
    }

    #[test]
    fn file_roundtrip_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = WatchConfig::default_path(dir.path());
        assert_eq!(
            WatchConfig::load_or_default(&path).unwrap(),
            WatchConfig::default()
        );

        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "symbol = \"SPY\"\npoll_interval_secs = 30\n").unwrap();
        let loaded = WatchConfig::load_or_default(&path).unwrap();
        assert_eq!(loaded.symbol, "SPY");
        assert_eq!(loaded.poll_interval_secs, 30);
    }

    #[test]
    fn unreadable_file_is_io_error() {
        let err = WatchConfig::from_file(Path::new("/nonexistent/rsiwatch.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
