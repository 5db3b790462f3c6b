//! RSI Watch CLI: headless access to the poll cycle.
//!
//! Commands:
//! - `check`: run one cycle and print price, RSI and signal
//! - `watch`: repeat the cycle on the configured interval until a failure
//! - `rsi`: compute RSI over prices given on the command line (offline)
//! - `config`: print the effective configuration as TOML

use std::path::PathBuf;
use std::thread;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rsiwatch_core::data::normalize_symbol;
use rsiwatch_core::indicators::{latest_defined, rsi, DEFAULT_PERIOD};
use rsiwatch_core::{
    run_cycle, PriceProvider, SyntheticProvider, Thresholds, WatchConfig, YahooProvider,
};

#[derive(Parser)]
#[command(
    name = "rsiwatch",
    about = "RSI Watch CLI: RSI buy/sell signals for a stock ticker"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by the commands that poll a provider.
#[derive(Args)]
struct SourceArgs {
    /// Ticker symbol. Overrides the config file.
    #[arg(long)]
    symbol: Option<String>,

    /// Path to a TOML config file. Defaults to the user config directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Use the offline synthetic provider instead of Yahoo Finance.
    #[arg(long, default_value_t = false)]
    synthetic: bool,

    /// Seed for the synthetic provider.
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single poll cycle and print the result.
    Check {
        #[command(flatten)]
        source: SourceArgs,

        /// Print the cycle report as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Poll on the configured interval, one line per cycle. Stops on the first failure.
    Watch {
        #[command(flatten)]
        source: SourceArgs,

        /// Stop after this many cycles (runs until interrupted by default).
        #[arg(long)]
        cycles: Option<u64>,
    },
    /// Compute RSI over closing prices given in chronological order.
    Rsi {
        /// Lookback period.
        #[arg(long, default_value_t = DEFAULT_PERIOD)]
        period: usize,

        /// Closing prices, oldest first.
        #[arg(required = true)]
        prices: Vec<f64>,
    },
    /// Print the effective configuration (file plus overrides) as TOML.
    Config {
        #[command(flatten)]
        source: SourceArgs,
    },
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { source, json } => run_check(source, json),
        Commands::Watch { source, cycles } => run_watch(source, cycles),
        Commands::Rsi { period, prices } => run_rsi(period, &prices),
        Commands::Config { source } => {
            let config = load_config(&source)?;
            config.validate()?;
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(source: &SourceArgs) -> Result<WatchConfig> {
    let mut config = match &source.config {
        Some(path) => WatchConfig::from_file(path)?,
        None => {
            let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
            WatchConfig::load_or_default(&WatchConfig::default_path(&config_dir))?
        }
    };
    if let Some(symbol) = &source.symbol {
        config.symbol =
            normalize_symbol(symbol).with_context(|| format!("invalid ticker symbol '{symbol}'"))?;
    }
    Ok(config)
}

fn build_provider(source: &SourceArgs) -> Result<Box<dyn PriceProvider>> {
    if source.synthetic {
        return Ok(Box::new(SyntheticProvider::new(source.seed)));
    }
    let provider = YahooProvider::new().context("failed to build HTTP client")?;
    Ok(Box::new(provider))
}

fn run_check(source: SourceArgs, json: bool) -> Result<()> {
    let config = load_config(&source)?;
    let provider = build_provider(&source)?;

    let report = run_cycle(provider.as_ref(), &config, &config.symbol)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.summary_line());
    }
    Ok(())
}

fn run_watch(source: SourceArgs, cycles: Option<u64>) -> Result<()> {
    let config = load_config(&source)?;
    let provider = build_provider(&source)?;
    let interval = config.poll_interval();

    tracing::info!(
        symbol = %config.symbol,
        provider = provider.name(),
        interval_secs = config.poll_interval_secs,
        "watch started"
    );

    let mut done = 0u64;
    loop {
        let started = Instant::now();
        match run_cycle(provider.as_ref(), &config, &config.symbol) {
            Ok(report) => println!(
                "[{}] {}",
                report.fetched_at.with_timezone(&chrono::Local).format("%H:%M:%S"),
                report.summary_line()
            ),
            Err(e) => {
                eprintln!("Error for {}: {e}", config.symbol);
                eprintln!("Watch halted.");
                std::process::exit(1);
            }
        }

        done += 1;
        if cycles.is_some_and(|limit| done >= limit) {
            break;
        }
        // Cadence is measured from the start of the cycle.
        thread::sleep(interval.saturating_sub(started.elapsed()));
    }

    tracing::info!(cycles = done, "watch finished");
    Ok(())
}

fn run_rsi(period: usize, prices: &[f64]) -> Result<()> {
    if period == 0 {
        bail!("--period must be at least 1");
    }
    if let Some(bad) = prices.iter().find(|p| !p.is_finite()) {
        bail!("price {bad} is not a finite number");
    }

    let values = rsi(prices, period);
    for (i, (price, value)) in prices.iter().zip(&values).enumerate() {
        if value.is_finite() {
            println!("{i:>4}  {price:>12.4}  {value:>8.2}");
        } else {
            println!("{i:>4}  {price:>12.4}  {:>8}", "-");
        }
    }

    match latest_defined(&values) {
        Some(latest) => {
            let signal = Thresholds::default().classify(latest);
            println!("RSI({period}): {latest:.2} | Signal: {}", signal.label());
        }
        None => println!(
            "RSI({period}): unavailable ({}/{} prices)",
            prices.len(),
            period + 1
        ),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_check_with_overrides() {
        let cli = Cli::try_parse_from([
            "rsiwatch",
            "check",
            "--symbol",
            "msft",
            "--synthetic",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Check { source, json } => {
                assert_eq!(source.symbol.as_deref(), Some("msft"));
                assert!(source.synthetic);
                assert!(json);
            }
            _ => panic!("expected check"),
        }
    }

    #[test]
    fn rsi_requires_prices() {
        assert!(Cli::try_parse_from(["rsiwatch", "rsi"]).is_err());
        let cli = Cli::try_parse_from(["rsiwatch", "rsi", "--period", "2", "1", "2", "3"]).unwrap();
        match cli.command {
            Commands::Rsi { period, prices } => {
                assert_eq!(period, 2);
                assert_eq!(prices, vec![1.0, 2.0, 3.0]);
            }
            _ => panic!("expected rsi"),
        }
    }

    #[test]
    fn rsi_rejects_zero_period_and_nan() {
        assert!(run_rsi(0, &[1.0, 2.0]).is_err());
        assert!(run_rsi(2, &[1.0, f64::NAN, 3.0]).is_err());
        assert!(run_rsi(2, &[1.0, 2.0, 3.0]).is_ok());
    }
}
