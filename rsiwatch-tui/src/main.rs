//! RSI Watch TUI: enter a ticker, start the poll loop, watch the signal.
//!
//! Layout:
//! 1. Ticker bar: symbol field and Start/Stop state
//! 2. Quote: latest price, RSI and signal
//! 3. Chart: RSI over the fetched window
//! 4. Status bar: key hints and messages

use std::fs::File;
use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use rsiwatch_core::data::normalize_symbol;
use rsiwatch_core::{PriceProvider, SyntheticProvider, WatchConfig, YahooProvider};
use rsiwatch_tui::{handle_key, spawn_worker, ui, AppState, WorkerCommand};

#[derive(Parser)]
#[command(name = "rsiwatch-tui", about = "Live RSI signal monitor for a stock ticker")]
struct Args {
    /// Initial ticker symbol (overrides the config file)
    #[arg(long)]
    symbol: Option<String>,

    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Use the offline synthetic provider instead of Yahoo Finance
    #[arg(long)]
    synthetic: bool,

    /// Seed for the synthetic provider
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Log file (the terminal is owned by the UI)
    #[arg(long, default_value = "rsiwatch.log")]
    log_file: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_file)?;

    let mut config = match &args.config {
        Some(path) => WatchConfig::from_file(path)?,
        None => {
            let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
            WatchConfig::load_or_default(&WatchConfig::default_path(&config_dir))?
        }
    };
    if let Some(symbol) = &args.symbol {
        config.symbol =
            normalize_symbol(symbol).with_context(|| format!("invalid ticker symbol '{symbol}'"))?;
    }

    let provider: Box<dyn PriceProvider> = if args.synthetic {
        Box::new(SyntheticProvider::new(args.seed))
    } else {
        Box::new(YahooProvider::new().context("failed to build HTTP client")?)
    };
    let provider_name = provider.name().to_string();
    tracing::info!(symbol = %config.symbol, provider = %provider_name, "rsiwatch-tui starting");

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let worker_handle = spawn_worker(provider, config.clone(), cmd_rx, resp_tx);

    let mut app = AppState::new(config, provider_name, cmd_tx.clone(), resp_rx);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Shutdown worker
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    let _ = worker_handle.join();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("rsiwatch-tui exiting");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking)
        app.drain_worker();

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                handle_key(app, key);
            }
        }

        // 4. Check quit
        if app.should_quit {
            break;
        }
    }
    Ok(())
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}
