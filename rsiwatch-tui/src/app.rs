//! Application state: single-owner, main-thread only.
//!
//! All TUI state lives here. The worker thread communicates via channels and
//! every response is applied on this thread by `apply_response`.

use std::collections::VecDeque;
use std::sync::mpsc::{Receiver, Sender};

use chrono::{DateTime, Local};

use rsiwatch_core::data::normalize_symbol;
use rsiwatch_core::{CycleReport, WatchConfig};

use crate::worker::{SessionId, WorkerCommand, WorkerResponse};

/// Longest ticker the input field accepts.
pub const MAX_TICKER_LEN: usize = 12;
const ERROR_HISTORY_CAP: usize = 50;

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: DateTime<Local>,
    pub symbol: String,
    pub message: String,
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
    ErrorHistory,
    /// Blocking notification for a halted watch; must be dismissed.
    Halted { symbol: String, error: String },
}

/// Ticker text field.
#[derive(Debug, Clone)]
pub struct TickerInput {
    /// Committed symbol; what Start uses.
    pub symbol: String,
    pub editing: bool,
    pub draft: String,
}

impl TickerInput {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            editing: false,
            draft: String::new(),
        }
    }

    pub fn begin_edit(&mut self) {
        self.draft = self.symbol.clone();
        self.editing = true;
    }

    pub fn push(&mut self, c: char) {
        if self.draft.len() < MAX_TICKER_LEN && !c.is_whitespace() {
            self.draft.extend(c.to_uppercase());
        }
    }

    pub fn backspace(&mut self) {
        self.draft.pop();
    }

    pub fn cancel(&mut self) {
        self.editing = false;
        self.draft.clear();
    }

    /// Commit the draft. Returns the new symbol, or `None` if it is invalid
    /// (the field stays in edit mode).
    pub fn commit(&mut self) -> Option<String> {
        let symbol = normalize_symbol(&self.draft)?;
        self.symbol = symbol.clone();
        self.editing = false;
        self.draft.clear();
        Some(symbol)
    }
}

/// Top-level application state.
pub struct AppState {
    pub config: WatchConfig,
    pub ticker: TickerInput,
    /// Mirror of the worker's running state.
    pub watching: bool,
    /// Session of the latest Start; responses from earlier sessions are stale.
    pub session: SessionId,
    pub should_quit: bool,

    // Latest cycle, replaced wholesale each time
    pub report: Option<CycleReport>,
    pub last_update: Option<DateTime<Local>>,
    pub cycles: u64,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
    pub provider_name: String,
}

impl AppState {
    pub fn new(
        config: WatchConfig,
        provider_name: impl Into<String>,
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
    ) -> Self {
        let symbol = normalize_symbol(&config.symbol).unwrap_or_else(|| config.symbol.clone());
        let ticker = TickerInput::new(symbol);
        Self {
            config,
            ticker,
            watching: false,
            session: 0,
            should_quit: false,
            report: None,
            last_update: None,
            cycles: 0,
            worker_tx,
            worker_rx,
            status_message: None,
            error_history: VecDeque::with_capacity(ERROR_HISTORY_CAP),
            error_scroll: 0,
            overlay: Overlay::None,
            provider_name: provider_name.into(),
        }
    }

    /// Start watching the committed symbol. Ignored while already watching.
    pub fn start(&mut self) {
        if self.watching {
            return;
        }
        self.watching = true;
        self.report = None;
        self.set_status(format!("Starting watch on {}...", self.ticker.symbol));
        self.session += 1;
        self.send(WorkerCommand::Start {
            session: self.session,
            symbol: self.ticker.symbol.clone(),
        });
    }

    /// Stop watching. Ignored while stopped.
    pub fn stop(&mut self) {
        if !self.watching {
            return;
        }
        self.watching = false;
        self.send(WorkerCommand::Stop);
    }

    /// Commit the ticker draft and forward it to a running worker.
    pub fn commit_ticker(&mut self) {
        match self.ticker.commit() {
            Some(symbol) => {
                if self.watching {
                    self.send(WorkerCommand::SetSymbol(symbol.clone()));
                    self.set_status(format!("Switching to {symbol} on the next cycle"));
                } else {
                    self.set_status(format!("Ticker set to {symbol}"));
                }
            }
            None => self.set_warning(format!("'{}' is not a valid ticker", self.ticker.draft)),
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Apply a worker response. Runs on the UI thread only.
    pub fn apply_response(&mut self, resp: WorkerResponse) {
        if resp.session() != self.session {
            tracing::debug!(
                session = resp.session(),
                current = self.session,
                "ignoring response from an earlier watch"
            );
            return;
        }
        match resp {
            WorkerResponse::Started { symbol, .. } => {
                self.watching = true;
                self.set_status(format!("Watching {symbol}"));
            }
            WorkerResponse::Cycle { report, .. } => {
                // A cycle that raced a Stop is stale.
                if !self.watching {
                    return;
                }
                self.cycles += 1;
                self.last_update = Some(Local::now());
                if report.evaluation.is_available() {
                    self.set_status(format!("Updated {}", report.symbol));
                } else {
                    self.set_warning(format!(
                        "{}: RSI unavailable ({}/{} samples)",
                        report.symbol, report.evaluation.samples, report.evaluation.required
                    ));
                }
                self.report = Some(*report);
            }
            WorkerResponse::Halted { symbol, error, .. } => {
                self.watching = false;
                self.push_error(symbol.clone(), error.clone());
                self.overlay = Overlay::Halted { symbol, error };
            }
            WorkerResponse::Stopped { .. } => {
                self.watching = false;
                self.set_status("Stopped");
            }
        }
    }

    /// Drain all pending worker responses without blocking.
    pub fn drain_worker(&mut self) {
        while let Ok(resp) = self.worker_rx.try_recv() {
            self.apply_response(resp);
        }
    }

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, symbol: String, message: String) {
        let record = ErrorRecord {
            timestamp: Local::now(),
            symbol,
            message: message.clone(),
        };
        self.error_history.push_front(record);
        if self.error_history.len() > ERROR_HISTORY_CAP {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    fn send(&mut self, cmd: WorkerCommand) {
        if self.worker_tx.send(cmd).is_err() {
            self.watching = false;
            self.push_error(
                self.ticker.symbol.clone(),
                "background worker is not running".into(),
            );
        }
    }
}
