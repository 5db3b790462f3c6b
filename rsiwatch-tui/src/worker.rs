//! Background worker thread: the poll loop runs here.
//!
//! Communication with the TUI main thread is via `mpsc` channels: commands in,
//! responses out. The wait between cycles is a `recv_timeout` on the command
//! channel, so Stop and Shutdown are handled as soon as they arrive instead of
//! after the interval elapses. A fetch already in flight is not interrupted.
//!
//! Every `Start` opens a new watch session, and every response carries the
//! session it belongs to, so the UI can tell a late answer from an earlier
//! watch apart from the current one.

use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use rsiwatch_core::data::normalize_symbol;
use rsiwatch_core::{run_cycle, CycleReport, PriceProvider, WatchConfig};

/// Identifies one Start..Stop span. Assigned by the UI, increasing.
pub type SessionId = u64;

/// Commands sent from the TUI to the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerCommand {
    /// Begin polling `symbol`; the first cycle runs immediately.
    Start { session: SessionId, symbol: String },
    /// Switch symbols while running; takes effect on the next cycle.
    SetSymbol(String),
    Stop,
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug, Clone)]
pub enum WorkerResponse {
    Started {
        session: SessionId,
        symbol: String,
    },
    Cycle {
        session: SessionId,
        report: Box<CycleReport>,
    },
    /// The loop stopped itself after a failed cycle.
    Halted {
        session: SessionId,
        symbol: String,
        error: String,
    },
    /// The loop stopped on request.
    Stopped { session: SessionId },
}

impl WorkerResponse {
    pub fn session(&self) -> SessionId {
        match self {
            WorkerResponse::Started { session, .. }
            | WorkerResponse::Cycle { session, .. }
            | WorkerResponse::Halted { session, .. }
            | WorkerResponse::Stopped { session } => *session,
        }
    }
}

/// Spawn the background worker thread.
pub fn spawn_worker(
    provider: Box<dyn PriceProvider>,
    config: WatchConfig,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) -> JoinHandle<()> {
    thread::Builder::new()
        .name("rsiwatch-worker".into())
        .spawn(move || {
            let worker = Worker {
                provider,
                config,
                tx,
                active: None,
                next_due: Instant::now(),
            };
            worker.run(rx);
        })
        .expect("failed to spawn worker thread")
}

/// The running watch.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Watch {
    session: SessionId,
    symbol: String,
}

struct Worker {
    provider: Box<dyn PriceProvider>,
    config: WatchConfig,
    tx: Sender<WorkerResponse>,
    /// `None` while stopped.
    active: Option<Watch>,
    next_due: Instant,
}

impl Worker {
    fn run(mut self, rx: Receiver<WorkerCommand>) {
        tracing::debug!(provider = self.provider.name(), "worker started");
        loop {
            let cmd = if self.active.is_none() {
                match rx.recv() {
                    Ok(cmd) => Some(cmd),
                    Err(_) => break,
                }
            } else {
                let wait = self.next_due.saturating_duration_since(Instant::now());
                match rx.recv_timeout(wait) {
                    Ok(cmd) => Some(cmd),
                    Err(RecvTimeoutError::Timeout) => None,
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            };

            let keep_going = match cmd {
                Some(cmd) => self.handle(cmd),
                None => self.cycle(&rx),
            };
            if !keep_going {
                break;
            }
        }
        tracing::debug!("worker exiting");
    }

    /// Apply one command. Returns false on shutdown.
    fn handle(&mut self, cmd: WorkerCommand) -> bool {
        match cmd {
            WorkerCommand::Start { session, symbol } => {
                let symbol = normalize_symbol(&symbol).unwrap_or(symbol);
                tracing::info!(symbol = %symbol, session, "watch started");
                self.active = Some(Watch {
                    session,
                    symbol: symbol.clone(),
                });
                self.next_due = Instant::now();
                let _ = self.tx.send(WorkerResponse::Started { session, symbol });
            }
            WorkerCommand::SetSymbol(symbol) => {
                if let Some(watch) = self.active.as_mut() {
                    let symbol = normalize_symbol(&symbol).unwrap_or(symbol);
                    tracing::info!(symbol = %symbol, "symbol changed");
                    watch.symbol = symbol;
                }
            }
            WorkerCommand::Stop => {
                if let Some(watch) = self.active.take() {
                    tracing::info!(session = watch.session, "watch stopped");
                    let _ = self.tx.send(WorkerResponse::Stopped {
                        session: watch.session,
                    });
                }
            }
            WorkerCommand::Shutdown => return false,
        }
        true
    }

    /// Run one poll cycle. Returns false if a shutdown arrived during it.
    fn cycle(&mut self, rx: &Receiver<WorkerCommand>) -> bool {
        let Some(watch) = self.active.clone() else {
            return true;
        };
        self.next_due = Instant::now() + self.config.poll_interval();

        let result = run_cycle(self.provider.as_ref(), &self.config, &watch.symbol);

        // Commands that arrived during the fetch win over its result.
        while let Ok(cmd) = rx.try_recv() {
            if !self.handle(cmd) {
                return false;
            }
        }
        if self.active.as_ref() != Some(&watch) {
            tracing::debug!(
                symbol = %watch.symbol,
                session = watch.session,
                "discarding superseded cycle"
            );
            return true;
        }

        match result {
            Ok(report) => {
                let _ = self.tx.send(WorkerResponse::Cycle {
                    session: watch.session,
                    report: Box::new(report),
                });
            }
            Err(e) => {
                tracing::error!(symbol = %watch.symbol, error = %e, "cycle failed; halting");
                self.active = None;
                let _ = self.tx.send(WorkerResponse::Halted {
                    session: watch.session,
                    symbol: watch.symbol,
                    error: e.to_string(),
                });
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsiwatch_core::SyntheticProvider;
    use std::sync::mpsc;
    use std::time::Duration;

    fn quiet_config() -> WatchConfig {
        WatchConfig {
            poll_interval_secs: 3600,
            ..WatchConfig::default()
        }
    }

    #[test]
    fn worker_shutdown() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, _resp_rx) = mpsc::channel();

        let provider = Box::new(SyntheticProvider::new(1).with_samples(20));
        let handle = spawn_worker(provider, quiet_config(), cmd_rx, resp_tx);
        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().expect("worker should join cleanly");
    }

    #[test]
    fn worker_exits_when_ui_drops_sender() {
        let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();
        let (resp_tx, _resp_rx) = mpsc::channel();

        let provider = Box::new(SyntheticProvider::new(1).with_samples(20));
        let handle = spawn_worker(provider, quiet_config(), cmd_rx, resp_tx);
        drop(cmd_tx);
        handle.join().expect("worker should exit on disconnect");
    }

    #[test]
    fn stop_while_idle_is_silent() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();

        let provider = Box::new(SyntheticProvider::new(1).with_samples(20));
        let handle = spawn_worker(provider, quiet_config(), cmd_rx, resp_tx);
        cmd_tx.send(WorkerCommand::Stop).unwrap();
        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().unwrap();
        assert!(resp_rx.recv_timeout(Duration::from_millis(50)).is_err());
    }
}
