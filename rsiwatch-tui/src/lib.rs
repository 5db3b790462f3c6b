//! RSI Watch TUI - terminal front-end for the RSI poll loop
//!
//! Provides:
//! - Ticker entry with Start/Stop controls
//! - Live price, RSI and color-coded BUY/SELL signal
//! - RSI chart of the current window with threshold guides
//! - Error history and a blocking notice when the loop halts

pub mod app;
pub mod input;
pub mod theme;
pub mod ui;
pub mod worker;

pub use app::AppState;
pub use input::handle_key;
pub use worker::{spawn_worker, SessionId, WorkerCommand, WorkerResponse};
