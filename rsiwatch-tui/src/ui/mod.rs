//! Top-level UI layout: ticker bar, quote panel, RSI chart, status bar.

pub mod chart_panel;
pub mod overlays;
pub mod quote_panel;
pub mod status_bar;
pub mod ticker_panel;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::app::{AppState, Overlay};
use crate::theme;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    f.render_widget(
        Block::default().style(Style::default().bg(theme::BACKGROUND)),
        f.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(7),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .split(f.area());

    ticker_panel::render(f, chunks[0], app);
    quote_panel::render(f, chunks[1], app);
    chart_panel::render(f, chunks[2], app);
    status_bar::render(f, chunks[3], app);

    // Draw overlays on top.
    let main_area = f.area();
    match &app.overlay {
        Overlay::Help => overlays::render_help(f, main_area),
        Overlay::ErrorHistory => overlays::render_error_history(f, main_area, app),
        Overlay::Halted { symbol, error } => overlays::render_halted(f, main_area, symbol, error),
        Overlay::None => {}
    }
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use rsiwatch_core::{run_cycle, SyntheticProvider, WatchConfig};
    use std::sync::mpsc;

    use crate::worker::WorkerResponse;

    fn app() -> AppState {
        let (cmd_tx, _cmd_rx) = mpsc::channel();
        let (_resp_tx, resp_rx) = mpsc::channel();
        AppState::new(WatchConfig::default(), "synthetic", cmd_tx, resp_rx)
    }

    fn screen(app: &AppState) -> String {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn idle_screen_shows_default_ticker() {
        let text = screen(&app());
        assert!(text.contains("AAPL"));
        assert!(text.contains("Stopped"));
        assert!(text.contains("Price:"));
    }

    #[test]
    fn cycle_screen_shows_signal_label() {
        let mut app = app();
        app.watching = true;
        let provider = SyntheticProvider::new(4).with_samples(80);
        let report = run_cycle(&provider, &app.config, "AAPL").unwrap();
        let label = report.evaluation.signal.unwrap().label();
        app.apply_response(WorkerResponse::Cycle {
            session: app.session,
            report: Box::new(report),
        });
        let text = screen(&app);
        assert!(text.contains(label), "missing {label}:\n{text}");
        assert!(text.contains("Watching"));
    }

    #[test]
    fn halted_overlay_renders_error() {
        let mut app = app();
        app.overlay = Overlay::Halted {
            symbol: "ZZZZ".into(),
            error: "symbol not found: ZZZZ".into(),
        };
        let text = screen(&app);
        assert!(text.contains("symbol not found: ZZZZ"));
    }
}
