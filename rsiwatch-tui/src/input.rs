//! Keyboard input dispatch: overlays → ticker editing → global keys.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, Overlay};

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    // 1. Overlays consume input first.
    match &app.overlay {
        Overlay::Halted { .. } => {
            // Blocking notification: only an explicit dismiss closes it.
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                app.overlay = Overlay::None;
            }
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::Help => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::None => {}
    }

    // 2. Ticker field in edit mode.
    if app.ticker.editing {
        handle_ticker_key(app, key);
        return;
    }

    // 3. Global keys.
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('s') => app.start(),
        KeyCode::Char('x') => app.stop(),
        KeyCode::Char('i') | KeyCode::Char('t') | KeyCode::Enter => app.ticker.begin_edit(),
        KeyCode::Char('e') => {
            app.error_scroll = 0;
            app.overlay = Overlay::ErrorHistory;
        }
        KeyCode::Char('?') | KeyCode::F(1) => app.overlay = Overlay::Help,
        _ => {}
    }
}

fn handle_ticker_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.commit_ticker(),
        KeyCode::Esc => app.ticker.cancel(),
        KeyCode::Backspace => app.ticker.backspace(),
        KeyCode::Char(c) => app.ticker.push(c),
        _ => {}
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}
