//! Overlay widgets: help, error history, halted-loop notification.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;
use crate::ui::centered_rect;

/// Key reference overlay.
pub fn render_help(f: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 60, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Keys ")
        .title_style(theme::accent_bold());

    let keys = [
        ("s", "start watching the ticker"),
        ("x", "stop watching"),
        ("i / t / Enter", "edit the ticker"),
        ("e", "error history"),
        ("?", "this help"),
        ("q / Esc", "quit"),
    ];

    let mut text = vec![Line::from("")];
    for (key, what) in keys {
        text.push(Line::from(vec![
            Span::styled(format!("  {key:<14}"), theme::accent_bold()),
            Span::styled(what, theme::text()),
        ]));
    }
    text.push(Line::from(""));
    text.push(Line::from(Span::styled(
        "BUY below the oversold line, SELL above the overbought line.",
        theme::muted(),
    )));
    text.push(Line::from(""));
    text.push(Line::from(Span::styled(
        "Press any key to dismiss...",
        theme::neutral(),
    )));

    let para = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, popup);
}

/// Error history overlay, newest first.
pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(format!(
            " Error History ({}) [Esc]close [j/k]scroll ",
            app.error_history.len()
        ))
        .title_style(theme::negative());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    if app.error_history.is_empty() {
        let text = Paragraph::new(Span::styled("No errors recorded.", theme::muted()));
        f.render_widget(text, inner);
        return;
    }

    let lines: Vec<Line> = app
        .error_history
        .iter()
        .enumerate()
        .skip(app.error_scroll)
        .take(inner.height as usize)
        .map(|(i, err)| {
            let style = if i == app.error_scroll {
                theme::negative().add_modifier(Modifier::BOLD)
            } else {
                theme::muted()
            };
            Line::from(vec![
                Span::styled(
                    format!("[{}] ", err.timestamp.format("%H:%M:%S")),
                    theme::muted(),
                ),
                Span::styled(format!("[{}] ", err.symbol), theme::warning()),
                Span::styled(err.message.as_str(), style),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}

/// Modal shown when the poll loop stopped itself after a failed cycle.
pub fn render_halted(f: &mut Frame, area: Rect, symbol: &str, error: &str) {
    let popup = centered_rect(60, 35, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(" Watch stopped ")
        .title_style(theme::negative().add_modifier(Modifier::BOLD));

    let text = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Polling ", theme::text_secondary()),
            Span::styled(symbol, theme::accent_bold()),
            Span::styled(" failed and has been halted.", theme::text_secondary()),
        ]),
        Line::from(""),
        Line::from(Span::styled(error, theme::negative())),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to dismiss, then s to start again.",
            theme::neutral(),
        )),
    ];

    let para = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, popup);
}
