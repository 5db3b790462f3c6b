//! Ticker bar: the symbol field plus the Start/Stop controls.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let editing = app.ticker.editing;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(editing))
        .title(" Stock RSI Trading Indicator ")
        .title_style(theme::panel_title(true));

    let mut spans = vec![Span::styled("Ticker: ", theme::text_secondary())];
    if editing {
        spans.push(Span::styled(
            format!("{}_", app.ticker.draft),
            theme::accent().add_modifier(Modifier::UNDERLINED),
        ));
    } else {
        spans.push(Span::styled(app.ticker.symbol.as_str(), theme::accent_bold()));
    }

    spans.push(Span::raw("   "));
    // Start is disabled while running, Stop while stopped.
    let (start_style, stop_style) = if app.watching {
        (theme::muted(), theme::negative().add_modifier(Modifier::BOLD))
    } else {
        (theme::positive().add_modifier(Modifier::BOLD), theme::muted())
    };
    spans.push(Span::styled("[s] Start", start_style));
    spans.push(Span::raw("  "));
    spans.push(Span::styled("[x] Stop", stop_style));
    spans.push(Span::raw("   "));

    let state = if app.watching {
        Span::styled("● Watching", theme::positive())
    } else {
        Span::styled("○ Stopped", theme::muted())
    };
    spans.push(state);

    let para = Paragraph::new(Line::from(spans)).block(block);
    f.render_widget(para, area);
}
