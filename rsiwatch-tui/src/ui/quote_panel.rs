//! Quote panel: the latest price, RSI and color-coded signal.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let title = match &app.report {
        Some(report) => format!(" {} ", report.symbol),
        None => " Quote ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(app.watching))
        .title(title)
        .title_style(theme::panel_title(app.watching));

    let lines = match &app.report {
        Some(report) => {
            let eval = &report.evaluation;
            let rsi_span = match eval.rsi {
                Some(rsi) => Span::styled(
                    format!("{rsi:.2}"),
                    Style::default().fg(theme::rsi_color(
                        rsi,
                        app.config.oversold,
                        app.config.overbought,
                    )),
                ),
                None => Span::styled(
                    format!("unavailable ({}/{} samples)", eval.samples, eval.required),
                    theme::warning(),
                ),
            };
            let signal_label = eval.signal.map(|s| s.label()).unwrap_or("-");
            let updated = app
                .last_update
                .map(|t| t.format("%H:%M:%S").to_string())
                .unwrap_or_default();

            vec![
                Line::from(vec![
                    Span::styled("Price:  ", theme::text_secondary()),
                    Span::styled(format!("{:.2}", eval.price), theme::text()),
                ]),
                Line::from(vec![
                    Span::styled(format!("RSI({}): ", app.config.period), theme::text_secondary()),
                    rsi_span,
                ]),
                Line::from(vec![
                    Span::styled("Signal: ", theme::text_secondary()),
                    Span::styled(signal_label, theme::signal_style(eval.signal)),
                ]),
                Line::from(""),
                Line::from(Span::styled(
                    format!(
                        "{} samples · cycle {} · updated {updated}",
                        eval.samples, app.cycles
                    ),
                    theme::muted(),
                )),
            ]
        }
        None => vec![
            Line::from(Span::styled("Price:  -", theme::text_secondary())),
            Line::from(Span::styled(
                format!("RSI({}): -", app.config.period),
                theme::text_secondary(),
            )),
            Line::from(Span::styled("Signal: -", theme::text_secondary())),
        ],
    };

    f.render_widget(Paragraph::new(lines).block(block), area);
}
