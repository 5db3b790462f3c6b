//! RSI chart of the current window with oversold/overbought guide lines.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(false))
        .title(format!(" RSI({}) ", app.config.period))
        .title_style(theme::panel_title(false));

    let points = app
        .report
        .as_ref()
        .map(|r| rsi_points(&r.evaluation.rsi_series))
        .unwrap_or_default();

    if points.is_empty() {
        let inner = block.inner(area);
        f.render_widget(block, area);
        render_empty(f, inner, app);
        return;
    }

    let x_max = app
        .report
        .as_ref()
        .map(|r| r.evaluation.rsi_series.len().saturating_sub(1) as f64)
        .unwrap_or(1.0)
        .max(1.0);
    let oversold = [(0.0, app.config.oversold), (x_max, app.config.oversold)];
    let overbought = [(0.0, app.config.overbought), (x_max, app.config.overbought)];

    let datasets = vec![
        Dataset::default()
            .marker(symbols::Marker::Dot)
            .style(Style::default().fg(theme::POSITIVE))
            .graph_type(GraphType::Line)
            .data(&oversold),
        Dataset::default()
            .marker(symbols::Marker::Dot)
            .style(Style::default().fg(theme::NEGATIVE))
            .graph_type(GraphType::Line)
            .data(&overbought),
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(theme::ACCENT))
            .graph_type(GraphType::Line)
            .data(&points),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title(Span::styled("Samples", theme::muted()))
                .style(theme::muted())
                .bounds([0.0, x_max])
                .labels(vec![
                    Span::styled("0", theme::muted()),
                    Span::styled(format!("{}", x_max as usize), theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([0.0, 100.0])
                .labels(vec![
                    Span::styled("0", theme::muted()),
                    Span::styled(format!("{:.0}", app.config.oversold), theme::muted()),
                    Span::styled(format!("{:.0}", app.config.overbought), theme::muted()),
                    Span::styled("100", theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}

fn render_empty(f: &mut Frame, area: Rect, app: &AppState) {
    let hint = if app.watching {
        "Waiting for enough samples to compute RSI..."
    } else {
        "Press s to start watching the ticker."
    };
    let lines = vec![Line::from(""), Line::from(Span::styled(hint, theme::muted()))];
    f.render_widget(Paragraph::new(lines), area);
}

/// (index, value) pairs for the defined part of an RSI series.
fn rsi_points(series: &[f64]) -> Vec<(f64, f64)> {
    series
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .map(|(i, &v)| (i as f64, v))
        .collect()
}
