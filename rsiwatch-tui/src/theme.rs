//! Neon-on-charcoal theme tokens for the RSI Watch TUI.
//!
//! # Color Palette
//! - **Background**: deep charcoal
//! - **Accent**: electric cyan (focus, highlights, the RSI line)
//! - **Positive**: neon green (BUY)
//! - **Negative**: signal red (SELL, errors)
//! - **Warning**: neon orange (unavailable RSI, warnings)
//! - **Neutral**: cool purple (no signal, threshold guides)
//! - **Muted**: steel blue (hints, disabled controls)

use ratatui::style::{Color, Modifier, Style};

use rsiwatch_core::Signal;

pub const BACKGROUND: Color = Color::Rgb(18, 18, 20);
pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
pub const NEGATIVE: Color = Color::Rgb(255, 64, 64);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const TEXT_PRIMARY: Color = Color::White;
pub const TEXT_SECONDARY: Color = Color::Rgb(170, 170, 170);

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn text() -> Style {
    Style::default().fg(TEXT_PRIMARY)
}

pub fn text_secondary() -> Style {
    Style::default().fg(TEXT_SECONDARY)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

/// Color for a signal: green BUY, red SELL, neutral otherwise.
pub fn signal_color(signal: Option<Signal>) -> Color {
    match signal {
        Some(Signal::Buy) => POSITIVE,
        Some(Signal::Sell) => NEGATIVE,
        Some(Signal::None) => TEXT_PRIMARY,
        None => WARNING,
    }
}

pub fn signal_style(signal: Option<Signal>) -> Style {
    Style::default()
        .fg(signal_color(signal))
        .add_modifier(Modifier::BOLD)
}

/// Color for an RSI reading relative to the thresholds.
pub fn rsi_color(rsi: f64, oversold: f64, overbought: f64) -> Color {
    if rsi < oversold {
        POSITIVE
    } else if rsi > overbought {
        NEGATIVE
    } else {
        ACCENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_colors() {
        assert_eq!(signal_color(Some(Signal::Buy)), POSITIVE);
        assert_eq!(signal_color(Some(Signal::Sell)), NEGATIVE);
        assert_eq!(signal_color(Some(Signal::None)), TEXT_PRIMARY);
        assert_eq!(signal_color(None), WARNING);
    }

    #[test]
    fn rsi_colors_follow_thresholds() {
        assert_eq!(rsi_color(25.0, 30.0, 70.0), POSITIVE);
        assert_eq!(rsi_color(30.0, 30.0, 70.0), ACCENT);
        assert_eq!(rsi_color(75.0, 30.0, 70.0), NEGATIVE);
    }

    #[test]
    fn active_border_is_accent() {
        assert_eq!(panel_border(true), accent());
        assert_eq!(panel_border(false), muted());
    }
}
