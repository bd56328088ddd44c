//! Colors, sizes and shared styles. Screens take their look from here only.

use ratatui::style::{Color, Modifier, Style};
use tracing::Level;

// Value colors: sign of an amount, and the chart reference lines
pub const COLOR_POSITIVE: Color = Color::Green;
pub const COLOR_NEGATIVE: Color = Color::Red;
pub const COLOR_ZERO: Color = Color::DarkGray;
pub const COLOR_BUDGET: Color = Color::Gray;
pub const COLOR_FORECAST: Color = Color::Indexed(208);

const COLOR_ACCENT: Color = Color::Cyan;
const COLOR_HIGHLIGHT: Color = Color::Yellow;
const COLOR_MUTED: Color = Color::Gray;
const COLOR_POPUP_BORDER: Color = Color::Blue;
const COLOR_SELECTION_BG: Color = Color::DarkGray;
const COLOR_ROW_BG: Color = Color::Indexed(236);

// Screen chrome, top to bottom
pub const SCREEN_MARGIN: u16 = 1;
pub const TITLE_HEIGHT: u16 = 1;
pub const TAB_BAR_HEIGHT: u16 = 2;
pub const FILTER_BAR_HEIGHT: u16 = 1;
pub const HELP_BAR_HEIGHT: u16 = 3;
/// Room for the throbber or cell count at the end of the title line
pub const STATUS_INDICATOR_WIDTH: u16 = 24;

pub const TABLE_COLUMN_SPACING: u16 = 2;
pub const MATRIX_LABEL_WIDTH: u16 = 24;
pub const MATRIX_COLUMN_WIDTH: u16 = 14;

pub const TOOLTIP_WIDTH: u16 = 36;
pub const TOOLTIP_MAX_HEIGHT: u16 = 8;

pub fn selection_style() -> Style {
    Style::default()
        .bg(COLOR_SELECTION_BG)
        .add_modifier(Modifier::BOLD)
}

/// Row that holds the cursor
pub fn row_highlight_style() -> Style {
    Style::default().bg(COLOR_ROW_BG)
}

pub fn header_style() -> Style {
    Style::default()
        .fg(COLOR_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Totals row and column
pub fn total_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub fn help_text_style() -> Style {
    Style::default().fg(COLOR_MUTED)
}

pub fn title_style() -> Style {
    Style::default()
        .fg(COLOR_ACCENT)
        .add_modifier(Modifier::BOLD)
}

/// Status line and progress messages
pub fn loading_style() -> Style {
    Style::default().fg(COLOR_HIGHLIGHT)
}

pub fn info_border_style() -> Style {
    Style::default()
        .fg(COLOR_POPUP_BORDER)
        .add_modifier(Modifier::BOLD)
}

pub fn accent_border_style() -> Style {
    Style::default().fg(COLOR_ACCENT)
}

/// Green above zero, red below, dim at zero
pub fn value_color(value: f64) -> Color {
    match value.partial_cmp(&0.0) {
        Some(std::cmp::Ordering::Greater) => COLOR_POSITIVE,
        Some(std::cmp::Ordering::Less) => COLOR_NEGATIVE,
        _ => COLOR_ZERO,
    }
}

pub fn log_level_style(level: Level) -> Style {
    match level {
        Level::ERROR => Style::default()
            .fg(COLOR_NEGATIVE)
            .add_modifier(Modifier::BOLD),
        Level::WARN => Style::default().fg(COLOR_HIGHLIGHT),
        Level::INFO => Style::default().fg(COLOR_POSITIVE),
        Level::DEBUG => Style::default().fg(COLOR_POPUP_BORDER),
        Level::TRACE => Style::default().fg(COLOR_ZERO),
    }
}
