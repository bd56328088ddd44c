use pivotdash_core::model::Comparative;
use pivotdash_core::NumberFormat;
use ratatui::{
    style::Style,
    text::{Line, Span},
};

use super::theme;

/// Shorten `text` to at most `max_len` characters, marking the cut with "…"
pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    if max_len == 0 {
        return String::new();
    }
    let kept: String = text.chars().take(max_len - 1).collect();
    format!("{}…", kept)
}

/// Keep the tail of a log target, which carries the most specific module
pub fn truncate_target(target: &str, max_len: usize) -> String {
    let len = target.chars().count();
    if len <= max_len {
        target.to_string()
    } else {
        let tail: String = target.chars().skip(len + 3 - max_len).collect();
        format!("...{}", tail)
    }
}

/// Styled value span, green for positive and red for negative
pub fn value_span(value: f64, text: String) -> Span<'static> {
    Span::styled(text, Style::default().fg(theme::value_color(value)))
}

/// Comparative metrics as display lines; empty when none are available
pub fn comparative_lines(
    comparative: Option<&Comparative>,
    fmt: &NumberFormat,
) -> Vec<Line<'static>> {
    let Some(comparative) = comparative else {
        return Vec::new();
    };

    let mut spans = Vec::new();
    if let Some(pct) = comparative.forecast_vs_budget_pct {
        spans.push(Span::styled("Forecast / budget: ", theme::help_text_style()));
        spans.push(Span::raw(fmt.format_percent(pct)));
        spans.push(Span::raw("   "));
    }
    if let Some(pct) = comparative.actual_vs_forecast_pct {
        spans.push(Span::styled("Actual / forecast: ", theme::help_text_style()));
        spans.push(Span::raw(fmt.format_percent(pct)));
        spans.push(Span::raw("   "));
    }
    if let Some(pending) = comparative.pending {
        spans.push(Span::styled("Pending: ", theme::help_text_style()));
        spans.push(value_span(pending, fmt.format(pending)));
    }

    if spans.is_empty() {
        Vec::new()
    } else {
        vec![Line::from(spans)]
    }
}
