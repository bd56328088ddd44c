//! Bottom bar listing the key bindings that apply to the current view.

use ratatui::prelude::Rect;
use ratatui::{
    layout::Alignment,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme;

/// Key and the action it triggers
pub type KeyHint = (&'static str, &'static str);

pub const DASHBOARD_HINTS: &[KeyHint] = &[
    ("hjkl", "move"),
    ("Enter", "detail"),
    ("c", "chart"),
    ("p/o", "period/project"),
    ("v", "view"),
    ("e", "export"),
    ("?", "help"),
];

pub const SUMMARY_HINTS: &[KeyHint] = &[
    ("o/O", "project"),
    ("r", "reload"),
    ("Tab", "next tab"),
    ("?", "help"),
];

pub const DETAIL_HINTS: &[KeyHint] = &[("t", "table/chart"), ("Esc", "close"), ("?", "help")];

pub const LOGS_HINTS: &[KeyHint] = &[
    ("j/k", "scroll"),
    ("G", "bottom"),
    ("gg", "top"),
    ("PgUp/PgDn", "page"),
    ("?", "help"),
];

/// Hints as one styled line: keys highlighted, actions dimmed
pub fn hint_line(hints: &[KeyHint]) -> Line<'static> {
    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", theme::help_text_style()));
        }
        spans.push(Span::styled(*key, theme::header_style()));
        spans.push(Span::styled(format!(": {}", action), theme::help_text_style()));
    }
    Line::from(spans)
}

/// Render the bordered help bar, with optional trailing context
pub fn render_help_bar(f: &mut Frame, area: Rect, hints: &[KeyHint], suffix: Option<&str>) {
    let mut line = hint_line(hints);
    if let Some(suffix) = suffix {
        line.push_span(Span::styled(format!(" {}", suffix), theme::loading_style()));
    }

    let help = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(help, area);
}
