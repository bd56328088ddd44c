//! Placeholder shown in place of a table that has nothing to draw.

use ratatui::prelude::Rect;
use ratatui::{
    layout::Alignment,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::state::{DashboardState, LoadingState};
use crate::ui::theme;

/// Why a view is empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice<'a> {
    Loading,
    LoadFailed(&'a str),
    NoPayload,
    /// Payload loaded but the filters leave nothing to show
    Filtered,
    NoCells,
    NoLogs,
}

impl<'a> Notice<'a> {
    /// Notice for a dashboard without a usable model
    pub fn for_dashboard(state: &'a DashboardState) -> Self {
        match (&state.loading, &state.model) {
            (LoadingState::Loading(..), None) => Notice::Loading,
            (LoadingState::Error(error), None) => Notice::LoadFailed(error),
            (_, None) => Notice::NoPayload,
            (_, Some(_)) => Notice::Filtered,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Notice::Loading => "Loading payload...",
            Notice::LoadFailed(_) => "Failed to load payload",
            Notice::NoPayload => "No payload loaded",
            Notice::Filtered => "No data for the selected filters",
            Notice::NoCells => "No cells",
            Notice::NoLogs => "No logs yet",
        }
    }

    pub fn hint(&self) -> Option<&'a str> {
        match self {
            Notice::LoadFailed(error) => Some(*error),
            Notice::NoPayload => {
                Some("Start with --payload <file> or set payload_path in the config")
            }
            Notice::Filtered => Some("p: change period | o: change project | v: change view"),
            _ => None,
        }
    }
}

pub fn render_notice(f: &mut Frame, area: Rect, title: &str, notice: Notice) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(notice.message(), theme::loading_style())),
    ];

    if let Some(hint) = notice.hint() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(hint, theme::help_text_style())));
    }

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title));

    f.render_widget(paragraph, area);
}
