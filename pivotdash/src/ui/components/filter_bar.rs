use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::state::DashboardState;
use crate::ui::theme;

fn cap_label(cap: usize) -> String {
    if cap == 0 {
        "all".to_string()
    } else {
        cap.to_string()
    }
}

/// One-line summary of the active view, filters and caps
pub fn render_filter_bar(f: &mut Frame, area: Rect, state: &DashboardState) {
    let mut spans = vec![
        Span::styled("View: ", theme::help_text_style()),
        Span::styled(state.view_mode.display_name(), theme::title_style()),
        Span::raw("  "),
        Span::styled("Period: ", theme::help_text_style()),
        Span::raw(state.period.label().to_string()),
    ];

    if state.has_projects() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled("Project: ", theme::help_text_style()));
        spans.push(Span::raw(state.project.label().to_string()));
    }

    spans.push(Span::raw("  "));
    spans.push(Span::styled("Rows: ", theme::help_text_style()));
    spans.push(Span::raw(cap_label(state.max_rows)));
    spans.push(Span::raw("  "));
    spans.push(Span::styled("Cols: ", theme::help_text_style()));
    spans.push(Span::raw(cap_label(state.max_cols)));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
