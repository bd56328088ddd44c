pub mod components;
pub mod layouts;
pub mod screens;
pub mod theme;
pub mod utils;

use crate::log_buffer::LogBuffer;
use crate::state::{AppState, Tab};
use components::{detail_modal, help_bar, help_popup, status_indicator, tab_bar, tooltip};
use ratatui::{layout::Rect, text::Span, widgets::Paragraph, Frame};
use screens::*;

/// Pure render dispatcher - routes to the active tab's screen and draws
/// overlays on top. Only the layout hints for mouse hit-testing are written.
pub fn render_app(f: &mut Frame, state: &AppState, log_buffer: &LogBuffer) {
    let (title_area, tabs_area, content_area, help_area) = layouts::app_layout(f.area());

    render_title(f, title_area, state);
    tab_bar::render_tab_bar(f, tabs_area, state.active_tab);

    let dashboard = &state.dashboard;
    match state.active_tab {
        Tab::Dashboard => {
            dashboard_screen::render(f, content_area, dashboard, &state.layout);
            let hints = if dashboard.detail.is_some() {
                help_bar::DETAIL_HINTS
            } else {
                help_bar::DASHBOARD_HINTS
            };
            help_bar::render_help_bar(f, help_area, hints, None);
        }
        Tab::Summary => {
            summary_screen::render(f, content_area, dashboard);
            help_bar::render_help_bar(f, help_area, help_bar::SUMMARY_HINTS, None);
        }
        Tab::Logs => {
            logs_screen::render(f, content_area, &state.logs, log_buffer);
            let scrolled = (state.logs.scroll_offset > 0)
                .then(|| format!("(scrolled {} from bottom)", state.logs.scroll_offset));
            help_bar::render_help_bar(
                f,
                help_area,
                help_bar::LOGS_HINTS,
                scrolled.as_deref(),
            );
        }
    }

    let modal_area = match (&dashboard.detail, state.active_tab) {
        (Some(modal), Tab::Dashboard) => Some(detail_modal::render_detail_modal(
            f,
            content_area,
            modal,
            &dashboard.number_format,
        )),
        _ => None,
    };
    state.layout.borrow_mut().modal = modal_area;

    // Tooltips only float over the matrix itself
    if state.active_tab == Tab::Dashboard && dashboard.detail.is_none() {
        if let Some(content) = dashboard.tooltip.content() {
            let anchor = state
                .layout
                .borrow()
                .cell_rect(dashboard.cursor.row, dashboard.cursor.col);
            if let Some(anchor) = anchor {
                tooltip::render_tooltip(f, anchor, content_area, content);
            }
        }
    }

    // Render help popup on top if visible
    if state.help_visible {
        help_popup::render_help_popup(f, state.active_tab, dashboard.detail.is_some());
    }
}

fn render_title(f: &mut Frame, area: Rect, state: &AppState) {
    let (text_area, indicator_area) = layouts::title_with_status(area);

    let source = state
        .dashboard
        .source
        .as_ref()
        .and_then(|p| p.file_name())
        .map(|name| format!("pivotdash - {}", name.to_string_lossy()))
        .unwrap_or_else(|| "pivotdash".to_string());

    let generated = state
        .dashboard
        .model
        .as_ref()
        .and_then(|m| m.generated_at())
        .map(|at| format!(" (generated {})", at))
        .unwrap_or_default();

    f.render_widget(
        Paragraph::new(Span::styled(
            format!("{}{}", source, generated),
            theme::title_style(),
        )),
        text_area,
    );
    let cells = state.dashboard.model.as_ref().map(|m| m.cell_count());
    status_indicator::render_status_indicator(
        f,
        indicator_area,
        &state.dashboard.loading,
        cells,
    );
}
