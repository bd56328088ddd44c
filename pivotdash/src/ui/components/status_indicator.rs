use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::Span,
    widgets::Paragraph,
    Frame,
};
use throbber_widgets_tui::{Throbber, BRAILLE_EIGHT};

use crate::state::LoadingState;
use crate::ui::theme;

/// Right-hand side of the title line: a spinner while the payload loads,
/// then the cell count or a failure mark.
pub fn render_status_indicator(
    f: &mut Frame,
    area: Rect,
    loading: &LoadingState,
    cells: Option<usize>,
) {
    let (text, color) = match loading {
        LoadingState::NotStarted => return,
        LoadingState::Loading(throbber_state) => {
            let throbber = Throbber::default()
                .label("Loading payload")
                .style(theme::loading_style())
                .throbber_set(BRAILLE_EIGHT);
            f.render_stateful_widget(throbber, area, &mut throbber_state.clone());
            return;
        }
        LoadingState::Loaded => (
            format!("✓ {} cells", cells.unwrap_or_default()),
            theme::COLOR_POSITIVE,
        ),
        LoadingState::Error(_) => ("x load failed".to_string(), theme::COLOR_NEGATIVE),
    };

    let indicator =
        Paragraph::new(Span::styled(text, Style::default().fg(color))).alignment(Alignment::Right);
    f.render_widget(indicator, area);
}
