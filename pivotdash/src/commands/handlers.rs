use pivotdash_core::detail::DetailMode;

use crate::events::AppCommand;
use crate::input::{Key, KeyEvent, MouseClick};
use crate::state::{AppState, Tab};

/// Map user input (KeyEvent) to AppCommand based on current UI state
/// Returns None if the key should be ignored
pub fn handle_key_input(event: KeyEvent, state: &AppState) -> Option<AppCommand> {
    let key = event.key;

    if event.modifiers.ctrl && key == Key::Char('c') {
        return Some(AppCommand::Quit);
    }

    // Priority 1: help popup
    if state.help_visible {
        return match key {
            Key::Char('?') | Key::Esc => Some(AppCommand::ToggleHelp),
            Key::Char('q') => Some(AppCommand::Quit),
            _ => None,
        };
    }

    // Priority 2: detail modal captures input while open
    if state.dashboard.detail.is_some() {
        return match key {
            Key::Esc | Key::Char('x') => Some(AppCommand::CloseDetail),
            Key::Char('t') | Key::Tab => Some(AppCommand::ToggleDetailMode),
            Key::Char('q') => Some(AppCommand::Quit),
            _ => None,
        };
    }

    // Handle multi-key sequences
    if let Some(pending) = state.pending_key {
        return match (pending, key) {
            // 'g' followed by 'g' -> top of matrix / oldest logs
            ('g', Key::Char('g')) => Some(match state.active_tab {
                Tab::Logs => AppCommand::ScrollLogsToTop,
                _ => AppCommand::NavigateToTop,
            }),
            ('g', Key::Char('d')) => Some(AppCommand::SwitchTab(Tab::Dashboard)),
            ('g', Key::Char('s')) => Some(AppCommand::SwitchTab(Tab::Summary)),
            ('g', Key::Char('l')) => Some(AppCommand::SwitchTab(Tab::Logs)),
            // Any other key clears the pending key
            _ => Some(AppCommand::ClearPendingKey),
        };
    }

    match (state.active_tab, key) {
        (_, Key::Char('?')) => Some(AppCommand::ToggleHelp),
        (_, Key::Char('q')) => Some(AppCommand::Quit),
        (_, Key::Char('g')) => Some(AppCommand::SetPendingKey('g')),
        (_, Key::Tab) => Some(AppCommand::NextTab),
        (_, Key::BackTab) => Some(AppCommand::PreviousTab),
        (_, Key::Char('1')) => Some(AppCommand::SwitchTab(Tab::Dashboard)),
        (_, Key::Char('2')) => Some(AppCommand::SwitchTab(Tab::Summary)),
        (_, Key::Char('3')) => Some(AppCommand::SwitchTab(Tab::Logs)),

        // Logs tab
        (Tab::Logs, Key::Up | Key::Char('k')) => Some(AppCommand::ScrollLogsUp),
        (Tab::Logs, Key::Down | Key::Char('j')) => Some(AppCommand::ScrollLogsDown),
        (Tab::Logs, Key::PageUp) => Some(AppCommand::ScrollLogsPageUp),
        (Tab::Logs, Key::PageDown) => Some(AppCommand::ScrollLogsPageDown),
        (Tab::Logs, Key::Char('G') | Key::End) => Some(AppCommand::ScrollLogsToBottom),
        (Tab::Logs, Key::Home) => Some(AppCommand::ScrollLogsToTop),

        // Filters apply to both dashboard and summary
        (Tab::Dashboard | Tab::Summary, Key::Char('o')) => {
            Some(AppCommand::CycleProject { forward: true })
        }
        (Tab::Dashboard | Tab::Summary, Key::Char('O')) => {
            Some(AppCommand::CycleProject { forward: false })
        }
        (Tab::Dashboard | Tab::Summary, Key::Char('r')) => Some(AppCommand::ReloadPayload),

        // Dashboard tab
        (Tab::Dashboard, Key::Up | Key::Char('k')) => Some(AppCommand::SelectPrevious),
        (Tab::Dashboard, Key::Down | Key::Char('j')) => Some(AppCommand::SelectNext),
        (Tab::Dashboard, Key::Left | Key::Char('h')) => Some(AppCommand::SelectLeft),
        (Tab::Dashboard, Key::Right | Key::Char('l')) => Some(AppCommand::SelectRight),
        (Tab::Dashboard, Key::Char('G') | Key::End) => Some(AppCommand::NavigateToBottom),
        (Tab::Dashboard, Key::Home) => Some(AppCommand::NavigateToTop),
        (Tab::Dashboard, Key::Enter) => Some(AppCommand::OpenDetail {
            mode: DetailMode::Table,
        }),
        (Tab::Dashboard, Key::Char('c')) => Some(AppCommand::OpenDetail {
            mode: DetailMode::Chart,
        }),
        (Tab::Dashboard, Key::Char('p')) => Some(AppCommand::CyclePeriod { forward: true }),
        (Tab::Dashboard, Key::Char('P')) => Some(AppCommand::CyclePeriod { forward: false }),
        (Tab::Dashboard, Key::Char('v')) => Some(AppCommand::CycleViewMode),
        (Tab::Dashboard, Key::Char('+')) => Some(AppCommand::AdjustMaxRows { delta: 5 }),
        (Tab::Dashboard, Key::Char('-')) => Some(AppCommand::AdjustMaxRows { delta: -5 }),
        (Tab::Dashboard, Key::Char('>')) => Some(AppCommand::AdjustMaxCols { delta: 1 }),
        (Tab::Dashboard, Key::Char('<')) => Some(AppCommand::AdjustMaxCols { delta: -1 }),
        (Tab::Dashboard, Key::Char('e')) => Some(AppCommand::ExportMatrix),

        _ => None,
    }
}

/// Map a left click to a command using the geometry of the last frame
pub fn handle_mouse_input(click: MouseClick, state: &AppState) -> Option<AppCommand> {
    if state.help_visible {
        return None;
    }

    let layout = state.layout.borrow();

    if state.dashboard.detail.is_some() {
        return if layout.inside_modal(click.column, click.row) {
            None
        } else {
            Some(AppCommand::CloseDetail)
        };
    }

    if state.active_tab != Tab::Dashboard {
        return None;
    }

    layout
        .cell_at(click.column, click.row)
        .filter(|(row, col)| state.dashboard.matrix.cell(*row, *col).is_some())
        .map(|(row, col)| AppCommand::OpenDetailAt { row, col })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{DetailModal, LayoutHints};
    use pivotdash_core::detail::DetailView;
    use pivotdash_core::matrix::{MatrixCell, MatrixRow};
    use pivotdash_core::{Cell, Matrix};
    use ratatui::layout::Rect;

    fn key(k: Key) -> KeyEvent {
        KeyEvent::new(k)
    }

    fn with_modal(state: &mut AppState) {
        state.dashboard.detail = Some(DetailModal {
            keys: vec![],
            cell: Cell::new("Sales", "North"),
            mode: DetailMode::Table,
            view: DetailView::InsufficientData,
        });
    }

    #[test]
    fn test_dashboard_keys() {
        let state = AppState::new();

        assert_eq!(
            handle_key_input(key(Key::Enter), &state),
            Some(AppCommand::OpenDetail {
                mode: DetailMode::Table
            })
        );
        assert_eq!(
            handle_key_input(key(Key::Char('c')), &state),
            Some(AppCommand::OpenDetail {
                mode: DetailMode::Chart
            })
        );
        assert_eq!(
            handle_key_input(key(Key::Char('P')), &state),
            Some(AppCommand::CyclePeriod { forward: false })
        );
        assert_eq!(
            handle_key_input(key(Key::Char('h')), &state),
            Some(AppCommand::SelectLeft)
        );
    }

    #[test]
    fn test_modal_captures_keys() {
        let mut state = AppState::new();
        with_modal(&mut state);

        assert_eq!(
            handle_key_input(key(Key::Esc), &state),
            Some(AppCommand::CloseDetail)
        );
        assert_eq!(
            handle_key_input(key(Key::Char('x')), &state),
            Some(AppCommand::CloseDetail)
        );
        assert_eq!(
            handle_key_input(key(Key::Char('t')), &state),
            Some(AppCommand::ToggleDetailMode)
        );
        // Matrix navigation is blocked while the modal is open
        assert_eq!(handle_key_input(key(Key::Char('j')), &state), None);
    }

    #[test]
    fn test_help_takes_precedence_over_modal() {
        let mut state = AppState::new();
        with_modal(&mut state);
        state.help_visible = true;

        assert_eq!(
            handle_key_input(key(Key::Esc), &state),
            Some(AppCommand::ToggleHelp)
        );
    }

    #[test]
    fn test_pending_g_sequences() {
        let mut state = AppState::new();
        state.pending_key = Some('g');

        assert_eq!(
            handle_key_input(key(Key::Char('l')), &state),
            Some(AppCommand::SwitchTab(Tab::Logs))
        );
        assert_eq!(
            handle_key_input(key(Key::Char('z')), &state),
            Some(AppCommand::ClearPendingKey)
        );

        state.active_tab = Tab::Logs;
        assert_eq!(
            handle_key_input(key(Key::Char('g')), &state),
            Some(AppCommand::ScrollLogsToTop)
        );
    }

    #[test]
    fn test_ctrl_c_quits() {
        let state = AppState::new();
        assert_eq!(
            handle_key_input(KeyEvent::with_ctrl(Key::Char('c')), &state),
            Some(AppCommand::Quit)
        );
    }

    fn state_with_matrix() -> AppState {
        let mut state = AppState::new();
        state.dashboard.matrix = Matrix {
            columns: vec!["North".to_string()],
            rows: vec![MatrixRow {
                label: "Sales".to_string(),
                cells: vec![MatrixCell::default()],
                total: 0.0,
            }],
            ..Default::default()
        };
        *state.layout.borrow_mut() = LayoutHints {
            matrix_body: Rect::new(0, 0, 60, 10),
            label_width: 20,
            col_width: 10,
            col_spacing: 2,
            visible_cols: 1,
            modal: Some(Rect::new(10, 2, 20, 5)),
            ..Default::default()
        };
        state
    }

    #[test]
    fn test_click_on_cell_opens_detail() {
        let state = state_with_matrix();

        assert_eq!(
            handle_mouse_input(MouseClick::new(23, 0), &state),
            Some(AppCommand::OpenDetailAt { row: 0, col: 0 })
        );
        // Below the last row
        assert_eq!(handle_mouse_input(MouseClick::new(23, 4), &state), None);
    }

    #[test]
    fn test_click_outside_modal_closes_it() {
        let mut state = state_with_matrix();
        with_modal(&mut state);

        assert_eq!(
            handle_mouse_input(MouseClick::new(0, 0), &state),
            Some(AppCommand::CloseDetail)
        );
        assert_eq!(handle_mouse_input(MouseClick::new(12, 3), &state), None);
    }
}
