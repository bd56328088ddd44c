use std::path::PathBuf;
use std::time::Instant;

use pivotdash_core::detail::DetailMode;
use throbber_widgets_tui::ThrobberState;

use crate::background::{loader, loader::DataLoader, BackgroundTaskManager, TaskId};
use crate::events::{AppCommand, DataEvent};
use crate::state::{reducer, AppState, Cursor, LoadingState, Tab};

const LOG_PAGE_SIZE: usize = 20;

/// Execute a command, spawning background tasks for file IO
pub fn execute_command(
    command: AppCommand,
    state: &mut AppState,
    task_manager: &mut BackgroundTaskManager,
    data_loader: &DataLoader,
) {
    let is_setting_pending_key = matches!(command, AppCommand::SetPendingKey(_));

    match command {
        AppCommand::LoadPayload { path } => {
            spawn_payload_load(path, state, task_manager, data_loader);
        }

        AppCommand::ReloadPayload => match state.dashboard.source.clone() {
            Some(path) => spawn_payload_load(path, state, task_manager, data_loader),
            None => no_source(state),
        },

        AppCommand::ExportMatrix => {
            if let Some(path) = prepare_export(state) {
                let matrix = state.dashboard.matrix.clone();
                let data_loader = data_loader.clone();
                task_manager.spawn_task(TaskId::Export, async move {
                    data_loader.export_matrix(matrix, path).await;
                });
            }
        }

        other => execute_command_sync(other, state),
    }

    if !is_setting_pending_key {
        state.pending_key = None;
    }
}

fn spawn_payload_load(
    path: PathBuf,
    state: &mut AppState,
    task_manager: &mut BackgroundTaskManager,
    data_loader: &DataLoader,
) {
    state.dashboard.loading = LoadingState::Loading(ThrobberState::default());
    state.dashboard.source = Some(path.clone());

    let data_loader = data_loader.clone();
    task_manager.spawn_task(TaskId::LoadPayload, async move {
        data_loader.load_payload(path).await;
    });
}

fn no_source(state: &mut AppState) {
    tracing::warn!("Reload requested without a payload path");
    state.dashboard.status = Some("No payload file configured (use --payload)".to_string());
}

/// Path for a new export, or None when there is nothing to write
fn prepare_export(state: &mut AppState) -> Option<PathBuf> {
    if state.dashboard.matrix.is_empty() {
        state.dashboard.status = Some("Nothing to export".to_string());
        return None;
    }
    let path = loader::export_path(&state.export_dir);
    tracing::info!("Exporting matrix to {}", path.display());
    state.dashboard.status = Some(format!("Exporting to {}...", path.display()));
    Some(path)
}

/// Execute a command synchronously without spawning tasks
///
/// File IO runs inline and its result goes straight through the reducer.
/// Used by tests and by the production executor for pure state updates.
pub fn execute_command_sync(command: AppCommand, state: &mut AppState) {
    let is_setting_pending_key = matches!(command, AppCommand::SetPendingKey(_));

    match command {
        // Simple state updates
        AppCommand::Quit => state.should_quit = true,
        AppCommand::ToggleHelp => state.help_visible = !state.help_visible,
        AppCommand::SetPendingKey(c) => state.pending_key = Some(c),
        AppCommand::ClearPendingKey => state.pending_key = None,

        // Data
        AppCommand::LoadPayload { path } => {
            let event = loader::load_blocking(&path);
            reducer::reduce_data_event(state, event);
        }
        AppCommand::ReloadPayload => match state.dashboard.source.clone() {
            Some(path) => reducer::reduce_data_event(state, loader::load_blocking(&path)),
            None => no_source(state),
        },
        AppCommand::ExportMatrix => {
            if let Some(path) = prepare_export(state) {
                let rows = state.dashboard.matrix.num_rows();
                let event = match loader::export_blocking(&state.dashboard.matrix, &path) {
                    Ok(()) => DataEvent::ExportFinished { path, rows },
                    Err(error) => DataEvent::ExportFailed { error },
                };
                reducer::reduce_data_event(state, event);
            }
        }

        // Cursor
        AppCommand::SelectNext => {
            let rows = state.dashboard.matrix.num_rows();
            if rows > 0 {
                let cursor = &mut state.dashboard.cursor;
                cursor.row = if cursor.row + 1 >= rows {
                    0
                } else {
                    cursor.row + 1
                };
                cursor_moved(state);
            }
        }
        AppCommand::SelectPrevious => {
            let rows = state.dashboard.matrix.num_rows();
            if rows > 0 {
                let cursor = &mut state.dashboard.cursor;
                cursor.row = if cursor.row == 0 {
                    rows - 1
                } else {
                    cursor.row - 1
                };
                cursor_moved(state);
            }
        }
        AppCommand::SelectLeft => {
            let cursor = &mut state.dashboard.cursor;
            cursor.col = cursor.col.saturating_sub(1);
            cursor_moved(state);
        }
        AppCommand::SelectRight => {
            let cols = state.dashboard.matrix.num_cols();
            let cursor = &mut state.dashboard.cursor;
            if cursor.col + 1 < cols {
                cursor.col += 1;
            }
            cursor_moved(state);
        }
        AppCommand::NavigateToTop => {
            state.dashboard.cursor.row = 0;
            cursor_moved(state);
        }
        AppCommand::NavigateToBottom => {
            state.dashboard.cursor.row = state.dashboard.matrix.num_rows().saturating_sub(1);
            cursor_moved(state);
        }

        // Tabs
        AppCommand::NextTab => {
            let tab = state.active_tab.next();
            switch_tab(state, tab);
        }
        AppCommand::PreviousTab => {
            let tab = state.active_tab.previous();
            switch_tab(state, tab);
        }
        AppCommand::SwitchTab(tab) => switch_tab(state, tab),

        // Filters and view
        AppCommand::CyclePeriod { forward } => {
            let dashboard = &mut state.dashboard;
            dashboard.period = dashboard.period.cycle(dashboard.periods(), forward);
            tracing::debug!("Period filter: {}", dashboard.period.label());
            matrix_changed(state);
        }
        AppCommand::CycleProject { forward } => {
            let dashboard = &mut state.dashboard;
            if !dashboard.has_projects() {
                dashboard.status = Some("Payload has no projects".to_string());
            } else {
                dashboard.project = dashboard.project.cycle(dashboard.projects(), forward);
                tracing::debug!("Project filter: {}", dashboard.project.label());
                matrix_changed(state);
            }
        }
        AppCommand::CycleViewMode => {
            let dashboard = &mut state.dashboard;
            dashboard.view_mode = dashboard.view_mode.next(dashboard.has_projects());
            dashboard.cursor = Cursor::default();
            tracing::debug!("View mode: {:?}", dashboard.view_mode);
            matrix_changed(state);
        }
        AppCommand::AdjustMaxRows { delta } => {
            let dashboard = &mut state.dashboard;
            dashboard.max_rows = adjust_cap(dashboard.max_rows, delta, dashboard.matrix.num_rows());
            dashboard.status = Some(format!("Showing up to {} rows", dashboard.max_rows));
            matrix_changed(state);
        }
        AppCommand::AdjustMaxCols { delta } => {
            let dashboard = &mut state.dashboard;
            dashboard.max_cols = adjust_cap(dashboard.max_cols, delta, dashboard.matrix.num_cols());
            dashboard.status = Some(format!("Showing up to {} columns", dashboard.max_cols));
            matrix_changed(state);
        }

        // Drill-down
        AppCommand::OpenDetail { mode } => open_detail(state, mode),
        AppCommand::OpenDetailAt { row, col } => {
            if state.dashboard.matrix.cell(row, col).is_some() {
                state.dashboard.cursor = Cursor { row, col };
                cursor_moved(state);
                open_detail(state, DetailMode::Table);
            }
        }
        AppCommand::ToggleDetailMode => state.dashboard.toggle_detail_mode(),
        AppCommand::CloseDetail => state.dashboard.detail = None,

        // Logs
        AppCommand::ScrollLogsUp => {
            let logs = &mut state.logs;
            // Scroll up means going back in time (increase offset)
            if logs.scroll_offset < logs.total_entries.saturating_sub(1) {
                logs.scroll_offset += 1;
            }
        }
        AppCommand::ScrollLogsDown => {
            state.logs.scroll_offset = state.logs.scroll_offset.saturating_sub(1);
        }
        AppCommand::ScrollLogsPageUp => {
            let logs = &mut state.logs;
            logs.scroll_offset =
                (logs.scroll_offset + LOG_PAGE_SIZE).min(logs.total_entries.saturating_sub(1));
        }
        AppCommand::ScrollLogsPageDown => {
            state.logs.scroll_offset = state.logs.scroll_offset.saturating_sub(LOG_PAGE_SIZE);
        }
        AppCommand::ScrollLogsToTop => {
            state.logs.scroll_offset = state.logs.total_entries.saturating_sub(1);
        }
        AppCommand::ScrollLogsToBottom => state.logs.scroll_offset = 0,
    }

    if !is_setting_pending_key {
        state.pending_key = None;
    }
}

fn open_detail(state: &mut AppState, mode: DetailMode) {
    if state.dashboard.open_detail(mode) {
        state.dashboard.tooltip.clear();
    } else {
        // Nothing behind this cell
        tracing::debug!(
            "No cell data at row {} col {}",
            state.dashboard.cursor.row,
            state.dashboard.cursor.col
        );
    }
}

fn switch_tab(state: &mut AppState, tab: Tab) {
    if tab != Tab::Dashboard {
        state.dashboard.tooltip.clear();
    }
    state.active_tab = tab;
}

fn matrix_changed(state: &mut AppState) {
    state.dashboard.rebuild_matrix();
    refresh_tooltip(state, Instant::now());
}

fn cursor_moved(state: &mut AppState) {
    state.dashboard.clamp_cursor();
    refresh_tooltip(state, Instant::now());
}

/// Show the tooltip for a populated cell, otherwise schedule it to hide
pub fn refresh_tooltip(state: &mut AppState, now: Instant) {
    match state.dashboard.tooltip_content() {
        Some(content) => state.dashboard.tooltip.show(content),
        None => state.dashboard.tooltip.request_hide(now),
    }
}

/// New row/column cap after a +/- step. An unlimited cap (0) steps from
/// the current size; caps never drop below one.
fn adjust_cap(current: usize, delta: i64, visible: usize) -> usize {
    let base = if current == 0 { visible } else { current };
    (base as i64 + delta).max(1) as usize
}
