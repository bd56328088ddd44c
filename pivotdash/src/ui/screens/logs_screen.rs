use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Row, Table},
};

use crate::log_buffer::{LogBuffer, LogEntry};
use crate::state::LogsState;
use crate::ui::{
    components::empty_state::{self, Notice},
    theme, utils,
};

const TARGET_WIDTH: usize = 25;
/// Borders, header row and its margin
const CHROME_HEIGHT: u16 = 4;

pub fn render(f: &mut Frame, area: Rect, state: &LogsState, log_buffer: &LogBuffer) {
    let total = log_buffer.len();
    if total == 0 {
        empty_state::render_notice(f, area, "Session Logs", Notice::NoLogs);
        return;
    }

    let (start, end) = visible_range(
        total,
        state.scroll_offset,
        area.height.saturating_sub(CHROME_HEIGHT) as usize,
    );
    let rows: Vec<Row> = log_buffer.window(start, end).into_iter().map(log_row).collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Length(5),
        Constraint::Length(TARGET_WIDTH as u16),
        Constraint::Min(30),
    ];
    let header = Row::new(["Time", "Level", "Target", "Message"])
        .style(theme::header_style())
        .bottom_margin(1);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Logs [{}-{} of {}] ", start + 1, end, total));

    f.render_widget(Table::new(rows, widths).header(header).block(block), area);
}

fn log_row(entry: LogEntry) -> Row<'static> {
    Row::new([
        entry.timestamp.format("%H:%M:%S%.3f").to_string(),
        format!("{:<5}", entry.level.as_str()),
        utils::truncate_target(&entry.target, TARGET_WIDTH),
        entry.message,
    ])
    .style(theme::log_level_style(entry.level))
}

/// Window of `height` entries ending `scroll_offset` entries before the
/// newest one
fn visible_range(total: usize, scroll_offset: usize, height: usize) -> (usize, usize) {
    let end = total.saturating_sub(scroll_offset);
    (end.saturating_sub(height), end)
}
