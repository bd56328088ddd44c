use std::cell::RefCell;

use pivotdash_core::matrix::MatrixCell;
use pivotdash_core::Matrix;
use ratatui::{
    layout::Flex,
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use crate::state::{Cursor, DashboardState, LayoutHints};
use crate::ui::{
    components::{empty_state::{self, Notice}, filter_bar},
    layouts, theme, utils,
};

const LABEL_WIDTH: u16 = theme::MATRIX_LABEL_WIDTH;
const COLUMN_WIDTH: u16 = theme::MATRIX_COLUMN_WIDTH;
const SPACING: u16 = theme::TABLE_COLUMN_SPACING;

pub fn render(f: &mut Frame, area: Rect, state: &DashboardState, layout: &RefCell<LayoutHints>) {
    let (filter_area, body_area, status_area) = layouts::content_with_filter(area);

    filter_bar::render_filter_bar(f, filter_area, state);
    render_matrix(f, body_area, state, layout);
    render_status(f, status_area, state);
}

fn render_matrix(
    f: &mut Frame,
    area: Rect,
    state: &DashboardState,
    layout: &RefCell<LayoutHints>,
) {
    let matrix = &state.matrix;

    if state.model.is_none() || matrix.is_empty() {
        // Nothing clickable on screen
        let mut hints = layout.borrow_mut();
        hints.matrix_body = Rect::default();
        hints.visible_cols = 0;
        drop(hints);
        empty_state::render_notice(f, area, "Matrix", Notice::for_dashboard(state));
        return;
    }

    let block = Block::default().borders(Borders::ALL).title(format!(
        " {} ({} x {}) ",
        matrix.view_mode.display_name(),
        matrix.num_rows(),
        matrix.num_cols()
    ));
    let inner = block.inner(area);

    let visible_cols = visible_columns(inner.width, matrix.num_cols());
    let col_offset = column_offset(state.cursor.col, visible_cols);
    let window = col_offset..(col_offset + visible_cols).min(matrix.num_cols());

    let mut header_cells = vec![Cell::from(utils::truncate(
        &matrix.corner_label,
        LABEL_WIDTH as usize,
    ))];
    header_cells.extend(matrix.columns[window.clone()].iter().map(|column| {
        Cell::from(Text::from(utils::truncate(column, COLUMN_WIDTH as usize)).right_aligned())
    }));
    header_cells.push(Cell::from(Text::from("Total").right_aligned()));
    let header = Row::new(header_cells).style(theme::header_style());

    let mut rows: Vec<Row> = matrix
        .rows
        .iter()
        .enumerate()
        .map(|(row_idx, row)| {
            let mut cells = vec![Cell::from(utils::truncate(&row.label, LABEL_WIDTH as usize))];
            cells.extend(
                row.cells[window.clone()]
                    .iter()
                    .enumerate()
                    .map(|(i, cell)| {
                        let selected = state.cursor
                            == Cursor {
                                row: row_idx,
                                col: col_offset + i,
                            };
                        value_cell(cell, selected)
                    }),
            );
            cells.push(total_cell(row.total, &state.number_format));
            Row::new(cells)
        })
        .collect();
    rows.push(totals_row(matrix, window.clone(), &state.number_format));

    let mut widths = vec![Constraint::Length(LABEL_WIDTH)];
    widths.extend(std::iter::repeat_n(Constraint::Length(COLUMN_WIDTH), window.len()));
    widths.push(Constraint::Length(COLUMN_WIDTH));

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(SPACING)
        .flex(Flex::Start)
        .row_highlight_style(theme::row_highlight_style());

    let mut table_state = state.table_state.borrow_mut();
    f.render_stateful_widget(table, area, &mut table_state);

    let modal = layout.borrow().modal;
    *layout.borrow_mut() = LayoutHints {
        // Header takes the first inner line
        matrix_body: Rect::new(
            inner.x,
            inner.y.saturating_add(1),
            inner.width,
            inner.height.saturating_sub(1),
        ),
        row_offset: table_state.offset(),
        col_offset,
        label_width: LABEL_WIDTH,
        col_width: COLUMN_WIDTH,
        col_spacing: SPACING,
        visible_cols: window.len(),
        modal,
    };
}

fn value_cell(cell: &MatrixCell, selected: bool) -> Cell<'static> {
    let style = match cell.value {
        Some(value) => Style::default().fg(theme::value_color(value)),
        None => Style::default().fg(theme::COLOR_ZERO),
    };
    let style = if selected {
        style.patch(theme::selection_style())
    } else {
        style
    };
    Cell::from(Text::from(cell.text.clone()).right_aligned()).style(style)
}

fn total_cell(total: f64, fmt: &pivotdash_core::NumberFormat) -> Cell<'static> {
    Cell::from(Text::from(fmt.format(total)).right_aligned())
        .style(theme::total_style().fg(theme::value_color(total)))
}

fn totals_row(
    matrix: &Matrix,
    window: std::ops::Range<usize>,
    fmt: &pivotdash_core::NumberFormat,
) -> Row<'static> {
    let mut cells = vec![Cell::from("Total")];
    cells.extend(
        matrix.column_totals[window]
            .iter()
            .map(|total| total_cell(*total, fmt)),
    );
    cells.push(total_cell(matrix.grand_total, fmt));
    Row::new(cells).style(theme::total_style())
}

fn render_status(f: &mut Frame, area: Rect, state: &DashboardState) {
    let text = match &state.status {
        Some(status) => status.clone(),
        None => match state.selected_cell() {
            Some(cell) if !cell.is_empty() => format!("Selected: {}", cell.text),
            _ => String::new(),
        },
    };
    f.render_widget(
        Paragraph::new(Span::styled(text, theme::loading_style())),
        area,
    );
}

/// Value columns that fit next to the label and total columns
fn visible_columns(width: u16, num_cols: usize) -> usize {
    let stride = COLUMN_WIDTH + SPACING;
    let slots = (width.saturating_sub(LABEL_WIDTH) / stride) as usize;
    // One slot goes to the total column
    slots.saturating_sub(1).max(1).min(num_cols)
}

/// First visible value column, scrolled just enough to show the cursor
fn column_offset(cursor_col: usize, visible_cols: usize) -> usize {
    if visible_cols == 0 || cursor_col < visible_cols {
        0
    } else {
        cursor_col + 1 - visible_cols
    }
}
