use pivotdash_core::detail::{DetailTable, DetailView, INSUFFICIENT_DATA};
use pivotdash_core::NumberFormat;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

use crate::state::DetailModal;
use crate::ui::components::{detail_chart, help_bar, popup::Popup};
use crate::ui::{layouts, theme, utils};

const VALUE_COLUMN: usize = 1;

/// Draw the drill-down modal over `parent_area` and return its outer area
pub fn render_detail_modal(
    f: &mut Frame,
    parent_area: Rect,
    modal: &DetailModal,
    fmt: &NumberFormat,
) -> Rect {
    let title = modal.title();
    let (area, inner) = Popup::new(title.as_str()).render_centered(
        f,
        parent_area,
        layouts::popup_sizes::DETAIL,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(inner);

    match &modal.view {
        DetailView::Table(table) => render_table(f, chunks[0], table, fmt),
        DetailView::Chart(chart) => detail_chart::render(f, chunks[0], chart, fmt),
        DetailView::InsufficientData => {
            let message = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(INSUFFICIENT_DATA, theme::loading_style())),
            ])
            .alignment(Alignment::Center);
            f.render_widget(message, chunks[0]);
        }
    }

    let help = Paragraph::new(help_bar::hint_line(help_bar::DETAIL_HINTS))
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[1]);

    area
}

fn render_table(f: &mut Frame, area: Rect, table: &DetailTable, fmt: &NumberFormat) {
    let comparative = utils::comparative_lines(table.comparative.as_ref(), fmt);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(2),
            Constraint::Length(comparative.len() as u16),
        ])
        .split(area);

    let header = Row::new(table.headers.iter().enumerate().map(|(i, h)| {
        if i == 0 {
            Cell::from(*h)
        } else {
            Cell::from(Text::from(*h).right_aligned())
        }
    }))
    .style(theme::header_style())
    .underlined();

    let rows: Vec<Row> = table
        .rows
        .iter()
        .map(|row| {
            Row::new(row.cells.iter().enumerate().map(|(i, text)| match i {
                0 => Cell::from(text.clone()),
                VALUE_COLUMN => Cell::from(Text::from(text.clone()).right_aligned())
                    .style(value_cell_style(row.value)),
                _ => Cell::from(Text::from(text.clone()).right_aligned()),
            }))
        })
        .collect();

    let widths: Vec<Constraint> = table
        .headers
        .iter()
        .enumerate()
        .map(|(i, _)| {
            if i == 0 {
                Constraint::Min(12)
            } else {
                Constraint::Length(theme::MATRIX_COLUMN_WIDTH)
            }
        })
        .collect();

    let widget = Table::new(rows, widths)
        .header(header)
        .column_spacing(theme::TABLE_COLUMN_SPACING);

    f.render_widget(widget, chunks[0]);

    if !comparative.is_empty() {
        f.render_widget(Paragraph::new(comparative), chunks[1]);
    }
}

fn value_cell_style(value: f64) -> Style {
    Style::default().fg(theme::value_color(value))
}
