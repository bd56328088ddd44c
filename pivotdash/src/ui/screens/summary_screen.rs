use pivotdash_core::summary::SummaryLine;
use pivotdash_core::NumberFormat;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use crate::state::DashboardState;
use crate::ui::{
    components::empty_state::{self, Notice},
    theme, utils,
};

pub fn render(f: &mut Frame, area: Rect, state: &DashboardState) {
    if state.model.is_none() {
        empty_state::render_notice(f, area, "Summary", Notice::for_dashboard(state));
        return;
    }

    let summary = state.summary();
    let fmt = &state.number_format;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    let header = Line::from(vec![
        Span::styled("Project: ", theme::help_text_style()),
        Span::raw(state.project.label().to_string()),
        Span::raw("  "),
        Span::styled("Cells: ", theme::help_text_style()),
        Span::raw(summary.cells.to_string()),
        Span::raw("  "),
        Span::styled("Total: ", theme::help_text_style()),
        Span::styled(fmt.format(summary.grand_total()), theme::total_style()),
    ]);
    f.render_widget(Paragraph::new(header), chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    render_lines(f, columns[0], "By category", &summary.categories, fmt);
    render_lines(f, columns[1], "By subcategory", &summary.subcategories, fmt);
}

fn render_lines(f: &mut Frame, area: Rect, title: &str, lines: &[SummaryLine], fmt: &NumberFormat) {
    if lines.is_empty() {
        empty_state::render_notice(f, area, title, Notice::NoCells);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Name"),
        Cell::from(Text::from("Total").right_aligned()),
        Cell::from(Text::from("Cells").right_aligned()),
    ])
    .style(theme::header_style())
    .underlined();

    let rows: Vec<Row> = lines
        .iter()
        .map(|line| {
            Row::new(vec![
                Cell::from(utils::truncate(&line.label, 32)),
                Cell::from(Text::from(fmt.format(line.total)).right_aligned()),
                Cell::from(Text::from(line.cells.to_string()).right_aligned()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(50),
            Constraint::Percentage(30),
            Constraint::Percentage(20),
        ],
    )
    .header(header)
    .column_spacing(theme::TABLE_COLUMN_SPACING)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", title)),
    );

    f.render_widget(table, area);
}
