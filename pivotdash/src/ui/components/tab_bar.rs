use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Tabs},
    Frame,
};

use crate::state::Tab;
use crate::ui::theme;

pub fn render_tab_bar(f: &mut Frame, area: Rect, active: Tab) {
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(idx, tab)| {
            let content = format!("[{}] {}", idx + 1, tab.name());
            if *tab == active {
                Line::from(Span::styled(content, theme::header_style()))
            } else {
                Line::from(Span::styled(content, Style::default().fg(Color::Gray)))
            }
        })
        .collect();

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::BOTTOM))
        .select(active.index())
        .highlight_style(theme::header_style());

    f.render_widget(tabs, area);
}
