//! Bordered overlay drawn over whatever is underneath it.

use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::Span,
    widgets::{Block, Borders, Clear},
    Frame,
};

use crate::ui::{layouts, theme};

pub struct Popup<'a> {
    title: Span<'a>,
    border_style: Style,
    alignment: Alignment,
}

impl<'a> Popup<'a> {
    pub fn new(title: impl Into<Span<'a>>) -> Self {
        Self {
            title: title.into(),
            border_style: theme::info_border_style(),
            alignment: Alignment::Center,
        }
    }

    pub fn border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }

    pub fn title_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Draw centered in `parent` at `size` percent; returns (outer, inner)
    pub fn render_centered(self, f: &mut Frame, parent: Rect, size: (u16, u16)) -> (Rect, Rect) {
        let area = layouts::centered_popup(size.0, size.1, parent);
        let inner = self.render_at(f, area);
        (area, inner)
    }

    /// Draw over exactly `area`; returns the area inside the border
    pub fn render_at(self, f: &mut Frame, area: Rect) -> Rect {
        let block = Block::default()
            .title(self.title)
            .title_alignment(self.alignment)
            .borders(Borders::ALL)
            .border_style(self.border_style);
        let inner = block.inner(area);

        f.render_widget(Clear, area);
        f.render_widget(block, area);
        inner
    }
}
