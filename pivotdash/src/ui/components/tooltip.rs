use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::popup::Popup;
use crate::state::TooltipContent;
use crate::ui::{layouts, theme};

/// Draw the tooltip next to `anchor`, clipped to `bounds`
pub fn render_tooltip(f: &mut Frame, anchor: Rect, bounds: Rect, content: &TooltipContent) {
    let lines = tooltip_lines(content);
    // Borders plus one line per entry
    let height = (lines.len() as u16 + 2).min(theme::TOOLTIP_MAX_HEIGHT);
    let area = layouts::anchored_box(anchor, theme::TOOLTIP_WIDTH, height, bounds);
    if area.width < 3 || area.height < 3 {
        return;
    }

    let inner = Popup::new(Span::styled(
        format!(" {} ", content.title),
        theme::header_style(),
    ))
    .title_alignment(Alignment::Left)
    .render_at(f, area);

    f.render_widget(Paragraph::new(lines), inner);
}

fn tooltip_lines(content: &TooltipContent) -> Vec<Line<'static>> {
    let mut lines: Vec<Line> = content
        .lines
        .iter()
        .map(|line| Line::from(Span::raw(line.clone())))
        .collect();

    if let Some(trend) = &content.trend {
        let color = if trend.positive {
            theme::COLOR_POSITIVE
        } else {
            theme::COLOR_NEGATIVE
        };
        lines.push(Line::from(vec![
            Span::raw("Trend: "),
            Span::styled(trend.glyphs.clone(), Style::default().fg(color)),
        ]));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pivotdash_core::Trend;

    #[test]
    fn test_trend_line_appended_in_sign_color() {
        let content = TooltipContent {
            title: "Sales / 2023-Q2".into(),
            lines: vec!["Value: 110".into()],
            trend: Some(Trend {
                glyphs: "▁▄▇".into(),
                positive: false,
            }),
        };

        let lines = tooltip_lines(&content);
        assert_eq!(lines.len(), 2);
        let trend = &lines[1].spans[1];
        assert_eq!(trend.content, "▁▄▇");
        assert_eq!(trend.style.fg, Some(theme::COLOR_NEGATIVE));
    }

    #[test]
    fn test_no_trend_line_without_history() {
        let content = TooltipContent {
            title: "Sales / 2023-Q2".into(),
            lines: vec!["Value: 110".into()],
            trend: None,
        };
        assert_eq!(tooltip_lines(&content).len(), 1);
    }
}
