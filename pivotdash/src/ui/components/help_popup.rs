use ratatui::{
    prelude::*,
    widgets::{List, ListItem},
    Frame,
};

use super::popup::Popup;
use crate::state::Tab;
use crate::ui::{layouts, theme};

pub fn render_help_popup(f: &mut Frame, tab: Tab, detail_open: bool) {
    let help_items = get_help_items(tab, detail_open);

    let (_, inner) = Popup::new(" Help (press ? or Esc to close) ")
        .border_style(theme::accent_border_style())
        .render_centered(f, f.area(), layouts::popup_sizes::LARGE);

    let items: Vec<ListItem> = help_items
        .iter()
        .map(|(key, description)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:15}", key), theme::header_style()),
                Span::raw(*description),
            ]))
        })
        .collect();

    let list = List::new(items).style(Style::default().fg(Color::White));

    f.render_widget(list, inner);
}

fn get_help_items(tab: Tab, detail_open: bool) -> Vec<(&'static str, &'static str)> {
    let mut items = vec![];

    if detail_open {
        items.push(("t/Tab", "Switch between table and chart"));
        items.push(("Esc/x", "Close detail"));
        items.push(("Click outside", "Close detail"));
        items.push(("", ""));
    }

    match tab {
        Tab::Dashboard => {
            items.push(("↑/k ↓/j", "Move between rows"));
            items.push(("←/h →/l", "Move between columns"));
            items.push(("g then g", "Jump to first row"));
            items.push(("G", "Jump to last row"));
            items.push(("Enter/click", "Open cell detail table"));
            items.push(("c", "Open cell detail chart"));
            items.push(("p/P", "Next/previous period"));
            items.push(("o/O", "Next/previous project"));
            items.push(("v", "Cycle matrix view"));
            items.push(("+/-", "Show more/fewer rows"));
            items.push(("> / <", "Show more/fewer columns"));
            items.push(("e", "Export matrix to CSV"));
            items.push(("r", "Reload payload"));
        }
        Tab::Summary => {
            items.push(("o/O", "Next/previous project"));
            items.push(("r", "Reload payload"));
        }
        Tab::Logs => {
            items.push(("↑/k", "Scroll up (older logs)"));
            items.push(("↓/j", "Scroll down (newer logs)"));
            items.push(("Page Up", "Scroll up one page"));
            items.push(("Page Down", "Scroll down one page"));
            items.push(("g then g", "Scroll to oldest logs"));
            items.push(("G", "Scroll to newest logs"));
        }
    }

    // Global help
    items.push(("", ""));
    items.push(("--- Global ---", ""));
    items.push(("Tab/Shift+Tab", "Next/previous tab"));
    items.push(("1/2/3", "Go to dashboard/summary/logs"));
    items.push(("g then d", "Go to dashboard"));
    items.push(("g then s", "Go to summary"));
    items.push(("g then l", "Go to logs"));
    items.push(("?", "Toggle this help"));
    items.push(("q", "Quit application"));

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_keys_listed_first_when_open() {
        let items = get_help_items(Tab::Dashboard, true);
        assert_eq!(items[0].0, "t/Tab");

        let items = get_help_items(Tab::Dashboard, false);
        assert!(items.iter().all(|(key, _)| *key != "t/Tab"));
    }
}
