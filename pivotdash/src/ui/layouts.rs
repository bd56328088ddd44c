//! Reusable layout builders for consistent screen structure.
//!
//! These functions provide standard layouts that all screens should use
//! to ensure consistent margins, spacing, and element positioning.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::theme::{
    FILTER_BAR_HEIGHT, HELP_BAR_HEIGHT, SCREEN_MARGIN, STATUS_INDICATOR_WIDTH, TAB_BAR_HEIGHT,
    TITLE_HEIGHT,
};

/// Application frame with title, tab bar, content area, and help bar.
///
/// Returns a tuple of (title_area, tabs_area, content_area, help_area)
pub fn app_layout(area: Rect) -> (Rect, Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(SCREEN_MARGIN)
        .constraints([
            Constraint::Length(TITLE_HEIGHT),
            Constraint::Length(TAB_BAR_HEIGHT),
            Constraint::Min(6),
            Constraint::Length(HELP_BAR_HEIGHT),
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2], chunks[3])
}

/// Content area with a filter bar and a status line around the main body.
///
/// Returns a tuple of (filter_area, body_area, status_area)
pub fn content_with_filter(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FILTER_BAR_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Split a title area into title text and the status indicator.
///
/// Returns (title_text_area, indicator_area)
pub fn title_with_status(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(STATUS_INDICATOR_WIDTH)])
        .split(area);

    (chunks[0], chunks[1])
}

/// Create a centered popup rectangle.
///
/// # Arguments
/// * `percent_x` - Width as percentage of parent (0-100)
/// * `percent_y` - Height as percentage of parent (0-100)
/// * `area` - The parent area to center within
pub fn centered_popup(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Rectangle of `width` x `height` placed next to `anchor`, kept inside
/// `bounds`. Prefers the right of and below the anchor.
pub fn anchored_box(anchor: Rect, width: u16, height: u16, bounds: Rect) -> Rect {
    let width = width.min(bounds.width);
    let height = height.min(bounds.height);

    let right_edge = bounds.x + bounds.width;
    let bottom_edge = bounds.y + bounds.height;

    let x = if anchor.x + anchor.width + width <= right_edge {
        anchor.x + anchor.width
    } else {
        anchor.x.saturating_sub(width).max(bounds.x)
    };
    let y = if anchor.y + 1 + height <= bottom_edge {
        anchor.y + 1
    } else {
        bottom_edge.saturating_sub(height).max(bounds.y)
    };

    Rect::new(x, y, width, height)
}

/// Standard popup sizes
pub mod popup_sizes {
    /// Detail modal (80% x 70%)
    pub const DETAIL: (u16, u16) = (80, 70);

    /// Large popup (80% x 80%) - for help screens
    pub const LARGE: (u16, u16) = (80, 80);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchored_box_prefers_right_and_below() {
        let bounds = Rect::new(0, 0, 100, 40);
        let anchor = Rect::new(10, 5, 12, 1);

        assert_eq!(anchored_box(anchor, 30, 6, bounds), Rect::new(22, 6, 30, 6));
    }

    #[test]
    fn test_anchored_box_flips_at_edges() {
        let bounds = Rect::new(0, 0, 100, 40);
        let anchor = Rect::new(80, 37, 12, 1);

        let area = anchored_box(anchor, 30, 6, bounds);
        assert_eq!(area.x, 50);
        assert_eq!(area.y, 34);
    }
}
